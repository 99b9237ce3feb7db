//! Pictures placed in their own paragraph

use crate::builder::list::ListPosition;
use crate::builder::render::RenderContext;
use crate::document::{
    Drawing, Indentation, Paragraph, ParagraphContent, Run, RunContent, RunProperties,
};
use crate::error::{Error, Result};
use crate::media::ImageInfo;
use std::path::PathBuf;

#[derive(Clone, Debug)]
enum Source {
    File(PathBuf),
    Bytes { name: String, data: Vec<u8> },
}

/// A centred picture scaled from its natural size
///
/// The image is only read when the document is saved. A figure that
/// cannot be read or decoded is logged and left out.
#[derive(Clone, Debug)]
pub struct Figure {
    source: Source,
    scale: f64,
    style: Option<String>,
    list: Option<ListPosition>,
}

impl Figure {
    /// Picture from an image file; `scale` 1.0 is the size its resolution implies
    pub fn new(path: impl Into<PathBuf>, scale: f64) -> Self {
        Figure {
            source: Source::File(path.into()),
            scale,
            style: None,
            list: None,
        }
    }

    /// Picture from encoded image bytes
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>, scale: f64) -> Self {
        Figure {
            source: Source::Bytes {
                name: name.into(),
                data,
            },
            scale,
            style: None,
            list: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn numbered(mut self, position: Option<ListPosition>) -> Self {
        self.list = position;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn list_position(&self) -> Option<ListPosition> {
        self.list
    }

    fn name(&self) -> String {
        match &self.source {
            Source::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Source::Bytes { name, .. } => name.clone(),
        }
    }

    fn load(&self) -> Result<Vec<u8>> {
        match &self.source {
            Source::File(path) => Ok(std::fs::read(path)?),
            Source::Bytes { data, .. } => Ok(data.clone()),
        }
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        if let Err(e) = self.try_render(ctx) {
            log::warn!("skipping figure {:?}: {}", self.name(), e);
        }
    }

    fn try_render(&self, ctx: &mut RenderContext) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::InvalidDocument(format!(
                "figure scale must be positive, got {}",
                self.scale
            )));
        }

        let bytes = self.load()?;
        let info = ImageInfo::probe(&bytes)?;
        let (cx, cy) = info.extent_emu(self.scale, ctx.options.max_figure_width);
        log::debug!(
            "figure {:?}: {}x{} px at {:.0} dpi -> {}x{} EMU",
            self.name(),
            info.width_px,
            info.height_px,
            info.dpi_x,
            cx,
            cy
        );

        let rel_id = ctx.embed_image(bytes, &info);
        let mut drawing = Drawing::new(rel_id, cx, cy, ctx.next_drawing_id());
        drawing.file_name = self.name();

        let style = self.style.as_deref().unwrap_or(&ctx.options.figure_style);
        let mut para = Paragraph::with_style(style);
        if let Some(pos) = self.list {
            para.set_numbering(pos.num_id, pos.level as u32);
        }
        para.properties_mut().indentation = Some(Indentation {
            hanging: Some(0),
            ..Default::default()
        });
        para.set_justification("center");

        let (bookmark_id, bookmark_name) = ctx.next_bookmark();
        para.push(ParagraphContent::BookmarkStart {
            id: bookmark_id.clone(),
            name: bookmark_name,
        });
        let mut run = Run::from_content(RunContent::Drawing(Box::new(drawing)));
        run.properties = Some(RunProperties {
            no_proof: Some(true),
            ..Default::default()
        });
        para.add_run(run);
        para.push(ParagraphContent::BookmarkEnd { id: bookmark_id });

        ctx.add_paragraph(para);
        Ok(())
    }
}
