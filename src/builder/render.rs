//! State threaded through one save
//!
//! Every save starts from a fresh context, so rendering twice produces the
//! same document and media names.

use crate::builder::DocOptions;
use crate::document::{Body, Paragraph};
use crate::media::ImageInfo;
use crate::opc::{rel_types, well_known, Part, Relationships};

pub(crate) struct RenderContext<'a> {
    pub options: &'a DocOptions,
    pub body: Body,
    /// Relationships of the main document part
    pub rels: Relationships,
    /// Image parts collected while rendering
    pub media: Vec<Part>,
    next_drawing_id: u32,
    next_bookmark_id: u32,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a DocOptions) -> Self {
        RenderContext {
            options,
            body: Body::default(),
            rels: Relationships::new(),
            media: Vec::new(),
            next_drawing_id: 1,
            next_bookmark_id: 0,
        }
    }

    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.body.add_paragraph(para);
    }

    /// Add an image part and return the relationship ID pointing at it
    pub fn embed_image(&mut self, bytes: Vec<u8>, info: &ImageInfo) -> String {
        let uri = well_known::media(self.media.len() + 1, info.extension);
        let target = uri.relative_to(&well_known::document());
        let rel_id = self.rels.add(rel_types::IMAGE, &target);
        log::debug!("embed {} as {}", uri, rel_id);
        self.media.push(Part::new(uri, info.content_type, bytes));
        rel_id
    }

    /// Next `wp:docPr` ID
    pub fn next_drawing_id(&mut self) -> u32 {
        let id = self.next_drawing_id;
        self.next_drawing_id += 1;
        id
    }

    /// Next bookmark ID and name; the first is `_GoBack`
    pub fn next_bookmark(&mut self) -> (String, String) {
        let id = self.next_bookmark_id;
        self.next_bookmark_id += 1;
        let name = match id {
            0 => "_GoBack".to_string(),
            n => format!("_GoBack{}", n),
        };
        (id.to_string(), name)
    }
}
