//! Document-wide settings

use crate::media::MAX_WIDTH_EMU;

/// Settings shared by every part of a [`WordDoc`](super::WordDoc)
#[derive(Clone, Debug)]
pub struct DocOptions {
    /// Comment author
    pub author: String,
    /// Comment author initials
    pub initials: String,
    /// Heading style IDs for chapters, sections, subsections and
    /// sub-subsections
    pub heading_styles: [String; 4],
    /// Style of text paragraphs
    pub body_style: String,
    /// Style of figure paragraphs
    pub figure_style: String,
    /// Style of the paragraph inside each table cell
    pub cell_style: String,
    /// Table style (`w:tblStyle`), if any
    pub table_style: Option<String>,
    /// Widest a figure may be, in EMU
    pub max_figure_width: u64,
    /// Install the built-in list definitions
    pub default_numbering: bool,
    /// Install the built-in styles part
    pub default_styles: bool,
}

impl Default for DocOptions {
    fn default() -> Self {
        DocOptions {
            author: String::new(),
            initials: String::new(),
            heading_styles: [
                "Heading1".into(),
                "Heading2".into(),
                "Heading3".into(),
                "Heading4".into(),
            ],
            body_style: "Normal".into(),
            figure_style: "Normal".into(),
            cell_style: "Normal".into(),
            table_style: None,
            max_figure_width: MAX_WIDTH_EMU,
            default_numbering: true,
            default_styles: true,
        }
    }
}

impl DocOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = initials.into();
        self
    }

    /// Set the heading style for a nesting depth (0 = chapter); deeper
    /// depths are ignored
    pub fn heading_style(mut self, depth: usize, style: impl Into<String>) -> Self {
        if let Some(slot) = self.heading_styles.get_mut(depth) {
            *slot = style.into();
        }
        self
    }

    pub fn body_style(mut self, style: impl Into<String>) -> Self {
        self.body_style = style.into();
        self
    }

    pub fn figure_style(mut self, style: impl Into<String>) -> Self {
        self.figure_style = style.into();
        self
    }

    pub fn cell_style(mut self, style: impl Into<String>) -> Self {
        self.cell_style = style.into();
        self
    }

    pub fn table_style(mut self, style: impl Into<String>) -> Self {
        self.table_style = Some(style.into());
        self
    }

    /// Set the maximum figure width in EMU
    pub fn max_figure_width(mut self, emu: u64) -> Self {
        self.max_figure_width = emu;
        self
    }

    pub fn default_numbering(mut self, install: bool) -> Self {
        self.default_numbering = install;
        self
    }

    pub fn default_styles(mut self, install: bool) -> Self {
        self.default_styles = install;
        self
    }
}
