//! WordprocessingML elements the builder emits

mod body;
mod comments;
mod drawing;
pub mod numbering;
mod paragraph;
mod run;
mod styles;
mod table;

pub use body::{BlockContent, Body, HeaderReference, PageMargins, PageSize, SectionProperties};
pub use comments::{Comment, Comments};
pub use drawing::Drawing;
pub use numbering::{AbstractNum, Level, LevelFonts, Num, NumberFormat, Numbering};
pub use paragraph::{Indentation, Paragraph, ParagraphContent, ParagraphProperties};
pub use run::{BreakType, Run, RunContent, RunProperties};
pub use styles::{Style, StyleParagraphProperties, StyleType, Styles};
pub use table::{
    Border, Table, TableBorders, TableCell, TableCellProperties, TableProperties, TableRow,
};

use crate::error::Result;
use crate::xml;

/// Content of `document.xml` for `body`
pub fn serialize_document_xml(body: &Body) -> Result<String> {
    xml::write_part("w:document", &xml::DOCUMENT_NAMESPACES, |writer| body.write_to(writer))
}
