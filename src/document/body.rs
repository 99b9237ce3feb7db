//! `w:body` and the section it ends with

use crate::document::{Paragraph, Table};
use crate::error::Result;
use crate::xml::write_empty;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

#[derive(Clone, Debug)]
pub enum BlockContent {
    Paragraph(Paragraph),
    Table(Table),
}

/// Blocks in reading order, then the section properties
#[derive(Clone, Debug, Default)]
pub struct Body {
    pub content: Vec<BlockContent>,
    pub section_properties: Option<SectionProperties>,
}

/// `w:sectPr`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionProperties {
    pub header_refs: Vec<HeaderReference>,
    pub page_size: Option<PageSize>,
    pub page_margins: Option<PageMargins>,
}

/// Reference from a section to a header part
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderReference {
    /// `default`, `first` or `even`
    pub kind: String,
    /// Relationship ID of the header part
    pub rel_id: String,
}

/// Page size in twips
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
}

/// Page margins in twips
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMargins {
    pub top: i32,
    pub right: u32,
    pub bottom: i32,
    pub left: u32,
    pub header: u32,
    pub footer: u32,
    pub gutter: u32,
}

impl PageSize {
    /// A4 portrait
    pub const A4: PageSize = PageSize {
        width: 11906,
        height: 16838,
    };
}

impl Default for PageMargins {
    fn default() -> Self {
        PageMargins {
            top: 1417,
            right: 1701,
            bottom: 1417,
            left: 1701,
            header: 708,
            footer: 708,
            gutter: 0,
        }
    }
}

impl Body {
    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.content.push(BlockContent::Paragraph(para));
    }

    pub fn add_table(&mut self, table: Table) {
        self.content.push(BlockContent::Table(table));
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|block| match block {
            BlockContent::Paragraph(para) => Some(para),
            BlockContent::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|block| match block {
            BlockContent::Table(table) => Some(table),
            BlockContent::Paragraph(_) => None,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:body")))?;
        for block in &self.content {
            match block {
                BlockContent::Paragraph(para) => para.write_to(writer)?,
                BlockContent::Table(table) => table.write_to(writer)?,
            }
        }
        if let Some(section) = &self.section_properties {
            section.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:body")))?;
        Ok(())
    }
}

impl SectionProperties {
    /// A4 page with default margins
    pub fn a4() -> Self {
        SectionProperties {
            header_refs: Vec::new(),
            page_size: Some(PageSize::A4),
            page_margins: Some(PageMargins::default()),
        }
    }

    /// Header references, page size, then margins
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;

        for header in &self.header_refs {
            write_empty(
                writer,
                "w:headerReference",
                &[("w:type", header.kind.as_str()), ("r:id", header.rel_id.as_str())],
            )?;
        }

        if let Some(size) = self.page_size {
            let (w, h) = (size.width.to_string(), size.height.to_string());
            write_empty(writer, "w:pgSz", &[("w:w", w.as_str()), ("w:h", h.as_str())])?;
        }

        if let Some(m) = self.page_margins {
            let values = [
                ("w:top", m.top.to_string()),
                ("w:right", m.right.to_string()),
                ("w:bottom", m.bottom.to_string()),
                ("w:left", m.left.to_string()),
                ("w:header", m.header.to_string()),
                ("w:footer", m.footer.to_string()),
                ("w:gutter", m.gutter.to_string()),
            ];
            let attrs: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
            write_empty(writer, "w:pgMar", &attrs)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
        Ok(())
    }
}
