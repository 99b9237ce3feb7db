use crate::error::Result;
use crate::xml::write_empty;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// One edge of `w:tblBorders`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Border {
    /// `w:val`, e.g. `double`
    pub style: String,
    /// `w:sz`, eighths of a point
    pub size: u32,
}

impl Border {
    pub fn new(style: impl Into<String>, size: u32) -> Self {
        Border {
            style: style.into(),
            size,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBorders {
    /// Top, left, bottom and right edges
    pub outer: Border,
    /// Lines between rows and between columns
    pub inner: Border,
}

impl TableBorders {
    /// Double frame around thin cell lines
    pub fn framed() -> Self {
        TableBorders {
            outer: Border::new("double", 1),
            inner: Border::new("basicThinLines", 1),
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tblBorders")))?;
        let edges = [
            ("w:top", &self.outer),
            ("w:left", &self.outer),
            ("w:bottom", &self.outer),
            ("w:right", &self.outer),
            ("w:insideH", &self.inner),
            ("w:insideV", &self.inner),
        ];
        for (name, border) in edges {
            let size = border.size.to_string();
            write_empty(
                writer,
                name,
                &[("w:val", border.style.as_str()), ("w:sz", size.as_str())],
            )?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tblBorders")))?;
        Ok(())
    }
}

impl Default for TableBorders {
    fn default() -> Self {
        Self::framed()
    }
}
