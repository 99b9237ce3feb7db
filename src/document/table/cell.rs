use crate::document::Paragraph;
use crate::error::Result;
use crate::xml::{write_empty, write_val};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// `w:tc`
#[derive(Clone, Debug, Default)]
pub struct TableCell {
    pub properties: Option<TableCellProperties>,
    pub paragraphs: Vec<Paragraph>,
}

/// `w:tcPr`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCellProperties {
    /// Twips
    pub width: Option<u32>,
    /// Number of grid columns covered; set on the first cell of a
    /// horizontal merge
    pub grid_span: Option<u32>,
    /// `w:shd` pattern such as `pct5`
    pub shading: Option<String>,
}

impl TableCell {
    pub fn from_paragraph(para: Paragraph) -> Self {
        TableCell {
            properties: None,
            paragraphs: vec![para],
        }
    }

    /// Paragraph texts, one per line
    pub fn text(&self) -> String {
        let lines: Vec<String> = self.paragraphs.iter().map(Paragraph::text).collect();
        lines.join("\n")
    }

    pub fn properties_mut(&mut self) -> &mut TableCellProperties {
        self.properties.get_or_insert_with(TableCellProperties::default)
    }

    pub fn set_width(&mut self, width: u32) {
        self.properties_mut().width = Some(width);
    }

    pub fn set_grid_span(&mut self, span: u32) {
        self.properties_mut().grid_span = Some(span);
    }

    pub fn set_shading(&mut self, pattern: impl Into<String>) {
        self.properties_mut().shading = Some(pattern.into());
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tc")))?;
        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }
        // Word rejects a cell without a paragraph
        if self.paragraphs.is_empty() {
            Paragraph::default().write_to(writer)?;
        }
        for para in &self.paragraphs {
            para.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tc")))?;
        Ok(())
    }
}

impl TableCellProperties {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if *self == TableCellProperties::default() {
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new("w:tcPr")))?;
        if let Some(width) = self.width {
            let width = width.to_string();
            write_empty(writer, "w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
        }
        if let Some(span) = self.grid_span {
            write_val(writer, "w:gridSpan", &span.to_string())?;
        }
        if let Some(pattern) = &self.shading {
            let attrs = [("w:val", pattern.as_str()), ("w:color", "auto"), ("w:fill", "auto")];
            write_empty(writer, "w:shd", &attrs)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tcPr")))?;
        Ok(())
    }
}
