use super::TableCell;
use crate::error::Result;
use crate::xml::write_empty;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// `w:tr`
#[derive(Clone, Debug, Default)]
pub struct TableRow {
    /// Repeated at the top of every page the table spans
    pub header: bool,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tr")))?;
        if self.header {
            writer.write_event(Event::Start(BytesStart::new("w:trPr")))?;
            write_empty(writer, "w:tblHeader", &[])?;
            writer.write_event(Event::End(BytesEnd::new("w:trPr")))?;
        }
        for cell in &self.cells {
            cell.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
        Ok(())
    }
}
