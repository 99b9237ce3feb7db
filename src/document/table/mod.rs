//! `w:tbl` and its rows and cells
//!
//! Widths are fixed in twips (`dxa`); the grid holds one width per column.

mod cell;
mod row;
mod types;

pub use cell::{TableCell, TableCellProperties};
pub use row::TableRow;
pub use types::{Border, TableBorders};

use crate::error::Result;
use crate::xml::{write_empty, write_opt_val};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

#[derive(Clone, Debug, Default)]
pub struct Table {
    pub properties: TableProperties,
    /// `w:tblGrid`, one width per column
    pub grid: Vec<u32>,
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableProperties {
    pub style: Option<String>,
    /// Total width in twips; `auto` when unset
    pub width: Option<u32>,
    pub borders: Option<TableBorders>,
}

impl Table {
    /// Table without rows over columns of the given widths
    pub fn with_grid(grid: Vec<u32>) -> Self {
        Table {
            grid,
            ..Default::default()
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.grid.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cells.get(col)
    }

    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tbl")))?;
        self.properties.write_to(writer)?;

        writer.write_event(Event::Start(BytesStart::new("w:tblGrid")))?;
        for width in &self.grid {
            write_empty(writer, "w:gridCol", &[("w:w", width.to_string().as_str())])?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tblGrid")))?;

        for row in &self.rows {
            row.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tbl")))?;
        Ok(())
    }
}

impl TableProperties {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tblPr")))?;
        write_opt_val(writer, "w:tblStyle", self.style.as_deref())?;

        let (width, unit) = match self.width {
            Some(width) => (width.to_string(), "dxa"),
            None => ("0".to_string(), "auto"),
        };
        write_empty(writer, "w:tblW", &[("w:w", width.as_str()), ("w:type", unit)])?;

        if let Some(borders) = &self.borders {
            borders.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tblPr")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Paragraph;
    use pretty_assertions::assert_eq;

    fn render(table: &Table) -> String {
        let mut buf = Vec::new();
        table.write_to(&mut Writer::new(&mut buf)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_framed_table_layout() {
        let mut table = Table::with_grid(vec![1000, 1500]);
        table.properties.style = Some("TableGrid".into());
        table.properties.width = Some(2500);
        table.properties.borders = Some(TableBorders::framed());

        let xml = render(&table);
        assert!(xml.starts_with(concat!(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="2500" w:type="dxa"/>"#,
            r#"<w:tblBorders><w:top w:val="double" w:sz="1"/>"#
        )));
        assert!(xml.contains(r#"<w:insideV w:val="basicThinLines" w:sz="1"/></w:tblBorders>"#));
        assert!(xml.ends_with(
            r#"<w:tblGrid><w:gridCol w:w="1000"/><w:gridCol w:w="1500"/></w:tblGrid></w:tbl>"#
        ));
    }

    #[test]
    fn test_auto_width() {
        let xml = render(&Table::with_grid(vec![100]));
        assert!(xml.contains(r#"<w:tblW w:w="0" w:type="auto"/>"#));
        assert!(!xml.contains("w:tblBorders"));
    }

    #[test]
    fn test_spanning_cell() {
        let mut cell = TableCell::from_paragraph(Paragraph::new("x"));
        cell.set_width(2000);
        cell.set_grid_span(2);
        cell.set_shading("pct10");

        let mut table = Table::with_grid(vec![1000, 1000]);
        table.add_row(TableRow {
            header: true,
            cells: vec![cell],
        });
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 0).map(TableCell::text).as_deref(), Some("x"));
        assert!(table.cell(0, 1).is_none());

        let xml = render(&table);
        assert!(xml.contains(concat!(
            r#"<w:tr><w:trPr><w:tblHeader/></w:trPr><w:tc><w:tcPr>"#,
            r#"<w:tcW w:w="2000" w:type="dxa"/><w:gridSpan w:val="2"/>"#,
            r#"<w:shd w:val="pct10" w:color="auto" w:fill="auto"/></w:tcPr>"#
        )));
    }
}
