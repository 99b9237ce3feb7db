//! Tables of text cells

use crate::builder::render::RenderContext;
use crate::builder::text::RunList;
use crate::document::{self, Paragraph, RunProperties, TableBorders, TableCell, TableRow};
use crate::error::{Error, Result};
use std::ops::{Index, IndexMut};

/// Paragraph alignment inside a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    fn as_jc(&self) -> Option<&'static str> {
        match self {
            Alignment::Left => None,
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
            Alignment::Justify => Some("both"),
        }
    }
}

/// Horizontal merge state of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Merge {
    #[default]
    None,
    /// First cell of a merged run; its content is kept
    Restart,
    /// Absorbed into the nearest `Restart` cell to its left
    Continue,
}

/// Formatting role of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellKind {
    #[default]
    Normal,
    /// Shaded 10% with bold text; a header row repeats on each page
    Header,
    /// Shaded 5% with bold text
    Summary,
}

impl CellKind {
    fn shading(&self) -> Option<&'static str> {
        match self {
            CellKind::Normal => None,
            CellKind::Header => Some("pct10"),
            CellKind::Summary => Some("pct5"),
        }
    }
}

/// One table cell holding a single paragraph
#[derive(Clone, Debug, Default)]
pub struct Cell {
    runs: RunList,
    style: Option<String>,
    pub alignment: Alignment,
    pub merge: Merge,
    /// Overrides the row's kind when set
    pub kind: Option<CellKind>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph style used in this cell
    pub fn with_style(&mut self, style: impl Into<String>) -> &mut Self {
        self.style = Some(style.into());
        self
    }

    pub fn append(&mut self, text: impl Into<String>) -> &mut Self {
        self.runs.append(text, None);
        self
    }

    pub fn append_with(&mut self, text: impl Into<String>, props: RunProperties) -> &mut Self {
        self.runs.append(text, Some(props));
        self
    }

    pub fn start_comment(&mut self, id: u32) -> &mut Self {
        self.runs.start_comment(id);
        self
    }

    pub fn end_comment(&mut self, id: u32) -> &mut Self {
        self.runs.end_comment(id);
        self
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = alignment;
        self
    }

    pub fn set_merge(&mut self, merge: Merge) -> &mut Self {
        self.merge = merge;
        self
    }

    pub fn set_kind(&mut self, kind: CellKind) -> &mut Self {
        self.kind = Some(kind);
        self
    }

    pub fn text(&self) -> String {
        self.runs.text()
    }

    fn to_table_cell(&self, kind: CellKind, width: u32, default_style: &str) -> TableCell {
        let mut para = Paragraph::with_style(self.style.as_deref().unwrap_or(default_style));
        if let Some(jc) = self.alignment.as_jc() {
            para.set_justification(jc);
        }
        let base = match kind {
            CellKind::Normal => None,
            CellKind::Header | CellKind::Summary => Some(RunProperties::new().with_bold(true)),
        };
        self.runs.render_into(&mut para, base.as_ref());

        let mut cell = TableCell::from_paragraph(para);
        cell.set_width(width);
        if let Some(pattern) = kind.shading() {
            cell.set_shading(pattern);
        }
        cell
    }
}

/// A table row
#[derive(Clone, Debug, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Kind applied to every cell that does not set its own
    pub kind: CellKind,
}

impl Row {
    fn new(cols: usize) -> Self {
        Row {
            cells: (0..cols).map(|_| Cell::new()).collect(),
            kind: CellKind::Normal,
        }
    }

    pub fn set_kind(&mut self, kind: CellKind) -> &mut Self {
        self.kind = kind;
        self
    }

    fn render(&self, widths: &[u32], default_style: &str) -> TableRow {
        let mut row = TableRow {
            header: self.kind == CellKind::Header,
            cells: Vec::with_capacity(self.cells.len()),
        };
        // index in `row.cells` of the cell a Continue merges into
        let mut open_merge: Option<usize> = None;

        for (col, cell) in self.cells.iter().enumerate() {
            let width = widths.get(col).copied().unwrap_or(0);

            if cell.merge == Merge::Continue {
                if let Some(target) = open_merge.and_then(|i| row.cells.get_mut(i)) {
                    let props = target.properties_mut();
                    props.grid_span = Some(props.grid_span.unwrap_or(1) + 1);
                    props.width = Some(props.width.unwrap_or(0) + width);
                    continue;
                }
                log::debug!("merge continuation at column {} has no start", col);
            }

            let kind = cell.kind.unwrap_or(self.kind);
            row.cells.push(cell.to_table_cell(kind, width, default_style));
            open_merge = match cell.merge {
                Merge::Restart => Some(row.cells.len() - 1),
                _ => None,
            };
        }
        row
    }
}

impl Index<usize> for Row {
    type Output = Cell;

    fn index(&self, col: usize) -> &Cell {
        &self.cells[col]
    }
}

impl IndexMut<usize> for Row {
    fn index_mut(&mut self, col: usize) -> &mut Cell {
        &mut self.cells[col]
    }
}

/// A rows x columns grid of cells
///
/// Widths are in twentieths of a point. Rows index first, then columns:
/// `table[row][col]`.
#[derive(Clone, Debug)]
pub struct Table {
    rows: Vec<Row>,
    widths: Vec<u32>,
    style: Option<String>,
}

impl Table {
    /// Create a table `width` wide with equal columns; the last column
    /// takes what is left of the division
    pub fn new(rows: usize, cols: usize, width: u32) -> Self {
        let mut widths = Vec::with_capacity(cols);
        if cols > 0 {
            let each = width / cols as u32;
            widths.resize(cols - 1, each);
            widths.push(width - each * (cols as u32 - 1));
        }
        Table {
            rows: (0..rows).map(|_| Row::new(cols)).collect(),
            widths,
            style: None,
        }
    }

    /// Use a table style instead of the document default
    pub fn with_style(&mut self, style: impl Into<String>) -> &mut Self {
        self.style = Some(style.into());
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn column_widths(&self) -> &[u32] {
        &self.widths
    }

    /// Replace every column width
    pub fn set_column_widths(&mut self, widths: impl IntoIterator<Item = u32>) -> Result<()> {
        let widths: Vec<u32> = widths.into_iter().collect();
        if widths.len() != self.widths.len() {
            return Err(Error::InvalidDocument(format!(
                "{} column widths given for {} columns",
                widths.len(),
                self.widths.len()
            )));
        }
        self.widths = widths;
        Ok(())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_mut(&mut self, row: usize) -> Result<&mut Row> {
        let (rows, cols) = (self.row_count(), self.column_count());
        self.rows
            .get_mut(row)
            .ok_or(Error::CellOutOfRange {
                row,
                col: 0,
                rows,
                cols,
            })
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .ok_or(Error::CellOutOfRange {
                row,
                col,
                rows: self.row_count(),
                cols: self.column_count(),
            })
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let (rows, cols) = (self.row_count(), self.column_count());
        self.rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(col))
            .ok_or(Error::CellOutOfRange {
                row,
                col,
                rows,
                cols,
            })
    }

    pub(crate) fn to_table(&self, table_style: Option<&str>, cell_style: &str) -> document::Table {
        let mut table = document::Table::with_grid(self.widths.clone());
        table.properties.style = self.style.as_deref().or(table_style).map(String::from);
        table.properties.width = Some(self.widths.iter().sum());
        table.properties.borders = Some(TableBorders::framed());

        for row in &self.rows {
            table.add_row(row.render(&self.widths, cell_style));
        }
        table
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        let options = ctx.options;
        let table = self.to_table(options.table_style.as_deref(), &options.cell_style);
        ctx.body.add_table(table);
    }
}

impl Index<usize> for Table {
    type Output = Row;

    fn index(&self, row: usize) -> &Row {
        &self.rows[row]
    }
}

impl IndexMut<usize> for Table {
    fn index_mut(&mut self, row: usize) -> &mut Row {
        &mut self.rows[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quick_xml::Writer;

    fn render(table: &Table) -> String {
        let mut buf = Vec::new();
        table
            .to_table(None, "Normal")
            .write_to(&mut Writer::new(&mut buf))
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_width_split_gives_remainder_to_last_column() {
        let table = Table::new(2, 3, 1000);
        assert_eq!(table.column_widths(), &[333, 333, 334]);
        assert_eq!(Table::new(1, 0, 1000).column_count(), 0);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut table = Table::new(2, 2, 100);
        assert!(table.cell(1, 1).is_ok());
        match table.cell_mut(2, 0) {
            Err(Error::CellOutOfRange { row, rows, .. }) => assert_eq!((row, rows), (2, 2)),
            other => panic!("unexpected {:?}", other.map(|c| c.text())),
        }
        assert!(table.row_mut(5).is_err());
        assert!(table.set_column_widths([1, 2, 3]).is_err());
    }

    #[test]
    fn test_indexing_row_then_column() {
        let mut table = Table::new(2, 2, 100);
        table[1][0].append("x");
        assert_eq!(table.cell(1, 0).unwrap().text(), "x");
        assert_eq!(table[0][0].text(), "");
    }

    #[test]
    fn test_cells_carry_widths_and_style() {
        let mut table = Table::new(1, 2, 3000);
        table.set_column_widths([1000, 2000]).unwrap();
        table[0][0].append("a");
        table[0][1].append("b").set_alignment(Alignment::Right);

        let xml = render(&table);
        assert!(xml.contains(r#"<w:tblW w:w="3000" w:type="dxa"/>"#));
        assert!(xml.contains(concat!(
            r#"<w:tc><w:tcPr><w:tcW w:w="1000" w:type="dxa"/></w:tcPr>"#,
            r#"<w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr>"#,
            r#"<w:r><w:t xml:space="preserve">a</w:t></w:r></w:p></w:tc>"#
        )));
        assert!(xml.contains(r#"<w:pStyle w:val="Normal"/><w:jc w:val="right"/>"#));
        assert!(xml.contains(r#"<w:bottom w:val="double" w:sz="1"/>"#));
    }

    #[test]
    fn test_header_and_summary_rows() {
        let mut table = Table::new(3, 1, 100);
        table[0].set_kind(CellKind::Header);
        table[0][0].append("Name");
        table[1][0].append("value");
        table[2].set_kind(CellKind::Summary);
        table[2][0].append("Total");

        let xml = render(&table);
        assert_eq!(xml.matches("<w:tblHeader/>").count(), 1);
        assert!(xml.contains(r#"<w:shd w:val="pct10" w:color="auto" w:fill="auto"/>"#));
        assert!(xml.contains(r#"<w:shd w:val="pct5" w:color="auto" w:fill="auto"/>"#));
        assert!(xml.contains(r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Name</w:t></w:r>"#));
        assert!(xml.contains(r#"<w:r><w:t xml:space="preserve">value</w:t></w:r>"#));
    }

    #[test]
    fn test_cell_kind_overrides_row() {
        let mut table = Table::new(1, 2, 200);
        table[0].set_kind(CellKind::Header);
        table[0][1].set_kind(CellKind::Normal);
        let xml = render(&table);
        assert_eq!(xml.matches("pct10").count(), 1);
    }

    #[test]
    fn test_horizontal_merge() {
        let mut table = Table::new(1, 4, 4000);
        table[0][0].append("wide").set_merge(Merge::Restart);
        table[0][1].set_merge(Merge::Continue);
        table[0][2].set_merge(Merge::Continue);
        table[0][3].append("end");

        let xml = render(&table);
        assert_eq!(xml.matches("<w:tc>").count(), 2);
        assert!(xml.contains(r#"<w:tcW w:w="3000" w:type="dxa"/><w:gridSpan w:val="3"/>"#));
    }

    #[test]
    fn test_continue_without_restart_is_plain_cell() {
        let mut table = Table::new(1, 2, 200);
        table[0][0].set_merge(Merge::Continue);
        assert_eq!(render(&table).matches("<w:tc>").count(), 2);
    }
}
