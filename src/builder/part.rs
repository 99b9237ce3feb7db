//! Chapters, sections and their subdivisions

use crate::builder::list::ListCursor;
use crate::builder::render::RenderContext;
use crate::builder::{DocOptions, Figure, Table, Text};
use crate::document::{Paragraph, Run};
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::rc::Rc;

/// Nesting depth of a part
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PartLevel {
    Chapter,
    Section,
    SubSection,
    SubSubSection,
}

impl PartLevel {
    /// Zero-based depth, also the index into the heading styles
    pub fn depth(&self) -> usize {
        match self {
            PartLevel::Chapter => 0,
            PartLevel::Section => 1,
            PartLevel::SubSection => 2,
            PartLevel::SubSubSection => 3,
        }
    }

    /// Level of the parts nested directly below this one
    pub fn child(&self) -> Option<PartLevel> {
        match self {
            PartLevel::Chapter => Some(PartLevel::Section),
            PartLevel::Section => Some(PartLevel::SubSection),
            PartLevel::SubSection => Some(PartLevel::SubSubSection),
            PartLevel::SubSubSection => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            PartLevel::Chapter => "chapter",
            PartLevel::Section => "section",
            PartLevel::SubSection => "subsection",
            PartLevel::SubSubSection => "sub-subsection",
        }
    }
}

/// Content placed under a part heading
#[derive(Clone, Debug)]
pub enum Block {
    Text(Text),
    Figure(Figure),
    Table(Table),
}

impl Block {
    fn render(&self, ctx: &mut RenderContext) {
        match self {
            Block::Text(text) => text.render(ctx),
            Block::Figure(figure) => figure.render(ctx),
            Block::Table(table) => table.render(ctx),
        }
    }
}

impl From<Text> for Block {
    fn from(text: Text) -> Self {
        Block::Text(text)
    }
}

impl From<Figure> for Block {
    fn from(figure: Figure) -> Self {
        Block::Figure(figure)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

/// A heading followed by its blocks, then its child parts
///
/// Creating a part closes any open list.
#[derive(Debug)]
pub struct Part {
    level: PartLevel,
    title: String,
    style: String,
    blocks: Vec<Block>,
    children: Vec<Part>,
    list: ListCursor,
    options: Rc<DocOptions>,
}

impl Part {
    pub(crate) fn new(
        level: PartLevel,
        title: String,
        style: String,
        list: ListCursor,
        options: Rc<DocOptions>,
    ) -> Self {
        list.end();
        Part {
            level,
            title,
            style,
            blocks: Vec::new(),
            children: Vec::new(),
            list,
            options,
        }
    }

    pub fn level(&self) -> PartLevel {
        self.level
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Heading paragraph style
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Add a part one level down, with that level's heading style
    pub fn new_child(&mut self, title: impl Into<String>) -> Result<&mut Part> {
        let level = self.child_level()?;
        let style = self.options.heading_styles[level.depth()].clone();
        self.push_child(level, title.into(), style)
    }

    pub fn new_child_with_style(
        &mut self,
        title: impl Into<String>,
        style: impl Into<String>,
    ) -> Result<&mut Part> {
        let level = self.child_level()?;
        self.push_child(level, title.into(), style.into())
    }

    fn child_level(&self) -> Result<PartLevel> {
        self.level
            .child()
            .ok_or(Error::NestingTooDeep(self.level.name()))
    }

    fn push_child(&mut self, level: PartLevel, title: String, style: String) -> Result<&mut Part> {
        let child = Part::new(level, title, style, self.list.clone(), Rc::clone(&self.options));
        self.children.push(child);
        Ok(self
            .children
            .last_mut()
            .expect("Just added child part"))
    }

    /// Add a paragraph of text; it joins the list open at this moment
    pub fn text(&mut self) -> &mut Text {
        let text = Text::new().numbered(self.list.position());
        match self.push(text) {
            Block::Text(text) => text,
            _ => unreachable!("Just added text"),
        }
    }

    /// Add a picture read from `path` when the document is saved
    pub fn figure(&mut self, path: impl Into<PathBuf>, scale: f64) -> &mut Figure {
        let figure = Figure::new(path, scale).numbered(self.list.position());
        match self.push(figure) {
            Block::Figure(figure) => figure,
            _ => unreachable!("Just added figure"),
        }
    }

    /// Add a table `width` twips wide
    pub fn table(&mut self, rows: usize, cols: usize, width: u32) -> &mut Table {
        match self.push(Table::new(rows, cols, width)) {
            Block::Table(table) => table,
            _ => unreachable!("Just added table"),
        }
    }

    /// Add a prepared block as is
    pub fn push(&mut self, block: impl Into<Block>) -> &mut Block {
        self.blocks.push(block.into());
        self.blocks.last_mut().expect("Just added block")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn children(&self) -> &[Part] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Part] {
        &mut self.children
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        let mut heading = Paragraph::with_style(self.style.as_str());
        if !self.title.is_empty() {
            heading.add_run(Run::new(self.title.as_str()));
        }
        ctx.add_paragraph(heading);

        for block in &self.blocks {
            block.render(ctx);
        }
        for child in &self.children {
            child.render(ctx);
        }
    }
}
