//! Outline-oriented document builder
//!
//! A [`WordDoc`] holds chapters; each [`Part`] holds a heading, blocks of
//! text, figures and tables, then its child parts. Nothing is serialized
//! until the document is saved, and every save renders from scratch.

mod comment;
mod figure;
mod list;
mod options;
mod part;
mod render;
mod table;
mod template;
mod text;

pub use comment::Comment;
pub use figure::Figure;
pub use list::{ListPosition, MAX_LIST_LEVEL};
pub use options::DocOptions;
pub use part::{Block, Part, PartLevel};
pub use table::{Alignment, Cell, CellKind, Merge, Row, Table};
pub use text::Text;

use crate::document::numbering::catalog::default_numbering;
use crate::document::{
    serialize_document_xml, AbstractNum, Comments, HeaderReference, Numbering, SectionProperties,
    Styles,
};
use crate::error::Result;
use crate::opc::{self, rel_types, well_known, Package, Part as PackagePart};
use list::ListCursor;
use render::RenderContext;
use std::io::{Seek, Write};
use std::path::Path;
use std::rc::Rc;
use template::{TemplateHeader, TemplateNumbering};

/// A document under construction
///
/// ```
/// use docx_outline::WordDoc;
///
/// let mut doc = WordDoc::new("Ana Souza", "AS");
/// let chapter = doc.chapter("Introduction");
/// chapter.text().append("Scope of this report.");
///
/// let bytes = doc.to_bytes().unwrap();
/// assert!(!bytes.is_empty());
/// ```
#[derive(Debug)]
pub struct WordDoc {
    options: Rc<DocOptions>,
    parts: Vec<Part>,
    comments: Vec<Comment>,
    numbering: Numbering,
    /// Relationships and pictures of a template's numbering part
    numbering_links: Option<TemplateNumbering>,
    /// Styles part copied from a template
    styles: Option<Vec<u8>>,
    headers: Vec<TemplateHeader>,
    list: ListCursor,
}

impl WordDoc {
    /// New document whose comments are signed by `author`
    pub fn new(author: impl Into<String>, initials: impl Into<String>) -> Self {
        Self::with_options(DocOptions::new().author(author).initials(initials))
    }

    pub fn with_options(options: DocOptions) -> Self {
        let numbering = if options.default_numbering {
            default_numbering()
        } else {
            Numbering::new()
        };
        WordDoc {
            options: Rc::new(options),
            parts: Vec::new(),
            comments: Vec::new(),
            numbering,
            numbering_links: None,
            styles: None,
            headers: Vec::new(),
            list: ListCursor::default(),
        }
    }

    pub fn options(&self) -> &DocOptions {
        &self.options
    }

    /// Add a chapter in the first heading style
    pub fn chapter(&mut self, title: impl Into<String>) -> &mut Part {
        let style = self.options.heading_styles[0].clone();
        self.chapter_with_style(title, style)
    }

    pub fn chapter_with_style(
        &mut self,
        title: impl Into<String>,
        style: impl Into<String>,
    ) -> &mut Part {
        let part = Part::new(
            PartLevel::Chapter,
            title.into(),
            style.into(),
            self.list.clone(),
            Rc::clone(&self.options),
        );
        self.parts.push(part);
        self.parts.last_mut().expect("Just added chapter")
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut [Part] {
        &mut self.parts
    }

    /// Add a comment; ids are handed out from 0 in creation order
    pub fn add_comment(&mut self) -> &mut Comment {
        let id = self.comments.len() as u32;
        let comment = Comment::new(id, &self.options.author, &self.options.initials);
        self.comments.push(comment);
        self.comments.last_mut().expect("Just added comment")
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn numbering(&self) -> &Numbering {
        &self.numbering
    }

    /// Register a list definition, returning its abstract id
    pub fn add_abstract_num(&mut self, abstract_num: AbstractNum) -> u32 {
        self.numbering.add_abstract_num(abstract_num)
    }

    /// Create a list instance that restarts at 1, returning its numId
    pub fn create_numbering_instance(&mut self, abstract_id: u32) -> Result<u32> {
        self.numbering.add_instance(abstract_id)
    }

    /// Open a new list; paragraphs created from now on join it at level 0
    pub fn start_numbering(&mut self, abstract_id: u32) -> Result<u32> {
        let num_id = self.create_numbering_instance(abstract_id)?;
        self.list.start(num_id);
        Ok(num_id)
    }

    /// Continue an existing list instance from level 0
    pub fn resume_numbering(&mut self, num_id: u32) {
        self.list.start(num_id);
    }

    /// Nest one level deeper, up to [`MAX_LIST_LEVEL`]
    pub fn increment_numbering(&mut self) {
        self.list.increment();
    }

    pub fn decrement_numbering(&mut self) {
        self.list.decrement();
    }

    pub fn end_numbering(&mut self) {
        self.list.end();
    }

    /// Position new paragraphs would take in the open list
    pub fn numbering_position(&self) -> Option<ListPosition> {
        self.list.position()
    }

    /// Use the styles part of another document
    pub fn set_styles_from_document(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let package = Package::open(path)?;
        self.styles = Some(template::load_styles(&package)?);
        Ok(())
    }

    /// Replace the list definitions with those of another document
    pub fn set_numbering_from_document(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let package = Package::open(path)?;
        let mut imported = template::load_numbering(&package)?;
        self.numbering = std::mem::take(&mut imported.numbering);
        self.numbering_links = Some(imported);
        Ok(())
    }

    /// Use the page headers of another document
    pub fn set_header_from_document(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let package = Package::open(path)?;
        self.headers = template::load_headers(&package)?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_package()?.save(path)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_package()?.to_bytes()
    }

    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        self.to_package()?.write_to(writer)
    }

    /// Render comments, then parts, into a new package
    pub fn to_package(&self) -> Result<Package> {
        let mut ctx = RenderContext::new(&self.options);

        let mut comments = Comments::default();
        for comment in &self.comments {
            comments.add(comment.to_comment());
        }
        for part in &self.parts {
            part.render(&mut ctx);
        }

        let mut parts = Vec::new();

        let styles = match &self.styles {
            Some(data) => Some(data.clone()),
            None if self.options.default_styles => {
                Some(Styles::default_styles().to_xml()?.into_bytes())
            }
            None => None,
        };
        if let Some(data) = styles {
            ctx.rels.add(rel_types::STYLES, "styles.xml");
            parts.push(PackagePart::new(well_known::styles(), opc::STYLES, data));
        }

        if !self.numbering.is_empty() {
            ctx.rels.add(rel_types::NUMBERING, "numbering.xml");
            let data = self.numbering.to_xml()?.into_bytes();
            let mut part = PackagePart::new(well_known::numbering(), opc::NUMBERING, data);
            let links = self.numbering_links.as_ref();
            if let Some(rels) = links.and_then(|l| l.relationships.clone()) {
                part.set_relationships(rels);
            }
            parts.push(part);
            parts.extend(links.into_iter().flat_map(|l| l.resources.iter().cloned()));
        }

        if !comments.is_empty() {
            ctx.rels.add(rel_types::COMMENTS, "comments.xml");
            let data = comments.to_xml()?.into_bytes();
            parts.push(PackagePart::new(well_known::comments(), opc::COMMENTS, data));
        }

        let mut section = SectionProperties::a4();
        for header in &self.headers {
            let target = header.part.uri().relative_to(&well_known::document());
            let rel_id = ctx.rels.add(rel_types::HEADER, &target);
            section.header_refs.push(HeaderReference {
                kind: header.kind.clone(),
                rel_id,
            });
            parts.push(header.part.clone());
            parts.extend(header.resources.iter().cloned());
        }
        ctx.body.section_properties = Some(section);

        let xml = serialize_document_xml(&ctx.body)?;
        let mut document = PackagePart::new(well_known::document(), opc::MAIN_DOCUMENT, xml.into_bytes());
        document.set_relationships(ctx.rels);

        let mut package = Package::new();
        package.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");
        package.add_part(document);
        for part in parts.into_iter().chain(ctx.media) {
            package.add_part(part);
        }

        log::debug!(
            "rendered {} parts, {} comments",
            self.parts.len(),
            self.comments.len()
        );
        Ok(package)
    }
}
