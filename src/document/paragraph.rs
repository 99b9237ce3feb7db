//! `w:p`
//!
//! Headings, body text, captions and table cell lines all end up as one of
//! these. Properties are written in schema order: style, keepNext, numPr,
//! ind, jc.

use crate::document::Run;
use crate::error::Result;
use crate::xml::{write_empty, write_opt_val, write_val};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    pub properties: Option<ParagraphProperties>,
    pub content: Vec<ParagraphContent>,
}

/// Inline children of a paragraph
#[derive(Clone, Debug)]
pub enum ParagraphContent {
    Run(Run),
    BookmarkStart { id: String, name: String },
    BookmarkEnd { id: String },
    /// Opens the range a comment is anchored to
    CommentRangeStart(u32),
    CommentRangeEnd(u32),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphProperties {
    pub style: Option<String>,
    pub keep_next: bool,
    /// `w:numPr/w:numId`
    pub num_id: Option<u32>,
    /// `w:numPr/w:ilvl`
    pub num_level: Option<u32>,
    pub indentation: Option<Indentation>,
    /// `w:jc`, e.g. `center`
    pub justification: Option<String>,
}

/// `w:ind`; all values in twips
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Indentation {
    /// Written as `w:left`
    pub start: Option<u32>,
    pub hanging: Option<u32>,
    pub first_line: Option<u32>,
}

impl Paragraph {
    /// One plain run of `text`
    pub fn new(text: impl Into<String>) -> Self {
        let mut para = Paragraph::default();
        para.add_run(Run::new(text));
        para
    }

    /// Empty paragraph in style `style`
    pub fn with_style(style: impl Into<String>) -> Self {
        Paragraph {
            properties: Some(ParagraphProperties {
                style: Some(style.into()),
                ..Default::default()
            }),
            content: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.runs().map(Run::text).collect()
    }

    pub fn style(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.style.as_deref())
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|item| match item {
            ParagraphContent::Run(run) => Some(run),
            _ => None,
        })
    }

    pub fn add_run(&mut self, run: Run) {
        self.push(ParagraphContent::Run(run));
    }

    pub fn push(&mut self, content: ParagraphContent) {
        self.content.push(content);
    }

    /// Properties, created empty on first use
    pub fn properties_mut(&mut self) -> &mut ParagraphProperties {
        self.properties.get_or_insert_with(ParagraphProperties::default)
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.properties_mut().style = Some(style.into());
    }

    /// Put the paragraph at `level` of list instance `num_id`
    pub fn set_numbering(&mut self, num_id: u32, level: u32) {
        let props = self.properties_mut();
        (props.num_id, props.num_level) = (Some(num_id), Some(level));
    }

    pub fn set_justification(&mut self, jc: impl Into<String>) {
        self.properties_mut().justification = Some(jc.into());
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let props = self.properties.as_ref().filter(|p| !p.is_empty());
        if props.is_none() && self.content.is_empty() {
            return write_empty(writer, "w:p", &[]);
        }

        writer.write_event(Event::Start(BytesStart::new("w:p")))?;
        if let Some(props) = props {
            props.write_to(writer)?;
        }
        for item in &self.content {
            item.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }
}

impl ParagraphContent {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let (name, id) = match self {
            ParagraphContent::Run(run) => return run.write_to(writer),
            ParagraphContent::BookmarkStart { id, name } => {
                return write_empty(
                    writer,
                    "w:bookmarkStart",
                    &[("w:id", id.as_str()), ("w:name", name.as_str())],
                );
            }
            ParagraphContent::BookmarkEnd { id } => ("w:bookmarkEnd", id.clone()),
            ParagraphContent::CommentRangeStart(id) => ("w:commentRangeStart", id.to_string()),
            ParagraphContent::CommentRangeEnd(id) => ("w:commentRangeEnd", id.to_string()),
        };
        write_empty(writer, name, &[("w:id", id.as_str())])
    }
}

impl ParagraphProperties {
    pub fn is_empty(&self) -> bool {
        *self == ParagraphProperties::default()
    }

    /// Writes nothing when no property is set
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        write_opt_val(writer, "w:pStyle", self.style.as_deref())?;
        if self.keep_next {
            write_empty(writer, "w:keepNext", &[])?;
        }
        if self.num_id.is_some() || self.num_level.is_some() {
            writer.write_event(Event::Start(BytesStart::new("w:numPr")))?;
            if let Some(level) = self.num_level {
                write_val(writer, "w:ilvl", &level.to_string())?;
            }
            if let Some(num_id) = self.num_id {
                write_val(writer, "w:numId", &num_id.to_string())?;
            }
            writer.write_event(Event::End(BytesEnd::new("w:numPr")))?;
        }
        if let Some(ind) = self.indentation {
            ind.write_to(writer)?;
        }
        write_opt_val(writer, "w:jc", self.justification.as_deref())?;

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        Ok(())
    }
}

impl Indentation {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let values: Vec<(&str, String)> = [
            ("w:left", self.start),
            ("w:hanging", self.hanging),
            ("w:firstLine", self.first_line),
        ]
        .into_iter()
        .filter_map(|(name, twips)| Some((name, twips?.to_string())))
        .collect();
        let attrs: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
        write_empty(writer, "w:ind", &attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(para: &Paragraph) -> String {
        let mut buf = Vec::new();
        para.write_to(&mut Writer::new(&mut buf)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_item_has_one_ppr() {
        let mut para = Paragraph::with_style("Normal");
        para.set_numbering(4, 1);
        para.add_run(Run::new("item"));

        assert_eq!(
            render(&para),
            concat!(
                r#"<w:p><w:pPr><w:pStyle w:val="Normal"/>"#,
                r#"<w:numPr><w:ilvl w:val="1"/><w:numId w:val="4"/></w:numPr></w:pPr>"#,
                r#"<w:r><w:t xml:space="preserve">item</w:t></w:r></w:p>"#
            )
        );
    }

    #[test]
    fn test_caption_layout() {
        let mut para = Paragraph::default();
        para.set_justification("center");
        para.properties_mut().indentation = Some(Indentation {
            start: Some(0),
            hanging: Some(0),
            ..Default::default()
        });

        assert_eq!(
            render(&para),
            r#"<w:p><w:pPr><w:ind w:left="0" w:hanging="0"/><w:jc w:val="center"/></w:pPr></w:p>"#
        );
    }

    #[test]
    fn test_markers() {
        let mut para = Paragraph::default();
        para.push(ParagraphContent::BookmarkStart {
            id: "0".into(),
            name: "_GoBack".into(),
        });
        para.push(ParagraphContent::CommentRangeStart(2));
        para.push(ParagraphContent::CommentRangeEnd(2));
        para.push(ParagraphContent::BookmarkEnd { id: "0".into() });
        assert_eq!(
            render(&para),
            concat!(
                r#"<w:p><w:bookmarkStart w:id="0" w:name="_GoBack"/>"#,
                r#"<w:commentRangeStart w:id="2"/><w:commentRangeEnd w:id="2"/>"#,
                r#"<w:bookmarkEnd w:id="0"/></w:p>"#
            )
        );
    }

    #[test]
    fn test_empty_properties_are_dropped() {
        let mut para = Paragraph::default();
        para.properties_mut();
        assert_eq!(render(&para), "<w:p/>");
        assert_eq!(para.style(), None);
    }

    #[test]
    fn test_text_joins_runs() {
        let mut para = Paragraph::new("Chapter ");
        para.add_run(Run::new("one"));
        assert_eq!(para.text(), "Chapter one");
    }
}
