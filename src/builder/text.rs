//! Text paragraphs and the run list shared with cells and comments

use crate::builder::list::ListPosition;
use crate::builder::render::RenderContext;
use crate::document::{Paragraph, ParagraphContent, Run, RunContent, RunProperties};

/// Character style of comment reference marks
pub(crate) const COMMENT_REFERENCE_STYLE: &str = "CommentReference";

/// Ordered runs and comment markers of one paragraph
#[derive(Clone, Debug, Default)]
pub(crate) struct RunList {
    items: Vec<ParagraphContent>,
}

impl RunList {
    pub fn append(&mut self, text: impl Into<String>, props: Option<RunProperties>) {
        self.items
            .push(ParagraphContent::Run(Run::with_properties(text, props)));
    }

    pub fn start_comment(&mut self, id: u32) {
        self.items.push(ParagraphContent::CommentRangeStart(id));
    }

    /// Close the commented range and place the reference mark after it
    pub fn end_comment(&mut self, id: u32) {
        self.items.push(ParagraphContent::CommentRangeEnd(id));
        let mut mark = Run::from_content(RunContent::CommentReference(id));
        mark.properties = Some(RunProperties {
            style: Some(COMMENT_REFERENCE_STYLE.into()),
            ..Default::default()
        });
        self.items.push(ParagraphContent::Run(mark));
    }

    pub fn text(&self) -> String {
        self.runs().map(|r| r.text()).collect()
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.items.iter().filter_map(|item| match item {
            ParagraphContent::Run(run) => Some(run),
            _ => None,
        })
    }

    /// Copy the items into `para`, layering `base` under each text run
    pub fn render_into(&self, para: &mut Paragraph, base: Option<&RunProperties>) {
        for item in &self.items {
            let item = match (item, base) {
                (ParagraphContent::Run(run), Some(base)) if has_text(run) => {
                    let props = match &run.properties {
                        Some(own) => base.merged_with(own),
                        None => base.clone(),
                    };
                    ParagraphContent::Run(Run {
                        properties: Some(props),
                        content: run.content.clone(),
                    })
                }
                (item, _) => item.clone(),
            };
            para.push(item);
        }
    }
}

fn has_text(run: &Run) -> bool {
    run.content.iter().any(|c| matches!(c, RunContent::Text(_)))
}

/// A paragraph of runs, optionally part of a list
///
/// ```
/// use docx_outline::{RunProperties, Text};
///
/// let mut text = Text::new();
/// text.append("plain, ")
///     .append_with("bold", RunProperties::new().with_bold(true));
/// assert_eq!(text.text(), "plain, bold");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Text {
    style: Option<String>,
    runs: RunList,
    list: Option<ListPosition>,
}

impl Text {
    /// Create an empty paragraph in the document's body style
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Place the paragraph in a list, or take it out with `None`
    pub fn numbered(mut self, position: Option<ListPosition>) -> Self {
        self.list = position;
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

    /// Open the range a comment applies to
    pub fn start_comment(&mut self, id: u32) -> &mut Self {
        self.runs.start_comment(id);
        self
    }

    /// Close the range a comment applies to
    pub fn end_comment(&mut self, id: u32) -> &mut Self {
        self.runs.end_comment(id);
        self
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn list_position(&self) -> Option<ListPosition> {
        self.list
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.text()
    }

    pub(crate) fn to_paragraph(&self, default_style: &str) -> Paragraph {
        let mut para = Paragraph::with_style(self.style.as_deref().unwrap_or(default_style));
        if let Some(pos) = self.list {
            para.set_numbering(pos.num_id, pos.level as u32);
        }
        self.runs.render_into(&mut para, None);
        para
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        let para = self.to_paragraph(&ctx.options.body_style);
        ctx.add_paragraph(para);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Writer;

    fn render(para: &Paragraph) -> String {
        let mut buf = Vec::new();
        para.write_to(&mut Writer::new(&mut buf)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_text_uses_default_style() {
        let mut text = Text::new();
        text.append("Hello");
        assert_eq!(
            render(&text.to_paragraph("Normal")),
            r#"<w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr><w:r><w:t xml:space="preserve">Hello</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_numbered_text() {
        let mut text = Text::new().with_style("ListParagraph").numbered(Some(ListPosition {
            num_id: 11,
            level: 2,
        }));
        text.append("item");
        let xml = render(&text.to_paragraph("Normal"));
        assert!(xml.contains(r#"<w:pStyle w:val="ListParagraph"/>"#));
        assert!(xml.contains(r#"<w:numPr><w:ilvl w:val="2"/><w:numId w:val="11"/></w:numPr>"#));
    }

    #[test]
    fn test_comment_markers_surround_runs() {
        let mut text = Text::new();
        text.append("before ")
            .start_comment(0)
            .append("commented")
            .end_comment(0)
            .append(" after");
        let xml = render(&text.to_paragraph("Normal"));

        let start = xml.find(r#"<w:commentRangeStart w:id="0"/>"#).unwrap();
        let inside = xml.find("commented").unwrap();
        let end = xml.find(r#"<w:commentRangeEnd w:id="0"/>"#).unwrap();
        let mark = xml
            .find(r#"<w:r><w:rPr><w:rStyle w:val="CommentReference"/></w:rPr><w:commentReference w:id="0"/></w:r>"#)
            .unwrap();
        let after = xml.find(" after").unwrap();
        assert!(start < inside && inside < end && end < mark && mark < after);
        assert_eq!(text.text(), "before commented after");
    }

    #[test]
    fn test_base_properties_only_touch_text_runs() {
        let mut runs = RunList::default();
        runs.append("a", Some(RunProperties::new().with_italic(true)));
        runs.end_comment(1);

        let mut para = Paragraph::default();
        runs.render_into(&mut para, Some(&RunProperties::new().with_bold(true)));
        let xml = render(&para);
        assert!(xml.contains("<w:rPr><w:b/><w:i/></w:rPr>"));
        assert_eq!(xml.matches("<w:b/>").count(), 1);
    }
}
