//! Review comments

use crate::builder::text::{RunList, COMMENT_REFERENCE_STYLE};
use crate::document::{self, Paragraph, ParagraphContent, Run, RunContent, RunProperties};

/// Paragraph style of comment bodies
const COMMENT_TEXT_STYLE: &str = "CommentText";

/// A comment, anchored in the body with `start_comment`/`end_comment`
#[derive(Clone, Debug)]
pub struct Comment {
    id: u32,
    author: String,
    initials: String,
    date: String,
    runs: RunList,
}

impl Comment {
    pub(crate) fn new(id: u32, author: &str, initials: &str) -> Self {
        Comment {
            id,
            author: author.to_string(),
            initials: initials.to_string(),
            date: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            runs: RunList::default(),
        }
    }

    /// ID to pass to `start_comment` and `end_comment`
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Creation time, `YYYY-MM-DDThh:mm:ssZ` in UTC
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn text(&self) -> String {
        self.runs.text()
    }

    pub fn append(&mut self, text: impl Into<String>) -> &mut Self {
        self.runs.append(text, None);
        self
    }

    pub fn append_with(&mut self, text: impl Into<String>, props: RunProperties) -> &mut Self {
        self.runs.append(text, Some(props));
        self
    }

    pub(crate) fn to_comment(&self) -> document::Comment {
        let mut para = Paragraph::with_style(COMMENT_TEXT_STYLE);
        let mut mark = Run::from_content(RunContent::AnnotationRef);
        mark.properties = Some(RunProperties {
            style: Some(COMMENT_REFERENCE_STYLE.into()),
            ..Default::default()
        });
        para.push(ParagraphContent::Run(mark));
        self.runs.render_into(&mut para, None);

        document::Comment {
            id: self.id,
            author: self.author.clone(),
            initials: self.initials.clone(),
            date: self.date.clone(),
            paragraphs: vec![para],
        }
    }
}
