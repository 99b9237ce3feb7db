//! `comments.xml`

use crate::document::Paragraph;
use crate::error::Result;
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// `w:comment`, anchored in the body by range markers carrying the same id
#[derive(Clone, Debug, Default)]
pub struct Comment {
    pub id: u32,
    pub author: String,
    pub initials: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub date: String,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Clone, Debug, Default)]
pub struct Comments {
    pub comments: Vec<Comment>,
}

impl Comment {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let id = self.id.to_string();
        writer.write_event(Event::Start(BytesStart::new("w:comment").with_attributes([
            ("w:id", id.as_str()),
            ("w:author", self.author.as_str()),
            ("w:date", self.date.as_str()),
            ("w:initials", self.initials.as_str()),
        ])))?;

        for para in &self.paragraphs {
            para.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:comment")))?;
        Ok(())
    }
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn add(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn to_xml(&self) -> Result<String> {
        xml::write_part("w:comments", &xml::MINIMAL_NAMESPACES, |writer| {
            self.comments.iter().try_for_each(|c| c.write_to(writer))
        })
    }
}
