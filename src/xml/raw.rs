//! Untyped element trees
//!
//! Drawings are assembled as trees rather than one type per element, and
//! template children the numbering model has no field for are carried as
//! trees so they are written back unchanged.

use crate::error::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

#[derive(Clone, Debug, PartialEq)]
pub enum RawXmlNode {
    Element(RawXmlElement),
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawXmlElement {
    /// Qualified name, e.g. `wp:extent`
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<RawXmlNode>,
    /// Written as `<name/>` while there are no children
    pub self_closing: bool,
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl RawXmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        RawXmlElement {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: true,
        }
    }

    /// Copy a tag's name and attributes, values unescaped
    pub fn from_empty(tag: &BytesStart) -> Result<Self> {
        let mut elem = RawXmlElement::new(lossy(tag.name().as_ref()));
        for attr in tag.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?.into_owned();
            elem.attributes.push((lossy(attr.key.as_ref()), value));
        }
        Ok(elem)
    }

    /// Read the rest of an element whose start tag has been consumed
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut elem = Self::from_empty(start)?;
        elem.self_closing = false;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let node = match reader.read_event_into(&mut buf)? {
                Event::Start(e) => RawXmlNode::Element(Self::from_reader(reader, &e)?),
                Event::Empty(e) => RawXmlNode::Element(Self::from_empty(&e)?),
                Event::Text(t) => match t.unescape()? {
                    text if text.is_empty() => continue,
                    text => RawXmlNode::Text(text.into_owned()),
                },
                Event::Comment(c) => RawXmlNode::Comment(lossy(&c)),
                Event::End(_) => break,
                Event::Eof => {
                    return Err(Error::InvalidDocument(format!("<{}> is never closed", elem.name)))
                }
                _ => continue,
            };
            elem.children.push(node);
        }
        Ok(elem)
    }

    /// Capture a child met by [`read_children`](super::read_children), content included
    pub fn read<R: BufRead>(
        reader: &mut Reader<R>,
        tag: &BytesStart,
        open: bool,
    ) -> Result<RawXmlNode> {
        let elem = if open {
            Self::from_reader(reader, tag)?
        } else {
            Self::from_empty(tag)?
        };
        Ok(RawXmlNode::Element(elem))
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        start.extend_attributes(
            self.attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );

        if self.self_closing && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    pub fn elements(&self) -> impl Iterator<Item = &RawXmlElement> {
        self.children.iter().filter_map(|c| match c {
            RawXmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((name.into(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: RawXmlElement) -> Self {
        self.children.push(RawXmlNode::Element(child));
        self
    }
}

impl RawXmlNode {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let event = match self {
            RawXmlNode::Element(e) => return e.write_to(writer),
            RawXmlNode::Text(t) => Event::Text(BytesText::new(t)),
            RawXmlNode::Comment(c) => Event::Comment(BytesText::new(c)),
        };
        writer.write_event(event)?;
        Ok(())
    }
}
