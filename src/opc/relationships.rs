//! `.rels` parts
//!
//! Relationships are written in the order they were added.

use crate::error::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationships of one source, in insertion order
#[derive(Clone, Debug, Default)]
pub struct Relationships {
    items: Vec<Relationship>,
    /// Highest numeric `rIdN` handed out or read so far
    last_id: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// Relative to the source part unless the mode is external
    pub target: String,
    pub target_mode: TargetMode,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetMode {
    #[default]
    Internal,
    External,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.rels` part; new IDs continue after the highest one found
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Relationships::new();
        loop {
            match reader.read_event()? {
                Event::Empty(e) | Event::Start(e)
                    if e.name().local_name().as_ref() == b"Relationship" =>
                {
                    let rel = parse_relationship(&e)?;
                    if let Some(n) = id_number(&rel.id) {
                        rels.last_id = rels.last_id.max(n);
                    }
                    rels.items.push(rel);
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(rels)
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Utf8(e.utf8_error()))
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);
        crate::xml::write_declaration(&mut xml)?;

        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", NS_RELATIONSHIPS));
        xml.write_event(Event::Start(root))?;

        for rel in &self.items {
            let mut elem = BytesStart::new("Relationship");
            elem.push_attribute(("Id", rel.id.as_str()));
            elem.push_attribute(("Type", rel.rel_type.as_str()));
            elem.push_attribute(("Target", rel.target.as_str()));
            if rel.target_mode == TargetMode::External {
                elem.push_attribute(("TargetMode", "External"));
            }
            xml.write_event(Event::Empty(elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Relationships")))?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// First relationship of `rel_type`
    pub fn by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.rel_type == rel_type)
    }

    pub fn all_by_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.items.iter().filter(|r| r.rel_type == rel_type).collect()
    }

    /// Add an internal relationship, returning its new `rIdN`
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, TargetMode::Internal)
    }

    pub fn add_external(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, TargetMode::External)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Relationship> {
        self.items.iter_mut()
    }

    /// Drop relationships failing `keep`. Remaining IDs are left as they are,
    /// since the source part refers to them.
    pub fn retain(&mut self, keep: impl FnMut(&Relationship) -> bool) {
        self.items.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, rel_type: &str, target: &str, target_mode: TargetMode) -> String {
        self.last_id += 1;
        let id = format!("rId{}", self.last_id);
        log::trace!("{} -> {}", id, target);
        self.items.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode,
        });
        id
    }
}

fn id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId")?.parse().ok()
}

fn parse_relationship(element: &BytesStart) -> Result<Relationship> {
    let mut rel = Relationship {
        id: String::new(),
        rel_type: String::new(),
        target: String::new(),
        target_mode: TargetMode::Internal,
    };
    let mut seen = [false; 3];

    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.local_name().as_ref() {
            b"Id" => (rel.id, seen[0]) = (value, true),
            b"Type" => (rel.rel_type, seen[1]) = (value, true),
            b"Target" => (rel.target, seen[2]) = (value, true),
            b"TargetMode" if value == "External" => rel.target_mode = TargetMode::External,
            _ => {}
        }
    }

    if let Some(pos) = seen.iter().position(|s| !s) {
        return Err(Error::MissingAttribute {
            element: "Relationship".into(),
            attr: ["Id", "Type", "Target"][pos].into(),
        });
    }
    Ok(rel)
}

/// Relationship types this crate reads or writes
pub mod rel_types {
    macro_rules! rel_type {
        ($name:ident, $suffix:literal) => {
            pub const $name: &str = concat!(
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/",
                $suffix
            );
        };
    }

    rel_type!(OFFICE_DOCUMENT, "officeDocument");
    rel_type!(STYLES, "styles");
    rel_type!(NUMBERING, "numbering");
    rel_type!(COMMENTS, "comments");
    rel_type!(HEADER, "header");
    rel_type!(IMAGE, "image");
    rel_type!(HYPERLINK, "hyperlink");
}
