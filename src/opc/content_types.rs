//! `[Content_Types].xml`
//!
//! A part's type comes from its override when there is one, otherwise from
//! the default registered for its extension.

use crate::error::{Error, Result};
use crate::opc::PartUri;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const IMAGE_TYPES: [(&str, &str); 5] = [
    ("png", "image/png"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
];

pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const XML: &str = "application/xml";

macro_rules! wordml_type {
    ($name:ident, $kind:literal) => {
        pub const $name: &str = concat!(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.",
            $kind,
            "+xml"
        );
    };
}

wordml_type!(MAIN_DOCUMENT, "document.main");
wordml_type!(STYLES, "styles");
wordml_type!(NUMBERING, "numbering");
wordml_type!(COMMENTS, "comments");
wordml_type!(HEADER, "header");

#[derive(Clone, Debug, Default)]
pub struct ContentTypes {
    /// Lower-case extension to type
    defaults: Vec<(String, String)>,
    overrides: Vec<(PartUri, String)>,
}

impl ContentTypes {
    /// Defaults for `rels`, `xml` and the embeddable image formats
    pub fn new() -> Self {
        let mut types = ContentTypes::default();
        for (ext, mime) in [("rels", RELATIONSHIPS), ("xml", XML)].into_iter().chain(IMAGE_TYPES) {
            types.add_default(ext, mime);
        }
        types
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut types = ContentTypes::default();
        loop {
            match reader.read_event()? {
                Event::Empty(e) | Event::Start(e) => match e.local_name().as_ref() {
                    b"Default" => {
                        let ext = required(&e, "Extension")?;
                        types.add_default(&ext, &required(&e, "ContentType")?);
                    }
                    b"Override" => {
                        let uri = PartUri::new(&required(&e, "PartName")?)?;
                        types.add_override(&uri, &required(&e, "ContentType")?);
                    }
                    _ => {}
                },
                Event::Eof => return Ok(types),
                _ => {}
            }
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Utf8(e.utf8_error()))
    }

    /// Defaults first, then overrides, each in insertion order
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);
        crate::xml::write_declaration(&mut xml)?;
        xml.write_event(Event::Start(
            BytesStart::new("Types").with_attributes([("xmlns", NS_CONTENT_TYPES)]),
        ))?;

        let defaults = self
            .defaults
            .iter()
            .map(|(ext, ct)| ("Default", "Extension", ext.as_str(), ct.as_str()));
        let overrides = self
            .overrides
            .iter()
            .map(|(uri, ct)| ("Override", "PartName", uri.as_str(), ct.as_str()));
        for (tag, key, value, content_type) in defaults.chain(overrides) {
            let elem =
                BytesStart::new(tag).with_attributes([(key, value), ("ContentType", content_type)]);
            xml.write_event(Event::Empty(elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Types")))?;
        Ok(())
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        upsert(&mut self.defaults, extension.to_lowercase(), content_type);
    }

    pub fn add_override(&mut self, uri: &PartUri, content_type: &str) {
        upsert(&mut self.overrides, uri.clone(), content_type);
    }

    pub fn get(&self, uri: &PartUri) -> Option<&str> {
        if let Some((_, ct)) = self.overrides.iter().find(|(u, _)| u == uri) {
            return Some(ct.as_str());
        }
        let ext = uri.extension()?.to_lowercase();
        self.defaults
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, ct)| ct.as_str())
    }
}

fn upsert<K: PartialEq>(entries: &mut Vec<(K, String)>, key: K, content_type: &str) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some((_, ct)) => *ct = content_type.to_string(),
        None => entries.push((key, content_type.to_string())),
    }
}

fn required(element: &BytesStart, name: &str) -> Result<String> {
    crate::xml::get_attr(element, name).ok_or_else(|| Error::MissingAttribute {
        element: String::from_utf8_lossy(element.name().as_ref()).into_owned(),
        attr: name.to_string(),
    })
}

/// MIME type of an image extension that can be embedded
pub fn image_content_type(extension: &str) -> Option<&'static str> {
    let ext = extension.to_lowercase();
    IMAGE_TYPES.iter().find(|(e, _)| *e == ext).map(|(_, ct)| *ct)
}
