//! XML helpers shared by the part readers and writers

mod namespace;
mod raw;
mod read;

pub use namespace::*;
pub use raw::{RawXmlElement, RawXmlNode};
pub use read::{parse_attr, parse_val, read_children, read_root, skip_rest};

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Helper to get an unescaped attribute value from BytesStart
pub fn get_attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Helper to get w:val attribute (common in OOXML)
pub fn get_w_val(element: &BytesStart) -> Option<String> {
    get_attr(element, "w:val").or_else(|| get_attr(element, "val"))
}

/// Write the standalone XML declaration every part starts with
pub fn write_declaration<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(())
}

/// Serialize a whole XML part: declaration, then `root` carrying
/// `namespaces` around whatever `content` writes
pub fn write_part<F>(root: &str, namespaces: &[(&str, &str)], content: F) -> Result<String>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    let mut writer = Writer::new(Vec::new());
    write_declaration(&mut writer)?;
    let start = BytesStart::new(root).with_attributes(namespaces.iter().copied());
    writer.write_event(Event::Start(start))?;
    content(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Utf8(e.utf8_error()))
}

/// Write `<name w:val="value"/>`
pub fn write_val<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    let mut elem = BytesStart::new(name);
    elem.push_attribute(("w:val", value));
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// Write `<name w:val="value"/>` when there is a value
pub fn write_opt_val<W: Write>(writer: &mut Writer<W>, name: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => write_val(writer, name, value),
        None => Ok(()),
    }
}

/// Write an on/off toggle: `<name/>` when on, `<name w:val="0"/>` when off
pub fn write_toggle<W: Write>(writer: &mut Writer<W>, name: &str, on: bool) -> Result<()> {
    let mut elem = BytesStart::new(name);
    if !on {
        elem.push_attribute(("w:val", "0"));
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// Write an empty element with the given attributes
pub fn write_empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}
