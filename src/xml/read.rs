//! Pull-parsing helpers for parts read back from template documents
//!
//! Readers walk one element at a time: [`read_children`] hands each direct
//! child to a visitor, which either reads it to its end tag or skips it.

use super::RawXmlElement;
use crate::error::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use std::str::FromStr;

/// Visit each direct child of the element whose start tag was just read,
/// returning after its end tag.
///
/// `visit` receives the child's tag and whether it has content. A child with
/// content must be consumed up to its own end tag, by recursing, by
/// [`RawXmlElement::read`](super::RawXmlElement::read) or by [`skip_rest`].
pub fn read_children<R, F>(reader: &mut Reader<R>, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&mut Reader<R>, &BytesStart, bool) -> Result<()>,
{
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => visit(reader, &e, true)?,
            Event::Empty(e) => visit(reader, &e, false)?,
            Event::End(_) | Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}

/// Visit the children of the document element, returning the element's
/// name and attributes (`None` for an empty input)
pub fn read_root<R, F>(reader: &mut Reader<R>, visit: F) -> Result<Option<RawXmlElement>>
where
    R: BufRead,
    F: FnMut(&mut Reader<R>, &BytesStart, bool) -> Result<()>,
{
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let root = RawXmlElement::from_empty(&e)?;
                read_children(reader, visit)?;
                return Ok(Some(root));
            }
            Event::Empty(e) => return RawXmlElement::from_empty(&e).map(Some),
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// Skip the content of a child when it has any
pub fn skip_rest<R: BufRead>(reader: &mut Reader<R>, open: bool) -> Result<()> {
    if open {
        read_children(reader, |reader, _, open| skip_rest(reader, open))?;
    }
    Ok(())
}

/// Parse attribute `name` (full name, prefix included)
pub fn parse_attr<T: FromStr>(element: &BytesStart, name: &str) -> Option<T> {
    super::get_attr(element, name)?.parse().ok()
}

/// Parse `w:val`
pub fn parse_val<T: FromStr>(element: &BytesStart) -> Option<T> {
    super::get_w_val(element)?.parse().ok()
}
