//! List definitions shared by any number of list instances

use crate::error::Result;
use crate::xml::{self, get_attr, get_w_val, parse_attr, write_opt_val, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

use super::level::Level;

/// `w:abstractNum`: the levels of a list, without any counter state
#[derive(Clone, Debug, Default)]
pub struct AbstractNum {
    pub abstract_num_id: u32,
    /// `w15:restartNumberingAfterBreak`
    pub restart_after_break: Option<bool>,
    /// 8 hex digits
    pub nsid: Option<String>,
    /// `hybridMultilevel`, `multilevel` or `singleLevel`
    pub multi_level_type: Option<String>,
    /// 8 hex digits
    pub tmpl: Option<String>,
    /// Sorted by `ilvl`
    pub levels: Vec<Level>,
    pub unknown_children: Vec<RawXmlNode>,
}

/// Random 8-digit uppercase hex identifier for nsid/tmpl
pub(crate) fn random_hex_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..8].to_uppercase()
}

impl AbstractNum {
    /// Empty hybrid multilevel definition with fresh `nsid` and `tmpl`
    pub fn new(id: u32) -> Self {
        AbstractNum {
            abstract_num_id: id,
            restart_after_break: Some(false),
            nsid: Some(random_hex_id()),
            multi_level_type: Some("hybridMultilevel".to_string()),
            tmpl: Some(random_hex_id()),
            ..Default::default()
        }
    }

    pub fn with_levels(id: u32, levels: impl IntoIterator<Item = Level>) -> Self {
        let mut abs = Self::new(id);
        for level in levels {
            abs.add_level(level);
        }
        abs
    }

    /// Insert a level in `ilvl` order, replacing one with the same index
    pub fn add_level(&mut self, level: Level) {
        match self.levels.iter().position(|l| l.ilvl >= level.ilvl) {
            Some(i) if self.levels[i].ilvl == level.ilvl => self.levels[i] = level,
            Some(i) => self.levels.insert(i, level),
            None => self.levels.push(level),
        }
    }

    pub fn level(&self, ilvl: u8) -> Option<&Level> {
        self.levels.iter().find(|l| l.ilvl == ilvl)
    }

    pub(crate) fn from_reader<R: BufRead>(
        reader: &mut Reader<R>,
        start: &BytesStart,
    ) -> Result<Self> {
        let mut abs = AbstractNum {
            abstract_num_id: parse_attr(start, "w:abstractNumId").unwrap_or(0),
            restart_after_break: get_attr(start, "w15:restartNumberingAfterBreak")
                .map(|v| matches!(v.as_str(), "1" | "true" | "on")),
            ..Default::default()
        };

        xml::read_children(reader, |reader, e, open| {
            let field = match e.name().local_name().as_ref() {
                b"lvl" if open => {
                    abs.add_level(Level::from_reader(reader, e)?);
                    return Ok(());
                }
                b"nsid" if !open => &mut abs.nsid,
                b"multiLevelType" if !open => &mut abs.multi_level_type,
                b"tmpl" if !open => &mut abs.tmpl,
                _ => {
                    abs.unknown_children.push(RawXmlElement::read(reader, e, open)?);
                    return Ok(());
                }
            };
            *field = get_w_val(e);
            Ok(())
        })?;

        Ok(abs)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let id = self.abstract_num_id.to_string();
        let mut start = BytesStart::new("w:abstractNum");
        start.push_attribute(("w:abstractNumId", id.as_str()));
        if let Some(restart) = self.restart_after_break {
            start.push_attribute(("w15:restartNumberingAfterBreak", if restart { "1" } else { "0" }));
        }
        writer.write_event(Event::Start(start))?;

        write_opt_val(writer, "w:nsid", self.nsid.as_deref())?;
        write_opt_val(writer, "w:multiLevelType", self.multi_level_type.as_deref())?;
        write_opt_val(writer, "w:tmpl", self.tmpl.as_deref())?;
        // name, styleLink and numStyleLink come before the levels
        for child in &self.unknown_children {
            child.write_to(writer)?;
        }
        for level in &self.levels {
            level.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:abstractNum")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::numbering::NumberFormat;

    #[test]
    fn test_random_hex_id() {
        let id = random_hex_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_levels_stay_ordered() {
        let mut abs = AbstractNum::new(4);
        abs.add_level(Level::new(2));
        abs.add_level(Level::new(0));
        abs.add_level(Level::new(1).with_format(NumberFormat::LowerLetter));
        abs.add_level(Level::new(1).with_format(NumberFormat::Decimal));

        let order: Vec<_> = abs.levels.iter().map(|l| l.ilvl).collect();
        assert_eq!(order, [0, 1, 2]);
        assert_eq!(abs.level(1).unwrap().num_fmt, Some(NumberFormat::Decimal));
    }

    #[test]
    fn test_header_markup() {
        let mut abs = AbstractNum::new(0);
        abs.nsid = Some("0A1B2C3D".into());
        abs.tmpl = Some("DEADBEEF".into());

        let mut buf = Vec::new();
        abs.write_to(&mut Writer::new(&mut buf)).unwrap();
        let xml = String::from_utf8(buf).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<w:abstractNum w:abstractNumId="0" w15:restartNumberingAfterBreak="0">"#,
                r#"<w:nsid w:val="0A1B2C3D"/><w:multiLevelType w:val="hybridMultilevel"/>"#,
                r#"<w:tmpl w:val="DEADBEEF"/></w:abstractNum>"#
            )
        );
    }
}
