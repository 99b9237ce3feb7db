//! List levels (`w:lvl`) and their per-instance overrides

use crate::error::Result;
use crate::xml::{
    self, get_attr, get_w_val, parse_attr, parse_val, write_empty, write_opt_val,
    RawXmlElement, RawXmlNode,
};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

use super::types::{LevelFonts, NumberFormat};

/// How one nesting level of a list is numbered and indented
#[derive(Clone, Debug, Default)]
pub struct Level {
    /// 0 to 8
    pub ilvl: u8,
    pub start: Option<u32>,
    pub num_fmt: Option<NumberFormat>,
    /// Label template, `%n` standing for the counter of level n (`%1.%2.`)
    pub level_text: Option<String>,
    pub lvl_jc: Option<String>,
    pub p_pr: Option<LevelParagraphProperties>,
    pub r_pr: Option<LevelRunProperties>,
    /// Children without a field here (`suff`, `isLgl`, ...), kept in order
    pub unknown_children: Vec<RawXmlNode>,
}

/// `w:lvlOverride` inside a list instance
#[derive(Clone, Debug)]
pub struct LevelOverride {
    pub ilvl: u8,
    pub start_override: Option<u32>,
    pub lvl: Option<Level>,
}

/// Tab stop and indentation of a level (`w:pPr`), in twips
#[derive(Clone, Debug, Default)]
pub struct LevelParagraphProperties {
    pub tab: Option<u32>,
    pub ind_start: Option<i32>,
    pub ind_hanging: Option<i32>,
    pub unknown_children: Vec<RawXmlNode>,
}

/// Font and size of the label (`w:rPr`)
#[derive(Clone, Debug, Default)]
pub struct LevelRunProperties {
    pub fonts: Option<LevelFonts>,
    /// Half-points
    pub size: Option<u32>,
    pub unknown_children: Vec<RawXmlNode>,
}

impl Level {
    /// Level `ilvl` counting from 1
    pub fn new(ilvl: u8) -> Self {
        Level {
            ilvl,
            start: Some(1),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, fmt: NumberFormat) -> Self {
        self.num_fmt = Some(fmt);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.level_text = Some(text.into());
        self
    }

    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// `left`, `center` or `right`
    pub fn with_justification(mut self, jc: impl Into<String>) -> Self {
        self.lvl_jc = Some(jc.into());
        self
    }

    /// Tab stop following the label
    pub fn with_tab(mut self, pos: u32) -> Self {
        self.paragraph().tab = Some(pos);
        self
    }

    pub fn with_indent(mut self, start: i32, hanging: i32) -> Self {
        let p_pr = self.paragraph();
        p_pr.ind_start = Some(start);
        p_pr.ind_hanging = Some(hanging);
        self
    }

    pub fn with_fonts(mut self, fonts: LevelFonts) -> Self {
        self.run().fonts = Some(fonts);
        self
    }

    /// Label size in half-points
    pub fn with_size(mut self, half_points: u32) -> Self {
        self.run().size = Some(half_points);
        self
    }

    fn paragraph(&mut self) -> &mut LevelParagraphProperties {
        self.p_pr.get_or_insert_with(Default::default)
    }

    fn run(&mut self) -> &mut LevelRunProperties {
        self.r_pr.get_or_insert_with(Default::default)
    }

    pub(crate) fn from_reader<R: BufRead>(
        reader: &mut Reader<R>,
        start: &BytesStart,
    ) -> Result<Self> {
        let mut level = Level {
            ilvl: parse_attr(start, "w:ilvl").unwrap_or(0),
            ..Default::default()
        };

        xml::read_children(reader, |reader, e, open| {
            match (e.name().local_name().as_ref(), open) {
                (b"pPr", true) => level.p_pr = Some(LevelParagraphProperties::from_reader(reader)?),
                (b"rPr", true) => level.r_pr = Some(LevelRunProperties::from_reader(reader)?),
                (b"start", false) => level.start = parse_val(e),
                (b"numFmt", false) => level.num_fmt = parse_val(e),
                (b"lvlText", false) => level.level_text = get_w_val(e),
                (b"lvlJc", false) => level.lvl_jc = get_w_val(e),
                _ => level.unknown_children.push(RawXmlElement::read(reader, e, open)?),
            }
            Ok(())
        })?;

        Ok(level)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let ilvl = self.ilvl.to_string();
        writer.write_event(Event::Start(
            BytesStart::new("w:lvl").with_attributes([("w:ilvl", ilvl.as_str())]),
        ))?;

        let start = self.start.map(|s| s.to_string());
        write_opt_val(writer, "w:start", start.as_deref())?;
        write_opt_val(writer, "w:numFmt", self.num_fmt.as_ref().map(NumberFormat::as_str))?;
        // lvlRestart, pStyle, isLgl and suff come between numFmt and lvlText
        for child in &self.unknown_children {
            child.write_to(writer)?;
        }
        write_opt_val(writer, "w:lvlText", self.level_text.as_deref())?;
        write_opt_val(writer, "w:lvlJc", self.lvl_jc.as_deref())?;

        if let Some(p_pr) = &self.p_pr {
            p_pr.write_to(writer)?;
        }
        if let Some(r_pr) = &self.r_pr {
            r_pr.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:lvl")))?;
        Ok(())
    }
}

impl LevelOverride {
    /// Restart the given level at `start`
    pub fn restart(ilvl: u8, start: u32) -> Self {
        LevelOverride {
            ilvl,
            start_override: Some(start),
            lvl: None,
        }
    }

    /// Read a `w:lvlOverride`, which may come as an empty tag
    pub(crate) fn read<R: BufRead>(
        reader: &mut Reader<R>,
        start: &BytesStart,
        open: bool,
    ) -> Result<Self> {
        let mut over = LevelOverride {
            ilvl: parse_attr(start, "w:ilvl").unwrap_or(0),
            start_override: None,
            lvl: None,
        };
        if !open {
            return Ok(over);
        }

        xml::read_children(reader, |reader, e, open| {
            match (e.name().local_name().as_ref(), open) {
                (b"lvl", true) => over.lvl = Some(Level::from_reader(reader, e)?),
                (b"startOverride", _) => {
                    over.start_override = parse_val(e);
                    xml::skip_rest(reader, open)?;
                }
                _ => xml::skip_rest(reader, open)?,
            }
            Ok(())
        })?;

        Ok(over)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let ilvl = self.ilvl.to_string();
        writer.write_event(Event::Start(
            BytesStart::new("w:lvlOverride").with_attributes([("w:ilvl", ilvl.as_str())]),
        ))?;

        let start = self.start_override.map(|s| s.to_string());
        write_opt_val(writer, "w:startOverride", start.as_deref())?;
        if let Some(lvl) = &self.lvl {
            lvl.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:lvlOverride")))?;
        Ok(())
    }
}

impl LevelParagraphProperties {
    pub(crate) fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = LevelParagraphProperties::default();

        xml::read_children(reader, |reader, e, open| {
            match e.name().local_name().as_ref() {
                b"tabs" => props.tab = first_tab_stop(reader, open)?,
                b"ind" => {
                    props.ind_start = parse_attr(e, "w:left").or_else(|| parse_attr(e, "w:start"));
                    props.ind_hanging = parse_attr(e, "w:hanging");
                    xml::skip_rest(reader, open)?;
                }
                _ => props.unknown_children.push(RawXmlElement::read(reader, e, open)?),
            }
            Ok(())
        })?;

        Ok(props)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        if let Some(pos) = self.tab {
            writer.write_event(Event::Start(BytesStart::new("w:tabs")))?;
            let pos = pos.to_string();
            write_empty(writer, "w:tab", &[("w:val", "num"), ("w:pos", pos.as_str())])?;
            writer.write_event(Event::End(BytesEnd::new("w:tabs")))?;
        }

        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        let start = self.ind_start.map(|v| v.to_string());
        let hanging = self.ind_hanging.map(|v| v.to_string());
        let ind = present([("w:left", start.as_deref()), ("w:hanging", hanging.as_deref())]);
        if !ind.is_empty() {
            write_empty(writer, "w:ind", &ind)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        Ok(())
    }
}

/// Attributes that have a value, in the given order
fn present<'a, const N: usize>(attrs: [(&'a str, Option<&'a str>); N]) -> Vec<(&'a str, &'a str)> {
    attrs
        .into_iter()
        .filter_map(|(name, value)| Some((name, value?)))
        .collect()
}

/// Position of the first `w:tab` inside `w:tabs`
fn first_tab_stop<R: BufRead>(reader: &mut Reader<R>, open: bool) -> Result<Option<u32>> {
    let mut first = None;
    if open {
        xml::read_children(reader, |reader, e, open| {
            if first.is_none() && e.name().local_name().as_ref() == b"tab" {
                first = parse_attr(e, "w:pos");
            }
            xml::skip_rest(reader, open)
        })?;
    }
    Ok(first)
}

impl LevelRunProperties {
    pub(crate) fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = LevelRunProperties::default();

        xml::read_children(reader, |reader, e, open| {
            match (e.name().local_name().as_ref(), open) {
                (b"rFonts", false) => {
                    props.fonts = Some(LevelFonts {
                        hint: get_attr(e, "w:hint"),
                        ascii: get_attr(e, "w:ascii"),
                        h_ansi: get_attr(e, "w:hAnsi"),
                        east_asia: get_attr(e, "w:eastAsia"),
                        cs: get_attr(e, "w:cs"),
                    })
                }
                (b"sz", false) => props.size = parse_val(e),
                _ => props.unknown_children.push(RawXmlElement::read(reader, e, open)?),
            }
            Ok(())
        })?;

        Ok(props)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

        if let Some(fonts) = &self.fonts {
            let slots = present([
                ("w:hint", fonts.hint.as_deref()),
                ("w:ascii", fonts.ascii.as_deref()),
                ("w:hAnsi", fonts.h_ansi.as_deref()),
                ("w:eastAsia", fonts.east_asia.as_deref()),
                ("w:cs", fonts.cs.as_deref()),
            ]);
            write_empty(writer, "w:rFonts", &slots)?;
        }

        for child in &self.unknown_children {
            child.write_to(writer)?;
        }

        let size = self.size.map(|v| v.to_string());
        write_opt_val(writer, "w:sz", size.as_deref())?;

        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        Ok(())
    }
}
