//! Numbering instances (w:num)

use crate::error::Result;
use crate::xml::{self, parse_attr, parse_val, write_val};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

use super::level::LevelOverride;

/// Numbering instance, referenced from paragraphs by `numId`
#[derive(Clone, Debug)]
pub struct Num {
    pub num_id: u32,
    pub abstract_num_id: u32,
    pub level_overrides: Vec<LevelOverride>,
}

impl Num {
    pub fn new(num_id: u32, abstract_num_id: u32) -> Self {
        Num {
            num_id,
            abstract_num_id,
            level_overrides: Vec::new(),
        }
    }

    /// Instance whose first level restarts at 1
    pub fn restarting(num_id: u32, abstract_num_id: u32) -> Self {
        Num {
            level_overrides: vec![LevelOverride::restart(0, 1)],
            ..Num::new(num_id, abstract_num_id)
        }
    }

    pub(crate) fn from_reader<R: BufRead>(
        reader: &mut Reader<R>,
        start: &BytesStart,
    ) -> Result<Self> {
        let mut num = Num::new(parse_attr(start, "w:numId").unwrap_or(0), 0);

        xml::read_children(reader, |reader, e, open| {
            match e.name().local_name().as_ref() {
                b"lvlOverride" => num.level_overrides.push(LevelOverride::read(reader, e, open)?),
                name => {
                    if name == b"abstractNumId" {
                        num.abstract_num_id = parse_val(e).unwrap_or(0);
                    }
                    xml::skip_rest(reader, open)?;
                }
            }
            Ok(())
        })?;

        Ok(num)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let num_id = self.num_id.to_string();
        writer.write_event(Event::Start(
            BytesStart::new("w:num").with_attributes([("w:numId", num_id.as_str())]),
        ))?;
        write_val(writer, "w:abstractNumId", &self.abstract_num_id.to_string())?;
        for over in &self.level_overrides {
            over.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:num")))?;
        Ok(())
    }
}
