//! Numbering definitions (numbering.xml)
//!
//! Abstract definitions describe the nine levels of a list; instances
//! (`w:num`) are what paragraphs reference through `numPr/numId`.

mod abstract_num;
pub mod catalog;
mod level;
mod num;
mod types;

pub use abstract_num::AbstractNum;
pub use level::{Level, LevelOverride, LevelParagraphProperties, LevelRunProperties};
pub use num::Num;
pub use types::{LevelFonts, NumberFormat};

use crate::error::{Error, Result};
use crate::xml::{self, RawXmlElement, RawXmlNode};
use quick_xml::Reader;

/// Contents of `numbering.xml`, in document order
#[derive(Clone, Debug, Default)]
pub struct Numbering {
    pub abstract_nums: Vec<AbstractNum>,
    pub nums: Vec<Num>,
    /// Picture bullets and anything else without a field, written first
    pub unknown_children: Vec<RawXmlNode>,
    /// `xmlns:*` and `mc:Ignorable` of a parsed root, so prefixes used by
    /// the children above stay declared
    pub root_namespaces: Vec<(String, String)>,
}

impl Numbering {
    pub fn new() -> Self {
        Numbering::default()
    }

    /// No definitions and no instances
    pub fn is_empty(&self) -> bool {
        self.abstract_nums.is_empty() && self.nums.is_empty()
    }

    /// Parse `numbering.xml`.
    ///
    /// `w:numIdMacAtCleanup` is dropped: it would have to follow the
    /// instances, and instances are added after parsing.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut numbering = Numbering::new();
        let root = xml::read_root(&mut reader, |reader, e, open| {
            match (e.name().local_name().as_ref(), open) {
                (b"abstractNum", true) => numbering
                    .abstract_nums
                    .push(AbstractNum::from_reader(reader, e)?),
                (b"num", true) => numbering.nums.push(Num::from_reader(reader, e)?),
                (b"numIdMacAtCleanup", _) => xml::skip_rest(reader, open)?,
                _ => numbering
                    .unknown_children
                    .push(RawXmlElement::read(reader, e, open)?),
            }
            Ok(())
        })?;
        if let Some(root) = root {
            numbering.root_namespaces = root
                .attributes
                .into_iter()
                .filter(|(key, _)| key.starts_with("xmlns:") || key == "mc:Ignorable")
                .collect();
        }

        log::debug!(
            "parsed numbering: {} abstract, {} instances",
            numbering.abstract_nums.len(),
            numbering.nums.len()
        );
        Ok(numbering)
    }

    pub fn to_xml(&self) -> Result<String> {
        let namespaces = self.namespaces();
        let namespaces: Vec<(&str, &str)> =
            namespaces.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        xml::write_part("w:numbering", &namespaces, |writer| {
            for child in &self.unknown_children {
                child.write_to(writer)?;
            }
            for definition in &self.abstract_nums {
                definition.write_to(writer)?;
            }
            self.nums.iter().try_for_each(|instance| instance.write_to(writer))
        })
    }

    /// Default root declarations followed by those of a parsed root.
    /// A prefix declared twice keeps its first URI; `mc:Ignorable` lists
    /// every declared prefix either root marks ignorable.
    fn namespaces(&self) -> Vec<(String, String)> {
        let defaults = xml::NUMBERING_NAMESPACES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));

        let mut namespaces: Vec<(String, String)> = Vec::new();
        let mut ignorable: Vec<String> = Vec::new();
        for (key, value) in defaults.chain(self.root_namespaces.iter().cloned()) {
            if key == "mc:Ignorable" {
                ignorable.extend(value.split_whitespace().map(String::from));
            } else if !namespaces.iter().any(|(k, _)| *k == key) {
                namespaces.push((key, value));
            }
        }

        let mut prefixes: Vec<String> = Vec::new();
        for prefix in ignorable {
            let key = format!("xmlns:{}", prefix);
            if !prefixes.contains(&prefix) && namespaces.iter().any(|(k, _)| *k == key) {
                prefixes.push(prefix);
            }
        }
        namespaces.push(("mc:Ignorable".to_string(), prefixes.join(" ")));
        namespaces
    }

    pub fn abstract_num(&self, id: u32) -> Option<&AbstractNum> {
        self.abstract_nums.iter().find(|a| a.abstract_num_id == id)
    }

    pub fn num(&self, num_id: u32) -> Option<&Num> {
        self.nums.iter().find(|n| n.num_id == num_id)
    }

    /// Level `ilvl` of the definition instance `num_id` points at
    pub fn instance_level(&self, num_id: u32, ilvl: u8) -> Option<&Level> {
        let abstract_id = self.num(num_id)?.abstract_num_id;
        self.abstract_num(abstract_id)?.level(ilvl)
    }

    /// Add an abstract definition, assigning it the next free id
    pub fn add_abstract_num(&mut self, mut abs_num: AbstractNum) -> u32 {
        let id = self
            .abstract_nums
            .iter()
            .map(|a| a.abstract_num_id + 1)
            .max()
            .unwrap_or(0);
        abs_num.abstract_num_id = id;
        self.abstract_nums.push(abs_num);
        log::debug!("added abstract numbering {}", id);
        id
    }

    /// Create an instance of an abstract definition whose first level
    /// restarts at 1, returning its numId
    pub fn add_instance(&mut self, abstract_id: u32) -> Result<u32> {
        if self.abstract_num(abstract_id).is_none() {
            return Err(Error::UnknownAbstractNum(abstract_id));
        }

        let mut num_id = self.nums.len() as u32 + 1;
        if self.num(num_id).is_some() {
            num_id = self.nums.iter().map(|n| n.num_id).max().unwrap_or(0) + 1;
        }

        self.nums.push(Num::restarting(num_id, abstract_id));
        log::debug!("numbering instance {} -> abstract {}", num_id, abstract_id);
        Ok(num_id)
    }
}
