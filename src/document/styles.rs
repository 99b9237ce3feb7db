//! Style definitions (styles.xml)
//!
//! Only the styles the builder references are defined here. Documents that
//! need a richer catalog import the whole part from a template instead.

use crate::document::RunProperties;
use crate::error::Result;
use crate::xml::{self, write_empty, write_val};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Style type (w:style/@w:type)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
}

impl StyleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
            StyleType::Table => "table",
        }
    }
}

/// A style definition (w:style)
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub style_type: StyleType,
    pub id: String,
    /// UI-visible name
    pub name: String,
    /// Default style for its type
    pub is_default: bool,
    pub based_on: Option<String>,
    /// Style of the paragraph that follows
    pub next: Option<String>,
    pub ui_priority: Option<u32>,
    pub semi_hidden: bool,
    pub unhide_when_used: bool,
    /// Shown in the quick style gallery
    pub q_format: bool,
    pub paragraph: Option<StyleParagraphProperties>,
    pub run: Option<RunProperties>,
    /// Default cell margins (left, right) for table styles, in twips
    pub cell_margins: Option<(u32, u32)>,
}

/// Paragraph formatting carried by a style
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleParagraphProperties {
    pub keep_next: bool,
    pub keep_lines: bool,
    /// Space before, in twips
    pub spacing_before: Option<u32>,
    /// Space after, in twips
    pub spacing_after: Option<u32>,
    pub justification: Option<String>,
    /// Outline level (0 = level 1 in the navigation pane)
    pub outline_level: Option<u8>,
}

/// The styles part
#[derive(Clone, Debug, Default)]
pub struct Styles {
    /// Document default fonts (ASCII, complex script) and size in half-points
    pub default_font: Option<(String, String, u32)>,
    pub styles: Vec<Style>,
}

impl Style {
    /// Create a style with only its identity set
    pub fn new(style_type: StyleType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Style {
            style_type,
            id: id.into(),
            name: name.into(),
            is_default: false,
            based_on: None,
            next: None,
            ui_priority: None,
            semi_hidden: false,
            unhide_when_used: false,
            q_format: false,
            paragraph: None,
            run: None,
            cell_margins: None,
        }
    }

    /// Paragraph style based on Normal
    fn derived(id: &str, name: &str) -> Self {
        Style {
            based_on: Some("Normal".into()),
            ..Style::new(StyleType::Paragraph, id, name)
        }
    }

    /// Write to XML writer
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:style");
        start.push_attribute(("w:type", self.style_type.as_str()));
        if self.is_default {
            start.push_attribute(("w:default", "1"));
        }
        start.push_attribute(("w:styleId", self.id.as_str()));
        writer.write_event(Event::Start(start))?;

        write_val(writer, "w:name", &self.name)?;
        if let Some(based_on) = &self.based_on {
            write_val(writer, "w:basedOn", based_on)?;
        }
        if let Some(next) = &self.next {
            write_val(writer, "w:next", next)?;
        }
        if let Some(priority) = self.ui_priority {
            write_val(writer, "w:uiPriority", &priority.to_string())?;
        }
        if self.semi_hidden {
            writer.write_event(Event::Empty(BytesStart::new("w:semiHidden")))?;
        }
        if self.unhide_when_used {
            writer.write_event(Event::Empty(BytesStart::new("w:unhideWhenUsed")))?;
        }
        if self.q_format {
            writer.write_event(Event::Empty(BytesStart::new("w:qFormat")))?;
        }

        if let Some(p_pr) = &self.paragraph {
            p_pr.write_to(writer)?;
        }
        if let Some(r_pr) = &self.run {
            r_pr.write_to(writer)?;
        }

        if let Some((left, right)) = self.cell_margins {
            writer.write_event(Event::Start(BytesStart::new("w:tblPr")))?;
            write_empty(writer, "w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
            writer.write_event(Event::Start(BytesStart::new("w:tblCellMar")))?;
            let (left, right) = (left.to_string(), right.to_string());
            let sides = [
                ("w:top", "0"),
                ("w:left", left.as_str()),
                ("w:bottom", "0"),
                ("w:right", right.as_str()),
            ];
            for (side, width) in sides {
                write_empty(writer, side, &[("w:w", width), ("w:type", "dxa")])?;
            }
            writer.write_event(Event::End(BytesEnd::new("w:tblCellMar")))?;
            writer.write_event(Event::End(BytesEnd::new("w:tblPr")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:style")))?;
        Ok(())
    }
}

impl StyleParagraphProperties {
    /// Write to XML writer
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        if self.keep_next {
            writer.write_event(Event::Empty(BytesStart::new("w:keepNext")))?;
        }
        if self.keep_lines {
            writer.write_event(Event::Empty(BytesStart::new("w:keepLines")))?;
        }
        if self.spacing_before.is_some() || self.spacing_after.is_some() {
            let mut spacing = BytesStart::new("w:spacing");
            if let Some(before) = self.spacing_before {
                spacing.push_attribute(("w:before", before.to_string().as_str()));
            }
            if let Some(after) = self.spacing_after {
                spacing.push_attribute(("w:after", after.to_string().as_str()));
            }
            writer.write_event(Event::Empty(spacing))?;
        }
        if let Some(jc) = &self.justification {
            write_val(writer, "w:jc", jc)?;
        }
        if let Some(level) = self.outline_level {
            write_val(writer, "w:outlineLvl", &level.to_string())?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        Ok(())
    }
}

impl Styles {
    /// The styles installed into new documents
    pub fn default_styles() -> Self {
        let mut styles = Styles {
            default_font: Some(("Calibri".into(), "Times New Roman".into(), 22)),
            styles: Vec::new(),
        };

        let mut normal = Style::new(StyleType::Paragraph, "Normal", "Normal");
        normal.is_default = true;
        normal.q_format = true;
        styles.add(normal);

        let mut font = Style::new(StyleType::Character, "DefaultParagraphFont", "Default Paragraph Font");
        font.is_default = true;
        font.ui_priority = Some(1);
        font.semi_hidden = true;
        font.unhide_when_used = true;
        styles.add(font);

        let mut table = Style::new(StyleType::Table, "TableNormal", "Normal Table");
        table.is_default = true;
        table.ui_priority = Some(99);
        table.semi_hidden = true;
        table.unhide_when_used = true;
        table.cell_margins = Some((108, 108));
        styles.add(table);

        for (level, size) in [32u32, 28, 24, 24].into_iter().enumerate() {
            let mut heading = Style::derived(
                &format!("Heading{}", level + 1),
                &format!("heading {}", level + 1),
            );
            heading.next = Some("Normal".into());
            heading.ui_priority = Some(9);
            heading.q_format = true;
            heading.paragraph = Some(StyleParagraphProperties {
                keep_next: true,
                keep_lines: true,
                spacing_before: Some(if level == 0 { 480 } else { 240 }),
                spacing_after: Some(120),
                outline_level: Some(level as u8),
                ..Default::default()
            });
            let mut run = RunProperties::new().with_bold(true);
            run.size = Some(size);
            run.size_cs = Some(size);
            if level == 3 {
                run.italic = Some(true);
            }
            heading.run = Some(run);
            styles.add(heading);
        }

        let mut caption = Style::derived("Caption", "caption");
        caption.next = Some("Normal".into());
        caption.ui_priority = Some(35);
        caption.unhide_when_used = true;
        caption.q_format = true;
        caption.paragraph = Some(StyleParagraphProperties {
            spacing_after: Some(200),
            justification: Some("center".into()),
            ..Default::default()
        });
        let mut run = RunProperties::new().with_italic(true).with_color("44546A");
        run.size = Some(18);
        caption.run = Some(run);
        styles.add(caption);

        let mut comment_text = Style::derived("CommentText", "annotation text");
        comment_text.ui_priority = Some(99);
        comment_text.unhide_when_used = true;
        let mut run = RunProperties::new();
        run.size = Some(20);
        comment_text.run = Some(run);
        styles.add(comment_text);

        let mut comment_ref = Style::new(StyleType::Character, "CommentReference", "annotation reference");
        comment_ref.based_on = Some("DefaultParagraphFont".into());
        comment_ref.ui_priority = Some(99);
        comment_ref.semi_hidden = true;
        comment_ref.unhide_when_used = true;
        let mut run = RunProperties::new();
        run.size = Some(16);
        comment_ref.run = Some(run);
        styles.add(comment_ref);

        styles
    }

    /// Add a style, replacing one with the same ID
    pub fn add(&mut self, style: Style) {
        match self.styles.iter_mut().find(|s| s.id == style.id) {
            Some(existing) => *existing = style,
            None => self.styles.push(style),
        }
    }

    /// Get a style by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Serialize the whole part
    pub fn to_xml(&self) -> Result<String> {
        xml::write_part("w:styles", &xml::MINIMAL_NAMESPACES, |writer| {
            if let Some((ascii, cs, size)) = &self.default_font {
                write_doc_defaults(writer, ascii, cs, *size)?;
            }
            for style in &self.styles {
                style.write_to(writer)?;
            }
            Ok(())
        })
    }
}

/// `w:docDefaults`: the document font plus 8pt after each paragraph
fn write_doc_defaults<W: Write>(
    writer: &mut Writer<W>,
    ascii: &str,
    cs: &str,
    size: u32,
) -> Result<()> {
    let mut run = RunProperties::new();
    run.font_ascii = Some(ascii.to_string());
    run.font_east_asia = Some(ascii.to_string());
    run.font_cs = Some(cs.to_string());
    run.size = Some(size);
    run.size_cs = Some(size);
    let paragraph = StyleParagraphProperties {
        spacing_after: Some(160),
        ..Default::default()
    };

    writer.write_event(Event::Start(BytesStart::new("w:docDefaults")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPrDefault")))?;
    run.write_to(writer)?;
    writer.write_event(Event::End(BytesEnd::new("w:rPrDefault")))?;
    writer.write_event(Event::Start(BytesStart::new("w:pPrDefault")))?;
    paragraph.write_to(writer)?;
    writer.write_event(Event::End(BytesEnd::new("w:pPrDefault")))?;
    writer.write_event(Event::End(BytesEnd::new("w:docDefaults")))?;
    Ok(())
}
