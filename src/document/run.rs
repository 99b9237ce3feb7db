//! Runs (`w:r`): stretches of content sharing one set of character formatting

use crate::document::Drawing;
use crate::error::Result;
use crate::xml::{write_empty, write_opt_val, write_toggle};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

#[derive(Clone, Debug, Default)]
pub struct Run {
    pub properties: Option<RunProperties>,
    pub content: Vec<RunContent>,
}

#[derive(Clone, Debug)]
pub enum RunContent {
    /// `w:t`, written with `xml:space="preserve"` so edge spaces survive
    Text(String),
    Tab,
    Break(BreakType),
    Drawing(Box<Drawing>),
    /// Mark that opens the body of a comment
    AnnotationRef,
    /// Anchor of comment `id`, placed after its range ends
    CommentReference(u32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakType {
    #[default]
    TextWrapping,
    Page,
    Column,
}

/// Character formatting (`w:rPr`)
///
/// `None` leaves a property to the style. Toggles set to `Some(false)` are
/// written as `w:val="0"`, which switches off a property the style turns on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunProperties {
    /// Character style id
    pub style: Option<String>,
    /// ASCII and high ANSI
    pub font_ascii: Option<String>,
    pub font_east_asia: Option<String>,
    /// Complex script
    pub font_cs: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub caps: Option<bool>,
    pub small_caps: Option<bool>,
    pub strike: Option<bool>,
    pub double_strike: Option<bool>,
    pub outline: Option<bool>,
    pub shadow: Option<bool>,
    pub emboss: Option<bool>,
    pub imprint: Option<bool>,
    /// Skip spelling and grammar checks
    pub no_proof: Option<bool>,
    pub vanish: Option<bool>,
    /// `RRGGBB` or `auto`
    pub color: Option<String>,
    /// Twentieths of a point
    pub spacing: Option<i32>,
    /// Percent
    pub scale: Option<u32>,
    /// Half-points
    pub kern: Option<u32>,
    /// Half-points, negative lowers the text
    pub position: Option<i32>,
    /// Half-points: 24 is 12pt
    pub size: Option<u32>,
    pub size_cs: Option<u32>,
    pub highlight: Option<String>,
    /// `single`, `double`, `wave`, ...
    pub underline: Option<String>,
    /// Border style of a `w:bdr`
    pub border: Option<String>,
    /// Pattern of a `w:shd`
    pub shading: Option<String>,
    /// `superscript` or `subscript`
    pub vertical_align: Option<String>,
    pub emphasis: Option<String>,
    pub spec_vanish: Option<bool>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            content: vec![RunContent::Text(text.into())],
            ..Default::default()
        }
    }

    pub fn with_properties(text: impl Into<String>, properties: Option<RunProperties>) -> Self {
        Run {
            properties,
            content: vec![RunContent::Text(text.into())],
        }
    }

    /// Run holding one drawing or mark
    pub fn from_content(content: RunContent) -> Self {
        Run {
            properties: None,
            content: vec![content],
        }
    }

    /// Plain text, tabs and line breaks included
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                RunContent::Text(t) => Some(t.as_str()),
                RunContent::Tab => Some("\t"),
                RunContent::Break(BreakType::TextWrapping) => Some("\n"),
                _ => None,
            })
            .collect()
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if self.properties.is_none() && self.content.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("w:r")))?;
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:r")))?;
        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }
        for item in &self.content {
            item.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        Ok(())
    }
}

impl RunContent {
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            RunContent::Text(text) => {
                let start = BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]);
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new("w:t")))?;
                Ok(())
            }
            RunContent::Tab => write_empty(writer, "w:tab", &[]),
            RunContent::Break(BreakType::TextWrapping) => write_empty(writer, "w:br", &[]),
            RunContent::Break(BreakType::Page) => write_empty(writer, "w:br", &[("w:type", "page")]),
            RunContent::Break(BreakType::Column) => {
                write_empty(writer, "w:br", &[("w:type", "column")])
            }
            RunContent::Drawing(drawing) => drawing.write_to(writer),
            RunContent::AnnotationRef => write_empty(writer, "w:annotationRef", &[]),
            RunContent::CommentReference(id) => {
                let id = id.to_string();
                write_empty(writer, "w:commentReference", &[("w:id", id.as_str())])
            }
        }
    }
}

impl RunProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bold(mut self, on: bool) -> Self {
        self.bold = Some(on);
        self
    }

    pub fn with_italic(mut self, on: bool) -> Self {
        self.italic = Some(on);
        self
    }

    pub fn with_caps(mut self, on: bool) -> Self {
        self.caps = Some(on);
        self
    }

    /// Set the font size in points
    pub fn with_size_pt(mut self, size: f32) -> Self {
        self.size = Some((size * 2.0) as u32);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_underline(mut self, underline: impl Into<String>) -> Self {
        self.underline = Some(underline.into());
        self
    }

    /// Use the same font for ASCII, high ANSI and complex script text
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        let font = font.into();
        self.font_ascii = Some(font.clone());
        self.font_cs = Some(font);
        self
    }

    /// Overlay `other` on top of these properties; set fields in `other` win
    pub fn merged_with(&self, other: &RunProperties) -> RunProperties {
        macro_rules! pick {
            ($($field:ident),*) => {
                RunProperties {
                    $($field: other.$field.clone().or_else(|| self.$field.clone()),)*
                }
            };
        }
        pick!(
            style,
            font_ascii,
            font_east_asia,
            font_cs,
            bold,
            italic,
            caps,
            small_caps,
            strike,
            double_strike,
            outline,
            shadow,
            emboss,
            imprint,
            no_proof,
            vanish,
            color,
            spacing,
            scale,
            kern,
            position,
            size,
            size_cs,
            highlight,
            underline,
            border,
            shading,
            vertical_align,
            emphasis,
            spec_vanish
        )
    }

    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        *self == RunProperties::default()
    }

    /// Write `w:rPr` in schema order; nothing when no property is set
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

        write_opt_val(writer, "w:rStyle", self.style.as_deref())?;
        self.write_fonts(writer)?;

        for (name, value) in [
            ("w:b", self.bold),
            ("w:i", self.italic),
            ("w:caps", self.caps),
            ("w:smallCaps", self.small_caps),
            ("w:strike", self.strike),
            ("w:dstrike", self.double_strike),
            ("w:outline", self.outline),
            ("w:shadow", self.shadow),
            ("w:emboss", self.emboss),
            ("w:imprint", self.imprint),
            ("w:noProof", self.no_proof),
            ("w:vanish", self.vanish),
        ] {
            if let Some(on) = value {
                write_toggle(writer, name, on)?;
            }
        }

        let values = [
            ("w:color", self.color.clone()),
            ("w:spacing", text(self.spacing)),
            ("w:w", text(self.scale)),
            ("w:kern", text(self.kern)),
            ("w:position", text(self.position)),
            ("w:sz", text(self.size)),
            ("w:szCs", text(self.size_cs)),
            ("w:highlight", self.highlight.clone()),
            ("w:u", self.underline.clone()),
        ];
        for (name, value) in &values {
            write_opt_val(writer, name, value.as_deref())?;
        }

        if let Some(border) = &self.border {
            let attrs = [("w:val", border.as_str()), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")];
            write_empty(writer, "w:bdr", &attrs)?;
        }
        if let Some(shading) = &self.shading {
            let attrs = [("w:val", shading.as_str()), ("w:color", "auto"), ("w:fill", "auto")];
            write_empty(writer, "w:shd", &attrs)?;
        }
        write_opt_val(writer, "w:vertAlign", self.vertical_align.as_deref())?;
        write_opt_val(writer, "w:em", self.emphasis.as_deref())?;
        if let Some(on) = self.spec_vanish {
            write_toggle(writer, "w:specVanish", on)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        Ok(())
    }

    fn write_fonts<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let ascii = self.font_ascii.as_deref();
        let slots = [
            ("w:ascii", ascii),
            ("w:hAnsi", ascii),
            ("w:eastAsia", self.font_east_asia.as_deref()),
            ("w:cs", self.font_cs.as_deref()),
        ];
        let attrs: Vec<_> = slots
            .into_iter()
            .filter_map(|(name, font)| Some((name, font?)))
            .collect();
        if attrs.is_empty() {
            return Ok(());
        }
        write_empty(writer, "w:rFonts", &attrs)
    }
}

fn text<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(run: &Run) -> String {
        let mut buf = Vec::new();
        run.write_to(&mut Writer::new(&mut buf)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_always_preserves_space() {
        assert_eq!(
            render(&Run::new("Hello")),
            r#"<w:r><w:t xml:space="preserve">Hello</w:t></w:r>"#
        );
    }

    #[test]
    fn test_properties_written_in_schema_order() {
        let props = RunProperties {
            size: Some(28),
            color: Some("0000FF".into()),
            caps: Some(true),
            bold: Some(true),
            vertical_align: Some("subscript".into()),
            ..Default::default()
        };
        let out = render(&Run::with_properties("x", Some(props)));

        let order = ["<w:b/>", "<w:caps/>", "w:color", "w:sz", "w:vertAlign"];
        let positions: Vec<_> = order.iter().map(|tag| out.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", out);
    }

    #[test]
    fn test_explicit_off_toggle() {
        let props = RunProperties {
            spec_vanish: Some(false),
            ..Default::default()
        };
        let out = render(&Run::with_properties("x", Some(props)));
        assert!(out.contains(r#"<w:specVanish w:val="0"/>"#));
    }

    #[test]
    fn test_comment_markers() {
        assert_eq!(
            render(&Run::from_content(RunContent::CommentReference(3))),
            r#"<w:r><w:commentReference w:id="3"/></w:r>"#
        );
        assert_eq!(
            render(&Run::from_content(RunContent::AnnotationRef)),
            "<w:r><w:annotationRef/></w:r>"
        );
    }

    #[test]
    fn test_merged_with_prefers_overlay() {
        let base = RunProperties::new().with_bold(false).with_color("FF0000");
        let overlay = RunProperties::new().with_bold(true);
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.color.as_deref(), Some("FF0000"));
    }

    #[test]
    fn test_empty_properties_are_omitted() {
        let run = Run::with_properties("x", Some(RunProperties::default()));
        assert!(!render(&run).contains("w:rPr"));
    }

    #[test]
    fn test_tabs_and_breaks() {
        let run = Run {
            properties: Some(RunProperties::new().with_font("Consolas")),
            content: vec![
                RunContent::Text("a".into()),
                RunContent::Tab,
                RunContent::Text("b".into()),
                RunContent::Break(BreakType::TextWrapping),
                RunContent::Break(BreakType::Page),
            ],
        };
        assert_eq!(run.text(), "a\tb\n");
        assert_eq!(
            render(&run),
            concat!(
                r#"<w:r><w:rPr><w:rFonts w:ascii="Consolas" w:hAnsi="Consolas" w:cs="Consolas"/></w:rPr>"#,
                r#"<w:t xml:space="preserve">a</w:t><w:tab/><w:t xml:space="preserve">b</w:t>"#,
                r#"<w:br/><w:br w:type="page"/></w:r>"#
            )
        );
    }
}
