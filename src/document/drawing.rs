//! Inline picture (w:drawing / wp:inline)
//!
//! The DrawingML subtree is deep and fixed, so it is assembled as a
//! [`RawXmlElement`] tree instead of one type per element.

use crate::error::Result;
use crate::xml::{RawXmlElement, PIC, USE_LOCAL_DPI_EXT};
use quick_xml::Writer;

/// An inline picture referencing an image part
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawing {
    /// Relationship ID of the image part (`r:embed`)
    pub rel_id: String,
    /// Width in EMU
    pub cx: u64,
    /// Height in EMU
    pub cy: u64,
    /// Drawing object ID, unique within the document
    pub id: u32,
    /// Display name (`docPr/@name`)
    pub name: String,
    /// Original file name of the picture
    pub file_name: String,
}

impl Drawing {
    pub fn new(rel_id: impl Into<String>, cx: u64, cy: u64, id: u32) -> Self {
        Drawing {
            rel_id: rel_id.into(),
            cx,
            cy,
            id,
            name: format!("Image {}", id),
            file_name: String::new(),
        }
    }

    /// Build the element tree for `w:drawing`
    pub fn to_element(&self) -> RawXmlElement {
        let extent = |name: &str| {
            RawXmlElement::new(name)
                .with_attr("cx", self.cx)
                .with_attr("cy", self.cy)
        };

        let blip = RawXmlElement::new("a:blip")
            .with_attr("r:embed", &self.rel_id)
            .with_attr("cstate", "print")
            .with_child(
                RawXmlElement::new("a:extLst").with_child(
                    RawXmlElement::new("a:ext")
                        .with_attr("uri", USE_LOCAL_DPI_EXT)
                        .with_child(RawXmlElement::new("a14:useLocalDpi").with_attr("val", 0)),
                ),
            );

        let picture = RawXmlElement::new("pic:pic")
            .with_child(
                RawXmlElement::new("pic:nvPicPr")
                    .with_child(
                        RawXmlElement::new("pic:cNvPr")
                            .with_attr("id", 0)
                            .with_attr("name", &self.file_name),
                    )
                    .with_child(RawXmlElement::new("pic:cNvPicPr")),
            )
            .with_child(
                RawXmlElement::new("pic:blipFill").with_child(blip).with_child(
                    RawXmlElement::new("a:stretch").with_child(RawXmlElement::new("a:fillRect")),
                ),
            )
            .with_child(
                RawXmlElement::new("pic:spPr")
                    .with_child(
                        RawXmlElement::new("a:xfrm")
                            .with_child(RawXmlElement::new("a:off").with_attr("x", 0).with_attr("y", 0))
                            .with_child(extent("a:ext")),
                    )
                    .with_child(
                        RawXmlElement::new("a:prstGeom")
                            .with_attr("prst", "rect")
                            .with_child(RawXmlElement::new("a:avLst")),
                    ),
            );

        let inline = RawXmlElement::new("wp:inline")
            .with_attr("distT", 0)
            .with_attr("distB", 0)
            .with_attr("distL", 0)
            .with_attr("distR", 0)
            .with_child(extent("wp:extent"))
            .with_child(
                RawXmlElement::new("wp:effectExtent")
                    .with_attr("l", 0)
                    .with_attr("t", 0)
                    .with_attr("r", 0)
                    .with_attr("b", 0),
            )
            .with_child(
                RawXmlElement::new("wp:docPr")
                    .with_attr("id", self.id)
                    .with_attr("name", &self.name),
            )
            .with_child(
                RawXmlElement::new("wp:cNvGraphicFramePr").with_child(
                    RawXmlElement::new("a:graphicFrameLocks").with_attr("noChangeAspect", 1),
                ),
            )
            .with_child(
                RawXmlElement::new("a:graphic").with_child(
                    RawXmlElement::new("a:graphicData")
                        .with_attr("uri", PIC)
                        .with_child(picture),
                ),
            );

        RawXmlElement::new("w:drawing").with_child(inline)
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        self.to_element().write_to(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(drawing: &Drawing) -> String {
        let mut buf = Vec::new();
        drawing.write_to(&mut Writer::new(&mut buf)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_inline_picture_markup() {
        let xml = render(&Drawing::new("rId7", 914400, 457200, 2));

        assert!(xml.starts_with(r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#));
        assert!(xml.contains(r#"<wp:extent cx="914400" cy="457200"/>"#));
        assert!(xml.contains(r#"<wp:docPr id="2" name="Image 2"/>"#));
        assert!(xml.contains(r#"<a:graphicFrameLocks noChangeAspect="1"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId7" cstate="print">"#));
        assert!(xml.contains(r#"<a14:useLocalDpi val="0"/>"#));
        assert!(xml.contains(r#"<a:off x="0" y="0"/><a:ext cx="914400" cy="457200"/>"#));
        assert!(xml.contains(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#));
    }

    #[test]
    fn test_element_order_inside_inline() {
        let element = Drawing::new("rId1", 1, 1, 1).to_element();
        let inline = element.elements().next().unwrap();
        let names: Vec<_> = inline.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "wp:extent",
                "wp:effectExtent",
                "wp:docPr",
                "wp:cNvGraphicFramePr",
                "a:graphic"
            ]
        );
    }
}
