//! Integration test: styles, lists and headers taken from a template

use docx_outline::opc::{self, rel_types, well_known, Package, Part, PartUri};
use docx_outline::{Error, WordDoc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEMPLATE_DOCUMENT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    r#"<w:body><w:p/><w:sectPr>"#,
    r#"<w:headerReference w:type="even" r:id="rId3"/>"#,
    r#"<w:headerReference w:type="default" r:id="rId4"/>"#,
    r#"</w:sectPr></w:body></w:document>"#
);

const TEMPLATE_STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:style w:type="paragraph" w:styleId="Ttulo1"><w:name w:val="heading 1"/></w:style>"#,
    r#"</w:styles>"#
);

const TEMPLATE_NUMBERING: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:v="urn:schemas-microsoft-com:vml">"#,
    r#"<w:numPicBullet w:numPicBulletId="0"><w:pict><v:shape o:bullet="t">"#,
    r#"<v:imagedata r:id="rId1" o:title="square"/></v:shape></w:pict></w:numPicBullet>"#,
    r#"<w:abstractNum w:abstractNumId="4"><w:multiLevelType w:val="hybridMultilevel"/>"#,
    r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="upperRoman"/>"#,
    r#"<w:lvlText w:val="%1."/><w:lvlJc w:val="left"/></w:lvl></w:abstractNum>"#,
    r#"<w:num w:numId="1"><w:abstractNumId w:val="4"/></w:num>"#,
    r#"<w:numIdMacAtCleanup w:val="1"/>"#,
    r#"</w:numbering>"#
);

fn header_xml(text: &str, with_picture: bool) -> Vec<u8> {
    let picture = if with_picture {
        r#"<w:r><w:drawing><a:blip r:embed="rId1"/></w:drawing></w:r>"#
    } else {
        ""
    };
    format!(
        concat!(
            r#"<w:hdr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<w:p>{}<w:r><w:t>{}</w:t></w:r></w:p></w:hdr>"#
        ),
        picture, text
    )
    .into_bytes()
}

/// Write a template with styles, picture-bullet numbering and two headers,
/// one with a logo
fn write_template(dir: &Path) -> PathBuf {
    let mut package = Package::new();
    package.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");

    let mut document = Part::new(
        well_known::document(),
        opc::MAIN_DOCUMENT,
        TEMPLATE_DOCUMENT.as_bytes().to_vec(),
    );
    let rels = document.ensure_relationships();
    rels.add(rel_types::STYLES, "styles.xml");
    rels.add(rel_types::NUMBERING, "numbering.xml");
    rels.add(rel_types::HEADER, "header2.xml");
    rels.add(rel_types::HEADER, "header1.xml");
    package.add_part(document);

    package.add_part(Part::new(
        well_known::styles(),
        opc::STYLES,
        TEMPLATE_STYLES.as_bytes().to_vec(),
    ));
    let mut numbering = Part::new(
        well_known::numbering(),
        opc::NUMBERING,
        TEMPLATE_NUMBERING.as_bytes().to_vec(),
    );
    numbering
        .ensure_relationships()
        .add(rel_types::IMAGE, "media/image1.png");
    package.add_part(numbering);

    let mut first = Part::new(
        PartUri::new("/word/header1.xml").unwrap(),
        opc::HEADER,
        header_xml("Company", true),
    );
    first
        .ensure_relationships()
        .add(rel_types::IMAGE, "media/image1.png");
    package.add_part(first);
    package.add_part(Part::new(
        PartUri::new("/word/header2.xml").unwrap(),
        opc::HEADER,
        header_xml("Even pages", false),
    ));
    package.add_part(Part::new(
        well_known::media(1, "png"),
        "image/png",
        b"logo bytes".to_vec(),
    ));

    let path = dir.join("template.docx");
    package.save(&path).unwrap();
    path
}

fn setup() -> (TempDir, PathBuf) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = write_template(dir.path());
    (dir, path)
}

fn reopen(doc: &WordDoc) -> Package {
    Package::from_bytes(&doc.to_bytes().unwrap()).unwrap()
}

fn part_text(package: &Package, uri: &str) -> String {
    let uri = PartUri::new(uri).unwrap();
    package
        .part(&uri)
        .unwrap_or_else(|| panic!("missing {}", uri))
        .data_as_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_styles_are_copied_verbatim() {
    let (_dir, template) = setup();
    let mut doc = WordDoc::new("", "");
    doc.set_styles_from_document(&template).unwrap();
    doc.chapter_with_style("Capítulo", "Ttulo1");

    let package = reopen(&doc);
    assert_eq!(part_text(&package, "/word/styles.xml"), TEMPLATE_STYLES);
    assert!(part_text(&package, "/word/document.xml").contains(r#"<w:pStyle w:val="Ttulo1"/>"#));
}

#[test]
fn test_numbering_replaces_defaults() {
    let (_dir, template) = setup();
    let mut doc = WordDoc::new("", "");
    doc.set_numbering_from_document(&template).unwrap();

    assert_eq!(doc.numbering().abstract_nums.len(), 1);
    assert_eq!(doc.add_abstract_num(docx_outline::AbstractNum::new(0)), 5);
    // one instance came with the template
    assert_eq!(doc.start_numbering(4).unwrap(), 2);

    let package = reopen(&doc);
    let numbering = part_text(&package, "/word/numbering.xml");
    assert!(numbering.contains(r#"<w:numFmt w:val="upperRoman"/>"#));
    assert!(numbering.contains(r#"<w:num w:numId="2"><w:abstractNumId w:val="4"/>"#));
    assert!(!numbering.contains("numIdMacAtCleanup"));
}

#[test]
fn test_picture_bullets_survive_import() {
    let (_dir, template) = setup();
    let mut doc = WordDoc::new("", "");
    doc.set_numbering_from_document(&template).unwrap();

    let package = reopen(&doc);
    let numbering = part_text(&package, "/word/numbering.xml");
    assert!(numbering.contains(r#"xmlns:v="urn:schemas-microsoft-com:vml""#));
    assert!(numbering.contains(r#"xmlns:o="urn:schemas-microsoft-com:office:office""#));
    assert!(numbering.contains(r#"<v:imagedata r:id="rId1" o:title="square"/>"#));

    let part = package.part(&well_known::numbering()).unwrap();
    let rel = part.relationships().unwrap().get("rId1").unwrap();
    assert_eq!(rel.target, "media/numbering_image1.png");

    let bullet = PartUri::new("/word/media/numbering_image1.png").unwrap();
    assert_eq!(package.part(&bullet).map(|p| p.data()), Some(&b"logo bytes"[..]));
}

#[test]
fn test_headers_and_their_media() {
    let (_dir, template) = setup();
    let mut doc = WordDoc::new("", "");
    doc.set_header_from_document(&template).unwrap();
    doc.chapter("Body");

    let package = reopen(&doc);

    // the template listed header2 first
    assert!(part_text(&package, "/word/header1.xml").contains("Even pages"));
    assert!(part_text(&package, "/word/header2.xml").contains("Company"));

    let logo = PartUri::new("/word/media/header2_image1.png").unwrap();
    assert_eq!(package.part(&logo).map(|p| p.data()), Some(&b"logo bytes"[..]));

    let header2 = package.part(&PartUri::new("/word/header2.xml").unwrap()).unwrap();
    let rel = header2.relationships().unwrap().get("rId1").unwrap();
    assert_eq!(rel.target, "media/header2_image1.png");

    let main = package.main_document_part().unwrap();
    let headers = main.relationships().unwrap().all_by_type(rel_types::HEADER);
    let targets: Vec<_> = headers.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, ["header1.xml", "header2.xml"]);

    let document = part_text(&package, "/word/document.xml");
    let even = format!(r#"<w:headerReference w:type="even" r:id="{}"/>"#, headers[0].id);
    let default = format!(r#"<w:headerReference w:type="default" r:id="{}"/>"#, headers[1].id);
    assert!(document.contains(&even), "{}", document);
    assert!(document.contains(&default), "{}", document);
}

#[test]
fn test_missing_template_parts() {
    let dir = tempfile::tempdir().unwrap();
    let mut package = Package::new();
    package.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");
    package.add_part(Part::new(
        well_known::document(),
        opc::MAIN_DOCUMENT,
        b"<w:document/>".to_vec(),
    ));
    let path = dir.path().join("bare.docx");
    package.save(&path).unwrap();

    let mut doc = WordDoc::new("", "");
    assert!(matches!(
        doc.set_styles_from_document(&path),
        Err(Error::MissingPart(_))
    ));
    assert!(matches!(
        doc.set_numbering_from_document(&path),
        Err(Error::MissingPart(_))
    ));
    doc.set_header_from_document(&path).unwrap();
    assert!(doc.to_bytes().is_ok());

    assert!(doc.set_styles_from_document(dir.path().join("absent.docx")).is_err());
}
