//! Integration test: build documents and read the package back

use docx_outline::opc::{rel_types, well_known, Package};
use docx_outline::{CellKind, DocOptions, Figure, Merge, RunProperties, WordDoc};
use image::{ImageBuffer, ImageFormat, Rgb};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn reopen(doc: &WordDoc) -> Package {
    let bytes = doc.to_bytes().expect("render document");
    Package::from_bytes(&bytes).expect("reopen package")
}

fn part_xml(package: &Package, uri: &docx_outline::PartUri) -> String {
    package
        .part(uri)
        .unwrap_or_else(|| panic!("missing {}", uri))
        .data_as_str()
        .unwrap()
        .to_string()
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Index of each needle in `haystack`, failing on the first one missing
fn positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
    needles
        .iter()
        .map(|n| {
            haystack
                .find(n)
                .unwrap_or_else(|| panic!("{:?} not found in {}", n, haystack))
        })
        .collect()
}

#[test]
fn test_outline_renders_depth_first() {
    init_logger();
    let mut doc = WordDoc::new("Ana Souza", "AS");

    let intro = doc.chapter("Introduction");
    intro.text().append("Opening remarks.");
    let scope = intro.new_child("Scope").unwrap();
    scope.text().append("What is covered.");
    let detail = scope.new_child("Details").unwrap();
    detail.new_child("Fine print").unwrap();

    doc.chapter("Conclusion").text().append("Closing remarks.");

    let package = reopen(&doc);
    let xml = part_xml(&package, &well_known::document());

    let order = positions(
        &xml,
        &[
            r#"<w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t xml:space="preserve">Introduction"#,
            "Opening remarks.",
            r#"<w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t xml:space="preserve">Scope"#,
            "What is covered.",
            r#"<w:pStyle w:val="Heading3"/></w:pPr><w:r><w:t xml:space="preserve">Details"#,
            r#"<w:pStyle w:val="Heading4"/></w:pPr><w:r><w:t xml:space="preserve">Fine print"#,
            "Conclusion",
            "Closing remarks.",
            "<w:sectPr>",
        ],
    );
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
}

#[test]
fn test_package_layout() {
    let mut doc = WordDoc::new("Ana Souza", "AS");
    doc.add_comment().append("note");
    doc.chapter("One");

    let package = reopen(&doc);
    let rel = package
        .relationships()
        .by_type(rel_types::OFFICE_DOCUMENT)
        .unwrap();
    assert_eq!(rel.target, "word/document.xml");

    let main = package.main_document_part().unwrap();
    let rels = main.relationships().unwrap();
    for (rel_type, target) in [
        (rel_types::STYLES, "styles.xml"),
        (rel_types::NUMBERING, "numbering.xml"),
        (rel_types::COMMENTS, "comments.xml"),
    ] {
        assert_eq!(rels.by_type(rel_type).map(|r| r.target.as_str()), Some(target));
    }

    let styles = part_xml(&package, &well_known::styles());
    assert!(styles.contains(r#"w:styleId="Heading1""#));
    assert!(styles.contains(r#"w:styleId="CommentReference""#));
}

#[test]
fn test_lists_follow_the_cursor() {
    let mut doc = WordDoc::new("", "");
    let bullets = doc.start_numbering(0).unwrap();

    let chapter = doc.chapter("Lists");
    // a new part closes the list
    chapter.text().append("plain");

    let num_id = doc.start_numbering(1).unwrap();
    doc.parts_mut()[0].text().append("first");
    doc.increment_numbering();
    doc.parts_mut()[0].text().append("nested");
    doc.decrement_numbering();
    doc.decrement_numbering();
    doc.parts_mut()[0].text().append("second");
    doc.end_numbering();
    doc.parts_mut()[0].text().append("after");

    assert_eq!(bullets, 11);
    assert_eq!(num_id, 12);

    let package = reopen(&doc);
    let xml = part_xml(&package, &well_known::document());
    let numbered = |level: u8| {
        format!(
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            level, num_id
        )
    };

    let first = numbered(0);
    let nested = numbered(1);
    let order = positions(&xml, &[">plain<", first.as_str(), "first", nested.as_str(), "nested", "second", "after"]);
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(xml.matches("<w:numPr>").count(), 3);

    let numbering = part_xml(&package, &well_known::numbering());
    assert!(numbering.contains(concat!(
        r#"<w:num w:numId="12"><w:abstractNumId w:val="1"/>"#,
        r#"<w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>"#
    )));
}

#[test]
fn test_comments_are_anchored() {
    let mut doc = WordDoc::new("Ana Souza", "AS");
    let id = doc
        .add_comment()
        .append("Source? ")
        .append_with("cite it", RunProperties::new().with_italic(true))
        .id();

    doc.chapter("Claims")
        .text()
        .append("Water ")
        .start_comment(id)
        .append("boils at 90 degrees")
        .end_comment(id);

    let package = reopen(&doc);
    let body = part_xml(&package, &well_known::document());
    let order = positions(
        &body,
        &[
            r#"<w:commentRangeStart w:id="0"/>"#,
            "boils at 90 degrees",
            r#"<w:commentRangeEnd w:id="0"/>"#,
            r#"<w:commentReference w:id="0"/>"#,
        ],
    );
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(!body.contains("annotationRef"));

    let comments = part_xml(&package, &well_known::comments());
    assert!(comments.contains(r#"<w:comment w:id="0" w:author="Ana Souza""#));
    assert!(comments.contains(r#"w:initials="AS""#));
    assert!(comments.contains("<w:annotationRef/>"));
    assert!(comments.contains(r#"<w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve">cite it</w:t></w:r>"#));
}

#[test]
fn test_tables() {
    let mut doc = WordDoc::with_options(DocOptions::new().table_style("TableGrid"));
    let table = doc.chapter("Data").table(3, 3, 9000);
    table[0].set_kind(CellKind::Header);
    for (col, title) in ["Name", "Qty", "Price"].iter().enumerate() {
        table[0][col].append(*title);
    }
    table[1][0].append("bolt");
    table[1][1].append("4");
    table[1][2].append("0.10");
    table[2].set_kind(CellKind::Summary);
    table[2][0].append("Total").set_merge(Merge::Restart);
    table[2][1].set_merge(Merge::Continue);
    table[2][2].append("0.40");
    table.cell_mut(1, 1).unwrap().append(" units");

    let package = reopen(&doc);
    let xml = part_xml(&package, &well_known::document());

    assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/><w:tblW w:w="9000" w:type="dxa"/>"#));
    assert!(xml.contains(r#"<w:gridCol w:w="3000"/><w:gridCol w:w="3000"/><w:gridCol w:w="3000"/>"#));
    assert_eq!(xml.matches("<w:tc>").count(), 8);
    assert_eq!(xml.matches("pct10").count(), 3);
    assert_eq!(xml.matches("pct5").count(), 2);
    assert!(xml.contains(r#"<w:tcW w:w="6000" w:type="dxa"/><w:gridSpan w:val="2"/>"#));
    assert!(xml.contains(r#"<w:t xml:space="preserve">4</w:t></w:r><w:r><w:t xml:space="preserve"> units</w:t>"#));
}

#[test]
fn test_figures_embed_media() {
    init_logger();
    let mut doc = WordDoc::new("", "");
    let chapter = doc.chapter("Figures");
    chapter.push(Figure::from_bytes("a.png", png(96, 96), 1.0));
    chapter.push(Figure::from_bytes("broken.png", b"not a png".to_vec(), 1.0));
    chapter.push(Figure::from_bytes("b.png", png(48, 24), 2.0));
    chapter.figure("/no/such/file.png", 1.0);

    let package = reopen(&doc);
    let xml = part_xml(&package, &well_known::document());

    assert_eq!(xml.matches("<w:drawing>").count(), 2);
    assert!(xml.contains(r#"<wp:docPr id="1" name="Image 1"/>"#));
    assert!(xml.contains(r#"<wp:docPr id="2" name="Image 2"/>"#));
    assert!(xml.contains(r#"<w:bookmarkStart w:id="0" w:name="_GoBack"/>"#));
    assert!(xml.contains(r#"<w:bookmarkStart w:id="1" w:name="_GoBack1"/>"#));
    assert_eq!(xml.matches(r#"<wp:extent cx="914400" cy="914400"/>"#).count(), 1);
    assert_eq!(xml.matches(r#"<wp:extent cx="914400" cy="457200"/>"#).count(), 1);

    let media: Vec<_> = package
        .part_uris()
        .filter(|u| u.as_str().starts_with("/word/media/"))
        .map(|u| u.as_str().to_string())
        .collect();
    assert_eq!(media, ["/word/media/image1.png", "/word/media/image2.png"]);

    let rels = package.main_document_part().unwrap().relationships().unwrap();
    let images: Vec<_> = rels
        .all_by_type(rel_types::IMAGE)
        .into_iter()
        .map(|r| r.target.as_str())
        .collect();
    assert_eq!(images, ["media/image1.png", "media/image2.png"]);
}

#[test]
fn test_save_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.docx");

    let mut doc = WordDoc::new("", "");
    doc.chapter("Saved").text().append("on disk");
    doc.save(&path).unwrap();

    let package = Package::open(&path).unwrap();
    let xml = part_xml(&package, &well_known::document());
    assert!(xml.contains("on disk"));
}
