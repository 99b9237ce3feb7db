//! The ZIP container of a document
//!
//! Parts are kept in the order they were added, so rendering the same
//! document twice yields the same archive.

use crate::error::{Error, Result};
use crate::opc::relationships::rel_types;
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An OPC package: parts, their relationships and content types
#[derive(Debug, Default)]
pub struct Package {
    parts: Vec<Part>,
    /// `/_rels/.rels`
    relationships: Relationships,
    /// `/[Content_Types].xml`
    content_types: ContentTypes,
}

impl Package {
    /// Empty package with the usual extension defaults
    pub fn new() -> Self {
        Package {
            parts: Vec::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Read every entry, then sort them into parts and relationships
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = format!("/{}", file.name());
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            entries.push((name, data));
        }

        let content_types = take_entry(&mut entries, "/[Content_Types].xml")
            .ok_or_else(|| Error::MissingPart("[Content_Types].xml".into()))?;
        let content_types = ContentTypes::from_xml(std::str::from_utf8(&content_types)?)?;

        let relationships = match take_entry(&mut entries, "/_rels/.rels") {
            Some(data) => Relationships::from_xml(std::str::from_utf8(&data)?)?,
            None => Relationships::new(),
        };

        let mut package = Package {
            parts: Vec::new(),
            relationships,
            content_types,
        };

        let mut part_rels = Vec::new();
        for (name, data) in entries {
            let uri = PartUri::new(&name)?;
            if uri.is_relationships() {
                part_rels.push((uri, data));
                continue;
            }
            let content_type = package
                .content_types
                .get(&uri)
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();
            package.parts.push(Part::new(uri, content_type, data));
        }

        for part in &mut package.parts {
            let rels_uri = part.uri().relationships_uri();
            if let Some((_, data)) = part_rels.iter().find(|(uri, _)| *uri == rels_uri) {
                part.set_relationships(Relationships::from_xml(std::str::from_utf8(data)?)?);
            }
        }

        log::debug!("opened package with {} parts", package.parts.len());
        Ok(package)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.write_to(&mut buf)?;
        Ok(buf.into_inner())
    }

    /// Write content types, package relationships, then each part followed
    /// by its relationships
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        self.content_types.write_to(&mut zip)?;

        if !self.relationships.is_empty() {
            zip.start_file("_rels/.rels", options)?;
            self.relationships.write_to(&mut zip)?;
        }

        for part in &self.parts {
            zip.start_file(entry_name(part.uri()), options)?;
            zip.write_all(part.data())?;

            match part.relationships() {
                Some(rels) if !rels.is_empty() => {
                    zip.start_file(entry_name(&part.uri().relationships_uri()), options)?;
                    rels.write_to(&mut zip)?;
                }
                _ => {}
            }
        }

        zip.finish()?;
        Ok(())
    }

    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.iter().find(|p| p.uri() == uri)
    }

    /// Add a part, replacing one with the same URI.
    ///
    /// An override is only recorded when the extension default does not
    /// already give the part's content type.
    pub fn add_part(&mut self, part: Part) {
        let uri = part.uri().clone();
        if self.content_types.get(&uri) != Some(part.content_type()) {
            self.content_types.add_override(&uri, part.content_type());
        }
        log::debug!("add part {} ({})", uri, part.content_type());

        match self.parts.iter_mut().find(|p| p.uri() == &uri) {
            Some(existing) => *existing = part,
            None => self.parts.push(part),
        }
    }

    pub fn part_uris(&self) -> impl Iterator<Item = &PartUri> {
        self.parts.iter().map(|p| p.uri())
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Package-level relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Part targeted by the first package relationship of `rel_type`
    pub fn part_by_rel_type(&self, rel_type: &str) -> Option<&Part> {
        let rel = self.relationships.by_type(rel_type)?;
        let uri = PartUri::new(&rel.target).ok()?;
        self.part(&uri)
    }

    pub fn main_document_part(&self) -> Option<&Part> {
        self.part_by_rel_type(rel_types::OFFICE_DOCUMENT)
    }

    /// The main document part, or `MissingPart`
    pub fn require_main_document(&self) -> Result<&Part> {
        self.main_document_part()
            .ok_or_else(|| Error::MissingPart("main document".into()))
    }

    /// Part that `source` refers to through a relationship of `rel_type`
    pub fn related_part(&self, source: &Part, rel_type: &str) -> Option<&Part> {
        let rel = source.relationships()?.by_type(rel_type)?;
        let uri = source.target_uri(&rel.target).ok()?;
        self.part(&uri)
    }

    /// Add a package-level relationship, returning its ID
    pub fn add_relationship(&mut self, rel_type: &str, target: &str) -> String {
        self.relationships.add(rel_type, target)
    }
}

/// ZIP entry name of a part (no leading slash)
fn entry_name(uri: &PartUri) -> &str {
    uri.as_str().trim_start_matches('/')
}

fn take_entry(entries: &mut Vec<(String, Vec<u8>)>, name: &str) -> Option<Vec<u8>> {
    let pos = entries.iter().position(|(n, _)| n == name)?;
    Some(entries.remove(pos).1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::{well_known, HEADER, MAIN_DOCUMENT, STYLES};

    #[test]
    fn test_add_part_replaces_same_uri() {
        let mut pkg = Package::new();
        let uri = well_known::document();
        pkg.add_part(Part::new(uri.clone(), MAIN_DOCUMENT, b"<a/>".to_vec()));
        pkg.add_part(Part::new(uri.clone(), MAIN_DOCUMENT, b"<b/>".to_vec()));

        assert_eq!(pkg.parts().count(), 1);
        assert_eq!(pkg.part(&uri).unwrap().data(), b"<b/>");
    }

    #[test]
    fn test_media_needs_no_override() {
        let mut pkg = Package::new();
        pkg.add_part(Part::new(well_known::media(1, "png"), "image/png", vec![0x89]));
        pkg.add_part(Part::new(well_known::styles(), STYLES, Vec::new()));

        let xml = pkg.content_types().to_xml().unwrap();
        assert!(!xml.contains("image1.png"));
        assert!(xml.contains(r#"PartName="/word/styles.xml""#));
    }

    #[test]
    fn test_parts_keep_insertion_order() {
        let mut pkg = Package::new();
        pkg.add_part(Part::new(well_known::styles(), STYLES, b"<s/>".to_vec()));
        pkg.add_part(Part::new(well_known::header(1), HEADER, b"<h/>".to_vec()));
        pkg.add_part(Part::new(well_known::document(), MAIN_DOCUMENT, b"<d/>".to_vec()));

        let reopened = Package::from_bytes(&pkg.to_bytes().unwrap()).unwrap();
        let uris: Vec<_> = reopened.part_uris().map(|u| u.as_str()).collect();
        assert_eq!(uris, ["/word/styles.xml", "/word/header1.xml", "/word/document.xml"]);
    }

    #[test]
    fn test_relationships_survive_reopen() {
        let mut pkg = Package::new();

        let doc_uri = well_known::document();
        let mut doc = Part::new(doc_uri.clone(), MAIN_DOCUMENT, b"<document/>".to_vec());
        doc.ensure_relationships().add(rel_types::STYLES, "styles.xml");
        pkg.add_part(doc);
        pkg.add_part(Part::new(well_known::styles(), STYLES, b"<styles/>".to_vec()));
        pkg.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");

        let reopened = Package::from_bytes(&pkg.to_bytes().unwrap()).unwrap();

        let main = reopened.main_document_part().unwrap();
        assert_eq!(main.uri(), &doc_uri);
        let styles = reopened.related_part(main, rel_types::STYLES).unwrap();
        assert_eq!(styles.data(), b"<styles/>");
        assert_eq!(styles.content_type(), STYLES);
        assert!(reopened.part(&doc_uri.relationships_uri()).is_none());
    }

    #[test]
    fn test_missing_main_document() {
        let reopened = Package::from_bytes(&Package::new().to_bytes().unwrap()).unwrap();
        assert_eq!(reopened.parts().count(), 0);
        assert!(matches!(
            reopened.require_main_document(),
            Err(Error::MissingPart(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            Package::from_bytes(b"plain text"),
            Err(Error::Zip(_))
        ));
    }
}
