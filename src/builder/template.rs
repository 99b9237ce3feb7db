//! Parts imported from an existing document

use crate::document::Numbering;
use crate::error::{Error, Result};
use crate::opc::{rel_types, well_known, Package, Part, PartUri, Relationships, TargetMode};
use crate::xml::get_attr;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A header part ready to be added to a new package
#[derive(Clone, Debug)]
pub(crate) struct TemplateHeader {
    /// `default`, `first` or `even`
    pub kind: String,
    pub part: Part,
    /// Parts the header refers to (pictures, mostly)
    pub resources: Vec<Part>,
}

/// List definitions plus the pictures their bullets use
#[derive(Clone, Debug, Default)]
pub(crate) struct TemplateNumbering {
    pub numbering: Numbering,
    /// Relationships of the numbering part, retargeted at `resources`
    pub relationships: Option<Relationships>,
    pub resources: Vec<Part>,
}

/// Raw bytes of the template's styles part
pub(crate) fn load_styles(package: &Package) -> Result<Vec<u8>> {
    let doc = package.require_main_document()?;
    let part = package
        .related_part(doc, rel_types::STYLES)
        .ok_or_else(|| Error::MissingPart("styles".into()))?;
    log::debug!("styles from {} ({} bytes)", part.uri(), part.data().len());
    Ok(part.data().to_vec())
}

/// The template's list definitions, with copies of the picture bullets
pub(crate) fn load_numbering(package: &Package) -> Result<TemplateNumbering> {
    let doc = package.require_main_document()?;
    let part = package
        .related_part(doc, rel_types::NUMBERING)
        .ok_or_else(|| Error::MissingPart("numbering".into()))?;

    let mut imported = TemplateNumbering {
        numbering: Numbering::from_xml(part.data_as_str()?)?,
        ..Default::default()
    };
    if let Some(rels) = part.relationships() {
        let owner = well_known::numbering();
        let rels = copy_resources(package, part, rels, &owner, "numbering", &mut imported.resources)?;
        imported.relationships = Some(rels);
    }
    log::debug!(
        "numbering from {} with {} resources",
        part.uri(),
        imported.resources.len()
    );
    Ok(imported)
}

/// Every header the main document refers to, renamed `/word/header{n}.xml`
pub(crate) fn load_headers(package: &Package) -> Result<Vec<TemplateHeader>> {
    let doc = package.require_main_document()?;
    let kinds = header_kinds(doc.data_as_str()?)?;
    let header_rels = match doc.relationships() {
        Some(rels) => rels.all_by_type(rel_types::HEADER),
        None => Vec::new(),
    };

    let mut headers = Vec::with_capacity(header_rels.len());
    for (index, rel) in header_rels.into_iter().enumerate() {
        let number = index + 1;
        let source_uri = doc.target_uri(&rel.target)?;
        let source = package
            .part(&source_uri)
            .ok_or_else(|| Error::PartNotFound(source_uri.to_string()))?;

        let kind = kinds
            .iter()
            .find(|(id, _)| *id == rel.id)
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| "default".to_string());

        let uri = well_known::header(number);
        let mut part = Part::new(uri.clone(), source.content_type(), source.data().to_vec());
        let mut resources = Vec::new();

        if let Some(rels) = source.relationships() {
            let prefix = format!("header{}", number);
            let rels = copy_resources(package, source, rels, &uri, &prefix, &mut resources)?;
            part.set_relationships(rels);
        }

        log::debug!("header {} ({}) from {}", uri, kind, source_uri);
        headers.push(TemplateHeader {
            kind,
            part,
            resources,
        });
    }
    Ok(headers)
}

/// Copy the internal targets of `rels` to `/word/media/{prefix}_{name}`,
/// returning the relationships of `owner` retargeted at the copies.
/// Relationships to missing parts are dropped.
fn copy_resources(
    package: &Package,
    source: &Part,
    rels: &Relationships,
    owner: &PartUri,
    prefix: &str,
    resources: &mut Vec<Part>,
) -> Result<Relationships> {
    let mut rels = rels.clone();
    let mut dangling = Vec::new();

    for rel in rels.iter_mut() {
        if rel.target_mode == TargetMode::External {
            continue;
        }
        let target_uri = source.target_uri(&rel.target)?;
        let Some(target) = package.part(&target_uri) else {
            log::warn!("{} relationship {} points at missing {}", source.uri(), rel.id, target_uri);
            dangling.push(rel.id.clone());
            continue;
        };

        let file_name = target_uri.file_name().unwrap_or("resource");
        let copy_uri = PartUri::new(&format!("/word/media/{}_{}", prefix, file_name))?;
        if !resources.iter().any(|p: &Part| p.uri() == &copy_uri) {
            resources.push(Part::new(
                copy_uri.clone(),
                target.content_type(),
                target.data().to_vec(),
            ));
        }
        rel.target = copy_uri.relative_to(owner);
    }

    rels.retain(|r| !dangling.contains(&r.id));
    Ok(rels)
}

/// `(relationship id, type)` of each `w:headerReference` in document.xml
fn header_kinds(xml: &str) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut kinds = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e)
                if e.name().local_name().as_ref() == b"headerReference" =>
            {
                if let Some(id) = get_attr(&e, "r:id") {
                    let kind = get_attr(&e, "w:type").unwrap_or_else(|| "default".into());
                    kinds.push((id, kind));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(kinds)
}
