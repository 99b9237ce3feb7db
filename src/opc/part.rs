use crate::opc::{PartUri, Relationships};

/// Bytes stored under one name in a package, plus the relationships the
/// part is the source of
#[derive(Clone, Debug)]
pub struct Part {
    uri: PartUri,
    content_type: String,
    data: Vec<u8>,
    relationships: Option<Relationships>,
}

impl Part {
    pub fn new(uri: PartUri, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Part {
            uri,
            content_type: content_type.into(),
            data,
            relationships: None,
        }
    }

    pub fn uri(&self) -> &PartUri {
        &self.uri
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Content of an XML part
    pub fn data_as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    pub fn relationships(&self) -> Option<&Relationships> {
        self.relationships.as_ref()
    }

    pub fn set_relationships(&mut self, rels: Relationships) {
        self.relationships = Some(rels);
    }

    /// Relationships of this part, starting an empty set if it has none
    pub fn ensure_relationships(&mut self) -> &mut Relationships {
        self.relationships.get_or_insert_with(Relationships::new)
    }

    /// Part named by one of this part's relationship targets
    pub fn target_uri(&self, target: &str) -> crate::Result<PartUri> {
        self.uri.resolve(target)
    }
}
