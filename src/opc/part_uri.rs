//! Absolute part names inside a package

use crate::error::{Error, Result};
use std::fmt;

/// Name of a part, always an absolute path such as `/word/document.xml`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Normalize `path` to start with one `/` and end without one
    pub fn new(path: &str) -> Result<Self> {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(Error::InvalidPartUri(format!("'{}' names no part", path)));
        }
        if trimmed.split('/').any(str::is_empty) {
            return Err(Error::InvalidPartUri(format!("'{}' has an empty segment", path)));
        }
        Ok(PartUri {
            path: format!("/{}", trimmed),
        })
    }

    fn known(path: String) -> Self {
        PartUri { path }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Last path segment
    pub fn file_name(&self) -> Option<&str> {
        self.path.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Extension of the file name, without the dot
    pub fn extension(&self) -> Option<&str> {
        let (_, ext) = self.file_name()?.rsplit_once('.')?;
        Some(ext).filter(|ext| !ext.is_empty())
    }

    /// Directory holding the part, `None` for parts at the package root
    pub fn parent(&self) -> Option<PartUri> {
        match self.path.rfind('/') {
            Some(0) | None => None,
            Some(pos) => Some(PartUri::known(self.path[..pos].to_string())),
        }
    }

    fn dir(&self) -> &str {
        match self.path.rfind('/') {
            Some(pos) => &self.path[..pos],
            None => "",
        }
    }

    /// Where the relationships of this part live:
    /// `/word/header1.xml` gives `/word/_rels/header1.xml.rels`
    pub fn relationships_uri(&self) -> PartUri {
        let name = self.file_name().unwrap_or_default();
        PartUri::known(format!("{}/_rels/{}.rels", self.dir(), name))
    }

    /// Whether this names a `.rels` part
    pub fn is_relationships(&self) -> bool {
        self.path.ends_with(".rels") && self.dir().ends_with("/_rels")
    }

    /// Resolve a relationship target written relative to this part
    pub fn resolve(&self, target: &str) -> Result<PartUri> {
        if target.starts_with('/') {
            return PartUri::new(target);
        }

        let mut segments: Vec<&str> = self.dir().split('/').filter(|s| !s.is_empty()).collect();
        for segment in target.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(name),
            }
        }
        PartUri::new(&segments.join("/"))
    }

    /// Target that `base` would use to refer to this part.
    ///
    /// Parts outside the directory of `base` keep their absolute name.
    pub fn relative_to(&self, base: &PartUri) -> String {
        let dir = format!("{}/", base.dir());
        match self.path.strip_prefix(&dir) {
            Some(rest) => rest.to_string(),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

/// Names of the parts a generated document is made of
pub mod well_known {
    use super::PartUri;

    pub fn document() -> PartUri {
        PartUri::known("/word/document.xml".into())
    }

    pub fn styles() -> PartUri {
        PartUri::known("/word/styles.xml".into())
    }

    pub fn numbering() -> PartUri {
        PartUri::known("/word/numbering.xml".into())
    }

    pub fn comments() -> PartUri {
        PartUri::known("/word/comments.xml".into())
    }

    /// `/word/header{n}.xml`
    pub fn header(number: usize) -> PartUri {
        PartUri::known(format!("/word/header{}.xml", number))
    }

    /// `/word/media/image{n}.{ext}`
    pub fn media(number: usize, extension: &str) -> PartUri {
        PartUri::known(format!("/word/media/image{}.{}", number, extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        for raw in ["word/header2.xml", "/word/header2.xml", " /word/header2.xml/ "] {
            assert_eq!(PartUri::new(raw).unwrap(), well_known::header(2));
        }
        assert!(PartUri::new("").is_err());
        assert!(PartUri::new("/").is_err());
        assert!(PartUri::new("/word//media/a.png").is_err());
    }

    #[test]
    fn test_name_parts() {
        let logo = PartUri::new("/word/media/header1_logo.PNG").unwrap();
        assert_eq!(logo.file_name(), Some("header1_logo.PNG"));
        assert_eq!(logo.extension(), Some("PNG"));
        assert_eq!(logo.parent().unwrap().as_str(), "/word/media");

        let root = PartUri::new("/[Content_Types].xml").unwrap();
        assert!(root.parent().is_none());
        assert_eq!(PartUri::new("/word/LICENSE").unwrap().extension(), None);
    }

    #[test]
    fn test_relationships_parts() {
        let header = well_known::header(1);
        let rels = header.relationships_uri();
        assert_eq!(rels.as_str(), "/word/_rels/header1.xml.rels");
        assert!(rels.is_relationships());
        assert!(PartUri::new("/_rels/.rels").unwrap().is_relationships());
        assert!(!header.is_relationships());
    }

    #[test]
    fn test_resolve_targets() {
        let header = well_known::header(3);
        assert_eq!(
            header.resolve("media/image1.png").unwrap().as_str(),
            "/word/media/image1.png"
        );
        assert_eq!(
            header.resolve("../customXml/item1.xml").unwrap().as_str(),
            "/customXml/item1.xml"
        );
        assert_eq!(
            header.resolve("/word/styles.xml").unwrap(),
            well_known::styles()
        );
    }

    #[test]
    fn test_relative_to() {
        let doc = well_known::document();
        assert_eq!(well_known::media(3, "png").relative_to(&doc), "media/image3.png");
        assert_eq!(well_known::header(1).relative_to(&doc), "header1.xml");

        let outside = PartUri::new("/docProps/core.xml").unwrap();
        assert_eq!(outside.relative_to(&doc), "/docProps/core.xml");
    }
}
