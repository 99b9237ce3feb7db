use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad ZIP container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("undecodable XML text: {0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("malformed XML attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("part is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unreadable picture: {0}")]
    Image(#[from] image::ImageError),

    /// A part the document needs is absent from the package
    #[error("package has no {0}")]
    MissingPart(String),

    #[error("invalid part name: {0}")]
    InvalidPartUri(String),

    #[error("<{element}> lacks attribute {attr}")]
    MissingAttribute { element: String, attr: String },

    /// Structurally wrong content, such as an unclosed element
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A relationship points at a part the package does not contain
    #[error("no part at {0}")]
    PartNotFound(String),

    #[error("cell ({row}, {col}) is outside a {rows}x{cols} table")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Children were requested below the deepest heading level
    #[error("a {0} cannot have child parts")]
    NestingTooDeep(&'static str),

    #[error("no abstract numbering definition {0}")]
    UnknownAbstractNum(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
