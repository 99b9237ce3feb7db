//! Namespace URIs and the declarations each part's root element carries

pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
pub const A14: &str = "http://schemas.microsoft.com/office/drawing/2010/main";
pub const MC: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
pub const W14: &str = "http://schemas.microsoft.com/office/word/2010/wordml";
pub const W15: &str = "http://schemas.microsoft.com/office/word/2012/wordml";

/// Extension URI carrying `a14:useLocalDpi` inside a blip
pub const USE_LOCAL_DPI_EXT: &str = "{28A0092B-C50C-407E-A947-70E740481C1C}";

/// `w:document`: text plus inline pictures
pub const DOCUMENT_NAMESPACES: [(&str, &str); 6] = [
    ("xmlns:w", W),
    ("xmlns:r", R),
    ("xmlns:wp", WP),
    ("xmlns:a", A),
    ("xmlns:pic", PIC),
    ("xmlns:a14", A14),
];

/// `w:numbering`; `w15:restartNumberingAfterBreak` needs the extension
/// namespaces marked ignorable
pub const NUMBERING_NAMESPACES: [(&str, &str); 6] = [
    ("xmlns:mc", MC),
    ("xmlns:w", W),
    ("xmlns:r", R),
    ("xmlns:w14", W14),
    ("xmlns:w15", W15),
    ("mc:Ignorable", "w14 w15"),
];

/// `w:styles` and `w:comments`
pub const MINIMAL_NAMESPACES: [(&str, &str); 2] = [("xmlns:w", W), ("xmlns:r", R)];
