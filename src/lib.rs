//! # docx-outline
//!
//! Build DOCX files chapter by chapter.
//!
//! ## Features
//!
//! - Chapters, sections, subsections and sub-subsections with heading styles
//! - Text with run formatting, comments and multi-level lists
//! - Figures scaled from their resolution, clamped to the page width
//! - Tables with header and summary rows and merged cells
//! - Styles, list definitions and page headers taken from a template document
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docx_outline::{RunProperties, WordDoc};
//!
//! let mut doc = WordDoc::new("Ana Souza", "AS");
//! let note = doc.add_comment().append("Check the figures").id();
//!
//! let chapter = doc.chapter("Results");
//! chapter
//!     .text()
//!     .append("Throughput ")
//!     .start_comment(note)
//!     .append_with("doubled", RunProperties::new().with_bold(true))
//!     .end_comment(note);
//!
//! let section = chapter.new_child("Measurements")?;
//! section.figure("throughput.png", 0.8);
//! let table = section.table(2, 2, 9000);
//! table[0][0].append("Run");
//! table[0][1].append("Ops/s");
//!
//! doc.save("report.docx")?;
//! # Ok::<(), docx_outline::Error>(())
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod media;
pub mod opc;
pub mod xml;

pub use builder::{
    Alignment, Block, Cell, CellKind, Comment, DocOptions, Figure, ListPosition, Merge, Part,
    PartLevel, Row, Table, Text, WordDoc,
};
pub use document::{AbstractNum, Level, NumberFormat, Numbering, RunProperties};
pub use error::{Error, Result};
pub use opc::{Package, PartUri};
