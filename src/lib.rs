//! # md-autonumber
//!
//! Hierarchical numbering for Markdown headings.
//!
//! Headings are lines starting with one to six `#` markers followed by a
//! space. A [`StyleConfig`] decides, per level, how the counter is rendered
//! (`1.`, `(一)`, `a)`, ...) and whether deeper labels repeat their parent's
//! label (`1.2.3`).
//!
//! ## Example
//!
//! ```
//! use md_autonumber::{load_style, number_documents, strip_documents, Document};
//!
//! let style = load_style("default_style", None).unwrap();
//! let doc = Document::from_text("guide.md", "# Guide\n## Install\n## Usage\n");
//!
//! let numbered = number_documents(&[doc], &style).unwrap();
//! assert_eq!(numbered[0].to_text(), "# 1 Guide\n## 1.1 Install\n## 1.2 Usage\n");
//!
//! let stripped = strip_documents(&numbered);
//! assert_eq!(stripped[0].to_text(), "# Guide\n## Install\n## Usage\n");
//! ```

pub mod document;
pub mod error;
pub mod numbering;
pub mod numeral;
pub mod outline;
pub mod render;
pub mod style;

pub use document::Document;
pub use error::{ConfigError, Error, Result, StructureError};
pub use numbering::AutoNumberer;
pub use numeral::{NumeralRegistry, NumeralSystem, SequenceMode, SymbolSequence};
pub use outline::{HeadingEntry, Outline};
pub use render::Stripper;
pub use style::{load_style, FormatSpec, StyleConfig, StyleSource};

/// Numbers `documents` with `style` using the built-in numeral systems.
///
/// Stops at the first document that fails; the error names that document.
pub fn number_documents(documents: &[Document], style: &StyleConfig) -> Result<Vec<Document>> {
    let numerals = NumeralRegistry::new();
    AutoNumberer::new(style, &numerals)?.number_documents(documents)
}

/// Removes existing labels from `documents` with the first-token heuristic
/// of [`Stripper::heuristic`].
pub fn strip_documents(documents: &[Document]) -> Vec<Document> {
    Stripper::heuristic().strip_documents(documents)
}
