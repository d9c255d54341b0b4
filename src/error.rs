//! Error types for md-autonumber.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for md-autonumber operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading styles or numbering documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The style configuration is malformed.
    #[error("Invalid style: {0}")]
    Config(#[from] ConfigError),

    /// The named style is absent from every registry.
    #[error("Style not found: {0}")]
    StyleNotFound(String),

    /// The numeral system name is not registered anywhere.
    #[error("Unsupported numeral system: {0}")]
    UnsupportedSystem(String),

    /// A numeral was requested outside the supported range.
    #[error("Number out of range: {0} (supported range is [1, 99])")]
    OutOfRange(u32),

    /// The heading structure of a document is invalid.
    #[error("Invalid heading structure at line {}: {kind}", .line + 1)]
    Structure {
        /// 0-based line index of the offending heading.
        line: usize,
        kind: StructureError,
    },

    /// A label could not be produced for the heading at `line`.
    #[error("Cannot number heading at line {}: {source}", .line + 1)]
    Numbering {
        /// 0-based line index of the heading.
        line: usize,
        source: Box<Error>,
    },

    /// Processing of a single document failed.
    #[error("{id}: {source}")]
    Document { id: String, source: Box<Error> },

    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An external style file could not be parsed.
    #[error("Failed to parse style file {}: {source}", .path.display())]
    StyleFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A label pattern failed to compile.
    #[error("Label pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Attributes this error to the document `id`.
    pub fn in_document(self, id: impl Into<String>) -> Self {
        Error::Document {
            id: id.into(),
            source: Box::new(self),
        }
    }
}

/// The specific rule a style configuration violates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized inheritance flag `{0}` (expected y/yes/true or n/no/false)")]
    UnrecognizedInherit(String),

    #[error("expected 6 heading formats, found {0}")]
    LevelCount(usize),

    #[error("level {0} must be numbered when inheritance is enabled")]
    UnnumberedInheritedLevel(usize),

    #[error("level {0} has an empty format")]
    EmptyFormat(usize),

    #[error("level {level} format `{template}` has more than one `*` placeholder")]
    TooManyPlaceholders { level: usize, template: String },

    #[error("level {0} names an empty numeral system")]
    EmptySystemName(usize),

    #[error("level {level} format `{spec}` names a numeral system but has no `*` placeholder")]
    SystemWithoutPlaceholder { level: usize, spec: String },

    #[error("numeral system `{0}` has no symbols")]
    EmptySymbols(String),
}

/// Reasons a heading outline is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The first heading is not a level-1 heading.
    #[error("document must start at top level, first heading is level {0}")]
    NotTopLevel(usize),

    /// A heading is more than one level deeper than its predecessor.
    #[error("level skip from {previous} to {found}")]
    LevelSkip { previous: usize, found: usize },
}
