//! External style sources loaded from TOML.
//!
//! ```toml
//! [styles.report]
//! inherit = "y,-"
//! heading = ["*", "*", "*_en", "*", "*", "*"]
//!
//! [numerals.greek]
//! symbols = ["α", "β", "γ", "δ"]
//! mode = "alphabetic"
//! ```

use super::{RawStyle, StyleConfig};
use crate::error::ConfigError;
use crate::numeral::{NumeralRegistry, SequenceMode, SymbolSequence};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Styles and numeral systems supplied from outside the crate.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StyleSource {
    styles: BTreeMap<String, RawStyle>,
    numerals: BTreeMap<String, RawNumeral>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawNumeral {
    symbols: Vec<String>,
    #[serde(default)]
    mode: RawMode,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawMode {
    #[default]
    Alphabetic,
    List,
}

impl From<RawMode> for SequenceMode {
    fn from(mode: RawMode) -> Self {
        match mode {
            RawMode::Alphabetic => SequenceMode::Alphabetic,
            RawMode::List => SequenceMode::List,
        }
    }
}

impl StyleSource {
    /// Reads a style file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|source| Error::StyleFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses style file contents.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::StyleFile {
            path: "<inline>".into(),
            source,
        })
    }

    /// Validated style called `name`, if this source defines it.
    pub fn style(&self, name: &str) -> Option<Result<StyleConfig>> {
        self.styles.get(name).map(RawStyle::build)
    }

    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Builds a numeral registry with this source's systems layered over the
    /// built-ins.
    pub fn numeral_registry(&self) -> Result<NumeralRegistry> {
        let mut registry = NumeralRegistry::new();
        for (name, raw) in &self.numerals {
            let sequence = SymbolSequence::new(raw.symbols.clone(), raw.mode.into())
                .ok_or_else(|| ConfigError::EmptySymbols(name.clone()))?;
            registry.register(name.clone(), sequence);
        }
        Ok(registry)
    }
}
