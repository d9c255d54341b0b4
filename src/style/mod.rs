//! Style model - per-level label formats plus inheritance settings.

mod format;
mod registry;
mod source;

pub use format::{FormatSpec, PLACEHOLDER, UNNUMBERED};
pub use registry::{builtin_style, load_style, BUILTIN_STYLES};
pub use source::StyleSource;

use crate::error::ConfigError;
use crate::numeral::NumeralRegistry;
use crate::{Error, Result};
use serde::Deserialize;

/// Number of heading levels a style describes.
pub const LEVELS: usize = 6;

/// Separator used between parent and child labels when none is given.
pub const DEFAULT_SEPARATOR: &str = ".";

/// A validated numbering style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    inherit: bool,
    separator: String,
    formats: Vec<FormatSpec>,
}

impl StyleConfig {
    /// Builds a style from already-parsed formats.
    ///
    /// With inheritance enabled the separator defaults to
    /// [`DEFAULT_SEPARATOR`]; without it the separator is unused and empty.
    pub fn new(
        inherit: bool,
        separator: Option<String>,
        formats: Vec<FormatSpec>,
    ) -> std::result::Result<Self, ConfigError> {
        if formats.len() != LEVELS {
            return Err(ConfigError::LevelCount(formats.len()));
        }
        if inherit {
            // Level 1 may stay unnumbered; deeper labels are join keys.
            if let Some(index) = formats.iter().skip(1).position(FormatSpec::is_unnumbered) {
                return Err(ConfigError::UnnumberedInheritedLevel(index + 2));
            }
        }

        let separator = if inherit {
            separator.unwrap_or_else(|| DEFAULT_SEPARATOR.to_string())
        } else {
            if let Some(separator) = separator {
                tracing::warn!(
                    separator = %separator,
                    "separator ignored because inheritance is disabled"
                );
            }
            String::new()
        };

        Ok(Self {
            inherit,
            separator,
            formats,
        })
    }

    /// Builds a style from its textual form: an inheritance flag such as
    /// `y`, `n` or `y,-` and one format string per level.
    pub fn parse<S: AsRef<str>>(inherit: &str, headings: &[S]) -> Result<Self> {
        let flag = InheritFlag::parse(inherit)?;
        Self::from_parts(flag, None, headings)
    }

    fn from_parts<S: AsRef<str>>(
        flag: InheritFlag,
        separator: Option<String>,
        headings: &[S],
    ) -> Result<Self> {
        if headings.len() != LEVELS {
            return Err(ConfigError::LevelCount(headings.len()).into());
        }
        let formats = headings
            .iter()
            .enumerate()
            .map(|(i, spec)| FormatSpec::parse(i + 1, spec.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(flag.inherit, separator.or(flag.separator), formats)?)
    }

    pub fn inherit(&self) -> bool {
        self.inherit
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Format for heading `level` (1-based).
    ///
    /// # Panics
    /// Panics if `level` is outside `1..=LEVELS`.
    pub fn format(&self, level: usize) -> &FormatSpec {
        &self.formats[level - 1]
    }

    pub fn formats(&self) -> &[FormatSpec] {
        &self.formats
    }

    /// Checks that every numeral system the style names is registered.
    pub fn check_systems(&self, numerals: &NumeralRegistry) -> Result<()> {
        match self
            .formats
            .iter()
            .filter_map(FormatSpec::system)
            .find(|name| !numerals.contains(name))
        {
            Some(name) => Err(Error::UnsupportedSystem(name.to_string())),
            None => Ok(()),
        }
    }
}

impl Default for StyleConfig {
    /// Every level decimal, inherited with `.` between levels.
    fn default() -> Self {
        let formats = (1..=LEVELS)
            .map(|_| FormatSpec::Template {
                prefix: String::new(),
                suffix: String::new(),
                placeholder: true,
                system: None,
            })
            .collect();
        Self {
            inherit: true,
            separator: DEFAULT_SEPARATOR.to_string(),
            formats,
        }
    }
}

/// Parsed inheritance flag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InheritFlag {
    inherit: bool,
    separator: Option<String>,
}

impl InheritFlag {
    /// Accepts `y`/`yes`/`true` or `n`/`no`/`false` (any case), with an
    /// optional `,<separator>` after a positive flag.
    fn parse(value: &str) -> std::result::Result<Self, ConfigError> {
        let (flag, separator) = match value.split_once(',') {
            Some((flag, separator)) => (flag, Some(separator.to_string())),
            None => (value, None),
        };
        let inherit = match flag.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => true,
            "n" | "no" | "false" => false,
            _ => return Err(ConfigError::UnrecognizedInherit(value.to_string())),
        };
        if !inherit && separator.is_some() {
            return Err(ConfigError::UnrecognizedInherit(value.to_string()));
        }
        Ok(Self { inherit, separator })
    }
}

/// A style as written in a style file, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStyle {
    pub inherit: RawInherit,
    #[serde(default)]
    pub separator: Option<String>,
    pub heading: Vec<String>,
}

/// Inheritance flag as written in a style file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawInherit {
    Bool(bool),
    Text(String),
}

impl RawStyle {
    /// Validates this raw style.
    pub fn build(&self) -> Result<StyleConfig> {
        let flag = match &self.inherit {
            RawInherit::Bool(inherit) => InheritFlag {
                inherit: *inherit,
                separator: None,
            },
            RawInherit::Text(text) => InheritFlag::parse(text)?,
        };
        StyleConfig::from_parts(flag, self.separator.clone(), &self.heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_error(result: Result<StyleConfig>) -> ConfigError {
        match result {
            Err(Error::Config(err)) => err,
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_inherit_flag_forms() {
        let style = StyleConfig::parse("y", &["x", "*", "*", "*", "*", "*"]).unwrap();
        assert!(style.inherit());
        assert_eq!(style.separator(), ".");

        let style = StyleConfig::parse("YES,-", &["*", "*", "*", "*", "*", "*"]).unwrap();
        assert_eq!(style.separator(), "-");

        let style = StyleConfig::parse("n", &["x", "x", "*", "*", "*", "*"]).unwrap();
        assert!(!style.inherit());
        assert_eq!(style.separator(), "");
    }

    #[test]
    fn test_unrecognized_inherit() {
        let err = config_error(StyleConfig::parse("maybe", &["*"; 6]));
        assert_eq!(err, ConfigError::UnrecognizedInherit("maybe".to_string()));
        let err = config_error(StyleConfig::parse("n,-", &["*"; 6]));
        assert_eq!(err, ConfigError::UnrecognizedInherit("n,-".to_string()));
    }

    #[test]
    fn test_level_count() {
        let err = config_error(StyleConfig::parse("y", &["*"; 5]));
        assert_eq!(err, ConfigError::LevelCount(5));
        let err = config_error(StyleConfig::parse("n", &["*"; 7]));
        assert_eq!(err, ConfigError::LevelCount(7));
    }

    #[test]
    fn test_inherited_levels_must_be_numbered() {
        let err = config_error(StyleConfig::parse("y", &["*", "*", "x", "*", "*", "*"]));
        assert_eq!(err, ConfigError::UnnumberedInheritedLevel(3));
        assert!(StyleConfig::parse("n", &["*", "*", "x", "*", "*", "*"]).is_ok());
    }

    #[test]
    fn test_system_needs_placeholder() {
        let err = config_error(StyleConfig::parse("n", &["Part_*", "*", "*", "*", "*", "*"]));
        assert_eq!(
            err,
            ConfigError::SystemWithoutPlaceholder {
                level: 1,
                spec: "Part_*".to_string(),
            }
        );
    }

    #[test]
    fn test_check_systems() {
        let numerals = NumeralRegistry::new();
        let style = StyleConfig::parse("n", &["*_roman", "*_greek", "*", "*", "*", "*"]).unwrap();
        assert!(matches!(
            style.check_systems(&numerals),
            Err(Error::UnsupportedSystem(name)) if name == "greek"
        ));
        assert!(StyleConfig::default().check_systems(&numerals).is_ok());
    }

    #[test]
    fn test_raw_style_separator_field() {
        let raw = RawStyle {
            inherit: RawInherit::Bool(true),
            separator: Some("-".to_string()),
            heading: vec!["*".to_string(); 6],
        };
        let style = raw.build().unwrap();
        assert!(style.inherit());
        assert_eq!(style.separator(), "-");
    }
}
