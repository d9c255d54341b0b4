//! Per-level label formats.

use crate::error::ConfigError;
use crate::numeral::NumeralRegistry;
use crate::Result;

/// Format string marking a level as unnumbered.
pub const UNNUMBERED: &str = "x";

/// Placeholder replaced by the rendered counter.
pub const PLACEHOLDER: char = '*';

/// How the counter of one heading level is turned into a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    /// Headings at this level get no label.
    Unnumbered,
    /// `prefix` + counter + `suffix`, or just the literal when the template
    /// has no placeholder.
    Template {
        prefix: String,
        suffix: String,
        /// Whether the template contains the placeholder at all.
        placeholder: bool,
        /// Numeral system name; plain decimal when `None`.
        system: Option<String>,
    },
}

impl FormatSpec {
    /// Parses a format string such as `x`, `*.`, `(*)_cn` or `第*章_CN`.
    ///
    /// The numeral system name follows the last `_`. `level` is only used for
    /// error reporting.
    pub fn parse(level: usize, spec: &str) -> std::result::Result<Self, ConfigError> {
        if spec == UNNUMBERED {
            return Ok(FormatSpec::Unnumbered);
        }
        let (template, system) = match spec.rsplit_once('_') {
            Some((template, system)) => {
                if system.is_empty() {
                    return Err(ConfigError::EmptySystemName(level));
                }
                (template, Some(system.to_string()))
            }
            None => (spec, None),
        };
        if template.is_empty() {
            return Err(ConfigError::EmptyFormat(level));
        }
        if template.matches(PLACEHOLDER).count() > 1 {
            return Err(ConfigError::TooManyPlaceholders {
                level,
                template: template.to_string(),
            });
        }

        let (prefix, suffix, placeholder) = match template.split_once(PLACEHOLDER) {
            Some((prefix, suffix)) => (prefix, suffix, true),
            None if system.is_some() => {
                return Err(ConfigError::SystemWithoutPlaceholder {
                    level,
                    spec: spec.to_string(),
                });
            }
            None => (template, "", false),
        };
        Ok(FormatSpec::Template {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            placeholder,
            system,
        })
    }

    pub fn is_unnumbered(&self) -> bool {
        matches!(self, FormatSpec::Unnumbered)
    }

    /// The numeral system this format renders with, if any.
    pub fn system(&self) -> Option<&str> {
        match self {
            FormatSpec::Template {
                system: Some(system),
                ..
            } => Some(system),
            _ => None,
        }
    }

    /// Renders the label fragment for counter value `n`.
    pub fn render(&self, n: u32, numerals: &NumeralRegistry) -> Result<String> {
        let FormatSpec::Template {
            prefix,
            suffix,
            placeholder,
            system,
        } = self
        else {
            return Ok(String::new());
        };
        if !placeholder {
            return Ok(prefix.clone());
        }
        let number = match system {
            Some(name) => numerals.generate(name, n)?,
            None => n.to_string(),
        };
        Ok(format!("{}{}{}", prefix, number, suffix))
    }
}
