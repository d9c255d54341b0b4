//! Named styles: the built-in set and lookup across registries.

use super::{StyleConfig, StyleSource};
use crate::{Error, Result};

/// Names of the built-in styles.
pub const BUILTIN_STYLES: &[&str] = &["default_style", "titled_style", "classic_style"];

/// Returns the built-in style called `name`.
pub fn builtin_style(name: &str) -> Option<Result<StyleConfig>> {
    let (inherit, heading): (&str, [&str; 6]) = match name {
        // 1, 1.1, 1.1.1, ...
        "default_style" => ("y", ["*", "*", "*", "*", "*", "*"]),
        // 1, 1.1, ... under an unnumbered title.
        "titled_style" => ("y", ["x", "*", "*", "*", "*", "*"]),
        // 一、 (一) 1. (1) a)
        "classic_style" => ("n", ["x", "*、_cn", "(*)_cn", "*.", "(*)", "*)_en"]),
        _ => return None,
    };
    Some(StyleConfig::parse(inherit, &heading))
}

/// Resolves the style called `name`, trying `external` before the built-ins.
pub fn load_style(name: &str, external: Option<&StyleSource>) -> Result<StyleConfig> {
    if let Some(style) = external.and_then(|source| source.style(name)) {
        tracing::debug!(style = name, "using style from external source");
        return style;
    }
    builtin_style(name).unwrap_or_else(|| Err(Error::StyleNotFound(name.to_string())))
}
