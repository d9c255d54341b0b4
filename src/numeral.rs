//! Numeral systems - render a heading counter in a named numbering scheme.
//!
//! Lookup is two-tiered: systems registered on a [`NumeralRegistry`] are tried
//! first, then the built-in systems:
//!
//! | name    | 1  | 12     | 27   |
//! |---------|----|--------|------|
//! | `cn`    | 一 | 一十二 | 二十七 |
//! | `CN`    | 壹 | 壹拾贰 | 贰拾柒 |
//! | `EN`    | A  | L      | AA   |
//! | `en`    | a  | l      | aa   |
//! | `roman` | I  | XII    | XXVII |
//! | `hex`   | 0x1 | 0xc   | 0x1b |
//! | `bin`   | 0b1 | 0b1100 | 0b11011 |

use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Smallest number a numeral system renders.
pub const MIN_NUMBER: u32 = 1;
/// Largest number a numeral system renders.
pub const MAX_NUMBER: u32 = 99;

/// A named integer-to-string rendering scheme.
///
/// Implementations only ever see values in `[MIN_NUMBER, MAX_NUMBER]` and
/// return `None` for values they have no numeral for.
pub trait NumeralSystem: Send + Sync {
    fn render(&self, n: u32) -> Option<String>;
}

impl<F> NumeralSystem for F
where
    F: Fn(u32) -> String + Send + Sync,
{
    fn render(&self, n: u32) -> Option<String> {
        Some(self(n))
    }
}

/// Registry of caller-supplied numeral systems layered over the built-ins.
#[derive(Clone, Default)]
pub struct NumeralRegistry {
    custom: HashMap<String, Arc<dyn NumeralSystem>>,
}

impl fmt::Debug for NumeralRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.custom.keys().collect();
        names.sort();
        f.debug_struct("NumeralRegistry")
            .field("custom", &names)
            .finish()
    }
}

impl NumeralRegistry {
    /// Creates a registry holding only the built-in systems.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `system` under `name`, shadowing any built-in of that name.
    pub fn register(&mut self, name: impl Into<String>, system: impl NumeralSystem + 'static) {
        self.custom.insert(name.into(), Arc::new(system));
    }

    /// Returns true if `name` resolves in either tier.
    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name) || builtin(name).is_some()
    }

    /// Renders `n` in the system called `name`.
    pub fn generate(&self, name: &str, n: u32) -> Result<String> {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            return Err(Error::OutOfRange(n));
        }
        if let Some(system) = self.custom.get(name) {
            return system.render(n).ok_or(Error::OutOfRange(n));
        }
        match builtin(name) {
            Some(render) => Ok(render(n)),
            None => Err(Error::UnsupportedSystem(name.to_string())),
        }
    }
}

/// Names of the built-in numeral systems.
pub const BUILTIN_SYSTEMS: &[&str] = &["cn", "CN", "EN", "en", "roman", "hex", "bin"];

fn builtin(name: &str) -> Option<fn(u32) -> String> {
    let render: fn(u32) -> String = match name {
        "cn" => generate_cn,
        "CN" => generate_cn_upper,
        "EN" => generate_en_upper,
        "en" => generate_en,
        "roman" => generate_roman,
        "hex" => generate_hex,
        "bin" => generate_bin,
        _ => return None,
    };
    Some(render)
}

/// Chinese numerals (一, 二, ... 九十九).
pub fn generate_cn(n: u32) -> String {
    const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
    chinese(n, &DIGITS, "十")
}

/// Chinese financial numerals (壹, 贰, ... 玖拾玖).
pub fn generate_cn_upper(n: u32) -> String {
    const DIGITS: [&str; 10] = ["零", "壹", "贰", "叁", "肆", "伍", "陆", "柒", "捌", "玖"];
    chinese(n, &DIGITS, "拾")
}

fn chinese(n: u32, digits: &[&str; 10], ten_mark: &str) -> String {
    let tens = (n / 10 % 10) as usize;
    let units = (n % 10) as usize;
    match (tens, units) {
        (0, units) => digits[units].to_string(),
        (1, 0) => ten_mark.to_string(),
        (tens, 0) => format!("{}{}", digits[tens], ten_mark),
        (tens, units) => format!("{}{}{}", digits[tens], ten_mark, digits[units]),
    }
}

/// Uppercase letters (A, B, ... Z, AA, AB, ...).
pub fn generate_en_upper(n: u32) -> String {
    letters(n, b'A')
}

/// Lowercase letters (a, b, ... z, aa, ab, ...).
pub fn generate_en(n: u32) -> String {
    letters(n, b'a')
}

fn letters(n: u32, first: u8) -> String {
    let mut out = Vec::new();
    let mut rest = n;
    while rest > 0 {
        rest -= 1;
        out.push(char::from(first + (rest % 26) as u8));
        rest /= 26;
    }
    out.iter().rev().collect()
}

/// Roman numerals for tens and units (I ... XCIX).
pub fn generate_roman(n: u32) -> String {
    const UNITS: [&str; 10] = ["", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];
    const TENS: [&str; 10] = ["", "X", "XX", "XXX", "XL", "L", "LX", "LXX", "LXXX", "XC"];
    format!("{}{}", TENS[(n / 10 % 10) as usize], UNITS[(n % 10) as usize])
}

/// Hexadecimal with a `0x` prefix.
pub fn generate_hex(n: u32) -> String {
    format!("{:#x}", n)
}

/// Binary with a `0b` prefix.
pub fn generate_bin(n: u32) -> String {
    format!("{:#b}", n)
}

/// How a [`SymbolSequence`] maps a number onto its symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// Bijective base-k over the symbols, like spreadsheet columns.
    #[default]
    Alphabetic,
    /// The n-th symbol; numbers past the end are out of range.
    List,
}

/// A numeral system defined by a list of symbols, typically loaded from a
/// style file.
#[derive(Debug, Clone)]
pub struct SymbolSequence {
    symbols: Vec<String>,
    mode: SequenceMode,
}

impl SymbolSequence {
    /// Returns `None` when `symbols` is empty.
    pub fn new(symbols: Vec<String>, mode: SequenceMode) -> Option<Self> {
        if symbols.is_empty() {
            return None;
        }
        Some(Self { symbols, mode })
    }

    /// Renders `n`, or `None` if the sequence has no symbol for it.
    pub fn try_render(&self, n: u32) -> Option<String> {
        match self.mode {
            SequenceMode::List => self.symbols.get((n as usize).checked_sub(1)?).cloned(),
            SequenceMode::Alphabetic => {
                let base = self.symbols.len();
                let mut digits = Vec::new();
                let mut rest = n as usize;
                if rest == 0 {
                    return None;
                }
                while rest > 0 {
                    rest -= 1;
                    digits.push(self.symbols[rest % base].as_str());
                    rest /= base;
                }
                digits.reverse();
                Some(digits.concat())
            }
        }
    }
}

impl NumeralSystem for SymbolSequence {
    fn render(&self, n: u32) -> Option<String> {
        self.try_render(n)
    }
}
