use crate::numeral::{NumeralRegistry, MAX_NUMBER, MIN_NUMBER};
use crate::outline::{split_heading, DEFAULT_MARKER};
use crate::style::{FormatSpec, StyleConfig, LEVELS};
use crate::{Document, Error, Result};
use regex::Regex;
use std::borrow::Cow;

/// Removes labels from heading lines.
///
/// Two strategies exist. [`Stripper::heuristic`] drops the first
/// space-delimited token after the markers of any marker line with at least
/// two spaces; it cannot tell a label from the first word of an unlabelled
/// two-word heading. [`Stripper::for_style`] only drops a leading token that
/// matches a label the given style can produce at that heading's level.
#[derive(Debug, Clone)]
pub struct Stripper {
    marker: char,
    matcher: LabelMatcher,
}

#[derive(Debug, Clone)]
enum LabelMatcher {
    FirstToken,
    /// One pattern per level; `None` for levels that carry no label.
    Style(Vec<Option<Regex>>),
}

impl Default for Stripper {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl Stripper {
    /// Strips the first token of every marker line with two or more spaces.
    pub fn heuristic() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            matcher: LabelMatcher::FirstToken,
        }
    }

    /// Strips only labels that `style` could have produced.
    pub fn for_style(style: &StyleConfig, numerals: &NumeralRegistry) -> Result<Self> {
        style.check_systems(numerals)?;

        let mut patterns = Vec::with_capacity(LEVELS);
        let mut parent: Option<String> = None;
        for level in 1..=LEVELS {
            let fragment = fragment_pattern(style.format(level), numerals)?;
            let full = match (fragment, &parent) {
                (Some(fragment), Some(parent)) if style.inherit() => Some(format!(
                    "{}{}{}",
                    parent,
                    regex::escape(style.separator()),
                    fragment
                )),
                (fragment, _) => fragment,
            };
            let regex = match &full {
                Some(pattern) => Some(Regex::new(&format!("^(?:{}) ", pattern))?),
                None => None,
            };
            patterns.push(regex);
            parent = full;
        }

        Ok(Self {
            marker: DEFAULT_MARKER,
            matcher: LabelMatcher::Style(patterns),
        })
    }

    /// Uses `marker` instead of `#` to recognise headings.
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Returns `line` without its label, borrowing when nothing changes.
    pub fn strip_line<'l>(&self, line: &'l str) -> Cow<'l, str> {
        match &self.matcher {
            LabelMatcher::FirstToken => {
                if !line.starts_with(self.marker) || line.matches(' ').count() < 2 {
                    return Cow::Borrowed(line);
                }
                match line.split_once(' ') {
                    Some((heading, rest)) => match rest.split_once(' ') {
                        Some((_, content)) => Cow::Owned(format!("{} {}", heading, content)),
                        None => Cow::Borrowed(line),
                    },
                    None => Cow::Borrowed(line),
                }
            }
            LabelMatcher::Style(patterns) => {
                let Some((level, rest)) = split_heading(line, self.marker) else {
                    return Cow::Borrowed(line);
                };
                let Some(found) = patterns[level - 1].as_ref().and_then(|re| re.find(rest)) else {
                    return Cow::Borrowed(line);
                };
                let head = &line[..line.len() - rest.len()];
                Cow::Owned(format!("{}{}", head, &rest[found.end()..]))
            }
        }
    }

    /// Strips every line of `lines`.
    pub fn strip<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .map(|line| self.strip_line(line.as_ref()).into_owned())
            .collect()
    }

    pub fn strip_document(&self, document: &Document) -> Document {
        let lines = self.strip(&document.lines);
        let changed = lines
            .iter()
            .zip(&document.lines)
            .filter(|(new, old)| new != old)
            .count();
        tracing::info!(document = %document.id, changed, "stripped document");
        Document {
            id: document.id.clone(),
            lines,
        }
    }

    pub fn strip_documents(&self, documents: &[Document]) -> Vec<Document> {
        documents
            .iter()
            .map(|document| self.strip_document(document))
            .collect()
    }
}

/// Pattern for the label fragment one level contributes, if any.
fn fragment_pattern(format: &FormatSpec, numerals: &NumeralRegistry) -> Result<Option<String>> {
    let FormatSpec::Template {
        prefix,
        suffix,
        placeholder,
        system,
    } = format
    else {
        return Ok(None);
    };
    if !placeholder {
        return Ok(Some(regex::escape(prefix)));
    }
    let number = match system {
        Some(name) => match numeral_alternation(name, numerals)? {
            Some(alternation) => alternation,
            None => return Ok(None),
        },
        None => "[0-9]+".to_string(),
    };
    Ok(Some(format!(
        "{}{}{}",
        regex::escape(prefix),
        number,
        regex::escape(suffix)
    )))
}

/// Alternation of every numeral `name` renders, longest first.
fn numeral_alternation(name: &str, numerals: &NumeralRegistry) -> Result<Option<String>> {
    let mut values = Vec::new();
    for n in MIN_NUMBER..=MAX_NUMBER {
        match numerals.generate(name, n) {
            Ok(value) => values.push(value),
            Err(Error::OutOfRange(_)) => continue,
            Err(err) => return Err(err),
        }
    }
    if values.is_empty() {
        return Ok(None);
    }
    values.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    values.dedup();
    let escaped: Vec<String> = values.iter().map(|v| regex::escape(v)).collect();
    Ok(Some(format!("(?:{})", escaped.join("|"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::AutoNumberer;
    use crate::style::load_style;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heuristic_drops_first_token() {
        let stripper = Stripper::heuristic();
        assert_eq!(stripper.strip_line("## 1.2 Scope\n"), "## Scope\n");
        assert_eq!(stripper.strip_line("# 一、 概述"), "# 概述");
        assert_eq!(stripper.strip_line("# Title\n"), "# Title\n");
        assert_eq!(stripper.strip_line("plain text with spaces"), "plain text with spaces");
    }

    #[test]
    fn test_heuristic_cannot_tell_labels_from_words() {
        let stripper = Stripper::heuristic();
        assert_eq!(stripper.strip_line("# Getting started fast"), "# started fast");
    }

    #[test]
    fn test_style_stripper_only_removes_labels() {
        let style = StyleConfig::default();
        let stripper = Stripper::for_style(&style, &NumeralRegistry::new()).unwrap();
        assert_eq!(stripper.strip_line("# 3 Getting started"), "# Getting started");
        assert_eq!(stripper.strip_line("## 3.12 Deep dive"), "## Deep dive");
        assert_eq!(stripper.strip_line("# Getting started"), "# Getting started");
        // A level-2 heading carries two components under this style.
        assert_eq!(stripper.strip_line("## 3 Things"), "## 3 Things");
    }

    #[test]
    fn test_style_stripper_is_idempotent() {
        let style = load_style("classic_style", None).unwrap();
        let stripper = Stripper::for_style(&style, &NumeralRegistry::new()).unwrap();
        let lines = ["# Title words", "## 一十二、 Chapter name", "### (三) More text"];
        let once = stripper.strip(&lines);
        assert_eq!(once, vec!["# Title words", "## Chapter name", "### More text"]);
        assert_eq!(stripper.strip(&once), once);
    }

    #[test]
    fn test_style_round_trip() {
        let numerals = NumeralRegistry::new();
        for name in ["default_style", "titled_style", "classic_style"] {
            let style = load_style(name, None).unwrap();
            let original = [
                "# Big title\n",
                "intro\n",
                "## First part\n",
                "### A detail\n",
                "#### Even deeper stuff\n",
                "##### Fifth level\n",
                "###### Sixth level\n",
                "###### Another sixth\n",
                "## Second part\n",
            ];
            let numberer = AutoNumberer::new(&style, &numerals).unwrap();
            let outline = numberer.outline(&original).unwrap();
            let numbered = crate::render::render(&original, &outline, '#');
            assert_ne!(numbered, original);
            let stripper = Stripper::for_style(&style, &numerals).unwrap();
            assert_eq!(stripper.strip(&numbered), original, "style {name}");
        }
    }

    struct Gapped;

    impl crate::numeral::NumeralSystem for Gapped {
        fn render(&self, n: u32) -> Option<String> {
            (n != 2).then(|| format!("n{n}"))
        }
    }

    #[test]
    fn test_gaps_in_custom_system_are_skipped() {
        let mut numerals = NumeralRegistry::new();
        numerals.register("gapped", Gapped);
        let style = StyleConfig::parse("n", &["*_gapped", "*", "*", "*", "*", "*"]).unwrap();
        let stripper = Stripper::for_style(&style, &numerals).unwrap();
        assert_eq!(stripper.strip_line("# n1 Intro"), "# Intro");
        assert_eq!(stripper.strip_line("# n3 Later"), "# Later");
        assert_eq!(stripper.strip_line("# n42 Much later"), "# Much later");
        assert_eq!(stripper.strip_line("# n2 Kept"), "# n2 Kept");
    }

    #[test]
    fn test_inherited_separator_is_escaped() {
        let style = StyleConfig::parse("y,+", &["*_roman", "*", "*", "*", "*", "*"]).unwrap();
        let stripper = Stripper::for_style(&style, &NumeralRegistry::new()).unwrap();
        assert_eq!(stripper.strip_line("## IV+2 Name"), "## Name");
        assert_eq!(stripper.strip_line("## IVV2 Name"), "## IVV2 Name");
    }
}
