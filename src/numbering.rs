//! Numbering engine - computes a label for every heading of an outline.

use crate::numeral::NumeralRegistry;
use crate::outline::{Outline, DEFAULT_MARKER};
use crate::render;
use crate::style::{StyleConfig, LEVELS};
use crate::{Document, Error, Result};

/// Applies a style to documents.
///
/// The style and numeral registry are borrowed read-only for the lifetime of
/// the numberer; every document gets a fresh [`Outline`].
#[derive(Debug, Clone)]
pub struct AutoNumberer<'a> {
    style: &'a StyleConfig,
    numerals: &'a NumeralRegistry,
    marker: char,
}

impl<'a> AutoNumberer<'a> {
    /// Creates a numberer, failing if the style names an unknown numeral
    /// system.
    pub fn new(style: &'a StyleConfig, numerals: &'a NumeralRegistry) -> Result<Self> {
        style.check_systems(numerals)?;
        Ok(Self {
            style,
            numerals,
            marker: DEFAULT_MARKER,
        })
    }

    /// Uses `marker` instead of `#` to recognise headings.
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// Fills in `number` for every entry of `outline`.
    ///
    /// Per level, the counter restarts at 1 whenever the preceding heading is
    /// shallower. The first heading of a run also captures its prefix: the
    /// preceding heading's label plus the separator, or nothing when that
    /// label is empty or inheritance is off. Later headings of the run reuse
    /// the captured prefix.
    pub fn assign(&self, outline: &mut Outline) -> Result<()> {
        let mut counters = [0u32; LEVELS];
        let mut prefixes: [String; LEVELS] = Default::default();
        let entries = outline.entries_mut();

        for i in 0..entries.len() {
            let level = entries[i].level;
            let slot = level - 1;
            let previous = i.checked_sub(1).map(|p| &entries[p]);

            if previous.is_some_and(|p| p.level < level) {
                counters[slot] = 0;
            }
            let count = counters[slot] + 1;

            if count == 1 && level != 1 {
                prefixes[slot] = match previous {
                    Some(parent) if self.style.inherit() && !parent.number.is_empty() => {
                        format!("{}{}", parent.number, self.style.separator())
                    }
                    _ => String::new(),
                };
            }

            let fragment = self
                .style
                .format(level)
                .render(count, self.numerals)
                .map_err(|source| Error::Numbering {
                    line: entries[i].position,
                    source: Box::new(source),
                })?;
            let label = format!("{}{}", prefixes[slot], fragment);

            tracing::debug!(line = entries[i].position, level, label = %label, "numbered heading");
            entries[i].number = label;
            counters[slot] = count;
        }
        Ok(())
    }

    /// Parses and numbers `lines`, returning the outline with labels.
    pub fn outline<S: AsRef<str>>(&self, lines: &[S]) -> Result<Outline> {
        let mut outline = Outline::parse_with_marker(lines, self.marker)?;
        self.assign(&mut outline)?;
        Ok(outline)
    }

    /// Numbers one document; the input is left untouched on failure.
    pub fn number_document(&self, document: &Document) -> Result<Document> {
        let outline = self
            .outline(&document.lines)
            .map_err(|err| err.in_document(&document.id))?;
        tracing::info!(
            document = %document.id,
            headings = outline.len(),
            "numbered document"
        );
        Ok(Document {
            id: document.id.clone(),
            lines: render::render(&document.lines, &outline, self.marker),
        })
    }

    /// Numbers every document in order, stopping at the first failure.
    pub fn number_documents(&self, documents: &[Document]) -> Result<Vec<Document>> {
        documents
            .iter()
            .map(|document| self.number_document(document))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::load_style;
    use pretty_assertions::assert_eq;

    fn labels(style: &StyleConfig, lines: &[&str]) -> Vec<String> {
        let numerals = NumeralRegistry::new();
        let numberer = AutoNumberer::new(style, &numerals).unwrap();
        numberer
            .outline(lines)
            .unwrap()
            .iter()
            .map(|e| e.number.clone())
            .collect()
    }

    #[test]
    fn test_default_inherited_numbering() {
        let style = StyleConfig::default();
        let got = labels(&style, &["# a", "## b", "## c", "# d", "## e"]);
        assert_eq!(got, vec!["1", "1.1", "1.2", "2", "2.1"]);
    }

    #[test]
    fn test_counter_resets_under_new_parent() {
        let style = StyleConfig::default();
        let got = labels(
            &style,
            &["# a", "## b", "### c", "### d", "## e", "### f", "# g", "## h"],
        );
        assert_eq!(
            got,
            vec!["1", "1.1", "1.1.1", "1.1.2", "1.2", "1.2.1", "2", "2.1"]
        );
    }

    #[test]
    fn test_default_style_numbers_every_level() {
        let style = load_style("default_style", None).unwrap();
        let got = labels(&style, &["# a", "## b", "## c", "# d", "## e"]);
        assert_eq!(got, vec!["1", "1.1", "1.2", "2", "2.1"]);
    }

    #[test]
    fn test_unnumbered_top_level_gives_empty_prefix() {
        let style = load_style("titled_style", None).unwrap();
        let got = labels(&style, &["# Title", "## a", "### b", "## c", "# Next", "## d"]);
        assert_eq!(got, vec!["", "1", "1.1", "2", "", "1"]);
    }

    #[test]
    fn test_non_inherited_restarts_per_parent() {
        let style = StyleConfig::parse("n", &["x", "*)", "*", "*", "*", "*"]).unwrap();
        let got = labels(&style, &["# A", "## b", "## c", "# B", "## d", "## e"]);
        assert_eq!(got, vec!["", "1)", "2)", "", "1)", "2)"]);
    }

    #[test]
    fn test_classic_style() {
        let style = load_style("classic_style", None).unwrap();
        let got = labels(
            &style,
            &[
                "# Title",
                "## a",
                "### b",
                "#### c",
                "##### d",
                "###### e",
                "###### f",
                "## g",
            ],
        );
        assert_eq!(got, vec!["", "一、", "(一)", "1.", "(1)", "a)", "b)", "二、"]);
    }

    #[test]
    fn test_custom_separator() {
        let style = StyleConfig::parse("y,-", &["*", "*_EN", "*", "*", "*", "*"]).unwrap();
        let got = labels(&style, &["# a", "## b", "## c", "### d"]);
        assert_eq!(got, vec!["1", "1-A", "1-B", "1-B-1"]);
    }

    #[test]
    fn test_unknown_system_rejected_up_front() {
        let style = StyleConfig::parse("n", &["*_nope", "*", "*", "*", "*", "*"]).unwrap();
        let numerals = NumeralRegistry::new();
        assert!(matches!(
            AutoNumberer::new(&style, &numerals),
            Err(Error::UnsupportedSystem(_))
        ));
    }

    #[test]
    fn test_out_of_range_reports_line() {
        let style = StyleConfig::parse("n", &["*_roman", "*", "*", "*", "*", "*"]).unwrap();
        let numerals = NumeralRegistry::new();
        let numberer = AutoNumberer::new(&style, &numerals).unwrap();
        let lines: Vec<String> = (0..100).map(|i| format!("# h{i}")).collect();
        match numberer.outline(&lines) {
            Err(Error::Numbering { line, source }) => {
                assert_eq!(line, 99);
                assert!(matches!(*source, Error::OutOfRange(100)));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_number_document_renders_lines() {
        let style = StyleConfig::default();
        let numerals = NumeralRegistry::new();
        let numberer = AutoNumberer::new(&style, &numerals).unwrap();
        let document = Document::from_text("intro.md", "# Intro\nbody\n## Scope\n");
        let numbered = numberer.number_document(&document).unwrap();
        assert_eq!(numbered.to_text(), "# 1 Intro\nbody\n## 1.1 Scope\n");
        assert_eq!(numbered.id, "intro.md");
    }

    #[test]
    fn test_failure_names_document() {
        let style = StyleConfig::default();
        let numerals = NumeralRegistry::new();
        let numberer = AutoNumberer::new(&style, &numerals).unwrap();
        let document = Document::from_text("bad.md", "# a\n### c\n");
        let err = numberer.number_document(&document).unwrap_err();
        assert!(matches!(&err, Error::Document { id, .. } if id == "bad.md"));
        assert!(err.to_string().contains("line 2"));
    }
}
