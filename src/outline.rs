//! Outline parser - finds heading lines and checks their nesting.

use crate::error::StructureError;
use crate::style::LEVELS;
use crate::{Error, Result};

/// Character whose leading run marks a heading.
pub const DEFAULT_MARKER: char = '#';

/// One heading of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// 0-based line index in the source document.
    pub position: usize,
    /// Heading depth, 1 to 6.
    pub level: usize,
    /// Text after the marker run and its separating space, verbatim.
    pub content: String,
    /// Computed label, empty until numbered.
    pub number: String,
}

/// The headings of one document in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    entries: Vec<HeadingEntry>,
}

/// Splits a heading line into its level and the text after the marker run
/// and one space.
///
/// Returns `None` for lines that are not headings: no marker, no space after
/// the run, or a run longer than six markers.
pub fn split_heading(line: &str, marker: char) -> Option<(usize, &str)> {
    let rest = line.trim_start_matches(marker);
    let level = (line.len() - rest.len()) / marker.len_utf8();
    if level == 0 || level > LEVELS {
        return None;
    }
    let content = rest.strip_prefix(' ')?;
    Some((level, content))
}

impl Outline {
    /// Parses `lines` using the default `#` marker.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        Self::parse_with_marker(lines, DEFAULT_MARKER)
    }

    /// Parses `lines`, rejecting documents that do not start at level 1 or
    /// that skip a level on the way down.
    pub fn parse_with_marker<S: AsRef<str>>(lines: &[S], marker: char) -> Result<Self> {
        let mut entries: Vec<HeadingEntry> = Vec::new();

        for (position, line) in lines.iter().enumerate() {
            let Some((level, content)) = split_heading(line.as_ref(), marker) else {
                continue;
            };

            let violation = match entries.last() {
                None if level != 1 => Some(StructureError::NotTopLevel(level)),
                Some(previous) if level > previous.level + 1 => Some(StructureError::LevelSkip {
                    previous: previous.level,
                    found: level,
                }),
                _ => None,
            };
            if let Some(kind) = violation {
                return Err(Error::Structure {
                    line: position,
                    kind,
                });
            }

            entries.push(HeadingEntry {
                position,
                level,
                content: content.to_string(),
                number: String::new(),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [HeadingEntry] {
        &mut self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeadingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a HeadingEntry;
    type IntoIter = std::slice::Iter<'a, HeadingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
