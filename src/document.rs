//! Documents and the file adapter around them.

use crate::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of the files the CLI picks up.
pub const MARKDOWN_EXTENSION: &str = "md";

/// A document body identified by `id` (a path for file-backed documents).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    /// Lines including their terminators, so that joining them restores the
    /// original text.
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            id: id.into(),
            lines,
        }
    }

    /// Splits `text` into lines, keeping line terminators.
    pub fn from_text(id: impl Into<String>, text: &str) -> Self {
        Self::new(id, text.split_inclusive('\n').map(str::to_string).collect())
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Reads a UTF-8 document from disk.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(path.display().to_string(), &text))
    }

    /// Replaces the file at `path` with this document.
    ///
    /// The new content is written to a temporary file next to `path` and
    /// renamed over it, so the original is never left truncated.
    pub fn write_atomic<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(self.to_text().as_bytes())?;
        tmp.flush()?;
        if let Ok(metadata) = fs::metadata(path) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

/// Appends `.md` to `path` unless it already ends with it.
pub fn with_markdown_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == MARKDOWN_EXTENSION => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".");
            name.push(MARKDOWN_EXTENSION);
            PathBuf::from(name)
        }
    }
}

/// Lists the Markdown files to process: every entry of `files` (with `.md`
/// appended where missing) followed by the `.md` files inside `folders`.
///
/// Folders are scanned one level deep unless `recursive` is set; their files
/// are returned sorted by name.
pub fn collect_markdown_files(
    files: &[PathBuf],
    folders: &[PathBuf],
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = files.iter().map(|f| with_markdown_extension(f)).collect();

    for folder in folders {
        let mut walker = WalkDir::new(folder).min_depth(1).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let is_markdown = entry
                .path()
                .extension()
                .is_some_and(|ext| ext == MARKDOWN_EXTENSION);
            if entry.file_type().is_file() && is_markdown {
                out.push(entry.into_path());
            }
        }
    }

    Ok(out)
}
