//! Object-text ingestion from files and standard input.
//!
//! Only files carrying the `.yo` extension are accepted; text handed over
//! directly (for example from stdin) skips that check. Each line keeps its
//! 1-based number so load errors can point back at the input.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::errors::LoadError;

/// Required extension for object files.
pub const OBJECT_EXTENSION: &str = "yo";

/// A line of object text with its original location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line text without its terminator.
    pub text: String,
    /// 1-indexed line number in the input.
    pub original_line: usize,
}

/// Object text split into numbered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSource {
    /// All lines in input order.
    pub lines: Vec<SourceLine>,
    /// Display name of the input (path or `<stdin>`).
    pub name: String,
}

impl ObjectSource {
    /// Splits `content` into numbered lines.
    ///
    /// Both `\n` and `\r\n` terminators are accepted.
    #[must_use]
    pub fn from_text(name: impl Into<String>, content: &str) -> Self {
        Self {
            lines: extract_lines(content),
            name: name.into(),
        }
    }

    /// Reads an object file after checking its extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Extension`] for a path not ending in `.yo` and
    /// [`LoadError::Io`] when the file cannot be read as UTF-8 text.
    pub fn read_file(path: &Path) -> Result<Self, LoadError> {
        if !has_object_extension(path) {
            return Err(LoadError::Extension {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(path.to_string_lossy(), &content))
    }

    /// Reads object text from `reader` without an extension check.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the reader fails or yields non-UTF-8
    /// bytes.
    pub fn read_from(name: &str, mut reader: impl Read) -> Result<Self, LoadError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|source| LoadError::Io {
                path: name.into(),
                source,
            })?;
        Ok(Self::from_text(name, &content))
    }
}

/// Returns `true` when `path` ends in `.yo`.
#[must_use]
pub fn has_object_extension(path: &Path) -> bool {
    path.file_stem().is_some_and(|stem| !stem.is_empty())
        && path
            .extension()
            .is_some_and(|ext| ext == OBJECT_EXTENSION)
}

fn extract_lines(content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| SourceLine {
            text: line.to_string(),
            original_line: idx + 1,
        })
        .collect()
}
