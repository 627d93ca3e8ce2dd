//! Documents — what the highlighter reads line counts and text from.
//!
//! The highlight command only needs a line count, so the seam is the small
//! [`Document`] trait. [`Buffer`] is the concrete document used by the
//! terminal front end: a read-only [`ropey::Rope`] with the file path it
//! came from and the detected line ending.
//!
//! # Line counting
//!
//! Lines are counted the way editors display them: an empty buffer has one
//! (empty) line, and a buffer ending in `\n` has a trailing empty line.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Read access to an open document.
pub trait Document {
    /// Total number of lines.
    fn line_count(&self) -> usize;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to load a document.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
}

// ---------------------------------------------------------------------------
// Line ending detection
// ---------------------------------------------------------------------------

/// Line ending style of a file.
///
/// Detected on load by scanning the first occurrence. Defaults to `Lf` when
/// the text has no line ending at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n` — Unix, macOS, Linux.
    Lf,
    /// `\r\n` — Windows, DOS.
    CrLf,
    /// `\r` — Classic Mac (pre-OS X).
    Cr,
}

impl LineEnding {
    /// The string representation of this line ending.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Detect the dominant line ending in a string by finding the first
    /// occurrence. Returns `Lf` if no line endings are found.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' if i > 0 && bytes[i - 1] == b'\r' => return Self::CrLf,
                b'\n' => return Self::Lf,
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => return Self::CrLf,
                b'\r' => return Self::Cr,
                _ => {}
            }
        }
        Self::Lf
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
            Self::Cr => f.write_str("CR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A read-only text buffer backed by a rope.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
    line_ending: LineEnding,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create a buffer from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            line_ending: LineEnding::detect(text),
            rope: Rope::from_str(text),
            path: None,
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Read`] if the file cannot be read or contains
    /// invalid UTF-8.
    pub fn from_file(path: &Path) -> Result<Self, BufferError> {
        let text = fs::read_to_string(path).map_err(|source| BufferError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            line_ending: LineEnding::detect(&text),
            rope: Rope::from_str(&text),
            path: Some(path.to_path_buf()),
        })
    }

    // -- Text access --------------------------------------------------------

    /// Total number of lines. See the module docs for how this is counted.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// True when the buffer contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get a line by 0-indexed line number, including its trailing line
    /// ending (if any). Returns `None` if `line >= line_count()`.
    #[inline]
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        if line < self.rope.len_lines() {
            Some(self.rope.line(line))
        } else {
            None
        }
    }

    /// A line's text **without** its trailing line ending (`\n`, `\r\n`,
    /// `\r`). Returns `None` if the line doesn't exist.
    #[must_use]
    pub fn line_content(&self, line: usize) -> Option<RopeSlice<'_>> {
        self.line(line).map(|rope_line| {
            let total = rope_line.len_chars();
            let last = total.checked_sub(1).map(|i| rope_line.char(i));
            let before = total.checked_sub(2).map(|i| rope_line.char(i));
            let end = match (before, last) {
                (Some('\r'), Some('\n')) => total - 2,
                (_, Some('\n' | '\r')) => total - 1,
                _ => total,
            };
            rope_line.slice(..end)
        })
    }

    // -- Metadata -----------------------------------------------------------

    /// The file this buffer was loaded from, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The detected line ending.
    #[inline]
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

impl Document for Buffer {
    fn line_count(&self) -> usize {
        Self::line_count(self)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("path", &self.path)
            .field("lines", &self.rope.len_lines())
            .field("chars", &self.rope.len_chars())
            .field("line_ending", &self.line_ending)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
