//! Text position and range types.
//!
//! All coordinates are **0-indexed**. Line 0 is the first line, column 0 is the
//! first character. The user-facing line spec is 1-indexed; that conversion
//! happens once in [`line_spec`](crate::line_spec) and never here.
//!
//! Two range shapes live here:
//!
//! - [`Range`] — a half-open `[start, end)` span of positions, the primitive
//!   a host decorates.
//! - [`DimRange`] — a closed run of whole lines `[first_line, last_line]`,
//!   what the partition engine emits. It converts to a `Range` that starts at
//!   column 0 and ends at an unbounded column.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A position in a document: (line, column), both 0-indexed.
///
/// # Ordering
///
/// Positions are ordered lexicographically: line first, then column. This means
/// `Position { line: 0, col: 5 }` < `Position { line: 1, col: 0 }`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin — line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Column 0 of `line`.
    #[inline]
    #[must_use]
    pub const fn line_start(line: usize) -> Self {
        Self { line, col: 0 }
    }

    /// The past-the-end column of `line`. Stands in for "however wide the
    /// line is" so whole-line decorations never depend on line content.
    #[inline]
    #[must_use]
    pub const fn line_end(line: usize) -> Self {
        Self {
            line,
            col: usize::MAX,
        }
    }
}

// Natural ordering: line first, then column.
impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display.
        write!(f, "{}:{}", self.line + 1, self.col.saturating_add(1))
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open range in a document: `[start, end)`.
///
/// `start` is inclusive, `end` is exclusive. An empty range has `start == end`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.line < end.line || (start.line == end.line && start.col <= end.col),
            "Range::new requires start <= end"
        );
        Self { start, end }
    }

    /// True when the range spans zero characters (`start == end`).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.line == self.end.line && self.start.col == self.end.col
    }

    /// True when the given position falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }

    /// True when column 0 of `line` falls inside the range.
    ///
    /// For the whole-line ranges produced by [`DimRange::to_range`] this is
    /// exactly "the line is covered".
    #[inline]
    #[must_use]
    pub fn covers_line(self, line: usize) -> bool {
        self.contains(Position::line_start(line))
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range({}:{} .. {}:{})",
            self.start.line, self.start.col, self.end.line, self.end.col
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// DimRange
// ---------------------------------------------------------------------------

/// A closed run of whole lines, `[first_line, last_line]`, to be dimmed.
///
/// This is a rendering instruction, not a semantic entity: the same set of
/// dimmed lines may be described by one `DimRange` per line or by fewer,
/// coalesced runs. Both render identically.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimRange {
    pub first_line: usize,
    pub last_line: usize,
}

impl DimRange {
    /// A run covering exactly one line.
    #[inline]
    #[must_use]
    pub const fn line(line: usize) -> Self {
        Self {
            first_line: line,
            last_line: line,
        }
    }

    /// A run covering `first..=last`. Panics in debug if `first > last`.
    #[inline]
    #[must_use]
    pub const fn lines(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "DimRange::lines requires first <= last");
        Self {
            first_line: first,
            last_line: last,
        }
    }

    /// Number of lines covered. Always at least 1.
    #[inline]
    #[must_use]
    pub const fn line_span(self) -> usize {
        self.last_line - self.first_line + 1
    }

    /// True when `line` lies inside the run.
    #[inline]
    #[must_use]
    pub const fn contains_line(self, line: usize) -> bool {
        line >= self.first_line && line <= self.last_line
    }

    /// The covered lines in ascending order.
    pub fn iter_lines(self) -> std::ops::RangeInclusive<usize> {
        self.first_line..=self.last_line
    }

    /// Convert to a position range from column 0 of the first line to the
    /// unbounded end column of the last line.
    #[inline]
    #[must_use]
    pub const fn to_range(self) -> Range {
        Range {
            start: Position::line_start(self.first_line),
            end: Position::line_end(self.last_line),
        }
    }
}

impl From<DimRange> for Range {
    fn from(dim: DimRange) -> Self {
        dim.to_range()
    }
}

impl fmt::Debug for DimRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dim({}..={})", self.first_line, self.last_line)
    }
}

impl fmt::Display for DimRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same notation the user types, 1-indexed.
        if self.first_line == self.last_line {
            write!(f, "{}", self.first_line + 1)
        } else {
            write!(f, "{}-{}", self.first_line + 1, self.last_line + 1)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
