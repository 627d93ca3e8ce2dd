//! Partitioning a document into kept and dimmed lines.
//!
//! Given a [`HighlightSet`] and a document's line count, every line index in
//! `[0, line_count)` is either kept (a member of the set) or dimmed. The
//! engine only ever reports the dimmed side; kept lines stay at whatever
//! style the host already paints them with.
//!
//! Members of the set outside the document (negative values from a `0`
//! token, or lines past the end) never match an enumerated index, so they
//! need no filtering.

use tracing::debug;

use crate::line_spec::HighlightSet;
use crate::position::DimRange;

/// Kept/dimmed line counts for one partition.
///
/// `kept + dimmed` always equals the document's line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Partition {
    pub kept: usize,
    pub dimmed: usize,
}

impl Partition {
    /// Count both sides for `line_count` lines.
    #[must_use]
    pub fn of(highlighted: &HighlightSet, line_count: usize) -> Self {
        let kept = highlighted.count_within(line_count);
        Self {
            kept,
            dimmed: line_count - kept,
        }
    }

    /// Total lines in the document.
    #[inline]
    #[must_use]
    pub const fn line_count(self) -> usize {
        self.kept + self.dimmed
    }
}

/// Lines in `[0, line_count)` that are not highlighted, ascending.
pub fn dimmed_lines(
    highlighted: &HighlightSet,
    line_count: usize,
) -> impl Iterator<Item = usize> + '_ {
    (0..line_count).filter(move |&line| !highlighted.contains_line(line))
}

/// One whole-line [`DimRange`] per dimmed line, ascending.
#[must_use]
pub fn partition(highlighted: &HighlightSet, line_count: usize) -> Vec<DimRange> {
    let ranges: Vec<DimRange> = dimmed_lines(highlighted, line_count)
        .map(DimRange::line)
        .collect();
    debug!(
        line_count,
        highlighted = highlighted.len(),
        dimmed = ranges.len(),
        "partitioned document"
    );
    ranges
}

/// Merge runs of adjacent or overlapping ranges.
///
/// Input must be sorted by `first_line` (as [`partition`] produces). The
/// merged ranges cover exactly the same lines, so rendering is unchanged.
#[must_use]
pub fn coalesce(ranges: &[DimRange]) -> Vec<DimRange> {
    let mut merged: Vec<DimRange> = Vec::with_capacity(ranges.len());
    for &range in ranges {
        match merged.last_mut() {
            Some(last) if range.first_line <= last.last_line.saturating_add(1) => {
                last.last_line = last.last_line.max(range.last_line);
            }
            _ => merged.push(range),
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
