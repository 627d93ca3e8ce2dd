//! Line specs — the `1,5-9,13` notation for naming lines to keep.
//!
//! A line spec is a comma-separated list of tokens. Each token is either a
//! single 1-indexed line number (`13`) or an inclusive range (`5-9`). Parsing
//! produces a [`HighlightSet`] of **0-indexed** line indices; the 1-to-0
//! conversion happens here and nowhere else.
//!
//! # Pipeline
//!
//! 1. [`is_valid`] / [`validate`] — the prompt's gatekeeper. Only ASCII
//!    digits, `,` and `-` are allowed. The empty string passes.
//! 2. [`tokenize`] — split on `,`. No trimming.
//! 3. [`resolve_token`] — classify one token as a [`TokenResult`].
//! 4. [`TokenResult::lines`] — expand to a lazy run of line indices.
//! 5. [`parse`] — union of every token's lines.
//!
//! # Token resolution
//!
//! Resolution is deliberately permissive. The token is scanned for every
//! non-overlapping `digits-digits` pair *anywhere* in it, and the integers
//! are collected into one flat list:
//!
//! | Token      | Pairs found      | Result          |
//! |------------|------------------|-----------------|
//! | `5-9`      | `(5, 9)`         | `Range(4, 8)`   |
//! | `3-3`      | `(3, 3)`         | `Range(2, 2)`   |
//! | `9-5`      | `(9, 5)`         | `Range(8, 4)` → no lines |
//! | `1-3-5`    | `(1, 3)`         | `Range(0, 2)`   |
//! | `2-4x6-8`  | `(2, 4) (6, 8)`  | `Range(1, 3)` — only the first pair counts |
//! | `13`       | none             | `Single(12)`    |
//! | `7-`       | none             | `Single(6)`     |
//! | `-3`       | none             | `Single(-4)` → matches no line |
//! | `` / `-`   | none             | `Invalid`       |
//!
//! Tokens without a pair fall back to a leading-integer read: optional
//! whitespace, optional sign, then the longest run of digits. A token with no
//! such prefix is [`TokenResult::Invalid`] and contributes nothing.
//!
//! Nothing in this module returns an error for a token. Descending ranges,
//! empty tokens and negative lines are absorbed as empty contributions.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::trace;

/// `digits-digits` anywhere in a token. ASCII digits only.
static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)-([0-9]+)").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// Leading integer: optional whitespace, optional sign, digits.
static LEADING_INT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?[0-9]+)").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// The message shown by the prompt when [`is_valid`] rejects the input.
pub const VALIDATION_MESSAGE: &str = "Input text failed validation";

/// Placeholder shown in an empty prompt.
pub const PLACEHOLDER: &str = "1,5-9,13";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Input contained a character outside `{0-9, ',', '-'}`.
///
/// Displays as [`VALIDATION_MESSAGE`]. The offending character and its byte
/// offset are kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Input text failed validation")]
pub struct ValidationError {
    pub found: char,
    pub offset: usize,
}

/// Returns `true` if `c` may appear in a line spec.
#[inline]
#[must_use]
pub const fn is_spec_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '-'
}

/// Returns `true` if every character of `raw` is a digit, comma, or hyphen.
///
/// The empty string is valid: it contains no disallowed character.
#[must_use]
pub fn is_valid(raw: &str) -> bool {
    raw.chars().all(is_spec_char)
}

/// Like [`is_valid`] but reports the first offending character.
///
/// # Errors
///
/// Returns [`ValidationError`] pointing at the first character outside the
/// allowed set.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    match raw.char_indices().find(|&(_, c)| !is_spec_char(c)) {
        Some((offset, found)) => Err(ValidationError { found, offset }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Split a raw spec into its comma-separated tokens, untrimmed.
///
/// `""` yields one empty token; `"1,"` yields `"1"` and `""`.
pub fn tokenize(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
}

/// The resolved meaning of one token, already 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenResult {
    /// One line.
    Single(i64),
    /// Every line from `.0` to `.1` inclusive. Empty when `.0 > .1`.
    Range(i64, i64),
    /// No integer could be read from the token.
    Invalid,
}

impl TokenResult {
    /// The line indices this token contributes, ascending.
    #[must_use]
    pub const fn lines(self) -> LineIter {
        match self {
            Self::Single(line) => LineIter::new(line, line),
            Self::Range(start, end) => LineIter::new(start, end),
            Self::Invalid => LineIter::EMPTY,
        }
    }

    /// True when the token contributes no line at all.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::Range(start, end) => start > end,
            Self::Invalid => true,
        }
    }
}

impl fmt::Display for TokenResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(line) => write!(f, "line {line}"),
            Self::Range(start, end) => write!(f, "lines {start}..={end}"),
            Self::Invalid => f.write_str("nothing"),
        }
    }
}

/// Classify one token. See the module docs for the rules.
#[must_use]
pub fn resolve_token(token: &str) -> TokenResult {
    // Step 1: every pair in the token, flattened.
    let mut bounds: Vec<Option<i64>> = Vec::new();
    for caps in PAIR.captures_iter(token) {
        bounds.push(caps[1].parse().ok());
        bounds.push(caps[2].parse().ok());
    }

    // Step 2: no pair → single line; otherwise only the first two count.
    let result = match bounds.as_slice() {
        [] => leading_int(token)
            .and_then(|n| n.checked_sub(1))
            .map_or(TokenResult::Invalid, TokenResult::Single),
        [Some(start), Some(end), ..] => TokenResult::Range(start - 1, end - 1),
        // A bound overflowed i64.
        _ => TokenResult::Invalid,
    };
    trace!(token, %result, "resolved line spec token");
    result
}

/// Read the leading integer of `token`, if it has one.
fn leading_int(token: &str) -> Option<i64> {
    let caps = LEADING_INT.captures(token)?;
    caps[1].parse().ok()
}

// ---------------------------------------------------------------------------
// Line iteration
// ---------------------------------------------------------------------------

/// A lazy, restartable run of line indices.
///
/// Expanding a range never recurses and never allocates: `5-100000` is one
/// `RangeInclusive` until something walks it. A clone taken before walking
/// replays the same lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIter(RangeInclusive<i64>);

impl LineIter {
    /// A run that yields nothing.
    pub const EMPTY: Self = Self(1..=0);

    /// Lines `start..=end`. Yields nothing when `start > end`.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self(start..=end)
    }

    /// Restrict the run to `[0, line_count)`.
    #[must_use]
    pub fn within(self, line_count: usize) -> Self {
        let last = i64::try_from(line_count).map_or(i64::MAX, |n| n - 1);
        if self.0.is_empty() || last < 0 {
            return Self::EMPTY;
        }
        let start = (*self.0.start()).max(0);
        let end = (*self.0.end()).min(last);
        Self(start..=end)
    }
}

impl Iterator for LineIter {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<i64> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

// ---------------------------------------------------------------------------
// HighlightSet
// ---------------------------------------------------------------------------

/// The canonical set of 0-indexed lines to keep highlighted.
///
/// Built once from a spec and never mutated. Values are not checked against
/// any document: negative or out-of-range entries are legal and simply never
/// match a real line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    lines: BTreeSet<i64>,
}

impl HighlightSet {
    /// Membership test against a real document line.
    #[inline]
    #[must_use]
    pub fn contains_line(&self, line: usize) -> bool {
        i64::try_from(line).is_ok_and(|line| self.lines.contains(&line))
    }

    /// Raw membership test, including out-of-document values.
    #[inline]
    #[must_use]
    pub fn contains(&self, line: i64) -> bool {
        self.lines.contains(&line)
    }

    /// Number of distinct entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no line is highlighted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Entries in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i64> + '_ {
        self.lines.iter().copied()
    }

    /// How many entries fall inside `[0, line_count)`.
    #[must_use]
    pub fn count_within(&self, line_count: usize) -> usize {
        match i64::try_from(line_count) {
            Ok(end) => self.lines.range(0..end).count(),
            Err(_) => self.lines.range(0..).count(),
        }
    }
}

impl FromIterator<i64> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = i64;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a spec into the set of lines it names.
///
/// Total for any input. Callers are expected to have passed `raw` through
/// [`is_valid`] first, but nothing here depends on it.
#[must_use]
pub fn parse(raw: &str) -> HighlightSet {
    tokenize(raw)
        .map(resolve_token)
        .flat_map(TokenResult::lines)
        .collect()
}

/// Parse a spec, keeping only lines inside `[0, line_count)`.
///
/// Out-of-document parts of a range are never expanded, so `1-4000000000`
/// against a 20-line document costs 20 insertions. Partitioning the result
/// against `line_count` gives the same dim set as partitioning [`parse`]'s.
#[must_use]
pub fn parse_bounded(raw: &str, line_count: usize) -> HighlightSet {
    tokenize(raw)
        .map(resolve_token)
        .flat_map(|token| token.lines().within(line_count))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn set(lines: &[i64]) -> HighlightSet {
        lines.iter().copied().collect()
    }

    // ── Validation ──────────────────────────────────────────────────────

    #[test]
    fn valid_specs() {
        assert!(is_valid("1"));
        assert!(is_valid("1,5-9,13"));
        assert!(is_valid("--,,"));
        assert!(is_valid("0123456789"));
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(is_valid(""));
        assert_eq!(validate(""), Ok(()));
    }

    #[test]
    fn letters_are_invalid() {
        assert!(!is_valid("a"));
        assert!(!is_valid("1,5-9,x"));
        assert!(!is_valid("foo3-5bar"));
    }

    #[test]
    fn whitespace_is_invalid() {
        assert!(!is_valid(" "));
        assert!(!is_valid("1, 2"));
        assert!(!is_valid("1\t"));
    }

    #[test]
    fn non_ascii_digits_are_invalid() {
        // Arabic-Indic digit three.
        assert!(!is_valid("\u{0663}"));
    }

    #[test]
    fn validate_reports_first_offender() {
        let err = validate("1,2;3x").unwrap_err();
        assert_eq!(err.found, ';');
        assert_eq!(err.offset, 3);
        assert_eq!(err.to_string(), VALIDATION_MESSAGE);
    }

    // ── Tokenizing ──────────────────────────────────────────────────────

    #[test]
    fn tokenize_keeps_empty_tokens() {
        assert_eq!(tokenize("1,,2,").collect::<Vec<_>>(), vec!["1", "", "2", ""]);
        assert_eq!(tokenize("").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn tokenize_does_not_trim() {
        assert_eq!(tokenize(" 1 ,2").collect::<Vec<_>>(), vec![" 1 ", "2"]);
    }

    // ── Token resolution ────────────────────────────────────────────────

    #[test]
    fn resolve_single() {
        assert_eq!(resolve_token("1"), TokenResult::Single(0));
        assert_eq!(resolve_token("13"), TokenResult::Single(12));
    }

    #[test]
    fn resolve_range() {
        assert_eq!(resolve_token("5-9"), TokenResult::Range(4, 8));
        assert_eq!(resolve_token("3-3"), TokenResult::Range(2, 2));
    }

    #[test]
    fn resolve_descending_range_is_kept_as_is() {
        let r = resolve_token("5-1");
        assert_eq!(r, TokenResult::Range(4, 0));
        assert!(r.is_empty());
    }

    #[test]
    fn resolve_pair_anywhere_in_token() {
        assert_eq!(resolve_token("foo3-5bar"), TokenResult::Range(2, 4));
    }

    #[test]
    fn resolve_uses_first_pair_only() {
        assert_eq!(resolve_token("2-4x6-8"), TokenResult::Range(1, 3));
        assert_eq!(resolve_token("1-3-5"), TokenResult::Range(0, 2));
    }

    #[test]
    fn resolve_trailing_hyphen_is_single() {
        assert_eq!(resolve_token("7-"), TokenResult::Single(6));
    }

    #[test]
    fn resolve_leading_hyphen_is_negative_single() {
        assert_eq!(resolve_token("-3"), TokenResult::Single(-4));
    }

    #[test]
    fn resolve_zero_is_line_minus_one() {
        assert_eq!(resolve_token("0"), TokenResult::Single(-1));
        assert_eq!(resolve_token("0-2"), TokenResult::Range(-1, 1));
    }

    #[test]
    fn resolve_degenerate_tokens() {
        assert_eq!(resolve_token(""), TokenResult::Invalid);
        assert_eq!(resolve_token("-"), TokenResult::Invalid);
        assert_eq!(resolve_token("--3"), TokenResult::Invalid);
        assert_eq!(resolve_token("   "), TokenResult::Invalid);
    }

    #[test]
    fn resolve_leading_whitespace_single() {
        assert_eq!(resolve_token("  4"), TokenResult::Single(3));
        assert_eq!(resolve_token("12abc"), TokenResult::Single(11));
    }

    #[test]
    fn resolve_overflow_is_invalid() {
        assert_eq!(resolve_token("99999999999999999999"), TokenResult::Invalid);
        assert_eq!(resolve_token("1-99999999999999999999"), TokenResult::Invalid);
    }

    // ── Line iteration ──────────────────────────────────────────────────

    #[test]
    fn line_iter_inclusive() {
        assert_eq!(LineIter::new(2, 5).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn line_iter_single_and_empty() {
        assert_eq!(LineIter::new(7, 7).collect::<Vec<_>>(), vec![7]);
        assert_eq!(LineIter::new(7, 6).count(), 0);
        assert_eq!(LineIter::EMPTY.count(), 0);
    }

    #[test]
    fn line_iter_is_restartable() {
        let run = TokenResult::Range(0, 2).lines();
        let first: Vec<_> = run.clone().collect();
        let second: Vec<_> = run.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn line_iter_wide_range_is_lazy() {
        let mut run = LineIter::new(0, i64::MAX - 1);
        assert_eq!(run.next(), Some(0));
        assert_eq!(run.next(), Some(1));
    }

    #[test]
    fn line_iter_within_clamps() {
        assert_eq!(LineIter::new(-3, 100).within(4).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(LineIter::new(5, 9).within(4).count(), 0);
        assert_eq!(LineIter::new(0, 3).within(0).count(), 0);
        assert_eq!(LineIter::new(3, 1).within(10).count(), 0);
    }

    // ── parse ───────────────────────────────────────────────────────────

    #[test]
    fn parse_single_line() {
        assert_eq!(parse("1"), set(&[0]));
    }

    #[test]
    fn parse_mixed_spec() {
        assert_eq!(parse("1,5-9,13"), set(&[0, 4, 5, 6, 7, 8, 12]));
    }

    #[test]
    fn parse_descending_contributes_nothing() {
        assert!(parse("5-1").is_empty());
        assert_eq!(parse("5-1,2"), set(&[1]));
    }

    #[test]
    fn parse_equal_bounds() {
        assert_eq!(parse("3-3"), set(&[2]));
    }

    #[test]
    fn parse_deduplicates_overlaps() {
        let s = parse("1-3,2-4,3");
        assert_eq!(s, set(&[0, 1, 2, 3]));
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn parse_order_is_irrelevant() {
        assert_eq!(parse("13,5-9,1"), parse("1,5-9,13"));
    }

    #[test]
    fn parse_is_deterministic() {
        for raw in ["", "1", "1,5-9,13", "-", "9-2,4--5,,7-"] {
            assert_eq!(parse(raw), parse(raw), "re-parsing {raw:?}");
        }
    }

    #[test]
    fn parse_degenerate_specs_are_empty() {
        assert!(parse("").is_empty());
        assert!(parse(",").is_empty());
        assert!(parse("-").is_empty());
        assert!(parse("--").is_empty());
    }

    #[test]
    fn parse_keeps_out_of_document_values() {
        let s = parse("0,-2");
        assert!(s.contains(-1));
        assert!(s.contains(-3));
        assert!(!s.contains_line(0));
    }

    // ── parse_bounded ───────────────────────────────────────────────────

    #[test]
    fn bounded_drops_out_of_document_values() {
        assert_eq!(parse_bounded("0,1,3-6,40", 5), set(&[0, 2, 3, 4]));
    }

    #[test]
    fn bounded_huge_range_is_cheap() {
        let s = parse_bounded("1-4000000000", 20);
        assert_eq!(s.len(), 20);
    }

    #[test]
    fn bounded_agrees_with_parse_inside_the_document() {
        for raw in ["1,5-9,13", "0-3,7", "9-2", "2-4x6-8", ""] {
            for n in [0, 1, 5, 13, 30] {
                let full = parse(raw);
                let bounded = parse_bounded(raw, n);
                for line in 0..n {
                    assert_eq!(
                        full.contains_line(line),
                        bounded.contains_line(line),
                        "{raw:?} line {line} of {n}"
                    );
                }
                assert_eq!(full.count_within(n), bounded.len());
            }
        }
    }

    // ── HighlightSet ────────────────────────────────────────────────────

    #[test]
    fn count_within_ignores_outsiders() {
        let s = set(&[-4, -1, 0, 2, 9, 10]);
        assert_eq!(s.count_within(10), 3);
        assert_eq!(s.count_within(0), 0);
    }

    #[test]
    fn iteration_is_ascending() {
        let s = parse("9,1,5");
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 4, 8]);
    }
}
