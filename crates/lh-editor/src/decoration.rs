//! Decoration styles and the host's decoration state.
//!
//! There are exactly two styles: [`StyleKind::Dimmed`] for lines the user did
//! not name and [`StyleKind::Normal`] for everything else. Their look is an
//! explicit [`DecorationStyle`] value handed to the host on every call, never
//! a process-wide constant.
//!
//! The host side is the [`Decorations`] trait. Applying a style replaces
//! every range previously applied with that style, so re-running the
//! highlight command starts from scratch (last write wins).
//! [`DecorationSet`] is an in-memory implementation that renderers query
//! line by line.

use std::fmt;

use thiserror::Error;

use crate::position::{DimRange, Position, Range};

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Which of the two decoration styles a range gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Dimmed,
    Normal,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimmed => f.write_str("dimmed"),
            Self::Normal => f.write_str("normal"),
        }
    }
}

/// Opacity outside `[0, 1]` (or NaN).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("opacity must be between 0 and 1, got {0}")]
pub struct OpacityError(pub f32);

/// How a decorated line looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationStyle {
    opacity: f32,
}

impl DecorationStyle {
    /// Half-transparent text.
    pub const DIMMED: Self = Self { opacity: 0.5 };

    /// Fully opaque text.
    pub const NORMAL: Self = Self { opacity: 1.0 };

    /// A style with the given opacity.
    ///
    /// # Errors
    ///
    /// Returns [`OpacityError`] unless `0.0 <= opacity <= 1.0`.
    pub fn new(opacity: f32) -> Result<Self, OpacityError> {
        if (0.0..=1.0).contains(&opacity) {
            Ok(Self { opacity })
        } else {
            Err(OpacityError(opacity))
        }
    }

    /// Opacity in `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn opacity(self) -> f32 {
        self.opacity
    }

    /// The default style for `kind`.
    #[must_use]
    pub const fn default_for(kind: StyleKind) -> Self {
        match kind {
            StyleKind::Dimmed => Self::DIMMED,
            StyleKind::Normal => Self::NORMAL,
        }
    }
}

/// The pair of styles a highlight run renders with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Styles {
    pub dimmed: DecorationStyle,
    pub normal: DecorationStyle,
}

impl Styles {
    /// The style for `kind`.
    #[must_use]
    pub const fn get(self, kind: StyleKind) -> DecorationStyle {
        match kind {
            StyleKind::Dimmed => self.dimmed,
            StyleKind::Normal => self.normal,
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            dimmed: DecorationStyle::DIMMED,
            normal: DecorationStyle::NORMAL,
        }
    }
}

// ---------------------------------------------------------------------------
// Host decoration state
// ---------------------------------------------------------------------------

/// The host's decoration primitive for one document.
pub trait Decorations {
    /// Decorate `ranges` with `style`, replacing every range previously
    /// decorated with `kind`. An empty slice clears that kind.
    fn apply_style(&mut self, kind: StyleKind, style: DecorationStyle, ranges: &[DimRange]);
}

/// In-memory decoration state.
///
/// Every line not dimmed renders normal, so applying [`StyleKind::Normal`]
/// only records its style; its ranges are not stored.
///
/// Dimmed ranges are kept sorted so per-line lookups are a binary search.
/// Lookups assume the ranges do not overlap, which holds for anything
/// [`partition`](crate::partition::partition) or
/// [`coalesce`](crate::partition::coalesce) produce.
#[derive(Debug, Clone, Default)]
pub struct DecorationSet {
    dimmed: Vec<Range>,
    styles: Styles,
}

impl DecorationSet {
    /// No decorations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No decorations yet, but render with `styles` until one is applied.
    #[must_use]
    pub fn with_styles(styles: Styles) -> Self {
        Self {
            styles,
            ..Self::default()
        }
    }

    /// The dimmed ranges, sorted by start.
    #[must_use]
    pub fn dimmed_ranges(&self) -> &[Range] {
        &self.dimmed
    }

    /// The style last applied for each kind.
    #[inline]
    #[must_use]
    pub const fn styles(&self) -> Styles {
        self.styles
    }

    /// Which style a line renders with.
    #[must_use]
    pub fn kind_at(&self, line: usize) -> StyleKind {
        let start = Position::line_start(line);
        let idx = self.dimmed.partition_point(|r| r.end <= start);
        if self.dimmed.get(idx).is_some_and(|r| r.covers_line(line)) {
            StyleKind::Dimmed
        } else {
            StyleKind::Normal
        }
    }

    /// The resolved style for a line.
    #[must_use]
    pub fn style_at(&self, line: usize) -> DecorationStyle {
        self.styles.get(self.kind_at(line))
    }

    /// True when nothing is dimmed.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.dimmed.is_empty()
    }
}

impl Decorations for DecorationSet {
    fn apply_style(&mut self, kind: StyleKind, style: DecorationStyle, ranges: &[DimRange]) {
        match kind {
            StyleKind::Dimmed => {
                self.dimmed = ranges.iter().map(|&dim| Range::from(dim)).collect();
                self.dimmed.sort_by_key(|r| r.start);
                self.styles.dimmed = style;
            }
            StyleKind::Normal => self.styles.normal = style,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
