// SPDX-License-Identifier: MIT
//
// Text attributes and the per-line style the renderer paints with.
//
// Every rendered line gets exactly one `Style`: a foreground color plus a
// set of SGR attributes. The renderer resolves a decoration's opacity into a
// `Style` before writing anything, so the ANSI layer never sees opacity.

use crate::color::CellColor;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters
    /// in the ANSI escape sequence standard. Combine with bitwise OR:
    ///
    /// ```
    /// use lh_term::cell::Attr;
    ///
    /// let style = Attr::DIM | Attr::HIDDEN;
    /// assert!(style.contains(Attr::DIM));
    /// assert!(!Attr::DIM.contains(Attr::HIDDEN));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 2 — decreased intensity (faint).
        const DIM    = 1 << 0;
        /// SGR 8 — invisible text (not widely supported).
        const HIDDEN = 1 << 1;
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Foreground color and attributes for one painted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: CellColor,
    pub attr: Attr,
}

impl Style {
    /// The terminal's own default look — nothing to emit.
    pub const PLAIN: Self = Self {
        fg: CellColor::Default,
        attr: Attr::empty(),
    };

    /// A style with just a foreground color.
    #[inline]
    #[must_use]
    pub const fn fg(fg: CellColor) -> Self {
        Self {
            fg,
            attr: Attr::empty(),
        }
    }

    /// A style with just attributes.
    #[inline]
    #[must_use]
    pub const fn attr(attr: Attr) -> Self {
        Self {
            fg: CellColor::Default,
            attr,
        }
    }

    /// True when painting with this style needs no escape sequence.
    #[inline]
    #[must_use]
    pub const fn is_plain(self) -> bool {
        self.fg.is_default() && self.attr.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
