// SPDX-License-Identifier: MIT
//
// Dimmed-document rendering.
//
// Paints a buffer to any `impl Write`, one line at a time, with the style
// its decoration asks for. Opacity is resolved here, once per style:
//
//   opacity 1.0           → configured foreground, or the terminal default
//   fg and bg both known  → fg composited over bg at `opacity` (TrueColor)
//   otherwise, 0 < o < 1  → SGR 2 (faint)
//   otherwise, o == 0     → SGR 8 (hidden)
//
// Lines end with the buffer's own line ending, and the phantom empty line
// after a trailing newline is not painted, so an uncolored render of a file
// that ends in a newline reproduces it byte for byte.

use std::io::{self, Write};

use lh_editor::buffer::Buffer;
use lh_editor::decoration::{DecorationSet, DecorationStyle, StyleKind};
use lh_editor::options::StyleConfig;
use tracing::debug;

use crate::ansi;
use crate::cell::{Attr, Style};
use crate::color::{self, CellColor};

// ─── Palette ─────────────────────────────────────────────────────────────────

/// The colors opacity is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    pub foreground: CellColor,
    pub background: CellColor,
}

impl Palette {
    /// Colors from the `[style]` config table. Unset colors are the
    /// terminal default.
    #[must_use]
    pub fn from_config(config: &StyleConfig) -> Self {
        Self {
            foreground: config.foreground.map_or(CellColor::Default, CellColor::from),
            background: config.background.map_or(CellColor::Default, CellColor::from),
        }
    }

    /// The terminal style that renders text at `decoration`'s opacity.
    #[must_use]
    pub fn resolve(self, decoration: DecorationStyle) -> Style {
        let opacity = decoration.opacity();
        if opacity >= 1.0 {
            return Style::fg(self.foreground);
        }
        if let Some(faded) = color::fade(self.foreground, self.background, opacity) {
            return Style::fg(faded);
        }
        if opacity <= 0.0 {
            Style::attr(Attr::HIDDEN)
        } else {
            Style::attr(Attr::DIM)
        }
    }
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Writes a decorated buffer.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
    color: bool,
    line_numbers: bool,
}

impl Renderer {
    /// A renderer with escape sequences on (`color`) or off.
    #[must_use]
    pub const fn new(palette: Palette, color: bool) -> Self {
        Self {
            palette,
            color,
            line_numbers: false,
        }
    }

    /// Prefix each line with its 1-indexed number.
    #[must_use]
    pub const fn with_line_numbers(mut self, on: bool) -> Self {
        self.line_numbers = on;
        self
    }

    /// Paint every line of `buffer` with its decoration.
    ///
    /// # Errors
    ///
    /// Propagates any write error from `w`.
    pub fn render(
        &self,
        w: &mut impl Write,
        buffer: &Buffer,
        decorations: &DecorationSet,
    ) -> io::Result<()> {
        let styles = decorations.styles();
        let dimmed = self.palette.resolve(styles.dimmed);
        let normal = self.palette.resolve(styles.normal);
        debug!(?dimmed, ?normal, color = self.color, "resolved line styles");

        let eol = buffer.line_ending().as_str().as_bytes();
        let lines = painted_lines(buffer);
        let gutter = lines.to_string().len();

        for line in 0..lines {
            let style = match decorations.kind_at(line) {
                StyleKind::Dimmed => dimmed,
                StyleKind::Normal => normal,
            };
            let styled = self.color && !style.is_plain();
            if styled {
                ansi::style(w, style)?;
            }
            if self.line_numbers {
                write!(w, "{:>gutter$} ", line + 1)?;
            }
            if let Some(content) = buffer.line_content(line) {
                for chunk in content.chunks() {
                    w.write_all(chunk.as_bytes())?;
                }
            }
            if styled {
                ansi::reset(w)?;
            }
            w.write_all(eol)?;
        }
        w.flush()
    }
}

/// Lines worth painting: all of them, minus the empty line a trailing
/// newline leaves behind.
fn painted_lines(buffer: &Buffer) -> usize {
    let count = buffer.line_count();
    let phantom = count > 1
        && buffer
            .line(count - 1)
            .is_some_and(|last| last.len_chars() == 0);
    if phantom { count - 1 } else { count }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
