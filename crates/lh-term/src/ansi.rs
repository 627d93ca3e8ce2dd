// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the renderer's job. This module
// just knows the byte-level encoding of the SGR commands we need.
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

use crate::cell::{Attr, Style};
use crate::color::CellColor;

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground (text) color.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[2;8m` for dim + hidden.
/// Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = [
        (Attr::DIM, "2"),
        (Attr::HIDDEN, "8"),
    ]
    .into_iter()
    .filter(|&(flag, _)| attr.contains(flag))
    .map(|(_, code)| code)
    .collect();

    write!(w, "\x1b[{}m", codes.join(";"))
}

/// Switch to `style`: attributes first, then a foreground color if it is not
/// the terminal default. A plain style writes nothing.
pub fn style(w: &mut impl Write, style: Style) -> io::Result<()> {
    attrs(w, style.attr)?;
    if !style.fg.is_default() {
        fg(w, style.fg)?;
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
