// SPDX-License-Identifier: MIT
//
// Terminal colors and opacity blending.
//
// Single-character variable names (r, g, b) are the standard convention in
// color code.
#![allow(clippy::many_single_char_names)]
//
// A terminal cell has no alpha channel, so "50% opacity" has to be resolved
// before anything is written: the foreground is composited over the
// background and the result is emitted as an opaque 24-bit color.
//
// Compositing happens in linear sRGB for physical correctness:
//
//   sRGB fg, bg → linear → mix by opacity → sRGB → CellColor::Rgb

use std::fmt;

use lh_editor::options::HexColor;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// A resolved, opaque terminal color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// sRGB components (0.0–1.0). `None` for [`CellColor::Default`], whose
    /// actual value only the terminal knows.
    #[must_use]
    pub fn to_srgb(self) -> Option<(f32, f32, f32)> {
        match self {
            Self::Rgb(r, g, b) => Some((
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
            )),
            Self::Default => None,
        }
    }
}

impl From<HexColor> for CellColor {
    fn from(c: HexColor) -> Self {
        Self::Rgb(c.r, c.g, c.b)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "Rgb(#{r:02x}{g:02x}{b:02x})"),
            Self::Default => f.write_str("Default"),
        }
    }
}

// ─── Blending ────────────────────────────────────────────────────────────────

/// Composite `fg` at `opacity` over an opaque `bg`.
///
/// `opacity` is clamped to `[0, 1]`: 1.0 returns `fg`, 0.0 returns `bg`.
/// Returns `None` if either color is [`CellColor::Default`].
#[must_use]
pub fn fade(fg: CellColor, bg: CellColor, opacity: f32) -> Option<CellColor> {
    let (fr, fg_g, fb) = fg.to_srgb()?;
    let (br, bg_g, bb) = bg.to_srgb()?;
    let a = opacity.clamp(0.0, 1.0);

    let mix = |src: f32, dst: f32| {
        let linear = srgb_to_linear(src).mul_add(a, srgb_to_linear(dst) * (1.0 - a));
        to_u8(linear_to_srgb(linear))
    };

    Some(CellColor::Rgb(mix(fr, br), mix(fg_g, bg_g), mix(fb, bb)))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ─── sRGB Transfer Functions ─────────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
