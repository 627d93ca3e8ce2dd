// SPDX-License-Identifier: MIT
//
// lh-term — terminal output for line-highlighter.
//
// Turns a decorated buffer into bytes on a terminal. Opacity has no direct
// terminal equivalent, so it is resolved up front into either a composited
// 24-bit color or an SGR attribute, then written with plain ANSI escapes.
//
//   color    → CellColor and linear-sRGB opacity blending
//   cell     → Attr bitflags and the per-line Style
//   ansi     → SGR byte encoding
//   render   → Palette (opacity → Style) and the line Renderer
//   terminal → TTY detection and the color on/off decision

pub mod ansi;
pub mod cell;
pub mod color;
pub mod render;
pub mod terminal;
