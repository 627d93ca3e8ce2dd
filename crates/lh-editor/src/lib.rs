//! # lh-editor — Editor core for line-highlighter
//!
//! This crate contains everything between the user's typed line spec and the
//! host's decoration call:
//!
//! - **[`line_spec`]** — validate and parse `1,5-9,13` into a `HighlightSet`
//! - **[`partition`]** — split a document into kept and dimmed lines
//! - **[`position`]** — `Position`, `Range` and whole-line `DimRange`, 0-indexed
//! - **[`buffer`]** — the `Document` trait and a rope-backed `Buffer`
//! - **[`decoration`]** — dimmed/normal styles and the `Decorations` host seam
//! - **[`command`]** — the highlight and clear commands a host registers
//! - **[`options`]** — the `config.toml` file

pub mod buffer;
pub mod command;
pub mod decoration;
pub mod line_spec;
pub mod options;
pub mod partition;
pub mod position;
