//! The highlight commands — what a host binds to a key or a palette entry.
//!
//! | Command id                           | Action                              |
//! |--------------------------------------|-------------------------------------|
//! | `line-highlighter.highlight-lines`   | Prompt for a spec, dim other lines  |
//! | `line-highlighter.clear-highlights`  | Remove all dimming                  |
//!
//! # Flow
//!
//! ```text
//! Prompt::input ──None──▶ Outcome::Cancelled (nothing touched)
//!       │
//!     Some(raw)
//!       ▼
//! line_spec::parse_bounded ─▶ partition ─▶ Decorations::apply_style(Dimmed)
//!                                                   │
//!                                                   ▼
//!                                      Outcome::Applied(Partition)
//! ```
//!
//! Hosts supply three collaborators: a [`Prompt`] that collects text, the
//! active [`Document`], and its [`Decorations`]. Every invocation starts from
//! scratch; the previous dim set is replaced, never merged.

use thiserror::Error;
use tracing::{debug, info};

use crate::buffer::Document;
use crate::decoration::{Decorations, StyleKind, Styles};
use crate::line_spec::{self, PLACEHOLDER, VALIDATION_MESSAGE, ValidationError};
use crate::partition::{self, Partition};

/// Help text shown above the input box.
pub const PROMPT: &str = r"Validation fails if text match regex: [^\d\-,]+";

// ---------------------------------------------------------------------------
// Errors & outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command ran with no document focused.
    #[error("no active document")]
    NoActiveDocument,

    /// Text passed directly (not through a prompt) failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// What a command invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user dismissed the prompt. No decoration changed.
    Cancelled,

    /// Dimming was applied. Carries the kept/dimmed line counts.
    Applied(Partition),

    /// All dimming was removed.
    Cleared,
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// Validation callback: `None` accepts the text, `Some(message)` rejects it.
pub type Validator = fn(&str) -> Option<&'static str>;

/// What a host's input box should show.
#[derive(Clone, Copy)]
pub struct InputOptions {
    /// Example input shown while the box is empty.
    pub placeholder: &'static str,
    /// Help text shown with the box.
    pub prompt: &'static str,
    /// Checked on every submission; a rejected text keeps the box open.
    pub validate: Validator,
}

impl InputOptions {
    /// The options used by the highlight command.
    pub const HIGHLIGHT: Self = Self {
        placeholder: PLACEHOLDER,
        prompt: PROMPT,
        validate: validate_input,
    };
}

/// The spec prompt's validation callback.
#[must_use]
pub fn validate_input(text: &str) -> Option<&'static str> {
    match line_spec::validate(text) {
        Ok(()) => None,
        Err(err) => {
            debug!(found = ?err.found, offset = err.offset, "rejected line spec");
            Some(VALIDATION_MESSAGE)
        }
    }
}

/// A host input box.
pub trait Prompt {
    /// Show the box and wait for the user. `None` means the user cancelled.
    ///
    /// Implementations must not return text that `options.validate` rejects.
    fn input(&mut self, options: &InputOptions) -> Option<String>;
}

// ---------------------------------------------------------------------------
// HighlightCommand
// ---------------------------------------------------------------------------

/// Dim every line the user does not name.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightCommand {
    styles: Styles,
}

impl HighlightCommand {
    /// The id hosts register this command under.
    pub const ID: &'static str = "line-highlighter.highlight-lines";

    /// A command that renders with `styles`.
    #[must_use]
    pub const fn new(styles: Styles) -> Self {
        Self { styles }
    }

    /// Prompt for a spec and apply it to `document`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoActiveDocument`] if `document` is `None`.
    /// The prompt is not shown in that case.
    pub fn run(
        &self,
        prompt: &mut dyn Prompt,
        document: Option<&dyn Document>,
        decorations: &mut dyn Decorations,
    ) -> Result<Outcome, CommandError> {
        let document = document.ok_or(CommandError::NoActiveDocument)?;
        let Some(raw) = prompt.input(&InputOptions::HIGHLIGHT) else {
            debug!("highlight prompt cancelled");
            return Ok(Outcome::Cancelled);
        };
        Ok(self.apply(&raw, document, decorations))
    }

    /// Apply a spec the caller already holds, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Validation`] if `raw` contains a character
    /// outside `{0-9, ',', '-'}`. Nothing is applied in that case.
    pub fn run_with_input(
        &self,
        raw: &str,
        document: &dyn Document,
        decorations: &mut dyn Decorations,
    ) -> Result<Outcome, CommandError> {
        line_spec::validate(raw)?;
        Ok(self.apply(raw, document, decorations))
    }

    fn apply(
        &self,
        raw: &str,
        document: &dyn Document,
        decorations: &mut dyn Decorations,
    ) -> Outcome {
        let line_count = document.line_count();
        let highlighted = line_spec::parse_bounded(raw, line_count);
        let ranges = partition::partition(&highlighted, line_count);
        decorations.apply_style(StyleKind::Dimmed, self.styles.dimmed, &ranges);

        let counts = Partition::of(&highlighted, line_count);
        info!(spec = raw, kept = counts.kept, dimmed = counts.dimmed, "applied highlight");
        Outcome::Applied(counts)
    }
}

// ---------------------------------------------------------------------------
// ClearCommand
// ---------------------------------------------------------------------------

/// Remove all dimming from a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearCommand {
    styles: Styles,
}

impl ClearCommand {
    /// The id hosts register this command under.
    pub const ID: &'static str = "line-highlighter.clear-highlights";

    #[must_use]
    pub const fn new(styles: Styles) -> Self {
        Self { styles }
    }

    /// Clear every dimmed range.
    pub fn run(&self, decorations: &mut dyn Decorations) -> Outcome {
        decorations.apply_style(StyleKind::Dimmed, self.styles.dimmed, &[]);
        debug!("cleared highlight");
        Outcome::Cleared
    }
}

/// Every command id this crate provides, for host registration.
pub const COMMAND_IDS: [&str; 2] = [HighlightCommand::ID, ClearCommand::ID];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::decoration::{DecorationSet, DecorationStyle};
    use crate::position::DimRange;

    /// Replays scripted answers, honoring validation like a real input box.
    struct ScriptedPrompt {
        answers: Vec<Option<&'static str>>,
        rejections: Vec<&'static str>,
        shown: usize,
    }

    impl ScriptedPrompt {
        fn new(answers: &[Option<&'static str>]) -> Self {
            Self {
                answers: answers.iter().rev().copied().collect(),
                rejections: Vec::new(),
                shown: 0,
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn input(&mut self, options: &InputOptions) -> Option<String> {
            self.shown += 1;
            while let Some(answer) = self.answers.pop() {
                let text = answer?;
                match (options.validate)(text) {
                    None => return Some(text.to_string()),
                    Some(message) => self.rejections.push(message),
                }
            }
            None
        }
    }

    /// Records every `apply_style` call.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(StyleKind, DecorationStyle, Vec<DimRange>)>,
    }

    impl Decorations for Recorder {
        fn apply_style(&mut self, kind: StyleKind, style: DecorationStyle, ranges: &[DimRange]) {
            self.calls.push((kind, style, ranges.to_vec()));
        }
    }

    fn doc(lines: usize) -> Buffer {
        Buffer::from_text(&vec!["x"; lines].join("\n"))
    }

    // ── Input options ───────────────────────────────────────────────────

    #[test]
    fn highlight_prompt_options() {
        let options = InputOptions::HIGHLIGHT;
        assert_eq!(options.placeholder, "1,5-9,13");
        assert_eq!(options.prompt, r"Validation fails if text match regex: [^\d\-,]+");
        assert_eq!((options.validate)("1,5-9,13"), None);
        assert_eq!((options.validate)("1, 2"), Some("Input text failed validation"));
        assert_eq!((options.validate)(""), None);
    }

    // ── HighlightCommand::run ───────────────────────────────────────────

    #[test]
    fn run_applies_dimmed_style_once() {
        let buf = doc(6);
        let mut prompt = ScriptedPrompt::new(&[Some("1,3-4")]);
        let mut rec = Recorder::default();

        let outcome = HighlightCommand::default()
            .run(&mut prompt, Some(&buf), &mut rec)
            .unwrap();

        assert_eq!(outcome, Outcome::Applied(Partition { kept: 3, dimmed: 3 }));
        assert_eq!(rec.calls.len(), 1);
        let (kind, style, ranges) = &rec.calls[0];
        assert_eq!(*kind, StyleKind::Dimmed);
        assert_eq!(*style, DecorationStyle::DIMMED);
        assert_eq!(ranges, &vec![DimRange::line(1), DimRange::line(4), DimRange::line(5)]);
    }

    #[test]
    fn run_reprompts_after_invalid_text() {
        let buf = doc(3);
        let mut prompt = ScriptedPrompt::new(&[Some("a"), Some("2")]);
        let mut rec = Recorder::default();

        let outcome = HighlightCommand::default()
            .run(&mut prompt, Some(&buf), &mut rec)
            .unwrap();

        assert_eq!(prompt.rejections, vec![VALIDATION_MESSAGE]);
        assert_eq!(outcome, Outcome::Applied(Partition { kept: 1, dimmed: 2 }));
    }

    #[test]
    fn cancel_touches_nothing() {
        let buf = doc(3);
        let mut prompt = ScriptedPrompt::new(&[None]);
        let mut rec = Recorder::default();

        let outcome = HighlightCommand::default()
            .run(&mut prompt, Some(&buf), &mut rec)
            .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn no_document_is_an_error_and_skips_prompt() {
        let mut prompt = ScriptedPrompt::new(&[Some("1")]);
        let mut rec = Recorder::default();

        let err = HighlightCommand::default()
            .run(&mut prompt, None, &mut rec)
            .unwrap_err();

        assert_eq!(err, CommandError::NoActiveDocument);
        assert_eq!(prompt.shown, 0);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn empty_spec_dims_every_line() {
        let buf = doc(4);
        let mut prompt = ScriptedPrompt::new(&[Some("")]);
        let mut set = DecorationSet::new();

        let outcome = HighlightCommand::default()
            .run(&mut prompt, Some(&buf), &mut set)
            .unwrap();

        assert_eq!(outcome, Outcome::Applied(Partition { kept: 0, dimmed: 4 }));
        assert!((0..4).all(|line| set.kind_at(line) == StyleKind::Dimmed));
    }

    #[test]
    fn rerun_replaces_previous_dimming() {
        let buf = doc(5);
        let mut set = DecorationSet::new();
        let cmd = HighlightCommand::default();

        cmd.run_with_input("1", &buf, &mut set).unwrap();
        assert_eq!(set.kind_at(4), StyleKind::Dimmed);

        cmd.run_with_input("5", &buf, &mut set).unwrap();
        assert_eq!(set.kind_at(4), StyleKind::Normal);
        assert_eq!(set.kind_at(0), StyleKind::Dimmed);
    }

    #[test]
    fn custom_styles_reach_the_host() {
        let buf = doc(2);
        let styles = Styles {
            dimmed: DecorationStyle::new(0.2).unwrap(),
            normal: DecorationStyle::NORMAL,
        };
        let mut rec = Recorder::default();

        HighlightCommand::new(styles)
            .run_with_input("1", &buf, &mut rec)
            .unwrap();

        assert_eq!(rec.calls[0].1, styles.dimmed);
    }

    // ── run_with_input ──────────────────────────────────────────────────

    #[test]
    fn run_with_input_rejects_invalid_text() {
        let buf = doc(3);
        let mut rec = Recorder::default();

        let err = HighlightCommand::default()
            .run_with_input("1;2", &buf, &mut rec)
            .unwrap_err();

        assert!(matches!(err, CommandError::Validation(_)));
        assert_eq!(err.to_string(), "Input text failed validation");
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn run_with_input_ignores_lines_past_the_end() {
        let buf = doc(3);
        let mut set = DecorationSet::new();

        let outcome = HighlightCommand::default()
            .run_with_input("2-1000000000", &buf, &mut set)
            .unwrap();

        assert_eq!(outcome, Outcome::Applied(Partition { kept: 2, dimmed: 1 }));
        assert_eq!(set.kind_at(0), StyleKind::Dimmed);
    }

    // ── ClearCommand ────────────────────────────────────────────────────

    #[test]
    fn clear_removes_dimming() {
        let buf = doc(3);
        let mut set = DecorationSet::new();
        HighlightCommand::default()
            .run_with_input("2", &buf, &mut set)
            .unwrap();
        assert!(!set.is_clear());

        assert_eq!(ClearCommand::default().run(&mut set), Outcome::Cleared);
        assert!(set.is_clear());
    }

    #[test]
    fn command_ids_are_distinct() {
        assert_eq!(COMMAND_IDS, [
            "line-highlighter.highlight-lines",
            "line-highlighter.clear-highlights"
        ]);
    }
}
