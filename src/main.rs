// SPDX-License-Identifier: MIT
//
// line-highlighter — dim every line of a file except the ones you name.
//
// The binary is a terminal host for the lh-editor commands:
//
//   lh-editor → line spec parsing, partitioning, decorations, config
//   lh-term   → opacity resolution and ANSI rendering
//
// One run is one command invocation:
//
//   args → config → Buffer::from_file
//        → HighlightCommand (prompt on stdin, or --lines) | ClearCommand
//        → Renderer → stdout
//
// Diagnostics go to stderr through `tracing`, filtered by RUST_LOG, so the
// rendered document on stdout stays clean.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum, ValueHint};
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use lh_editor::buffer::{Buffer, BufferError, Document};
use lh_editor::command::{
    ClearCommand, CommandError, HighlightCommand, InputOptions, Outcome, Prompt,
};
use lh_editor::decoration::DecorationSet;
use lh_editor::options::{Config, ConfigError};
use lh_term::render::{Palette, Renderer};
use lh_term::terminal::ColorChoice;

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "line-highlighter", version)]
#[command(about = "Dim every line of a file except the ones you name", long_about = None)]
struct Cli {
    /// Lines to keep, e.g. `1,5-9,13` (1-indexed). Prompts on stdin if omitted
    #[arg(short, long, value_name = "SPEC", conflicts_with = "clear")]
    lines: Option<String>,

    /// Opacity of dimmed lines, 0.0 to 1.0
    #[arg(long, value_name = "OPACITY")]
    opacity: Option<f32>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// When to emit color escape sequences
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    color: ColorArg,

    /// Show line numbers
    #[arg(short = 'n', long = "number")]
    number: bool,

    /// Print the file with no lines dimmed
    #[arg(long)]
    clear: bool,

    /// File to display
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

// ─── Terminal prompt ────────────────────────────────────────────────────────

/// A line-oriented input box: shows the prompt on `output`, reads answers
/// from `input` until one passes validation. End of input cancels.
///
/// Input does not depend on output. If `output` fails, the prompt keeps
/// reading and stops writing.
struct LinePrompt<R, W> {
    input: R,
    output: W,
    output_closed: bool,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            output_closed: false,
        }
    }

    fn write_prompt(&mut self, text: fmt::Arguments<'_>) -> io::Result<()> {
        self.output.write_fmt(text)?;
        self.output.flush()
    }

    fn show(&mut self, text: fmt::Arguments<'_>) {
        if self.output_closed {
            return;
        }
        if let Err(e) = self.write_prompt(text) {
            debug!(error = %e, "prompt output failed, continuing without it");
            self.output_closed = true;
        }
    }

    /// Read one line without its terminator. `None` on EOF or a read error.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            }
            Err(e) => {
                warn!(error = %e, "failed to read prompt input");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn input(&mut self, options: &InputOptions) -> Option<String> {
        self.show(format_args!("{}\n", options.prompt));
        loop {
            self.show(format_args!("lines [{}]: ", options.placeholder));
            let text = self.read_line()?;
            match (options.validate)(&text) {
                None => return Some(text),
                Some(message) => self.show(format_args!("{message}\n")),
            }
        }
    }
}

// ─── Run ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Config::load();
    };
    // An explicitly named file has to exist.
    Config::load_from_path(path)?.ok_or_else(|| ConfigError::Read {
        path: path.to_path_buf(),
        source: io::ErrorKind::NotFound.into(),
    })
}

fn run(cli: &Cli) -> Result<Outcome, AppError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(opacity) = cli.opacity {
        config = config.with_dimmed_opacity(opacity)?;
    }
    let styles = config.styles()?;

    let buffer = Buffer::from_file(&cli.file)?;
    debug!(?buffer, "loaded document");

    let mut decorations = DecorationSet::with_styles(styles);
    let outcome = if cli.clear {
        ClearCommand::new(styles).run(&mut decorations)
    } else if let Some(spec) = &cli.lines {
        HighlightCommand::new(styles).run_with_input(spec, &buffer, &mut decorations)?
    } else {
        let stdin = io::stdin();
        let mut prompt = LinePrompt::new(stdin.lock(), io::stderr());
        let document: &dyn Document = &buffer;
        HighlightCommand::new(styles).run(&mut prompt, Some(document), &mut decorations)?
    };

    if outcome == Outcome::Cancelled {
        return Ok(outcome);
    }

    let renderer = Renderer::new(
        Palette::from_config(&config.style),
        ColorChoice::from(cli.color).enabled(),
    )
    .with_line_numbers(cli.number);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    renderer.render(&mut out, &buffer, &decorations)?;
    Ok(outcome)
}

/// The log filter when `RUST_LOG` is unset.
fn default_filter() -> EnvFilter {
    EnvFilter::new("warn")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(outcome) => debug!(?outcome, "done"),
        Err(AppError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("line-highlighter: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use lh_editor::line_spec::{PLACEHOLDER, VALIDATION_MESSAGE};
    use std::sync::{Arc, Mutex};

    /// A log sink the tests can read back.
    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Output that is always closed.
    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    /// Run the prompt over scripted stdin; return the answer and what was
    /// shown on stderr.
    fn prompt_with(stdin: &str) -> (Option<String>, String) {
        let mut shown = Vec::new();
        let answer = {
            let mut prompt = LinePrompt::new(stdin.as_bytes(), &mut shown);
            prompt.input(&InputOptions::HIGHLIGHT)
        };
        (answer, String::from_utf8(shown).unwrap())
    }

    // ── Arguments ───────────────────────────────────────────────────────

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "line-highlighter",
            "-l",
            "1,5-9",
            "--opacity",
            "0.3",
            "--color",
            "never",
            "-n",
            "notes.txt",
        ])
        .unwrap();
        assert_eq!(cli.lines.as_deref(), Some("1,5-9"));
        assert_eq!(cli.opacity, Some(0.3));
        assert!(cli.color == ColorArg::Never);
        assert!(cli.number);
        assert!(!cli.clear);
        assert_eq!(cli.file, PathBuf::from("notes.txt"));
    }

    #[test]
    fn cli_rejects_lines_with_clear() {
        assert!(Cli::try_parse_from(["line-highlighter", "-l", "1", "--clear", "f"]).is_err());
    }

    #[test]
    fn cli_requires_file() {
        assert!(Cli::try_parse_from(["line-highlighter"]).is_err());
    }

    #[test]
    fn color_arg_maps_to_choice() {
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
    }

    // ── Prompt ──────────────────────────────────────────────────────────

    #[test]
    fn prompt_accepts_valid_line() {
        let (answer, shown) = prompt_with("1,5-9\n");
        assert_eq!(answer.as_deref(), Some("1,5-9"));
        assert!(shown.contains(InputOptions::HIGHLIGHT.prompt));
        assert!(shown.contains("1,5-9,13"));
        assert!(!shown.contains(VALIDATION_MESSAGE));
    }

    #[test]
    fn prompt_strips_crlf() {
        let (answer, _) = prompt_with("3\r\n");
        assert_eq!(answer.as_deref(), Some("3"));
    }

    #[test]
    fn prompt_reprompts_until_valid() {
        let (answer, shown) = prompt_with("1, 2\nabc\n2-4\n");
        assert_eq!(answer.as_deref(), Some("2-4"));
        assert_eq!(shown.matches(VALIDATION_MESSAGE).count(), 2);
    }

    #[test]
    fn prompt_accepts_empty_line() {
        let (answer, _) = prompt_with("\n");
        assert_eq!(answer.as_deref(), Some(""));
    }

    #[test]
    fn rejection_shows_only_prompt_and_message() {
        let sink = LogSink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(default_filter())
            .with_writer(move || writer.clone())
            .finish();

        let (answer, shown) =
            tracing::subscriber::with_default(subscriber, || prompt_with("x y\n2-3\n"));

        assert_eq!(answer.as_deref(), Some("2-3"));
        let ask = format!("lines [{PLACEHOLDER}]: ");
        assert_eq!(
            shown,
            format!(
                "{}\n{ask}{VALIDATION_MESSAGE}\n{ask}",
                InputOptions::HIGHLIGHT.prompt
            )
        );
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[test]
    fn prompt_reads_input_when_output_fails() {
        let mut prompt = LinePrompt::new("zz\n4\n".as_bytes(), ClosedOutput);
        assert_eq!(prompt.input(&InputOptions::HIGHLIGHT).as_deref(), Some("4"));
        assert!(prompt.output_closed);
    }

    #[test]
    fn prompt_eof_cancels() {
        assert_eq!(prompt_with("").0, None);
        assert_eq!(prompt_with("x\n").0, None);
    }

    // ── Config ──────────────────────────────────────────────────────────

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/line-highlighter.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
