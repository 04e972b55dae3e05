//! Command line interface for `paper2note`.
//!
//! Renames an academic paper PDF after its metadata and writes a Markdown note next to it, or into
//! a folder of your choice.
//!
//! # Usage
//!
//! ```bash
//! # Rename to "2023_Example Paper.pdf" and write "2023_Example Paper.md" beside it
//! paper2note papers/2304.02532.pdf --pdf-rename-pattern "{year}_{title}"
//!
//! # Keep the PDF name, put the note into a vault with a custom template
//! paper2note paper.pdf --note-target-folder ~/vault/papers --note-template-path template.md
//!
//! # Show what is happening
//! paper2note -vv paper.pdf
//! ```
//!
//! Extractor settings are read from `$CONFIG_DIR/paper2note/config.toml` when that file exists.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Parser};
use console::style;
use paper2note::{
  config::ExtractorConfig,
  error::Result,
  files::{NoteWriteOutcome, RenameOutcome},
  note::{NoteOutcome, NoteRequest},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Rename an academic paper PDF and create a note from its metadata"
)]
pub struct Cli {
  /// The PDF file to process
  pdf: PathBuf,

  /// Pattern the PDF is renamed to, without extension, e.g. "{year}_{title}". Defaults to the
  /// current filename
  #[arg(long)]
  pdf_rename_pattern: Option<String>,

  /// Folder the note is written to. Defaults to the folder of the PDF
  #[arg(long)]
  note_target_folder: Option<PathBuf>,

  /// Template file the note is rendered from. Defaults to the bundled template
  #[arg(long)]
  note_template_path: Option<PathBuf>,

  /// Pattern the note file is named after, without extension. Defaults to the PDF rename pattern
  #[arg(long)]
  note_filename_pattern: Option<String>,

  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  verbose: u8,
}

impl Cli {
  /// Turns the arguments into a library request.
  fn into_request(self, extractor_config: ExtractorConfig) -> NoteRequest {
    NoteRequest {
      pdf: self.pdf,
      pdf_rename_pattern: self.pdf_rename_pattern,
      note_target_folder: self.note_target_folder,
      note_template_path: self.note_template_path,
      note_filename_pattern: self.note_filename_pattern,
      extractor_config,
    }
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: warn (default)
/// - 1: info
/// - 2: debug
/// - 3+: trace
///
/// `RUST_LOG` takes precedence when it is set.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Loads the configuration and runs the pipeline.
async fn run(cli: Cli) -> Result<NoteOutcome> {
  let config = ExtractorConfig::load_default()?;
  debug!(?config, "Using extractor configuration");
  paper2note::paper2note(cli.into_request(config)).await
}

/// Prints what happened to the PDF and the note.
fn report(outcome: &NoteOutcome) {
  match &outcome.pdf {
    RenameOutcome::Renamed(path) => println!(
      "{} Renamed PDF to {}",
      style(SUCCESS_PREFIX).green(),
      style(path.display()).cyan()
    ),
    RenameOutcome::Unchanged(path) =>
      println!("{} Kept PDF at {}", style(INFO_PREFIX).cyan(), style(path.display()).cyan()),
  }

  match &outcome.note {
    NoteWriteOutcome::Created(path) => println!(
      "{} Created note {}",
      style(SUCCESS_PREFIX).green(),
      style(path.display()).cyan()
    ),
    NoteWriteOutcome::AlreadyExists(path) => println!(
      "{} Note {} already exists, left it untouched",
      style(WARNING_PREFIX).yellow(),
      style(path.display()).yellow()
    ),
  }
}

/// Entry point for the paper2note CLI application
///
/// Exits with status 1 and a message on stderr when the run fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match run(cli).await {
    Ok(outcome) => {
      report(&outcome);
      ExitCode::SUCCESS
    },
    Err(e) => {
      eprintln!("{}{}", style(ERROR_PREFIX).red(), style(&e).red());
      ExitCode::FAILURE
    },
  }
}
