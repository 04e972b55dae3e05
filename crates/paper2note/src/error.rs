//! Error types for the paper2note library.
//!
//! Every failure in the pipeline is fatal to the current invocation and surfaces as a
//! [`Paper2NoteError`]. Skipped renames and skipped notes are not errors; they are reported through
//! [`RenameOutcome`](crate::files::RenameOutcome) and
//! [`NoteWriteOutcome`](crate::files::NoteWriteOutcome) instead.
//!
//! # Examples
//!
//! ```no_run
//! use paper2note::{error::Paper2NoteError, note::NoteRequest};
//!
//! # async fn example() {
//! match paper2note::paper2note(NoteRequest::new("paper.PDF")).await {
//!   Err(Paper2NoteError::NotFound(path)) => println!("{} is missing", path.display()),
//!   Err(Paper2NoteError::InvalidInput(msg)) => println!("{msg}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(_) => println!("Done!"),
//! }
//! # }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Error type alias used for the [`paper2note`](crate) crate.
pub type Result<T> = core::result::Result<T, Paper2NoteError>;

/// Errors that can occur while turning a paper into a note.
#[derive(Error, Debug)]
pub enum Paper2NoteError {
  /// A path that is required to exist does not.
  ///
  /// Raised for the input PDF and for a user supplied note template. The resolved absolute path
  /// is carried along so the message points at exactly what was looked up.
  #[error("{} does not exist.", .0.display())]
  NotFound(PathBuf),

  /// The input was understood but is not acceptable.
  ///
  /// The main case is an input file whose extension is not exactly `.pdf`.
  #[error("{0}")]
  InvalidInput(String),

  /// A pattern or template references a field that the normalized metadata does not have.
  ///
  /// The string is the unresolved placeholder name, e.g. `nonexistent_field` for a template
  /// containing `{nonexistent_field}`.
  #[error("No metadata field named \"{0}\" is available for substitution")]
  MissingField(String),

  /// A pattern or template has unbalanced braces or an empty placeholder.
  #[error("Malformed pattern: {0}")]
  PatternSyntax(String),

  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS/SSL errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A lookup service answered, but not with something usable.
  ///
  /// Covers non-success HTTP statuses from the DOI resolver and empty or malformed arXiv feeds.
  #[error("API error: {0}")]
  ApiError(String),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// PDF parsing and processing errors from the lopdf library.
  ///
  /// Common error cases include:
  /// - Malformed or corrupted PDF files
  /// - Missing required PDF objects or references
  /// - Encrypted PDF files that require passwords
  #[error(transparent)]
  Lopdf(#[from] lopdf::Error),

  /// A JSON payload from a lookup service could not be decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// An XML payload from a lookup service could not be read.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// The configuration file is not valid TOML for
  /// [`ExtractorConfig`](crate::config::ExtractorConfig).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration location could not be determined or its contents are unusable.
  #[error("{0}")]
  Config(String),
}
