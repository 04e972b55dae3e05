//! Turn an academic paper PDF into a renamed file and a companion note.
//!
//! `paper2note` reads a PDF, finds its DOI or arXiv identifier, looks the paper up, and then:
//!
//! - Renames the PDF according to a pattern such as `"{year}_{title}"`
//! - Writes a Markdown note rendered from a template filled with the paper's metadata
//!
//! # Getting Started
//!
//! ```no_run
//! use paper2note::{note::NoteRequest, prelude::*};
//!
//! # async fn example() -> Result<(), Paper2NoteError> {
//! let request = NoteRequest::new("papers/2304.02532.pdf")
//!   .with_pdf_rename_pattern("{year}_{author_1}_{title}")
//!   .with_note_target_folder("notes/");
//!
//! let outcome = paper2note::paper2note(request).await?;
//! println!("Note written to {}", outcome.note.path().display());
//! # Ok(())
//! # }
//! ```
//!
//! # Placeholders
//!
//! Patterns and note templates use `{field}` placeholders. The available fields are `title`,
//! `authors`, `author_1` .. `author_N`, `author_last`, `year`, `month`, `day`, `journal`, `doi`,
//! `url`, `volume`, `page`, `type`, `abstract` and `bibtex`. Missing values are replaced by
//! visible sentinels such as `<no doi found>` so an incomplete note is easy to spot.
//!
//! # Module Organization
//!
//! - [`note`]: The pipeline entry point and its request type
//! - [`metadata`]: Raw extraction types and their normalization into template fields
//! - [`template`]: Placeholder substitution for patterns and note templates
//! - [`files`]: Renaming the PDF and writing the note
//! - [`extractor`]: The [`Extractor`](extractor::Extractor) seam and its default implementation
//! - [`identifier`], [`pdf`], [`retriever`], [`bibtex`]: The pieces the default extractor is built
//!   from
//! - [`config`]: Extractor configuration and its TOML file

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeMap,
  fmt::Display,
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod bibtex;
pub mod config;
pub mod error;
pub mod extractor;
pub mod files;
pub mod identifier;
pub mod metadata;
pub mod note;
pub mod path;
pub mod pdf;
pub mod retriever;
pub mod template;

use crate::{
  config::*, error::*, extractor::*, files::*, identifier::*, metadata::*, path::*, pdf::*,
  retriever::*, template::*,
};
pub use crate::note::{paper2note, paper2note_with};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use paper2note::prelude::*;
///
/// fn handle(result: Result<(), Paper2NoteError>) {
///   if let Err(Paper2NoteError::MissingField(field)) = result {
///     eprintln!("template uses unknown field {field}");
///   }
/// }
/// ```
pub mod prelude {
  pub use crate::{
    config::ExtractorConfig, error::Paper2NoteError, extractor::Extractor,
    metadata::NormalizedMetadata,
  };
}
