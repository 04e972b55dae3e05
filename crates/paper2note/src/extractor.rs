//! The metadata extraction seam.
//!
//! The pipeline in [`note`](crate::note) only needs "give me an [`Extraction`] for this PDF". The
//! [`Extractor`] trait is that boundary: [`BibExtractor`] is the real thing, tests and other
//! frontends can plug in their own.
//!
//! # Examples
//!
//! A fixed extractor, handy when the metadata is already known:
//!
//! ```
//! use std::path::Path;
//!
//! use async_trait::async_trait;
//! use paper2note::{
//!   config::ExtractorConfig, error::Result, extractor::Extractor, metadata::Extraction,
//! };
//!
//! struct Known(Extraction);
//!
//! #[async_trait]
//! impl Extractor for Known {
//!   async fn extract(&self, _pdf: &Path, _config: &ExtractorConfig) -> Result<Extraction> {
//!     Ok(self.0.clone())
//!   }
//! }
//! ```

use super::*;

/// Turns a PDF into raw bibliographic metadata.
#[async_trait]
pub trait Extractor: Send + Sync {
  /// Extracts metadata for `pdf` using `config` for this call only.
  ///
  /// Errors are passed through to the caller unchanged.
  async fn extract(&self, pdf: &Path, config: &ExtractorConfig) -> Result<Extraction>;
}

/// The default extractor: finds an identifier, looks it up online and renders BibTeX.
///
/// A PDF without a recognizable identifier yields an empty [`Extraction`], so the note is still
/// written with every field set to its sentinel.
#[derive(Debug, Clone, Default)]
pub struct BibExtractor;

impl BibExtractor {
  /// Creates the extractor.
  pub fn new() -> Self { Self }
}

/// Finds the identifier of `pdf` and, when configured, stores it in the PDF's document info.
///
/// The stored identifier is what lets a later run recognize a PDF that has since been renamed. A
/// failed write is logged and the identifier is still returned.
pub fn identify(pdf: &Path, config: &DoiConfig) -> Result<Option<Identifier>> {
  let Some(identifier) = find_identifier(pdf, config)? else {
    warn!("No DOI or arXiv identifier found in {}.", pdf.display());
    return Ok(None);
  };
  info!("Found identifier {} for {}.", identifier, pdf.display());

  if config.save_identifier_metadata {
    if let Err(e) = write_identifier(pdf, &identifier) {
      warn!("Could not save {} to the metadata of {}: {}", identifier, pdf.display(), e);
    }
  }
  Ok(Some(identifier))
}

#[async_trait]
impl Extractor for BibExtractor {
  #[instrument(skip(self, config), level = "debug")]
  async fn extract(&self, pdf: &Path, config: &ExtractorConfig) -> Result<Extraction> {
    let Some(identifier) = identify(pdf, &config.doi)? else {
      return Ok(Extraction::default());
    };

    let retriever = Retriever::new(&config.bib)?;
    let mut extraction = retriever.retrieve(&identifier, &config.doi).await?;
    extraction.bibtex = Some(bibtex::to_bibtex(&extraction.metadata));
    debug!(title = ?extraction.metadata.title, "Retrieved metadata");
    Ok(extraction)
  }
}
