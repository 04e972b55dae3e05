//! The end-to-end pipeline: extract, normalize, rename, write the note.
//!
//! ```no_run
//! use paper2note::note::NoteRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome = paper2note::paper2note(
//!   NoteRequest::new("downloads/2304.02532.pdf")
//!     .with_pdf_rename_pattern("{year}_{title}")
//!     .with_note_target_folder("vault/papers"),
//! )
//! .await?;
//!
//! if outcome.pdf.is_renamed() {
//!   println!("PDF is now {}", outcome.pdf.path().display());
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// What to do for a single PDF.
///
/// Optional settings that are unset, or set to an empty string, fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRequest {
  /// The PDF to process
  pub pdf:                   PathBuf,
  /// New PDF name without extension; defaults to the current filename stem
  pub pdf_rename_pattern:    Option<String>,
  /// Folder the note is written to; defaults to the PDF's folder
  pub note_target_folder:    Option<PathBuf>,
  /// Template file for the note body; defaults to the bundled template
  pub note_template_path:    Option<PathBuf>,
  /// Note name without extension; defaults to the rename pattern
  pub note_filename_pattern: Option<String>,
  /// Settings handed to the extractor for this request
  pub extractor_config:      ExtractorConfig,
}

impl NoteRequest {
  /// A request for `pdf` with every option at its default.
  pub fn new(pdf: impl Into<PathBuf>) -> Self { Self { pdf: pdf.into(), ..Default::default() } }

  /// Sets the pattern the PDF is renamed to.
  pub fn with_pdf_rename_pattern(mut self, pattern: impl Into<String>) -> Self {
    self.pdf_rename_pattern = Some(pattern.into());
    self
  }

  /// Sets the folder the note is written to.
  pub fn with_note_target_folder(mut self, folder: impl Into<PathBuf>) -> Self {
    self.note_target_folder = Some(folder.into());
    self
  }

  /// Sets the template file the note is rendered from.
  pub fn with_note_template_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.note_template_path = Some(path.into());
    self
  }

  /// Sets the pattern the note file is named after.
  pub fn with_note_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
    self.note_filename_pattern = Some(pattern.into());
    self
  }

  /// Sets the extractor configuration.
  pub fn with_extractor_config(mut self, config: ExtractorConfig) -> Self {
    self.extractor_config = config;
    self
  }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteOutcome {
  /// The fields the PDF name, note name and note body were rendered from
  pub metadata: NormalizedMetadata,
  /// The rename step
  pub pdf:      RenameOutcome,
  /// The note step
  pub note:     NoteWriteOutcome,
}

/// Runs the pipeline with the default [`BibExtractor`].
pub async fn paper2note(request: NoteRequest) -> Result<NoteOutcome> {
  paper2note_with(&BibExtractor::new(), request).await
}

/// Runs the pipeline with `extractor`.
///
/// Input validation happens before the extractor is called. Once extraction succeeded the PDF is
/// renamed first and the note written second; a failing note step leaves the rename in place.
///
/// # Errors
///
/// - [`Paper2NoteError::NotFound`] for a missing PDF or template file
/// - [`Paper2NoteError::InvalidInput`] if the file extension is not exactly `pdf`
/// - [`Paper2NoteError::MissingField`] if a pattern or the template names an unknown field
/// - Any error of the extractor
#[instrument(skip(extractor, request), fields(pdf = %request.pdf.display()))]
pub async fn paper2note_with<E: Extractor + ?Sized>(
  extractor: &E,
  request: NoteRequest,
) -> Result<NoteOutcome> {
  let pdf = resolve_path(&request.pdf, true)?;
  if pdf.extension().and_then(|ext| ext.to_str()) != Some("pdf") {
    return Err(Paper2NoteError::InvalidInput("The provided file is not a pdf file.".into()));
  }

  let rename_pattern = match non_empty(request.pdf_rename_pattern) {
    Some(pattern) => Pattern::new(pattern),
    None => Pattern::new(
      pdf
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace('{', "{{").replace('}', "}}"))
        .unwrap_or_default(),
    ),
  };

  let note_folder = match non_empty_path(request.note_target_folder) {
    Some(folder) => resolve_path(folder, false)?,
    None => pdf.parent().map(Path::to_path_buf).unwrap_or_default(),
  };

  let template_source = match non_empty_path(request.note_template_path) {
    Some(path) => TemplateSource::File(resolve_path(path, true)?),
    None => TemplateSource::Bundled,
  };

  let note_pattern = non_empty(request.note_filename_pattern)
    .map(Pattern::new)
    .unwrap_or_else(|| rename_pattern.clone());

  info!("Extracting metadata from {}.", pdf.display());
  let extraction = extractor.extract(&pdf, &request.extractor_config).await?;
  let metadata = normalize(&extraction);

  let pdf_outcome = rename_pdf(&pdf, &rename_pattern, &metadata)?;

  let template = NoteTemplate::load(&template_source)?;
  let note_outcome = write_note(&note_folder, &note_pattern, &template, &metadata)?;

  Ok(NoteOutcome { metadata, pdf: pdf_outcome, note: note_outcome })
}

/// Treats an empty string like an unset option.
fn non_empty(value: Option<String>) -> Option<String> { value.filter(|value| !value.is_empty()) }

/// Treats an empty path like an unset option.
fn non_empty_path(path: Option<PathBuf>) -> Option<PathBuf> {
  path.filter(|path| !path.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_request_builders() {
    let request = NoteRequest::new("paper.pdf")
      .with_pdf_rename_pattern("{year}")
      .with_note_target_folder("notes")
      .with_note_template_path("template.md")
      .with_note_filename_pattern("{title}");

    assert_eq!(request.pdf, PathBuf::from("paper.pdf"));
    assert_eq!(request.pdf_rename_pattern.as_deref(), Some("{year}"));
    assert_eq!(request.note_target_folder, Some(PathBuf::from("notes")));
    assert_eq!(request.note_template_path, Some(PathBuf::from("template.md")));
    assert_eq!(request.note_filename_pattern.as_deref(), Some("{title}"));
    assert_eq!(request.extractor_config, ExtractorConfig::default());
  }

  #[test]
  fn test_non_empty() {
    assert_eq!(non_empty(Some(String::new())), None);
    assert_eq!(non_empty(Some("x".into())), Some("x".into()));
    assert_eq!(non_empty(None), None);
  }
}
