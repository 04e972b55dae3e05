//! Finding the DOI or arXiv identifier of a paper.
//!
//! Three places are searched, in order, each switchable through [`DoiConfig`]:
//!
//! 1. The PDF document-info dictionary (`doi`/`DOI` and `arxiv_id` keys, then any value)
//! 2. The filename, e.g. `2304.02532.pdf`
//! 3. The text of the first pages, up to [`DoiConfig::n_characters_in_pdf`] characters
//!
//! The first hit wins.

use super::*;

lazy_static! {
  /// A DOI anywhere in a string. Digits are ASCII only.
  static ref DOI: Regex = Regex::new(r"(?i)\b10\.[0-9]{4,9}/[-._;()/:A-Z0-9]+").unwrap();
  /// `arXiv:` followed by a new or old style identifier
  static ref ARXIV_PREFIXED: Regex = Regex::new(
    r"(?i)\barxiv:\s*([0-9]{4}\.[0-9]{4,5}(?:v[0-9]+)?|[a-z-]+(?:\.[a-z]{2})?/[0-9]{7}(?:v[0-9]+)?)"
  )
  .unwrap();
  /// A string that is nothing but a new style arXiv identifier
  static ref ARXIV_BARE: Regex = Regex::new(r"^([0-9]{4}\.[0-9]{4,5}(?:v[0-9]+)?)$").unwrap();
}

/// An identifier a paper can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
  /// A Digital Object Identifier such as `10.1145/1327452.1327492`
  Doi(String),
  /// An arXiv identifier such as `2304.02532` or `hep-th/9901001`
  Arxiv(String),
}

/// The kind of an [`Identifier`], as recorded in an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
  /// See [`Identifier::Doi`]
  Doi,
  /// See [`Identifier::Arxiv`]
  Arxiv,
}

impl Identifier {
  /// Which kind of identifier this is.
  pub fn kind(&self) -> IdentifierKind {
    match self {
      Self::Doi(_) => IdentifierKind::Doi,
      Self::Arxiv(_) => IdentifierKind::Arxiv,
    }
  }

  /// The bare identifier string.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Doi(id) | Self::Arxiv(id) => id,
    }
  }
}

impl Display for Identifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Doi(doi) => write!(f, "doi:{doi}"),
      Self::Arxiv(id) => write!(f, "arXiv:{id}"),
    }
  }
}

/// Cuts punctuation that the DOI pattern swallows at the end of a sentence.
fn clean_doi(doi: &str) -> String {
  let mut doi = doi.trim_end_matches(['.', ',', ';', ':']);
  if doi.ends_with(')') && doi.matches('(').count() < doi.matches(')').count() {
    doi = &doi[..doi.len() - 1];
  }
  doi.to_string()
}

/// Finds the first DOI, or failing that the first `arXiv:`-prefixed identifier, in free text.
pub fn find_in_text(text: &str) -> Option<Identifier> {
  if let Some(doi) = DOI.find(text) {
    return Some(Identifier::Doi(clean_doi(doi.as_str())));
  }
  ARXIV_PREFIXED.captures(text).map(|captures| Identifier::Arxiv(captures[1].to_string()))
}

/// Looks for an identifier in a file stem such as `2304.02532v2` or `arXiv:2304.02532`.
pub fn find_in_filename(pdf: &Path) -> Option<Identifier> {
  let stem = pdf.file_stem()?.to_string_lossy();
  if let Some(doi) = DOI.find(&stem) {
    return Some(Identifier::Doi(clean_doi(doi.as_str())));
  }
  if let Some(captures) = ARXIV_BARE.captures(&stem) {
    return Some(Identifier::Arxiv(captures[1].to_string()));
  }
  ARXIV_PREFIXED.captures(&stem).map(|captures| Identifier::Arxiv(captures[1].to_string()))
}

/// Looks for an identifier in a decoded document-info dictionary.
///
/// Dedicated keys are trusted first; every other value is then scanned like free text.
pub fn find_in_info(info: &BTreeMap<String, String>) -> Option<Identifier> {
  for key in ["doi", "DOI"] {
    if let Some(doi) = info.get(key).and_then(|value| DOI.find(value)) {
      return Some(Identifier::Doi(clean_doi(doi.as_str())));
    }
  }
  if let Some(id) = info.get("arxiv_id").map(|id| id.trim()).filter(|id| !id.is_empty()) {
    return Some(Identifier::Arxiv(id.to_string()));
  }
  info.values().find_map(|value| find_in_text(value))
}

/// Runs the configured search steps against `pdf` and returns the first identifier found.
///
/// The PDF is only parsed when the document-info or text step is enabled. A PDF that cannot be
/// parsed skips both of those steps, and the filename is still searched.
#[instrument(skip(config), level = "debug")]
pub fn find_identifier(pdf: &Path, config: &DoiConfig) -> Result<Option<Identifier>> {
  let content = if config.check_document_info || config.check_text {
    let max_characters = if config.check_text { config.n_characters_in_pdf } else { 0 };
    PdfAnalyzer::new()
      .with_max_characters(max_characters)
      .analyze(pdf)
      .inspect_err(|e| warn!("Could not read {}: {}", pdf.display(), e))
      .ok()
  } else {
    None
  };

  if config.check_document_info {
    if let Some(identifier) = content.as_ref().and_then(|content| find_in_info(&content.info)) {
      debug!(%identifier, "Found identifier in document info");
      return Ok(Some(identifier));
    }
  }

  if config.check_filename {
    if let Some(identifier) = find_in_filename(pdf) {
      debug!(%identifier, "Found identifier in filename");
      return Ok(Some(identifier));
    }
  }

  if config.check_text {
    if let Some(identifier) = content.as_ref().and_then(|content| find_in_text(&content.text)) {
      debug!(%identifier, "Found identifier in page text");
      return Ok(Some(identifier));
    }
  }

  Ok(None)
}
