//! Raw extraction results and their normalization into template fields.
//!
//! An [`Extractor`](crate::extractor::Extractor) yields an [`Extraction`]: nested, partially
//! filled bibliographic data. [`normalize`] flattens it into [`NormalizedMetadata`], a plain
//! `field -> string` mapping that patterns and note templates are rendered against.
//!
//! Missing values never become empty strings. Each field falls back to a visible sentinel such as
//! `<no doi found>` so that a note rendered from incomplete metadata is obviously incomplete.
//!
//! Fallbacks treat "falsy" values as missing: an empty string, a zero and an empty author list
//! all count as absent. The one exception is `title`, which only falls back when it is absent.
//!
//! # Examples
//!
//! ```
//! use paper2note::metadata::{normalize, Author, BibMetadata, Extraction};
//!
//! let extraction = Extraction {
//!   metadata: BibMetadata {
//!     title: Some("Example Paper".into()),
//!     author: Some(vec![Author::new("Jane", "Doe")]),
//!     year: Some(2023),
//!     ..Default::default()
//!   },
//!   ..Default::default()
//! };
//!
//! let fields = normalize(&extraction);
//! assert_eq!(fields.get("authors"), Some("Jane Doe"));
//! assert_eq!(fields.get("author_last"), Some("Jane Doe"));
//! assert_eq!(fields.get("month"), Some("??"));
//! ```

use super::*;

/// Sentinel for a missing title.
pub const NO_TITLE: &str = "<no title found>";
/// Sentinel for a missing or empty author list.
pub const NO_AUTHORS: &str = "<no authors found>";
/// Sentinel for a missing year.
pub const NO_YEAR: &str = "????";
/// Sentinel for a missing month.
pub const NO_MONTH: &str = "??";
/// Sentinel for a missing day.
pub const NO_DAY: &str = "??";
/// Sentinel for a missing journal and e-journal.
pub const NO_JOURNAL: &str = "<no journal found>";
/// Sentinel for a missing DOI.
pub const NO_DOI: &str = "<no doi found>";
/// Sentinel for a missing URL.
pub const NO_URL: &str = "<no url found>";
/// Sentinel for a missing volume.
pub const NO_VOLUME: &str = "<no volume found>";
/// Sentinel for a missing page range.
pub const NO_PAGE: &str = "<no page found>";
/// Sentinel for a missing abstract.
pub const NO_ABSTRACT: &str = "<no abstract found>";
/// Sentinel for a missing BibTeX entry.
pub const NO_BIBTEX: &str = "<no bibtex found>";
/// Entry type used when the extraction does not name one.
pub const DEFAULT_ENTRY_TYPE: &str = "article";

/// Everything an extractor found out about one PDF.
///
/// This is a transient value: produced once per run, normalized, then dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
  /// The identifier the paper was looked up by, if one was found
  #[serde(default)]
  pub identifier:      Option<String>,
  /// Which kind of identifier `identifier` is
  #[serde(default)]
  pub identifier_type: Option<IdentifierKind>,
  /// Bibliographic metadata of the paper
  #[serde(default)]
  pub metadata:        BibMetadata,
  /// The raw record the lookup service returned; arXiv records carry the abstract as `summary`
  #[serde(default)]
  pub validation_data: Map<String, Value>,
  /// A pre-rendered BibTeX entry
  #[serde(default)]
  pub bibtex:          Option<String>,
}

/// Bibliographic metadata as delivered by a lookup. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BibMetadata {
  /// Title of the paper
  #[serde(default)]
  pub title:      Option<String>,
  /// Authors in publication order
  #[serde(default)]
  pub author:     Option<Vec<Author>>,
  /// Publication year
  #[serde(default)]
  pub year:       Option<u32>,
  /// Publication month, 1-based
  #[serde(default)]
  pub month:      Option<u32>,
  /// Publication day of month
  #[serde(default)]
  pub day:        Option<u32>,
  /// Journal or proceedings the paper appeared in
  #[serde(default)]
  pub journal:    Option<String>,
  /// Electronic venue, e.g. `arXiv`, used when there is no journal
  #[serde(default)]
  pub ejournal:   Option<String>,
  /// Digital Object Identifier
  #[serde(default)]
  pub doi:        Option<String>,
  /// Landing page of the paper
  #[serde(default)]
  pub url:        Option<String>,
  /// Journal volume
  #[serde(default)]
  pub volume:     Option<String>,
  /// Page range
  #[serde(default)]
  pub page:       Option<String>,
  /// BibTeX entry type such as `article` or `inproceedings`
  #[serde(default, rename = "ENTRYTYPE")]
  pub entry_type: Option<String>,
}

/// A single author of a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// Given name(s)
  #[serde(default)]
  pub given:  String,
  /// Family name
  #[serde(default)]
  pub family: String,
}

impl Author {
  /// Creates an author from given and family name.
  pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
    Self { given: given.into(), family: family.into() }
  }

  /// The display name, `"{given} {family}"`.
  pub fn full_name(&self) -> String { format!("{} {}", self.given, self.family) }
}

/// Flat `field -> value` mapping that patterns and templates are rendered against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMetadata(BTreeMap<String, String>);

impl NormalizedMetadata {
  /// Looks up a field.
  pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

  /// Whether `field` can be used as a placeholder.
  pub fn contains_key(&self, field: &str) -> bool { self.0.contains_key(field) }

  /// Adds or replaces a field.
  pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
    self.0.insert(field.into(), value.into());
  }

  /// Number of fields.
  pub fn len(&self) -> usize { self.0.len() }

  /// Whether there are no fields at all.
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Iterates over fields in name order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl From<BTreeMap<String, String>> for NormalizedMetadata {
  fn from(fields: BTreeMap<String, String>) -> Self { Self(fields) }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NormalizedMetadata {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

/// Flattens an [`Extraction`] into template fields, filling gaps with sentinels.
///
/// Produces `title`, `authors`, `year`, `month`, `day`, `journal`, `doi`, `url`, `volume`,
/// `page`, `type`, `abstract`, `bibtex`, plus `author_1..author_N` and `author_last` when there is
/// at least one author.
#[instrument(skip(extraction), fields(identifier = ?extraction.identifier), level = "debug")]
pub fn normalize(extraction: &Extraction) -> NormalizedMetadata {
  let metadata = &extraction.metadata;
  let authors: Vec<String> =
    metadata.author.iter().flatten().map(Author::full_name).collect::<Vec<_>>();

  let mut fields = NormalizedMetadata::default();
  fields.insert("title", metadata.title.as_deref().unwrap_or(NO_TITLE));
  fields.insert(
    "authors",
    if authors.is_empty() { NO_AUTHORS.to_string() } else { authors.join(", ") },
  );
  fields.insert("year", number_or(metadata.year, NO_YEAR));
  fields.insert("month", number_or(metadata.month, NO_MONTH));
  fields.insert("day", number_or(metadata.day, NO_DAY));
  fields.insert(
    "journal",
    present(&metadata.journal).or_else(|| present(&metadata.ejournal)).unwrap_or(NO_JOURNAL),
  );
  fields.insert("doi", present(&metadata.doi).unwrap_or(NO_DOI));
  fields.insert("url", present(&metadata.url).unwrap_or(NO_URL));
  fields.insert("volume", present(&metadata.volume).unwrap_or(NO_VOLUME));
  fields.insert("page", present(&metadata.page).unwrap_or(NO_PAGE));
  fields.insert("type", present(&metadata.entry_type).unwrap_or(DEFAULT_ENTRY_TYPE));
  fields.insert(
    "abstract",
    extraction
      .validation_data
      .get("summary")
      .and_then(Value::as_str)
      .filter(|summary| !summary.is_empty())
      .unwrap_or(NO_ABSTRACT),
  );
  fields.insert("bibtex", present(&extraction.bibtex).unwrap_or(NO_BIBTEX));

  for (index, author) in authors.iter().enumerate() {
    fields.insert(format!("author_{}", index + 1), author.as_str());
  }
  if let Some(last) = authors.last() {
    fields.insert("author_last", last.as_str());
  }

  debug!(field_count = fields.len(), author_count = authors.len(), "Normalized metadata");
  fields
}

/// A string value that is set and non-empty.
fn present(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|value| !value.is_empty())
}

/// A number rendered as text, or `fallback` when it is absent or zero.
fn number_or(value: Option<u32>, fallback: &str) -> String {
  value.filter(|value| *value != 0).map_or_else(|| fallback.to_string(), |value| value.to_string())
}
