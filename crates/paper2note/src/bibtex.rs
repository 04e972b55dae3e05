//! Rendering [`BibMetadata`] as a BibTeX entry.
//!
//! ```
//! use paper2note::{
//!   bibtex::to_bibtex,
//!   metadata::{Author, BibMetadata},
//! };
//!
//! let metadata = BibMetadata {
//!   title: Some("Attention Is All You Need".into()),
//!   author: Some(vec![Author::new("Ashish", "Vaswani")]),
//!   year: Some(2017),
//!   ..Default::default()
//! };
//! assert!(to_bibtex(&metadata).starts_with("@article{vaswani2017attention,"));
//! ```

use super::*;

/// Formats `metadata` as a BibTeX entry without a trailing newline.
///
/// Fields are written in a fixed order (title, author, journal, volume, pages, year, month, doi,
/// url) and only when they have a value.
pub fn to_bibtex(metadata: &BibMetadata) -> String {
  let entry_type =
    metadata.entry_type.as_deref().filter(|t| !t.is_empty()).unwrap_or(DEFAULT_ENTRY_TYPE);
  let mut bib = format!("@{}{{{},\n", entry_type, cite_key(metadata));

  let authors = metadata
    .author
    .iter()
    .flatten()
    .map(|author| {
      if author.given.is_empty() {
        author.family.clone()
      } else {
        format!("{}, {}", author.family, author.given)
      }
    })
    .collect::<Vec<_>>()
    .join(" and ");

  let fields = [
    ("title", metadata.title.as_deref().map(escape_bibtex)),
    (
      "author",
      Some(authors).filter(|authors| !authors.is_empty()).as_deref().map(escape_bibtex),
    ),
    ("journal", metadata.journal.as_deref().or(metadata.ejournal.as_deref()).map(escape_bibtex)),
    ("volume", metadata.volume.clone()),
    ("pages", metadata.page.clone()),
    ("year", metadata.year.map(|year| year.to_string())),
    ("month", metadata.month.map(|month| month.to_string())),
    ("doi", metadata.doi.clone()),
    ("url", metadata.url.clone()),
  ];

  for (name, value) in fields {
    if let Some(value) = value.filter(|value| !value.is_empty() && value != "0") {
      bib.push_str(&format!("\t{name} = {{{value}}},\n"));
    }
  }

  bib.push('}');
  bib
}

/// `{family of first author}{year}{first title word}`, reduced to lowercase ASCII alphanumerics.
fn cite_key(metadata: &BibMetadata) -> String {
  let family =
    metadata.author.as_ref().and_then(|authors| authors.first()).map(|a| a.family.as_str());
  let year = metadata.year.map(|year| year.to_string());
  let title_word = metadata.title.as_deref().and_then(|title| title.split_whitespace().next());

  let key: String = [family, year.as_deref(), title_word]
    .into_iter()
    .flatten()
    .flat_map(str::chars)
    .filter(char::is_ascii_alphanumeric)
    .map(|c| c.to_ascii_lowercase())
    .collect();

  if key.is_empty() {
    "unknown".to_string()
  } else {
    key
  }
}

/// Escapes characters with a special meaning in BibTeX values.
fn escape_bibtex(value: &str) -> String {
  value
    .replace('\\', "\\textbackslash{}")
    .replace('&', "\\&")
    .replace('%', "\\%")
    .replace('$', "\\$")
    .replace('#', "\\#")
    .replace('_', "\\_")
    .replace('{', "\\{")
    .replace('}', "\\}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_full_entry() {
    let metadata = BibMetadata {
      title: Some("MapReduce: simplified data processing".into()),
      author: Some(vec![Author::new("Jeffrey", "Dean"), Author::new("Sanjay", "Ghemawat")]),
      year: Some(2008),
      month: Some(1),
      journal: Some("Communications of the ACM".into()),
      volume: Some("51".into()),
      page: Some("107-113".into()),
      doi: Some("10.1145/1327452.1327492".into()),
      url: Some("https://doi.org/10.1145/1327452.1327492".into()),
      entry_type: Some("article".into()),
      ..Default::default()
    };

    assert_eq!(
      to_bibtex(&metadata),
      "@article{dean2008mapreduce,\n\
       \ttitle = {MapReduce: simplified data processing},\n\
       \tauthor = {Dean, Jeffrey and Ghemawat, Sanjay},\n\
       \tjournal = {Communications of the ACM},\n\
       \tvolume = {51},\n\
       \tpages = {107-113},\n\
       \tyear = {2008},\n\
       \tmonth = {1},\n\
       \tdoi = {10.1145/1327452.1327492},\n\
       \turl = {https://doi.org/10.1145/1327452.1327492},\n\
       }"
    );
  }

  #[test]
  fn test_sparse_entry() {
    let metadata = BibMetadata {
      title: Some("Über & Co".into()),
      ejournal: Some("arXiv".into()),
      entry_type: Some("misc".into()),
      ..Default::default()
    };

    let bib = to_bibtex(&metadata);
    assert!(bib.starts_with("@misc{ber,\n"));
    assert!(bib.contains("\ttitle = {Über \\& Co},\n"));
    assert!(bib.contains("\tjournal = {arXiv},\n"));
    assert!(!bib.contains("author"));
    assert!(!bib.contains("year"));
  }

  #[test]
  fn test_empty_metadata() {
    assert_eq!(to_bibtex(&BibMetadata::default()), "@article{unknown,\n}");
  }

  #[test]
  fn test_single_name_author() {
    let metadata = BibMetadata {
      author: Some(vec![Author::new("", "The Example Consortium")]),
      ..Default::default()
    };
    assert!(to_bibtex(&metadata).contains("\tauthor = {The Example Consortium},\n"));
  }
}
