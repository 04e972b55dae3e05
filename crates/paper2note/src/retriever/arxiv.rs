//! Reading arXiv Atom feeds.

use chrono::{DateTime, Datelike};
use quick_xml::{events::Event, Reader};

use super::*;

/// The fields of one `<entry>` of an arXiv API feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArxivEntry {
  /// Abstract page URL as given in `<id>`, including the version
  pub id:          Option<String>,
  /// Title with whitespace collapsed
  pub title:       Option<String>,
  /// Abstract with whitespace collapsed
  pub summary:     Option<String>,
  /// Author names in feed order
  pub authors:     Vec<String>,
  /// RFC 3339 timestamp of the first version
  pub published:   Option<String>,
  /// DOI of the published version, from `<arxiv:doi>`
  pub doi:         Option<String>,
  /// Citation of the published version, from `<arxiv:journal_ref>`
  pub journal_ref: Option<String>,
}

/// Parses the first entry of an arXiv API response.
///
/// # Errors
///
/// - [`Paper2NoteError::Xml`] for malformed XML
/// - [`Paper2NoteError::ApiError`] when the feed has no entry or the API reports an error entry
pub fn parse_feed(xml: &str) -> Result<ArxivEntry> {
  let mut reader = Reader::from_str(xml);
  reader.config_mut().trim_text(true);

  let mut entry = ArxivEntry::default();
  let mut path: Vec<String> = Vec::new();
  let mut in_entry = false;
  let mut found = false;

  loop {
    match reader.read_event()? {
      Event::Start(e) => {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        if !in_entry && name == "entry" {
          in_entry = true;
          found = true;
        } else if in_entry {
          path.push(name);
        }
      },
      Event::End(e) =>
        if in_entry {
          if path.is_empty() && e.local_name().as_ref() == b"entry" {
            break;
          }
          path.pop();
        },
      Event::Text(e) if in_entry => {
        let text = collapse_whitespace(&e.unescape()?);
        match path.join("/").as_str() {
          "id" => entry.id = Some(text),
          "title" => entry.title = Some(text),
          "summary" => entry.summary = Some(text),
          "published" => entry.published = Some(text),
          "doi" => entry.doi = Some(text),
          "journal_ref" => entry.journal_ref = Some(text),
          "author/name" => entry.authors.push(text),
          _ => {},
        }
      },
      Event::Eof => break,
      _ => {},
    }
  }

  if !found {
    return Err(Paper2NoteError::ApiError("arXiv feed contains no entry".into()));
  }
  if entry.id.as_deref().is_some_and(|id| id.contains("api/errors")) {
    return Err(Paper2NoteError::ApiError(format!(
      "arXiv API error: {}",
      entry.summary.as_deref().unwrap_or("unknown error")
    )));
  }

  trace!(?entry, "Parsed arXiv entry");
  Ok(entry)
}

impl ArxivEntry {
  /// Builds the extraction for the arXiv identifier `id`.
  pub fn to_extraction(&self, id: &str) -> Extraction {
    let date = self.published.as_deref().and_then(|published| {
      DateTime::parse_from_rfc3339(published)
        .inspect_err(|e| debug!(published, error = %e, "Unreadable arXiv date"))
        .ok()
    });

    let metadata = BibMetadata {
      title: self.title.clone(),
      author: Some(self.authors.iter().map(|name| split_name(name)).collect()),
      year: date.map(|date| date.year()).and_then(|year| u32::try_from(year).ok()),
      month: date.map(|date| date.month()),
      day: date.map(|date| date.day()),
      journal: self.journal_ref.clone(),
      ejournal: Some("arXiv".to_string()),
      doi: self.doi.clone(),
      url: Some(format!("https://arxiv.org/abs/{id}")),
      volume: None,
      page: None,
      entry_type: Some("article".to_string()),
    };

    Extraction {
      identifier: Some(id.to_string()),
      identifier_type: Some(IdentifierKind::Arxiv),
      metadata,
      validation_data: self.validation_data(),
      bibtex: None,
    }
  }

  /// The entry as a JSON object, with the abstract under `summary`.
  fn validation_data(&self) -> Map<String, Value> {
    let mut data = Map::new();
    let strings = [
      ("id", &self.id),
      ("title", &self.title),
      ("summary", &self.summary),
      ("published", &self.published),
      ("doi", &self.doi),
      ("journal_ref", &self.journal_ref),
    ];
    for (key, value) in strings {
      if let Some(value) = value {
        data.insert(key.to_string(), Value::String(value.clone()));
      }
    }
    data.insert(
      "authors".to_string(),
      Value::Array(self.authors.iter().cloned().map(Value::String).collect()),
    );
    data
  }
}

/// Splits `"Jane Q. Doe"` into given `"Jane Q."` and family `"Doe"`.
fn split_name(name: &str) -> Author {
  match name.rsplit_once(' ') {
    Some((given, family)) => Author::new(given, family),
    None => Author::new("", name),
  }
}

/// Joins all whitespace runs, including line breaks, into single spaces.
fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
