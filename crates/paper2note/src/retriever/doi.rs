//! Mapping CSL-JSON records from the DOI resolver to [`BibMetadata`].

use super::*;

/// Turns a CSL-JSON answer for `doi` into an [`Extraction`]. The raw record is kept as
/// validation data.
///
/// # Errors
///
/// [`Paper2NoteError::ApiError`] if the answer is not a JSON object.
pub fn extraction_from_csl(doi: &str, csl: Value) -> Result<Extraction> {
  let Value::Object(record) = csl else {
    return Err(Paper2NoteError::ApiError(format!("DOI record for {doi} is not a JSON object")));
  };

  let mut metadata = metadata_from_csl(&record);
  if metadata.doi.is_none() {
    metadata.doi = Some(doi.to_string());
  }

  Ok(Extraction {
    identifier: Some(doi.to_string()),
    identifier_type: Some(IdentifierKind::Doi),
    metadata,
    validation_data: record,
    bibtex: None,
  })
}

/// Reads the bibliographic fields out of a CSL-JSON object.
pub fn metadata_from_csl(record: &Map<String, Value>) -> BibMetadata {
  let (year, month, day) = ["issued", "published-print", "published-online"]
    .iter()
    .find_map(|key| date_parts(record.get(*key)?))
    .unwrap_or_default();

  BibMetadata {
    title: record.get("title").and_then(first_string),
    author: record.get("author").and_then(Value::as_array).map(|authors| {
      authors.iter().filter_map(Value::as_object).map(author_from_csl).collect()
    }),
    year,
    month,
    day,
    journal: record.get("container-title").and_then(first_string),
    ejournal: None,
    doi: record.get("DOI").and_then(scalar_string),
    url: record.get("URL").and_then(scalar_string),
    volume: record.get("volume").and_then(scalar_string),
    page: record.get("page").and_then(scalar_string),
    entry_type: record.get("type").and_then(Value::as_str).map(|csl_type| {
      bibtex_entry_type(csl_type).to_string()
    }),
  }
}

/// The BibTeX entry type for a CSL item type.
pub fn bibtex_entry_type(csl_type: &str) -> &'static str {
  match csl_type {
    "journal-article" | "article-journal" | "article" => "article",
    "proceedings-article" | "paper-conference" => "inproceedings",
    "book" | "monograph" => "book",
    "book-chapter" | "chapter" => "incollection",
    "dissertation" | "thesis" => "phdthesis",
    "report" => "techreport",
    _ => "misc",
  }
}

/// A CSL name. Institutional authors only carry `literal` or `name` and become family-only.
fn author_from_csl(author: &Map<String, Value>) -> Author {
  let field = |key: &str| author.get(key).and_then(Value::as_str).map(str::to_string);
  match field("family") {
    Some(family) => Author { given: field("given").unwrap_or_default(), family },
    None => Author {
      given:  String::new(),
      family: field("literal").or_else(|| field("name")).unwrap_or_default(),
    },
  }
}

/// `{"date-parts": [[2008, 1, 15]]}` as year, month and day. Parts may be numbers or strings.
fn date_parts(date: &Value) -> Option<(Option<u32>, Option<u32>, Option<u32>)> {
  let parts = date.get("date-parts")?.get(0)?.as_array()?;
  let part = |index: usize| {
    parts.get(index).and_then(|part| match part {
      Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
      Value::String(text) => text.trim().parse().ok(),
      _ => None,
    })
  };
  let year = part(0)?;
  Some((Some(year), part(1), part(2)))
}

/// A string, or the first string of an array. CSL uses both shapes for titles.
fn first_string(value: &Value) -> Option<String> {
  match value {
    Value::String(text) => Some(text.clone()),
    Value::Array(values) => values.first().and_then(Value::as_str).map(str::to_string),
    _ => None,
  }
}

/// A string or number rendered as text.
fn scalar_string(value: &Value) -> Option<String> {
  match value {
    Value::String(text) => Some(text.clone()),
    Value::Number(number) => Some(number.to_string()),
    _ => None,
  }
}
