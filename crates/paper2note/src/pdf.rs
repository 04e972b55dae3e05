//! Reading and annotating PDF files with `lopdf`.
//!
//! Only two things are ever needed from a PDF: the document-info dictionary and the text of its
//! first pages. [`PdfAnalyzer`] returns both as plain strings. [`write_identifier`] is the single
//! write operation, storing a discovered identifier back into the document info.

use lopdf::{Dictionary, Document, Object};

use super::*;

/// Document-info key used for DOIs.
const DOI_KEY: &str = "doi";
/// Document-info key used for arXiv identifiers.
const ARXIV_KEY: &str = "arxiv_id";

/// The readable parts of a PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfContent {
  /// Document-info entries whose values are strings, decoded to UTF-8
  pub info: BTreeMap<String, String>,
  /// Text of the leading pages, at most the analyzer's character budget
  pub text: String,
}

/// Extracts [`PdfContent`] from a file.
#[derive(Debug, Clone)]
pub struct PdfAnalyzer {
  /// Character budget for page text
  max_characters: usize,
}

impl Default for PdfAnalyzer {
  fn default() -> Self { Self { max_characters: DoiConfig::default().n_characters_in_pdf } }
}

impl PdfAnalyzer {
  /// An analyzer with the default character budget.
  pub fn new() -> Self { Self::default() }

  /// Stops reading pages once `max_characters` characters of text have been collected. Zero
  /// disables text extraction entirely.
  pub fn with_max_characters(mut self, max_characters: usize) -> Self {
    self.max_characters = max_characters;
    self
  }

  /// Loads `path` and reads its document info and leading page text.
  #[instrument(skip(self), fields(max_characters = self.max_characters), level = "debug")]
  pub fn analyze(&self, path: impl AsRef<Path> + std::fmt::Debug) -> Result<PdfContent> {
    let doc = Document::load(path)?;
    let info = info_dictionary(&doc).map(decode_dictionary).unwrap_or_default();
    let text = self.extract_text(&doc);
    trace!(info_entries = info.len(), characters = text.chars().count(), "Analyzed PDF");
    Ok(PdfContent { info, text })
  }

  /// Collects page text in page order until the budget is reached.
  fn extract_text(&self, doc: &Document) -> String {
    let mut text = String::new();
    if self.max_characters == 0 {
      return text;
    }

    for page_number in doc.get_pages().into_keys() {
      match doc.extract_text(&[page_number]) {
        Ok(page_text) => text.push_str(&page_text),
        Err(e) => warn!(page_number, error = %e, "Could not extract text from page"),
      }
      if text.chars().count() >= self.max_characters {
        break;
      }
    }

    text.chars().take(self.max_characters).collect()
  }
}

/// The trailer's `Info` dictionary, whether stored inline or by reference.
fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
  let info = doc.trailer.get(b"Info").ok()?;
  match info.as_reference() {
    Ok(id) => doc.get_dictionary(id).ok(),
    Err(_) => info.as_dict().ok(),
  }
}

/// Keeps every string-valued entry of `dict`, decoded.
fn decode_dictionary(dict: &Dictionary) -> BTreeMap<String, String> {
  dict
    .iter()
    .filter_map(|(key, value)| {
      let value = value.as_str().ok()?;
      Some((String::from_utf8_lossy(key).into_owned(), decode_pdf_string(value)))
    })
    .collect()
}

/// Decodes a PDF text string: UTF-16BE when it starts with a byte order mark, otherwise lossy
/// UTF-8.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
  if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
    let (decoded, ..) = encoding_rs::UTF_16BE.decode_without_bom_handling(utf16);
    decoded.into_owned()
  } else {
    String::from_utf8_lossy(bytes).into_owned()
  }
}

/// Stores `identifier` in the document info of `path` under `doi` or `arxiv_id` and saves the file
/// in place. The `Info` dictionary is created when the document has none.
#[instrument(level = "debug")]
pub fn write_identifier(path: &Path, identifier: &Identifier) -> Result<()> {
  let mut doc = Document::load(path)?;

  let info_id = match doc.trailer.get(b"Info").and_then(Object::as_reference) {
    Ok(id) => id,
    Err(_) => {
      let inline = doc.trailer.get(b"Info").and_then(Object::as_dict).cloned().unwrap_or_default();
      let id = doc.add_object(inline);
      doc.trailer.set("Info", id);
      id
    },
  };

  let key = match identifier {
    Identifier::Doi(_) => DOI_KEY,
    Identifier::Arxiv(_) => ARXIV_KEY,
  };
  doc
    .get_object_mut(info_id)?
    .as_dict_mut()?
    .set(key, Object::string_literal(identifier.as_str()));

  doc.save(path)?;
  info!("Saved {} to the metadata of {}.", identifier, path.display());
  Ok(())
}
