//! Placeholder substitution for filename patterns and note templates.
//!
//! Both use the same syntax: `{field}` is replaced by the value of `field` in
//! [`NormalizedMetadata`], `{{` and `}}` produce literal braces. Substitution is a typed lookup; a
//! placeholder that names no field is an error, never an empty string.
//!
//! ```
//! use paper2note::{metadata::NormalizedMetadata, template::Pattern};
//!
//! let fields: NormalizedMetadata =
//!   [("year", "2023"), ("title", "Example Paper")].into_iter().collect();
//! let name = Pattern::new("{year}_{title}").render(&fields)?;
//! assert_eq!(name, "2023_Example Paper");
//! # Ok::<(), paper2note::error::Paper2NoteError>(())
//! ```

use super::*;

/// The note template shipped with the crate, compiled into the binary.
pub const DEFAULT_NOTE_TEMPLATE: &str = include_str!("../templates/default_note_template.md");

/// A string with `{field}` placeholders, used to name the renamed PDF and the note file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern(String);

impl Pattern {
  /// Wraps a raw pattern string.
  pub fn new(pattern: impl Into<String>) -> Self { Self(pattern.into()) }

  /// The raw pattern text.
  pub fn as_str(&self) -> &str { &self.0 }

  /// Substitutes every placeholder with its field value.
  ///
  /// # Errors
  ///
  /// - [`Paper2NoteError::MissingField`] naming the first placeholder without a field
  /// - [`Paper2NoteError::PatternSyntax`] for unbalanced braces or `{}`
  pub fn render(&self, fields: &NormalizedMetadata) -> Result<String> { render(&self.0, fields) }
}

impl From<&str> for Pattern {
  fn from(pattern: &str) -> Self { Self::new(pattern) }
}

impl From<String> for Pattern {
  fn from(pattern: String) -> Self { Self(pattern) }
}

impl Display for Pattern {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Where a [`NoteTemplate`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
  /// [`DEFAULT_NOTE_TEMPLATE`]
  Bundled,
  /// A template file on disk
  File(PathBuf),
}

/// The text a note is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTemplate {
  source: TemplateSource,
  text:   String,
}

impl NoteTemplate {
  /// The template compiled into the crate.
  pub fn bundled() -> Self {
    Self { source: TemplateSource::Bundled, text: DEFAULT_NOTE_TEMPLATE.to_string() }
  }

  /// Reads a template file as UTF-8 text.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "Loaded note template");
    Ok(Self { source: TemplateSource::File(path.to_path_buf()), text })
  }

  /// Loads the template behind `source`.
  pub fn load(source: &TemplateSource) -> Result<Self> {
    match source {
      TemplateSource::Bundled => Ok(Self::bundled()),
      TemplateSource::File(path) => Self::from_file(path),
    }
  }

  /// Where this template was loaded from.
  pub fn source(&self) -> &TemplateSource { &self.source }

  /// The raw template text.
  pub fn text(&self) -> &str { &self.text }

  /// Renders the full note text. See [`Pattern::render`] for the error cases.
  pub fn render(&self, fields: &NormalizedMetadata) -> Result<String> { render(&self.text, fields) }
}

/// Substitutes `{field}` placeholders in `text`.
#[instrument(
    skip(text, fields),
    fields(text_length = text.len(), field_count = fields.len()),
    level = "debug"
)]
pub fn render(text: &str, fields: &NormalizedMetadata) -> Result<String> {
  let mut rendered = String::with_capacity(text.len());
  let mut chars = text.char_indices().peekable();

  while let Some((position, c)) = chars.next() {
    match c {
      '{' if chars.next_if(|&(_, next)| next == '{').is_some() => rendered.push('{'),
      '}' if chars.next_if(|&(_, next)| next == '}').is_some() => rendered.push('}'),
      '{' => {
        let start = position + 1;
        let end = loop {
          match chars.next() {
            Some((end, '}')) => break end,
            Some((_, '{')) | None =>
              return Err(Paper2NoteError::PatternSyntax(format!(
                "unclosed '{{' at byte {position}"
              ))),
            Some(_) => {},
          }
        };

        let field = &text[start..end];
        if field.is_empty() {
          return Err(Paper2NoteError::PatternSyntax(format!(
            "empty placeholder at byte {position}"
          )));
        }
        let value =
          fields.get(field).ok_or_else(|| Paper2NoteError::MissingField(field.to_string()))?;
        trace!(field, value, "Substituted placeholder");
        rendered.push_str(value);
      },
      '}' =>
        return Err(Paper2NoteError::PatternSyntax(format!(
          "single '}}' encountered at byte {position}"
        ))),
      c => rendered.push(c),
    }
  }

  Ok(rendered)
}
