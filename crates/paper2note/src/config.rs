//! Settings for the default extractor.
//!
//! [`ExtractorConfig`] is a plain value handed to each
//! [`Extractor::extract`](crate::extractor::Extractor::extract) call. Nothing is stored globally,
//! so two runs with different settings never influence each other.
//!
//! The configuration can be read from a TOML file. Every key is optional:
//!
//! ```toml
//! [doi]
//! n_characters_in_pdf = 2000
//! check_filename = false
//!
//! [bib]
//! timeout_secs = 10
//! ```

use super::*;

/// Name of the directory below the platform config dir.
const CONFIG_DIR_NAME: &str = "paper2note";
/// Name of the configuration file inside [`CONFIG_DIR_NAME`].
const CONFIG_FILE_NAME: &str = "config.toml";

/// Complete extractor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
  /// Where and how identifiers are searched for
  pub doi: DoiConfig,
  /// How lookup services are contacted
  pub bib: BibConfig,
}

/// Controls identifier discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoiConfig {
  /// How many characters of page text to scan
  pub n_characters_in_pdf:      usize,
  /// Look at the PDF document-info dictionary
  pub check_document_info:      bool,
  /// Look at the filename
  pub check_filename:           bool,
  /// Look at the page text
  pub check_text:               bool,
  /// Write a discovered identifier back into the document-info dictionary
  pub save_identifier_metadata: bool,
  /// Prefer the DOI record when an arXiv entry names a DOI
  pub replace_arxiv_id_by_doi:  bool,
}

impl Default for DoiConfig {
  fn default() -> Self {
    Self {
      n_characters_in_pdf:      1000,
      check_document_info:      true,
      check_filename:           true,
      check_text:               true,
      save_identifier_metadata: true,
      replace_arxiv_id_by_doi:  true,
    }
  }
}

/// Controls the HTTP lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BibConfig {
  /// Base URL of the DOI resolver, without trailing slash
  pub doi_resolver_url: String,
  /// arXiv export API query endpoint
  pub arxiv_api_url:    String,
  /// Per-request timeout
  pub timeout_secs:     u64,
  /// `User-Agent` header sent with every request
  pub user_agent:       String,
}

impl Default for BibConfig {
  fn default() -> Self {
    Self {
      doi_resolver_url: "https://doi.org".to_string(),
      arxiv_api_url:    "https://export.arxiv.org/api/query".to_string(),
      timeout_secs:     30,
      user_agent:       concat!("paper2note/", env!("CARGO_PKG_VERSION")).to_string(),
    }
  }
}

impl ExtractorConfig {
  /// `$CONFIG_DIR/paper2note/config.toml`, where `$CONFIG_DIR` is the platform config directory.
  ///
  /// # Errors
  ///
  /// [`Paper2NoteError::Config`] if the platform has no config directory.
  pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
      .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
      .ok_or_else(|| Paper2NoteError::Config("Could not determine config directory".into()))
  }

  /// Reads a TOML configuration file. Missing keys and tables take their defaults.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    debug!(path = %path.display(), ?config, "Loaded extractor configuration");
    Ok(config)
  }

  /// Reads the file at [`default_path`](Self::default_path), or returns the defaults when there is
  /// no such file.
  pub fn load_default() -> Result<Self> {
    let path = Self::default_path()?;
    if path.exists() {
      Self::from_file(path)
    } else {
      trace!(path = %path.display(), "No configuration file, using defaults");
      Ok(Self::default())
    }
  }

  /// Replaces the identifier discovery settings.
  pub fn with_doi(mut self, doi: DoiConfig) -> Self {
    self.doi = doi;
    self
  }

  /// Replaces the lookup settings.
  pub fn with_bib(mut self, bib: BibConfig) -> Self {
    self.bib = bib;
    self
  }
}
