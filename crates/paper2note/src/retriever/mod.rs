//! Bibliographic lookups for DOIs and arXiv identifiers.
//!
//! Two services are used:
//!
//! - The DOI resolver, asked for CSL-JSON through content negotiation (see [`doi`])
//! - The arXiv export API, which answers with an Atom feed (see [`arxiv`])
//!
//! Both answers are turned into an [`Extraction`]. When an arXiv entry already names a published
//! DOI, the DOI record is usually the better source and replaces the arXiv one (see
//! [`DoiConfig::replace_arxiv_id_by_doi`]).
//!
//! # Examples
//!
//! ```no_run
//! use paper2note::{config::ExtractorConfig, identifier::Identifier, retriever::Retriever};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig::default();
//! let retriever = Retriever::new(&config.bib)?;
//!
//! let extraction =
//!   retriever.retrieve(&Identifier::Arxiv("2304.02532".into()), &config.doi).await?;
//! println!("Retrieved: {:?}", extraction.metadata.title);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{header::ACCEPT, Client};

use super::*;

pub mod arxiv;
pub mod doi;

use self::arxiv::ArxivEntry;

/// Media type requested from the DOI resolver.
const CSL_JSON: &str = "application/citeproc+json";

/// HTTP client for the lookup services.
#[derive(Debug, Clone)]
pub struct Retriever {
  /// Shared connection pool
  client: Client,
  /// Endpoints used for lookups
  config: BibConfig,
}

impl Retriever {
  /// Builds a client with the configured user agent and timeout.
  pub fn new(config: &BibConfig) -> Result<Self> {
    let client = Client::builder()
      .user_agent(config.user_agent.as_str())
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config: config.clone() })
  }

  /// Looks up `identifier`, following an arXiv entry's DOI when configured to.
  #[instrument(
    skip(self, identifier, doi_config),
    fields(identifier = %identifier),
    level = "debug"
  )]
  pub async fn retrieve(
    &self,
    identifier: &Identifier,
    doi_config: &DoiConfig,
  ) -> Result<Extraction> {
    match identifier {
      Identifier::Doi(doi) => self.fetch_doi(doi).await,
      Identifier::Arxiv(id) => {
        let entry = self.fetch_arxiv(id).await?;
        match entry.doi.as_deref() {
          Some(doi) if doi_config.replace_arxiv_id_by_doi => {
            info!("arXiv entry {} names DOI {}, using the DOI record.", id, doi);
            let mut extraction = self.fetch_doi(doi).await?;
            keep_arxiv_summary(&mut extraction, &entry);
            Ok(extraction)
          },
          _ => Ok(entry.to_extraction(id)),
        }
      },
    }
  }

  /// Fetches the CSL-JSON record of `doi`.
  pub async fn fetch_doi(&self, doi: &str) -> Result<Extraction> {
    let url = format!("{}/{}", self.config.doi_resolver_url.trim_end_matches('/'), doi);
    debug!("Fetching DOI record via: {}", url);

    let response = self.client.get(&url).header(ACCEPT, CSL_JSON).send().await?;
    if !response.status().is_success() {
      return Err(Paper2NoteError::ApiError(format!(
        "DOI lookup for {doi} failed with status {}",
        response.status()
      )));
    }

    let csl: Value = response.json().await?;
    trace!("DOI response: {}", csl);
    doi::extraction_from_csl(doi, csl)
  }

  /// Fetches the Atom entry of the arXiv identifier `id`.
  pub async fn fetch_arxiv(&self, id: &str) -> Result<ArxivEntry> {
    debug!("Fetching arXiv entry {} via: {}", id, self.config.arxiv_api_url);

    let response =
      self.client.get(&self.config.arxiv_api_url).query(&[("id_list", id)]).send().await?;
    if !response.status().is_success() {
      return Err(Paper2NoteError::ApiError(format!(
        "arXiv lookup for {id} failed with status {}",
        response.status()
      )));
    }

    let feed = response.text().await?;
    trace!("arXiv response: {}", feed);
    arxiv::parse_feed(&feed)
  }
}

/// Copies the arXiv abstract into a DOI based extraction that has none, so notes keep an abstract
/// after the arXiv record was replaced.
pub fn keep_arxiv_summary(extraction: &mut Extraction, entry: &ArxivEntry) {
  let has_summary = extraction
    .validation_data
    .get("summary")
    .and_then(Value::as_str)
    .is_some_and(|summary| !summary.is_empty());

  if !has_summary {
    if let Some(summary) = entry.summary.as_ref().filter(|summary| !summary.is_empty()) {
      extraction.validation_data.insert("summary".to_string(), Value::String(summary.clone()));
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn entry() -> ArxivEntry {
    ArxivEntry { summary: Some("An arXiv abstract.".into()), ..Default::default() }
  }

  #[test]
  fn test_keep_arxiv_summary() {
    let mut extraction = Extraction::default();
    keep_arxiv_summary(&mut extraction, &entry());
    assert_eq!(extraction.validation_data["summary"], json!("An arXiv abstract."));
  }

  #[test]
  fn test_doi_summary_wins() {
    let mut extraction = Extraction::default();
    extraction.validation_data.insert("summary".into(), json!("The published abstract."));
    keep_arxiv_summary(&mut extraction, &entry());
    assert_eq!(extraction.validation_data["summary"], json!("The published abstract."));
  }

  #[test]
  fn test_client_builds_from_config() {
    let config = BibConfig { timeout_secs: 1, ..Default::default() };
    let retriever = Retriever::new(&config).unwrap();
    assert_eq!(retriever.config, config);
  }
}
