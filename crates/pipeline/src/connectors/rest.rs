//! REST countries connector.
//!
//! Queries the public REST countries API (https://restcountries.com) by
//! name. The API has no free-text search, so candidate terms are tried one
//! at a time and the first one that names a country wins.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tributary_core::{AppError, AppResult};

use crate::connectors::query_terms;
use crate::sources::{RetrievedRecord, SourceKind};
use crate::Connector;

/// Fields requested from the API.
const FIELDS: &str = "name,capital,region,population";

/// Country payload, reduced to the fields the context needs.
#[derive(Debug, Deserialize)]
struct Country {
    name: CountryName,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    region: String,
    #[serde(default)]
    population: u64,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

impl Country {
    fn render(&self) -> String {
        json!({
            "name": self.name.common,
            "capital": self.capital.first().cloned().unwrap_or_else(|| "N/A".to_string()),
            "region": self.region,
            "population": self.population,
        })
        .to_string()
    }
}

/// Connector for the REST countries API.
pub struct CountriesApiConnector {
    base_url: String,
    client: reqwest::Client,
}

impl CountriesApiConnector {
    /// Create a connector against `base_url` (e.g. `https://restcountries.com/v3.1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Look one term up by country name. `None` means the term names no
    /// country (the API answers 404 for that).
    async fn lookup(&self, term: &str, limit: usize) -> AppResult<Option<Vec<RetrievedRecord>>> {
        let url = format!("{}/name/{}?fields={}", self.base_url, term, FIELDS);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Connector(format!("countries API request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AppError::Connector(format!(
                "countries API error ({})",
                response.status()
            )));
        }

        let countries: Vec<Country> = response
            .json()
            .await
            .map_err(|e| AppError::Connector(format!("countries API returned bad JSON: {}", e)))?;

        if countries.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            countries
                .into_iter()
                .take(limit)
                .map(|country| RetrievedRecord::new(SourceKind::RestApi, country.render()))
                .collect(),
        ))
    }
}

#[async_trait]
impl Connector for CountriesApiConnector {
    fn kind(&self) -> SourceKind {
        SourceKind::RestApi
    }

    async fn fetch(&self, query: &str, limit: usize) -> AppResult<Vec<RetrievedRecord>> {
        for term in candidate_terms(query) {
            if let Some(records) = self.lookup(&term, limit).await? {
                tracing::debug!(term = %term, "Country name matched");
                return Ok(records);
            }
        }

        Ok(Vec::new())
    }
}

/// Candidate country-name terms for a query.
///
/// Capitalized words are the most likely country names, so they are tried
/// first; the remaining significant words follow as a fallback.
fn candidate_terms(query: &str) -> Vec<String> {
    let capitalized: Vec<String> = query
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| word.len() >= 3 && word.chars().next().is_some_and(|c| c.is_uppercase()))
        .map(|word| word.to_lowercase())
        .filter(|word| !super::STOP_WORDS.contains(&word.as_str()))
        .collect();

    let mut terms = capitalized;
    for term in query_terms(query) {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalized_words_come_first() {
        let terms = candidate_terms("what is the capital of France");
        assert_eq!(terms.first().map(String::as_str), Some("france"));
        assert!(terms.contains(&"capital".to_string()));
    }

    #[test]
    fn test_lowercase_query_still_yields_terms() {
        let terms = candidate_terms("population of germany");
        assert!(terms.contains(&"germany".to_string()));
    }

    #[test]
    fn test_country_rendering() {
        let country = Country {
            name: CountryName {
                common: "France".to_string(),
            },
            capital: vec!["Paris".to_string()],
            region: "Europe".to_string(),
            population: 68_000_000,
        };

        let rendered = country.render();
        assert!(rendered.contains("\"name\":\"France\""));
        assert!(rendered.contains("\"capital\":\"Paris\""));
    }

    #[test]
    fn test_country_rendering_without_capital() {
        let country = Country {
            name: CountryName {
                common: "Antarctica".to_string(),
            },
            capital: Vec::new(),
            region: String::new(),
            population: 0,
        };

        assert!(country.render().contains("\"capital\":\"N/A\""));
    }
}
