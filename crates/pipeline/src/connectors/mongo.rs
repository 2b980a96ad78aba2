//! MongoDB connector: the `documents` collection of design docs and notes.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Client;
use tributary_core::{AppError, AppResult};

use crate::connectors::query_terms;
use crate::sources::{RetrievedRecord, SourceKind};
use crate::Connector;

/// Collection holding the seeded design documents.
const COLLECTION: &str = "documents";

/// Connector for the document store.
///
/// The driver manages its own session pool; this connector only issues a
/// bounded regex find per fetch.
pub struct MongoDocsConnector {
    client: Client,
    database: String,
}

impl MongoDocsConnector {
    /// Create a connector for `uri`, reading from `database`.
    pub async fn connect(uri: &str, database: impl Into<String>) -> AppResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Connector(format!("Invalid MongoDB URI: {}", e)))?;

        Ok(Self {
            client,
            database: database.into(),
        })
    }
}

#[async_trait]
impl Connector for MongoDocsConnector {
    fn kind(&self) -> SourceKind {
        SourceKind::DocumentStore
    }

    async fn fetch(&self, query: &str, limit: usize) -> AppResult<Vec<RetrievedRecord>> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = terms
            .iter()
            .map(|term| escape_regex(term))
            .collect::<Vec<_>>()
            .join("|");

        let filter = doc! {
            "$or": [
                { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                { "body": { "$regex": pattern.as_str(), "$options": "i" } },
                { "tags": { "$regex": pattern.as_str(), "$options": "i" } },
            ]
        };

        let collection = self
            .client
            .database(&self.database)
            .collection::<Document>(COLLECTION);

        let mut cursor = collection
            .find(filter)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::Connector(format!("documents query failed: {}", e)))?;

        let mut records = Vec::new();
        while let Some(mut document) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Connector(format!("documents cursor failed: {}", e)))?
        {
            // The object id is driver bookkeeping, not context material.
            document.remove("_id");
            records.push(RetrievedRecord::new(
                SourceKind::DocumentStore,
                serde_json::to_string(&document)?,
            ));
        }

        Ok(records)
    }
}

/// Escape regex metacharacters so query terms match literally.
fn escape_regex(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_regex_passes_plain_terms() {
        assert_eq!(escape_regex("migration"), "migration");
        assert_eq!(escape_regex("user_10"), "user_10");
    }

    #[test]
    fn test_escape_regex_escapes_metacharacters() {
        assert_eq!(escape_regex("a.b"), "a\\.b");
        assert_eq!(escape_regex("c++"), "c\\+\\+");
    }
}
