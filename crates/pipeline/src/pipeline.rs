//! Pipeline orchestration.
//!
//! One `answer()` call is a self-contained run through: cache lookup →
//! routing → per-source retrieval → context assembly → generation → cache
//! store. The orchestrator keeps no state across calls and owns the
//! degradation policy: cache and connector failures are absorbed, only
//! generation failure aborts the request.

use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tributary_core::config::{DEFAULT_CACHE_TTL_SECS, DEFAULT_FETCH_LIMIT};
use tributary_core::AppResult;
use tributary_llm::{LlmClient, LlmRequest};

use crate::cache::{cache_key, AnswerCache};
use crate::connector::Connector;
use crate::context::assemble;
use crate::router::route;
use crate::sources::{RetrievedRecord, SourceKind};

/// Instruction the generator runs under: answer from the context blocks
/// only, and say so when they don't contain the answer.
const SYSTEM_PROMPT: &str = "You are a data assistant. Answer the question using only the \
information inside the labeled context blocks; each block is named after the system its \
records came from. Quote values exactly as they appear. If the context does not contain \
the answer, say that you could not find the relevant information. Do not guess or use \
outside knowledge.";

/// Whether a previously computed answer was found for the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// The synthesized (or cached) answer text
    pub answer: String,

    /// Whether the answer came from the cache
    pub cache_status: CacheStatus,
}

/// The pipeline orchestrator.
///
/// Holds the registered connectors, the answer cache, and the generator.
/// Shared stores are externally synchronized; the pipeline performs no
/// client-side locking.
pub struct Pipeline {
    connectors: Vec<Arc<dyn Connector>>,
    cache: Arc<dyn AnswerCache>,
    llm: Arc<dyn LlmClient>,
    model: String,
    fetch_limit: usize,
    cache_ttl: Duration,
}

impl Pipeline {
    /// Create a pipeline with no connectors registered yet.
    pub fn new(
        cache: Arc<dyn AnswerCache>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            connectors: Vec::new(),
            cache,
            llm,
            model: model.into(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }

    /// Register a connector. Sources without a registered connector simply
    /// contribute no records.
    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Override the per-source record limit.
    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    /// Override the TTL for cached answers.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Answer a query.
    ///
    /// Returns the answer and whether it was served from the cache. The only
    /// error this surfaces is a generation failure; cache and connector
    /// problems degrade with a warning instead.
    pub async fn answer(&self, query: &str) -> AppResult<PipelineResult> {
        // 1. Cache lookup. A broken cache must not take the pipeline down,
        //    so errors degrade to a miss.
        let key = cache_key(query);
        match self.cache.get(&key).await {
            Ok(Some(answer)) => {
                tracing::info!("Cache hit, skipping retrieval and generation");
                return Ok(PipelineResult {
                    answer,
                    cache_status: CacheStatus::Hit,
                });
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache lookup failed, proceeding as miss: {}", e),
        }

        // 2. Route the query. An empty selection is not an error; the
        //    generator still runs against an empty context.
        let selected = route(query);
        tracing::info!(sources = ?selected, "Routed query");

        // 3. Fetch each selected source. Fetches run concurrently but the
        //    result order is the selection order, not completion order.
        let fetches = selected.iter().map(|kind| self.fetch_source(*kind, query));
        let results: Vec<(SourceKind, Vec<RetrievedRecord>)> = join_all(fetches).await;

        // 4. Assemble the labeled, size-capped context.
        let context = assemble(&results);
        tracing::debug!("Assembled context ({} chars)", context.chars().count());

        // 5. Generate. This is the one stage with no fallback.
        let request = self.build_request(&context, query);
        let response = self.llm.complete(&request).await?;
        let answer = response.content;

        // 6. Store the answer; a failed write is logged and otherwise ignored.
        if let Err(e) = self.cache.set(&key, &answer, self.cache_ttl).await {
            tracing::warn!("Failed to cache answer: {}", e);
        }

        Ok(PipelineResult {
            answer,
            cache_status: CacheStatus::Miss,
        })
    }

    /// Fetch one source, degrading any failure to an empty record set.
    async fn fetch_source(
        &self,
        kind: SourceKind,
        query: &str,
    ) -> (SourceKind, Vec<RetrievedRecord>) {
        let Some(connector) = self.connector_for(kind) else {
            tracing::warn!(source = %kind, "No connector registered, treating as empty");
            return (kind, Vec::new());
        };

        match connector.fetch(query, self.fetch_limit).await {
            Ok(records) => {
                tracing::info!(source = %kind, records = records.len(), "Fetched source");
                (kind, records)
            }
            Err(e) => {
                tracing::warn!(source = %kind, "Source failed, treating as empty: {}", e);
                (kind, Vec::new())
            }
        }
    }

    fn connector_for(&self, kind: SourceKind) -> Option<&Arc<dyn Connector>> {
        self.connectors.iter().find(|c| c.kind() == kind)
    }

    /// Build the generation request: fixed instruction, context blocks, and
    /// the original (unnormalized) query text.
    fn build_request(&self, context: &str, query: &str) -> LlmRequest {
        let prompt = format!("Context:\n{}\n\nQuestion:\n{}", context, query);

        LlmRequest::new(prompt, &self.model)
            .with_system(SYSTEM_PROMPT)
            .with_temperature(0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use tributary_llm::MockClient;

    #[test]
    fn test_build_request_carries_context_and_query() {
        let pipeline = Pipeline::new(
            Arc::new(MemoryCache::new()),
            Arc::new(MockClient::new()),
            "test-model",
        );

        let request = pipeline.build_request("<PG_USERS>\nrow\n</PG_USERS>", "find user_10");
        assert!(request.prompt.contains("<PG_USERS>"));
        assert!(request.prompt.contains("find user_10"));
        assert!(request.system.is_some());
        assert_eq!(request.model, "test-model");
    }

    #[test]
    fn test_builder_overrides() {
        let pipeline = Pipeline::new(
            Arc::new(MemoryCache::new()),
            Arc::new(MockClient::new()),
            "test-model",
        )
        .with_fetch_limit(7)
        .with_cache_ttl(Duration::from_secs(10));

        assert_eq!(pipeline.fetch_limit, 7);
        assert_eq!(pipeline.cache_ttl, Duration::from_secs(10));
    }
}
