//! Tributary retrieval pipeline.
//!
//! The orchestration core: a query is checked against the answer cache,
//! routed to the data sources whose keywords it mentions, bounded record
//! sets are fetched from each, merged into one size-capped labeled context,
//! and handed to an LLM to synthesize an answer that is then cached.
//!
//! Connectors, the cache, and the generator are capability seams
//! ([`Connector`], [`AnswerCache`], `LlmClient`); the pipeline owns only the
//! sequencing and the degradation policy between them.

pub mod cache;
pub mod connector;
pub mod connectors;
pub mod context;
pub mod pipeline;
pub mod router;
pub mod sources;

// Re-export the main surface
pub use cache::{cache_key, AnswerCache, MemoryCache, RedisCache};
pub use connector::Connector;
pub use context::{assemble, MAX_CONTEXT_CHARS};
pub use pipeline::{CacheStatus, Pipeline, PipelineResult};
pub use router::route;
pub use sources::{RetrievedRecord, SourceKind};
