//! Command handlers for the Tributary CLI.

mod ask;
mod route;
mod seed;

pub use ask::AskCommand;
pub use route::RouteCommand;
pub use seed::SeedCommand;

use std::sync::Arc;
use std::time::Duration;
use tributary_core::{AppResult, PipelineConfig};
use tributary_llm::create_client;
use tributary_pipeline::connectors::{
    CountriesApiConnector, MongoDocsConnector, PgProjectsConnector, PgUsersConnector,
};
use tributary_pipeline::{AnswerCache, MemoryCache, Pipeline, RedisCache};

/// Wire a pipeline from the configuration.
///
/// Sources whose backend is not configured are simply not registered; the
/// pipeline answers from whatever is available. A missing or unreachable
/// Redis degrades to the in-process cache.
pub(crate) async fn build_pipeline(config: &PipelineConfig) -> AppResult<Pipeline> {
    config.validate()?;

    let cache: Arc<dyn AnswerCache> = match config.redis_url.as_deref() {
        Some(url) => match RedisCache::connect(url).await {
            Ok(cache) => Arc::new(cache),
            Err(e) => {
                tracing::warn!("Redis unavailable, using in-process cache: {}", e);
                Arc::new(MemoryCache::new())
            }
        },
        None => {
            tracing::info!("No REDIS_URL configured, using in-process cache");
            Arc::new(MemoryCache::new())
        }
    };

    let llm = create_client(
        &config.provider,
        config.llm_endpoint.as_deref(),
        config.api_key.as_deref(),
    )?;

    let mut pipeline = Pipeline::new(cache, llm, config.model.clone())
        .with_fetch_limit(config.fetch_limit)
        .with_cache_ttl(Duration::from_secs(config.cache_ttl_secs));

    if let Some(url) = config.database_url.as_deref() {
        pipeline = pipeline
            .with_connector(Arc::new(PgUsersConnector::new(url)?))
            .with_connector(Arc::new(PgProjectsConnector::new(url)?));
    } else {
        tracing::warn!("DATABASE_URL not set; relational sources disabled");
    }

    if let Some(uri) = config.mongo_uri.as_deref() {
        let connector = MongoDocsConnector::connect(uri, config.mongo_db.clone()).await?;
        pipeline = pipeline.with_connector(Arc::new(connector));
    } else {
        tracing::warn!("MONGO_URI not set; document source disabled");
    }

    pipeline = pipeline.with_connector(Arc::new(CountriesApiConnector::new(
        config.countries_api_url.clone(),
    )));

    Ok(pipeline)
}
