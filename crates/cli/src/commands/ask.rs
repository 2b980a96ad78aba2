//! Ask command handler.

use clap::Args;
use tributary_core::{AppResult, PipelineConfig};
use tributary_pipeline::route;

use crate::commands::build_pipeline;

/// Answer a question through the retrieval pipeline
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to answer
    pub query: String,

    /// Output as JSON (answer, cache status, selected sources)
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &PipelineConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let pipeline = build_pipeline(config).await?;
        let result = pipeline.answer(&self.query).await?;

        if self.json {
            let sources: Vec<&str> = route(&self.query).iter().map(|kind| kind.label()).collect();
            let output = serde_json::json!({
                "answer": result.answer,
                "cacheStatus": result.cache_status,
                "sources": sources,
                "provider": config.provider,
                "model": config.model,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", result.answer);
        }

        Ok(())
    }
}
