//! LLM integration crate for the Tributary pipeline.
//!
//! Provider-agnostic abstraction for the generation step of the pipeline.
//! Providers are exposed through a unified trait-based interface.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **OpenAI**: Chat completions API
//! - **Mock**: Deterministic offline generator for tests and dry runs
//!
//! # Example
//! ```no_run
//! use tributary_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hello, world!", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{MockClient, OllamaClient, OpenAiClient};
