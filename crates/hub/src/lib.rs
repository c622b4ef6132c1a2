//! Prompt registry integration crate for promptsync.
//!
//! This crate provides a provider-agnostic abstraction for pulling prompt
//! templates from, and pushing them to, a hosted prompt registry.
//!
//! # Providers
//! - **LangSmith**: LangSmith Prompt Hub (default)
//!
//! # Example
//! ```no_run
//! use promptsync_hub::{HubClient, providers::LangSmithClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LangSmithClient::new("lsv2_...");
//! let prompt = client.pull("bug_to_user_story_v1").await?;
//! println!("{}", prompt.content());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod manifest;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{HubClient, HubPrompt, PushRequest};
pub use factory::create_client;
pub use providers::LangSmithClient;
pub use types::{MessageRole, PromptMessage, ProviderType};
