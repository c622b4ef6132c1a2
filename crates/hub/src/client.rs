//! Registry client abstraction and request/response types.

use crate::types::PromptMessage;
use promptsync_core::AppResult;
use serde::{Deserialize, Serialize};

/// A prompt template as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HubPrompt {
    /// Single string template
    Text {
        template: String,
        input_variables: Vec<String>,
    },

    /// Ordered chat turns
    Chat {
        messages: Vec<PromptMessage>,
        input_variables: Vec<String>,
    },

    /// A manifest of a shape this crate does not model, kept as-is
    Raw { manifest: serde_json::Value },
}

impl HubPrompt {
    /// Build a chat template from its turns.
    pub fn chat(messages: Vec<PromptMessage>, input_variables: Vec<String>) -> Self {
        Self::Chat {
            messages,
            input_variables,
        }
    }

    /// Instruction content of the template.
    ///
    /// A text template yields its template string. A chat template yields
    /// every turn rendered as `"{role}: {template}"`, separated by blank lines.
    /// A raw manifest yields its JSON text.
    pub fn content(&self) -> String {
        match self {
            Self::Text { template, .. } => template.clone(),
            Self::Chat { messages, .. } => messages
                .iter()
                .map(|m| format!("{}: {}", m.role, m.template))
                .collect::<Vec<_>>()
                .join("\n\n"),
            Self::Raw { manifest } => manifest.to_string(),
        }
    }

    pub fn input_variables(&self) -> &[String] {
        match self {
            Self::Text {
                input_variables, ..
            }
            | Self::Chat {
                input_variables, ..
            } => input_variables,
            Self::Raw { .. } => &[],
        }
    }
}

/// A request to publish a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Namespaced repository, `owner/name`
    pub repo: String,

    /// Template to publish
    pub prompt: HubPrompt,

    /// Repository description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Repository tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Publish publicly
    #[serde(default)]
    pub is_public: bool,
}

impl PushRequest {
    /// Create a new private push request.
    pub fn new(repo: impl Into<String>, prompt: HubPrompt) -> Self {
        Self {
            repo: repo.into(),
            prompt,
            description: None,
            tags: Vec::new(),
            is_public: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Trait for prompt registries.
///
/// Calls are issued one at a time; implementations do not retry.
#[async_trait::async_trait]
pub trait HubClient: Send + Sync {
    /// Get the provider name (e.g., "langsmith").
    fn provider_name(&self) -> &str;

    /// Fetch the latest version of a prompt.
    ///
    /// # Arguments
    /// * `name` - Prompt identifier, `name`, `owner/name` or `owner/name:commit`
    async fn pull(&self, name: &str) -> AppResult<HubPrompt>;

    /// Publish a prompt, returning its URL in the registry.
    async fn push(&self, request: &PushRequest) -> AppResult<String>;
}
