//! Registry provider and message types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of one turn in a chat template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    Human,
    Ai,
    /// Slot filled with a list of messages at run time
    Placeholder,
}

impl MessageRole {
    /// Parse a role from a LangChain message class name prefix or role string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "system" => Some(Self::System),
            "human" | "user" => Some(Self::Human),
            "ai" | "assistant" => Some(Self::Ai),
            "placeholder" => Some(Self::Placeholder),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Human => "human",
            Self::Ai => "ai",
            Self::Placeholder => "placeholder",
        }
    }

    /// LangChain message template class for this role.
    pub fn template_class(&self) -> &'static str {
        match self {
            Self::System => "SystemMessagePromptTemplate",
            Self::Human => "HumanMessagePromptTemplate",
            Self::Ai => "AIMessagePromptTemplate",
            Self::Placeholder => "MessagesPlaceholder",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a chat template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub template: String,
}

impl PromptMessage {
    pub fn new(role: MessageRole, template: impl Into<String>) -> Self {
        Self {
            role,
            template: template.into(),
        }
    }

    pub fn system(template: impl Into<String>) -> Self {
        Self::new(MessageRole::System, template)
    }

    pub fn human(template: impl Into<String>) -> Self {
        Self::new(MessageRole::Human, template)
    }

    /// A placeholder turn; its template is the variable in braces.
    pub fn placeholder(variable: &str) -> Self {
        Self::new(MessageRole::Placeholder, format!("{{{}}}", variable))
    }

    /// Variable name of a placeholder turn.
    pub fn placeholder_variable(&self) -> Option<&str> {
        match self.role {
            MessageRole::Placeholder => Some(
                self.template
                    .trim_start_matches('{')
                    .trim_end_matches('}'),
            ),
            _ => None,
        }
    }
}

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    LangSmith,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "langsmith" | "langchain" => Some(Self::LangSmith),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LangSmith => "langsmith",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("langsmith"), Some(ProviderType::LangSmith));
        assert_eq!(ProviderType::parse("LangChain"), Some(ProviderType::LangSmith));
        assert_eq!(ProviderType::parse("ollama"), None);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(MessageRole::parse("System"), Some(MessageRole::System));
        assert_eq!(MessageRole::parse("user"), Some(MessageRole::Human));
        assert_eq!(MessageRole::parse("AI"), Some(MessageRole::Ai));
        assert_eq!(MessageRole::parse("tool"), None);
        assert_eq!(MessageRole::parse("placeholder"), Some(MessageRole::Placeholder));
    }

    #[test]
    fn test_placeholder_message() {
        let message = PromptMessage::placeholder("history");
        assert_eq!(message.template, "{history}");
        assert_eq!(message.placeholder_variable(), Some("history"));
        assert_eq!(PromptMessage::system("x").placeholder_variable(), None);
    }
}
