//! Prompt types for promptsync.
//!
//! This module defines the domain entities for the prompt store.

use serde::{Deserialize, Serialize};

/// Provenance tag written by pull.
pub const HUB_SOURCE: &str = "langsmith_hub";

/// Human turn used when a record has no `user_prompt`.
pub const DEFAULT_USER_PROMPT: &str = "{bug_report}";

/// A prompt record as stored in YAML.
///
/// Scalar fields are optional so that an absent key can be told apart from
/// an empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Prompt name (mirrors the store key)
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// What the prompt does
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Instruction content sent as the system turn
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub system_prompt: Option<String>,

    /// Human turn template
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_prompt: Option<String>,

    /// Free-form version label (e.g. "v1")
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    /// Prompting techniques used by the prompt
    #[serde(
        default,
        deserialize_with = "scalar::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub techniques_applied: Vec<String>,

    /// Few-shot examples embedded in the prompt
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<FewShotExample>,

    /// Extra registry tags
    #[serde(
        default,
        deserialize_with = "scalar::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    /// Provenance tag
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,

    /// When the record was pulled (ISO-8601)
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pulled_at: Option<String>,
}

/// An input/output pair demonstrating the expected behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FewShotExample {
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub input: Option<String>,

    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub output: Option<String>,
}

impl FewShotExample {
    /// Create a complete example.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
            output: Some(output.into()),
        }
    }
}

impl PromptRecord {
    /// `system_prompt`, or an empty string when absent.
    pub fn system_text(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or_default()
    }

    /// `user_prompt`, or an empty string when absent.
    pub fn user_text(&self) -> &str {
        self.user_prompt.as_deref().unwrap_or_default()
    }

    /// `description`, or an empty string when absent.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// The human turn to publish, falling back to [`DEFAULT_USER_PROMPT`].
    pub fn user_turn(&self) -> &str {
        match self.user_prompt.as_deref() {
            Some(user) if !user.trim().is_empty() => user,
            _ => DEFAULT_USER_PROMPT,
        }
    }
}

/// Lenient readers for hand-written YAML: numbers and booleans are taken as
/// their text (`version: 2` reads as `"2"`). Sequences and mappings are
/// still rejected where a string is expected.
mod scalar {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_yaml::Value;

    pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => to_text(value).map(Some),
        }
    }

    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            Value::Sequence(items) => items.into_iter().map(to_text).collect(),
            other => Err(D::Error::custom(format!(
                "expected a list of strings, found {}",
                kind(&other)
            ))),
        }
    }

    fn to_text<E: Error>(value: Value) -> Result<String, E> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(E::custom(format!("expected a string, found {}", kind(&other)))),
        }
    }

    fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
            Value::Tagged(_) => "a tagged value",
        }
    }
}

/// A fully built two-turn prompt ready to publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message
    pub system: String,

    /// Human message
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata attached to a published prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Store key the prompt was built from
    #[serde(rename = "sourcePromptName")]
    pub source_prompt_name: String,

    /// Repository description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Registry tags (explicit tags followed by applied techniques)
    pub tags: Vec<String>,

    /// Template variables referenced by either turn
    #[serde(rename = "inputVariables")]
    pub input_variables: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization() {
        let yaml = r#"
description: Converts bug reports into user stories
system_prompt: You are a product manager.
user_prompt: "{bug_report}"
version: v2
techniques_applied:
  - Few-shot Learning
  - Role Prompting
examples:
  - input: Login fails
    output: As a user, I want to log in
unknown_field: ignored
"#;

        let record: PromptRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.version.as_deref(), Some("v2"));
        assert_eq!(record.techniques_applied.len(), 2);
        assert_eq!(record.examples[0].input.as_deref(), Some("Login fails"));
        assert_eq!(record.name, None);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let record = PromptRecord {
            system_prompt: Some("Be brief.".to_string()),
            ..Default::default()
        };

        let yaml = serde_yaml::to_string(&record).unwrap();
        assert_eq!(yaml.trim(), "system_prompt: Be brief.");
    }

    #[test]
    fn test_scalar_fields_read_as_text() {
        let yaml = r#"
system_prompt: s
version: 2
user_prompt: true
techniques_applied: [Role Prompting, 3]
examples:
  - input: 1.5
    output: ok
"#;

        let record: PromptRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.version.as_deref(), Some("2"));
        assert_eq!(record.user_prompt.as_deref(), Some("true"));
        assert_eq!(record.techniques_applied, vec!["Role Prompting", "3"]);
        assert_eq!(record.examples[0].input.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let record: PromptRecord =
            serde_yaml::from_str("version: ~\ntags: ~\nsystem_prompt: s\n").unwrap();
        assert_eq!(record.version, None);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_wrongly_shaped_fields_are_rejected() {
        let err = serde_yaml::from_str::<PromptRecord>("techniques_applied: Role Prompting\n")
            .unwrap_err();
        assert!(err.to_string().contains("expected a list of strings"));

        let err = serde_yaml::from_str::<PromptRecord>("version: [1, 2]\n").unwrap_err();
        assert!(err.to_string().contains("expected a string, found a sequence"));
    }

    #[test]
    fn test_user_turn_fallback() {
        let mut record = PromptRecord::default();
        assert_eq!(record.user_turn(), DEFAULT_USER_PROMPT);

        record.user_prompt = Some("  ".to_string());
        assert_eq!(record.user_turn(), DEFAULT_USER_PROMPT);

        record.user_prompt = Some("Report: {report}".to_string());
        assert_eq!(record.user_turn(), "Report: {report}");
    }
}
