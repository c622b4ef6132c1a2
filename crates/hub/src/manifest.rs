//! LangChain serialized-manifest codec.
//!
//! The hub stores prompts as LangChain "constructor" objects:
//! `{"lc": 1, "type": "constructor", "id": [..., "ClassName"], "kwargs": {...}}`.
//! Text and chat templates are decoded into typed prompts; any other shape
//! is kept as a raw manifest.

use crate::client::HubPrompt;
use crate::types::{MessageRole, PromptMessage};
use promptsync_core::{AppError, AppResult};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct Constructor {
    #[serde(default)]
    id: Vec<String>,
    #[serde(default)]
    kwargs: Value,
}

impl Constructor {
    fn class_name(&self) -> &str {
        self.id.last().map(String::as_str).unwrap_or_default()
    }
}

/// Decode a manifest into a typed prompt.
pub fn decode_manifest(manifest: &Value) -> AppResult<HubPrompt> {
    let constructor: Constructor = match serde_json::from_value(manifest.clone()) {
        Ok(constructor) => constructor,
        Err(e) => {
            tracing::warn!("Keeping non-constructor manifest as raw JSON: {}", e);
            return Ok(raw(manifest));
        }
    };

    match constructor.class_name() {
        "PromptTemplate" => Ok(HubPrompt::Text {
            template: string_field(&constructor.kwargs, "template")?,
            input_variables: input_variables(&constructor.kwargs),
        }),
        "ChatPromptTemplate" | "StructuredPrompt" => {
            let messages = constructor
                .kwargs
                .get("messages")
                .and_then(Value::as_array)
                .ok_or_else(|| AppError::Hub("Chat manifest has no messages".to_string()))
                .and_then(|messages| {
                    messages
                        .iter()
                        .map(decode_message)
                        .collect::<AppResult<Vec<_>>>()
                });

            match messages {
                Ok(messages) => Ok(HubPrompt::Chat {
                    messages,
                    input_variables: input_variables(&constructor.kwargs),
                }),
                Err(e) => {
                    tracing::warn!("Keeping chat manifest as raw JSON: {}", e);
                    Ok(raw(manifest))
                }
            }
        }
        other => {
            tracing::warn!("Keeping '{}' manifest as raw JSON", other);
            Ok(raw(manifest))
        }
    }
}

fn raw(manifest: &Value) -> HubPrompt {
    HubPrompt::Raw {
        manifest: manifest.clone(),
    }
}

fn decode_message(message: &Value) -> AppResult<PromptMessage> {
    let constructor: Constructor = serde_json::from_value(message.clone())
        .map_err(|e| AppError::Hub(format!("Invalid message in manifest: {}", e)))?;
    let class = constructor.class_name();

    if class == "MessagesPlaceholder" {
        let variable = string_field(&constructor.kwargs, "variable_name")?;
        return Ok(PromptMessage::placeholder(&variable));
    }

    // SystemMessagePromptTemplate, HumanMessagePromptTemplate, ...
    if let Some(prefix) = class.strip_suffix("MessagePromptTemplate") {
        let role = parse_role(prefix)?;
        let prompt = constructor
            .kwargs
            .get("prompt")
            .ok_or_else(|| AppError::Hub(format!("{} has no prompt", class)))?;
        let template = match decode_manifest(prompt)? {
            HubPrompt::Text { template, .. } => template,
            HubPrompt::Chat { .. } | HubPrompt::Raw { .. } => {
                return Err(AppError::Hub(format!(
                    "{} does not wrap a text template",
                    class
                )))
            }
        };
        return Ok(PromptMessage::new(role, template));
    }

    // Literal messages: SystemMessage, HumanMessage, AIMessage
    if let Some(prefix) = class.strip_suffix("Message") {
        let role = parse_role(prefix)?;
        return Ok(PromptMessage::new(
            role,
            string_field(&constructor.kwargs, "content")?,
        ));
    }

    Err(AppError::Hub(format!(
        "Unsupported message type in manifest: '{}'",
        class
    )))
}

fn parse_role(prefix: &str) -> AppResult<MessageRole> {
    MessageRole::parse(prefix)
        .ok_or_else(|| AppError::Hub(format!("Unsupported message role: '{}'", prefix)))
}

fn string_field(kwargs: &Value, field: &str) -> AppResult<String> {
    kwargs
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::Hub(format!("Manifest is missing '{}'", field)))
}

fn input_variables(kwargs: &Value) -> Vec<String> {
    kwargs
        .get("input_variables")
        .and_then(Value::as_array)
        .map(|vars| {
            vars.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Encode a typed prompt as a manifest.
pub fn encode_manifest(prompt: &HubPrompt) -> Value {
    match prompt {
        HubPrompt::Text {
            template,
            input_variables,
        } => prompt_template(template, input_variables),
        HubPrompt::Chat {
            messages,
            input_variables,
        } => {
            let messages: Vec<Value> = messages
                .iter()
                .map(|message| {
                    if let Some(variable) = message.placeholder_variable() {
                        return json!({
                            "lc": 1,
                            "type": "constructor",
                            "id": ["langchain", "prompts", "chat", "MessagesPlaceholder"],
                            "kwargs": {"variable_name": variable}
                        });
                    }
                    json!({
                        "lc": 1,
                        "type": "constructor",
                        "id": ["langchain", "prompts", "chat", message.role.template_class()],
                        "kwargs": {
                            "prompt": prompt_template(&message.template, input_variables)
                        }
                    })
                })
                .collect();

            json!({
                "lc": 1,
                "type": "constructor",
                "id": ["langchain", "prompts", "chat", "ChatPromptTemplate"],
                "kwargs": {
                    "input_variables": input_variables,
                    "messages": messages
                }
            })
        }
        HubPrompt::Raw { manifest } => manifest.clone(),
    }
}

fn prompt_template(template: &str, all_variables: &[String]) -> Value {
    // Each turn declares only the variables it references
    let variables: Vec<&String> = all_variables
        .iter()
        .filter(|var| template.contains(&format!("{{{}}}", var)))
        .collect();

    json!({
        "lc": 1,
        "type": "constructor",
        "id": ["langchain", "prompts", "prompt", "PromptTemplate"],
        "kwargs": {
            "input_variables": variables,
            "template": template,
            "template_format": "f-string"
        }
    })
}
