//! Prompt builder: turns a stored record into a two-turn template.

use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptRecord};
use promptsync_core::{AppError, AppResult};

/// Build the system + human template published for a record.
///
/// The human turn falls back to `{bug_report}` when the record has no
/// `user_prompt`. Tags are the record's explicit tags followed by its
/// applied techniques, without duplicates.
///
/// # Example
/// ```
/// use promptsync_prompt::{build_prompt, PromptRecord};
///
/// let record = PromptRecord {
///     system_prompt: Some("You are a product manager.".to_string()),
///     ..Default::default()
/// };
/// let built = build_prompt("bug_to_user_story", &record).unwrap();
/// assert_eq!(built.user, "{bug_report}");
/// assert_eq!(built.metadata.input_variables, vec!["bug_report"]);
/// ```
pub fn build_prompt(name: &str, record: &PromptRecord) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", name);

    let system = match record.system_prompt.as_deref() {
        Some(system) if !system.trim().is_empty() => system.to_string(),
        _ => {
            return Err(AppError::Prompt(format!(
                "Prompt '{}' has no system_prompt",
                name
            )))
        }
    };
    let user = record.user_turn().to_string();

    let mut input_variables = extract_variables(&system);
    for variable in extract_variables(&user) {
        if !input_variables.contains(&variable) {
            input_variables.push(variable);
        }
    }

    let mut tags: Vec<String> = Vec::new();
    for tag in record.tags.iter().chain(record.techniques_applied.iter()) {
        if !tag.trim().is_empty() && !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }

    let description = record
        .description
        .as_ref()
        .filter(|d| !d.trim().is_empty())
        .cloned();

    Ok(BuiltPrompt {
        system,
        user,
        metadata: BuiltPromptMetadata {
            source_prompt_name: name.to_string(),
            description,
            tags,
            input_variables,
        },
    })
}

/// Collect `{variable}` names from an f-string style template, in order of
/// first appearance. `{{` and `}}` are literal braces.
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                let name = name.trim().to_string();
                if closed && is_identifier(&name) && !variables.contains(&name) {
                    variables.push(name);
                }
            }
            _ => {}
        }
    }

    variables
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(system: &str, user: Option<&str>) -> PromptRecord {
        PromptRecord {
            description: Some("desc".to_string()),
            system_prompt: Some(system.to_string()),
            user_prompt: user.map(str::to_string),
            version: Some("v1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_variables() {
        assert_eq!(
            extract_variables("Hi {name}, see {report} and {name} again"),
            vec!["name", "report"]
        );
        assert!(extract_variables("Literal {{braces}} only").is_empty());
        assert!(extract_variables("JSON-ish { \"a\": 1 } and {unclosed").is_empty());
    }

    #[test]
    fn test_build_uses_default_user_turn() {
        let built = build_prompt("p", &record("You are a PM.", None)).unwrap();
        assert_eq!(built.system, "You are a PM.");
        assert_eq!(built.user, "{bug_report}");
        assert_eq!(built.metadata.input_variables, vec!["bug_report"]);
        assert_eq!(built.metadata.source_prompt_name, "p");
    }

    #[test]
    fn test_build_merges_variables_and_tags() {
        let mut rec = record("Context: {product}", Some("{bug_report} for {product}"));
        rec.tags = vec!["bugs".to_string(), "Few-shot".to_string()];
        rec.techniques_applied = vec!["Few-shot".to_string(), "Role Prompting".to_string()];

        let built = build_prompt("p", &rec).unwrap();
        assert_eq!(built.metadata.input_variables, vec!["product", "bug_report"]);
        assert_eq!(
            built.metadata.tags,
            vec!["bugs", "Few-shot", "Role Prompting"]
        );
        assert_eq!(built.metadata.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_build_requires_system_prompt() {
        let rec = PromptRecord::default();
        assert!(matches!(build_prompt("p", &rec), Err(AppError::Prompt(_))));
    }
}
