//! Structural validation of prompt records before they are published.

use crate::types::PromptRecord;

/// Fields every publishable record must define.
pub const REQUIRED_FIELDS: [&str; 4] = ["description", "system_prompt", "user_prompt", "version"];

/// Placeholder that marks unfinished prompt text.
pub const TODO_MARKER: &str = "[TODO]";

/// Result of structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub is_valid: bool,
    /// One human-readable message per violated rule.
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate the structure of a prompt record.
///
/// Every rule runs regardless of earlier failures:
/// 1. each required field is present,
/// 2. each present required field is non-blank,
/// 3. the system and user prompts contain no `[TODO]` marker.
pub fn validate(record: &PromptRecord) -> ValidationResult {
    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        match field_value(record, field) {
            None => errors.push(format!("Missing required field: {}", field)),
            Some(value) if value.trim().is_empty() => {
                errors.push(format!("Field '{}' is empty", field))
            }
            Some(_) => {}
        }
    }

    let combined = format!("{}{}", record.system_text(), record.user_text());
    if combined.contains(TODO_MARKER) {
        errors.push(format!(
            "Prompt still contains {} placeholders",
            TODO_MARKER
        ));
    }

    ValidationResult::from_errors(errors)
}

fn field_value<'a>(record: &'a PromptRecord, field: &str) -> Option<&'a str> {
    match field {
        "description" => record.description.as_deref(),
        "system_prompt" => record.system_prompt.as_deref(),
        "user_prompt" => record.user_prompt.as_deref(),
        "version" => record.version.as_deref(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> PromptRecord {
        PromptRecord {
            description: Some("Turns bug reports into user stories".to_string()),
            system_prompt: Some("You are a product manager.".to_string()),
            user_prompt: Some("{bug_report}".to_string()),
            version: Some("v2".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_record_is_valid() {
        let result = validate(&complete_record());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_each_missing_field_reported_once() {
        let result = validate(&PromptRecord::default());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Missing required field: description",
                "Missing required field: system_prompt",
                "Missing required field: user_prompt",
                "Missing required field: version",
            ]
        );
    }

    #[test]
    fn test_blank_fields_are_reported() {
        let mut record = complete_record();
        record.description = Some("   ".to_string());
        record.version = Some(String::new());

        let result = validate(&record);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Field 'description' is empty", "Field 'version' is empty"]
        );
    }

    #[test]
    fn test_todo_marker_in_user_prompt() {
        let mut record = complete_record();
        record.user_prompt = Some("[TODO] write the human turn".to_string());

        let result = validate(&record);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("[TODO]"));
    }

    #[test]
    fn test_todo_and_field_errors_accumulate() {
        let record = PromptRecord {
            system_prompt: Some("Draft [TODO]".to_string()),
            ..Default::default()
        };

        let result = validate(&record);
        assert!(!result.is_valid);
        // description, user_prompt, version missing + TODO marker
        assert_eq!(result.errors.len(), 4);
        assert!(result.errors.iter().any(|e| e.contains("[TODO]")));
    }

    #[test]
    fn test_technique_count_is_not_structural() {
        let mut record = complete_record();
        record.techniques_applied = vec!["Role Prompting".to_string()];

        assert!(validate(&record).is_valid);
    }
}
