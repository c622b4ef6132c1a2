//! Content conventions for finished prompts.
//!
//! These go beyond structural validation: a publishable prompt should define
//! a persona, demand an output format, carry few-shot examples, be free of
//! placeholder markers and list the prompting techniques it applies.

use crate::types::PromptRecord;
use std::fmt;

/// Minimum trimmed length of a system prompt, exclusive.
pub const MIN_SYSTEM_PROMPT_CHARS: usize = 50;

/// Minimum number of applied techniques.
pub const MIN_TECHNIQUES: usize = 2;

/// Phrases that show the system prompt defines a persona.
pub const PERSONA_KEYWORDS: &[&str] = &[
    "você é um",
    "seu papel",
    "sua responsabilidade",
    "especializado em",
    "product manager",
    "assistente",
    "avaliador",
];

/// Phrases that show the system prompt demands an output format.
pub const FORMAT_KEYWORDS: &[&str] = &[
    "user story",
    "como ",
    "eu quero",
    "para que",
    "critérios de aceitação",
    "estrutura",
];

/// Markers of unfinished text.
pub const FORBIDDEN_PLACEHOLDERS: &[&str] = &["[TODO]", "TODO:", "[TBD]", "TBD:", "[FIXME]"];

/// The individual convention checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConventionCheck {
    SystemPrompt,
    Persona,
    OutputFormat,
    FewShotExamples,
    NoPlaceholders,
    MinimumTechniques,
}

impl ConventionCheck {
    pub const ALL: [ConventionCheck; 6] = [
        ConventionCheck::SystemPrompt,
        ConventionCheck::Persona,
        ConventionCheck::OutputFormat,
        ConventionCheck::FewShotExamples,
        ConventionCheck::NoPlaceholders,
        ConventionCheck::MinimumTechniques,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemPrompt => "system-prompt",
            Self::Persona => "persona",
            Self::OutputFormat => "output-format",
            Self::FewShotExamples => "few-shot-examples",
            Self::NoPlaceholders => "no-placeholders",
            Self::MinimumTechniques => "minimum-techniques",
        }
    }

    /// Run this check against a record.
    pub fn run(&self, record: &PromptRecord) -> Result<(), String> {
        match self {
            Self::SystemPrompt => check_system_prompt(record),
            Self::Persona => check_persona(record),
            Self::OutputFormat => check_output_format(record),
            Self::FewShotExamples => check_few_shot_examples(record),
            Self::NoPlaceholders => check_no_placeholders(record),
            Self::MinimumTechniques => check_minimum_techniques(record),
        }
    }
}

impl fmt::Display for ConventionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed convention check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionViolation {
    pub check: ConventionCheck,
    pub message: String,
}

/// Run every convention check, returning the violations in check order.
pub fn check_conventions(record: &PromptRecord) -> Vec<ConventionViolation> {
    ConventionCheck::ALL
        .iter()
        .filter_map(|check| {
            check.run(record).err().map(|message| ConventionViolation {
                check: *check,
                message,
            })
        })
        .collect()
}

pub fn check_system_prompt(record: &PromptRecord) -> Result<(), String> {
    let system = match record.system_prompt.as_deref() {
        Some(system) => system.trim(),
        None => return Err("Field 'system_prompt' not found".to_string()),
    };

    if system.is_empty() {
        return Err("Field 'system_prompt' is empty".to_string());
    }

    let chars = system.chars().count();
    if chars <= MIN_SYSTEM_PROMPT_CHARS {
        return Err(format!(
            "system_prompt is too short ({} characters, needs more than {})",
            chars, MIN_SYSTEM_PROMPT_CHARS
        ));
    }

    Ok(())
}

pub fn check_persona(record: &PromptRecord) -> Result<(), String> {
    if contains_any(record.system_text(), PERSONA_KEYWORDS) {
        Ok(())
    } else {
        Err("No persona defined; start the system prompt with \"You are a...\"".to_string())
    }
}

pub fn check_output_format(record: &PromptRecord) -> Result<(), String> {
    if contains_any(record.system_text(), FORMAT_KEYWORDS) {
        Ok(())
    } else {
        Err("The prompt must specify the expected output format (user story)".to_string())
    }
}

pub fn check_few_shot_examples(record: &PromptRecord) -> Result<(), String> {
    if record.examples.is_empty() {
        return Err("At least one few-shot example is required".to_string());
    }

    for (idx, example) in record.examples.iter().enumerate() {
        match example.input.as_deref() {
            None => return Err(format!("Example {} has no 'input' field", idx)),
            Some(input) if input.trim().is_empty() => {
                return Err(format!("Example {} has an empty input", idx))
            }
            Some(_) => {}
        }
        match example.output.as_deref() {
            None => return Err(format!("Example {} has no 'output' field", idx)),
            Some(output) if output.trim().is_empty() => {
                return Err(format!("Example {} has an empty output", idx))
            }
            Some(_) => {}
        }
    }

    Ok(())
}

pub fn check_no_placeholders(record: &PromptRecord) -> Result<(), String> {
    let full_text = format!(
        "{}{}{}",
        record.system_text(),
        record.user_text(),
        record.description_text()
    );

    match FORBIDDEN_PLACEHOLDERS
        .iter()
        .find(|pattern| full_text.contains(**pattern))
    {
        Some(pattern) => Err(format!("Unfinished placeholder found: {}", pattern)),
        None => Ok(()),
    }
}

pub fn check_minimum_techniques(record: &PromptRecord) -> Result<(), String> {
    let count = record.techniques_applied.len();
    if count >= MIN_TECHNIQUES {
        Ok(())
    } else {
        Err(format!(
            "At least {} techniques required, found {}",
            MIN_TECHNIQUES, count
        ))
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}
