//! Check command handler.
//!
//! Runs structural validation and the content conventions against local
//! records without contacting the registry.

use crate::commands::output::{print_outcome, print_section_header, print_status};
use clap::Args;
use promptsync_core::{config::AppConfig, AppError, AppResult};
use promptsync_prompt::{check_conventions, load_store, validate, PromptStore, StoreEntry};
use promptsync_prompt::{ConventionCheck, PromptRecord};
use std::path::PathBuf;

/// Check local prompts against the structural rules and content conventions
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Store file to check (default: configured push source)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Only check this prompt
    #[arg(short, long)]
    pub key: Option<String>,
}

/// Problems found in one record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordReport {
    pub name: String,
    pub problems: Vec<String>,
}

impl CheckCommand {
    /// Execute the check command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing check command");

        let path = config.resolve(self.file.as_deref().unwrap_or(config.push.source.as_path()));
        print_section_header(&format!("CHECKING {}", path.display()));

        let store = load_store(&path)?;
        let reports = check_store(&store, self.key.as_deref())?;

        let failing: Vec<&RecordReport> =
            reports.iter().filter(|r| !r.problems.is_empty()).collect();

        if failing.is_empty() {
            print_outcome(true, &format!("{} prompt(s) pass every check", reports.len()));
            Ok(())
        } else {
            print_outcome(
                false,
                &format!("{} of {} prompt(s) have problems", failing.len(), reports.len()),
            );
            Err(AppError::Validation(format!(
                "Checks failed for: {}",
                failing
                    .iter()
                    .map(|r| r.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
    }
}

/// Check every record of `store`, or only `key` when given.
pub fn check_store(store: &PromptStore, key: Option<&str>) -> AppResult<Vec<RecordReport>> {
    let entries: Vec<StoreEntry> = match key {
        Some(key) => {
            let entry = store
                .entries()
                .into_iter()
                .find(|entry| entry.name() == key)
                .ok_or_else(|| AppError::Prompt(format!("No prompt record named '{}'", key)))?;
            if let StoreEntry::NotARecord { .. } = entry {
                return Err(AppError::Prompt(format!("'{}' is not a prompt record", key)));
            }
            vec![entry]
        }
        None => store.entries(),
    };

    let mut reports = Vec::new();
    for entry in entries {
        match entry {
            StoreEntry::Record { name, record } => reports.push(check_record(&name, &record)),
            StoreEntry::Invalid { name, error } => {
                println!("\n🔎 {}", name);
                print_status(false, &format!("Unreadable record: {}", error));
                reports.push(RecordReport {
                    name,
                    problems: vec![format!("Invalid record: {}", error)],
                });
            }
            StoreEntry::NotARecord { name } => {
                tracing::warn!("Skipping '{}': not a prompt record", name);
            }
        }
    }
    Ok(reports)
}

/// Run validation and every convention check on one record, printing a
/// status line per check.
pub fn check_record(name: &str, record: &PromptRecord) -> RecordReport {
    println!("\n🔎 {}", name);

    let mut problems = Vec::new();

    let validation = validate(record);
    print_status(validation.is_valid, "structure");
    problems.extend(validation.errors);

    let violations = check_conventions(record);
    for check in ConventionCheck::ALL {
        match violations.iter().find(|v| v.check == check) {
            Some(violation) => {
                print_status(false, &format!("{}: {}", check, violation.message));
                problems.push(format!("{}: {}", check, violation.message));
            }
            None => print_status(true, check.as_str()),
        }
    }

    RecordReport {
        name: name.to_string(),
        problems,
    }
}
