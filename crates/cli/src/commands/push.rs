//! Push command handler.
//!
//! Validates every record of a local store and publishes the valid ones to
//! the registry as `{owner}/{name}`. Invalid records are reported and the
//! batch continues.

use crate::commands::output::{print_outcome, print_section_header, print_status, print_warning};
use clap::Args;
use promptsync_core::{config::AppConfig, AppError, AppResult, HubCredentials};
use promptsync_hub::{create_client, HubClient, HubPrompt, PromptMessage, PushRequest};
use promptsync_prompt::conventions::MIN_TECHNIQUES;
use promptsync_prompt::{build_prompt, load_store, validate, PromptRecord, StoreEntry};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Validate a local YAML store and publish it to the registry
#[derive(Args, Debug)]
pub struct PushCommand {
    /// Store file to publish (default: configured push source)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Publish prompts as private
    #[arg(long)]
    pub private: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options shared by every record of one push run.
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Namespace prompts are published under
    pub owner: String,

    /// Publish publicly
    pub is_public: bool,
}

/// A record counted as pushed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushedPrompt {
    pub name: String,
    pub repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// A record rejected by validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedPrompt {
    pub name: String,
    pub errors: Vec<String>,
}

/// Per-record outcome of a push run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PushSummary {
    pub pushed: Vec<PushedPrompt>,
    pub failed: Vec<FailedPrompt>,
    pub skipped: Vec<String>,
}

impl PushSummary {
    /// Ok only when no record failed validation.
    pub fn status(&self) -> AppResult<()> {
        if self.failed.is_empty() {
            return Ok(());
        }

        let names: Vec<&str> = self.failed.iter().map(|f| f.name.as_str()).collect();
        Err(AppError::Validation(format!(
            "{} of {} prompt(s) failed validation: {}",
            self.failed.len(),
            self.pushed.len() + self.failed.len(),
            names.join(", ")
        )))
    }
}

impl PushCommand {
    /// Execute the push command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing push command");
        tracing::debug!("Push options: {:?}", self);

        print_section_header("PUSHING PROMPTS TO THE PROMPT HUB");

        let summary = match self.run(config).await {
            Ok(summary) => summary,
            Err(e) => {
                print_outcome(false, &format!("Push failed: {}", e));
                return Err(e);
            }
        };

        if self.json {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        }

        let status = summary.status();
        match &status {
            Ok(()) => print_outcome(
                true,
                &format!("Pushed {} prompt(s)", summary.pushed.len()),
            ),
            Err(_) => print_outcome(
                false,
                &format!(
                    "Partial push: {} pushed, {} failed",
                    summary.pushed.len(),
                    summary.failed.len()
                ),
            ),
        }

        status
    }

    async fn run(&self, config: &AppConfig) -> AppResult<PushSummary> {
        let credentials = HubCredentials::from_env()?;
        tracing::debug!("Using credentials: {:?}", credentials);

        let client = create_client(
            &config.hub.provider,
            config.hub.endpoint.as_deref(),
            Some(credentials.api_key.as_str()),
        )
        .map_err(AppError::Config)?;

        let source = config.resolve(self.source.as_deref().unwrap_or(config.push.source.as_path()));
        let options = PushOptions {
            owner: credentials.owner().to_string(),
            is_public: config.push.public && !self.private,
        };

        push_store(client.as_ref(), &source, &options).await
    }
}

/// Load the store at `source` and push each of its records in file order.
///
/// Fails when the store cannot be loaded or holds no prompt records;
/// per-record problems are collected in the summary.
pub async fn push_store(
    client: &dyn HubClient,
    source: &Path,
    options: &PushOptions,
) -> AppResult<PushSummary> {
    println!("📂 Reading prompts from: {}", source.display());

    let store = load_store(source)?;
    if store.is_empty() {
        return Err(AppError::Prompt(format!(
            "No prompts found in {}",
            source.display()
        )));
    }

    let mut summary = PushSummary::default();

    for entry in store.entries() {
        let (name, record) = match entry {
            StoreEntry::Record { name, record } => (name, record),
            StoreEntry::Invalid { name, error } => {
                println!("\n📤 Processing: {}", name);
                print_status(false, &format!("Unreadable record: {}", error));
                summary.failed.push(FailedPrompt {
                    name,
                    errors: vec![format!("Invalid record: {}", error)],
                });
                continue;
            }
            StoreEntry::NotARecord { name } => {
                tracing::warn!("Skipping '{}': not a prompt record", name);
                summary.skipped.push(name);
                continue;
            }
        };

        println!("\n📤 Processing: {}", name);

        let validation = validate(&record);
        if !validation.is_valid {
            print_status(false, "Validation failed:");
            for error in &validation.errors {
                println!("      - {}", error);
            }
            summary.failed.push(FailedPrompt {
                name,
                errors: validation.errors,
            });
            continue;
        }

        if record.techniques_applied.len() < MIN_TECHNIQUES {
            print_warning(&format!(
                "Only {} technique(s) listed in techniques_applied (expected at least {})",
                record.techniques_applied.len(),
                MIN_TECHNIQUES
            ));
        }

        summary
            .pushed
            .push(push_record(client, &name, &record, options).await?);
    }

    if summary.pushed.is_empty() && summary.failed.is_empty() {
        return Err(AppError::Prompt(format!(
            "No prompt records found in {}",
            source.display()
        )));
    }

    Ok(summary)
}

/// Publish one validated record.
///
/// A publish error is logged and the record still counts as pushed: the
/// registry reports errors on some publishes that did go through (e.g. an
/// unchanged manifest). This masks real failures too.
async fn push_record(
    client: &dyn HubClient,
    name: &str,
    record: &PromptRecord,
    options: &PushOptions,
) -> AppResult<PushedPrompt> {
    let built = build_prompt(name, record)?;
    let repo = format!("{}/{}", options.owner, name);

    let prompt = HubPrompt::chat(
        vec![
            PromptMessage::system(built.system),
            PromptMessage::human(built.user),
        ],
        built.metadata.input_variables,
    );

    let mut request = PushRequest::new(repo.as_str(), prompt)
        .with_tags(built.metadata.tags)
        .with_public(options.is_public);
    if let Some(description) = built.metadata.description {
        request = request.with_description(description);
    }

    match client.push(&request).await {
        Ok(url) => {
            print_status(true, &format!("Pushed to {}", url));
            Ok(PushedPrompt {
                name: name.to_string(),
                repo,
                url: Some(url),
                warning: None,
            })
        }
        Err(e) => {
            tracing::warn!("Publish of '{}' reported an error: {}", repo, e);
            print_warning(&format!(
                "Registry reported an error, counting as pushed: {}",
                e
            ));
            Ok(PushedPrompt {
                name: name.to_string(),
                repo,
                url: None,
                warning: Some(e.to_string()),
            })
        }
    }
}
