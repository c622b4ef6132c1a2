//! Pull command handler.
//!
//! Downloads the configured prompts from the registry into a local store.
//! The prompt list is all-or-nothing: one failed fetch aborts the run and
//! nothing is written.

use crate::commands::output::{print_outcome, print_section_header, print_status};
use clap::Args;
use promptsync_core::{config::AppConfig, AppError, AppResult, HubCredentials};
use promptsync_hub::{create_client, HubClient, HubPrompt};
use promptsync_prompt::{save_store, PromptRecord, PromptStore, HUB_SOURCE};
use std::path::{Path, PathBuf};

/// Version label given to pulled prompts.
const PULLED_VERSION: &str = "v1";

/// Pull prompts from the registry into a local YAML store
#[derive(Args, Debug)]
pub struct PullCommand {
    /// Prompt to pull (repeatable; replaces the configured list)
    #[arg(short, long = "prompt")]
    pub prompts: Vec<String>,

    /// Store file to write (default: configured pull output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Outcome of a successful pull.
#[derive(Debug, Clone, PartialEq)]
pub struct PullSummary {
    /// Prompt names written, in order
    pub pulled: Vec<String>,

    /// Store file that was written
    pub output: PathBuf,
}

impl PullCommand {
    /// Execute the pull command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing pull command");
        tracing::debug!("Pull options: {:?}", self);

        print_section_header("PULLING PROMPTS FROM THE PROMPT HUB");

        let result = self.run(config).await;
        match &result {
            Ok(summary) => print_outcome(
                true,
                &format!(
                    "Pulled {} prompt(s) into {}",
                    summary.pulled.len(),
                    summary.output.display()
                ),
            ),
            Err(e) => print_outcome(false, &format!("Pull failed: {}", e)),
        }

        result.map(|_| ())
    }

    async fn run(&self, config: &AppConfig) -> AppResult<PullSummary> {
        let credentials = HubCredentials::from_env()?;
        tracing::debug!("Using credentials: {:?}", credentials);

        let client = create_client(
            &config.hub.provider,
            config.hub.endpoint.as_deref(),
            Some(credentials.api_key.as_str()),
        )
        .map_err(AppError::Config)?;

        let names = if self.prompts.is_empty() {
            config.pull.prompts.clone()
        } else {
            self.prompts.clone()
        };
        let output = config.resolve(self.output.as_deref().unwrap_or(config.pull.output.as_path()));

        pull_prompts(client.as_ref(), &names, &output).await
    }
}

/// Fetch every prompt in `names`, in order, and write them to `output`.
///
/// The store is only written once every fetch has succeeded.
pub async fn pull_prompts(
    client: &dyn HubClient,
    names: &[String],
    output: &Path,
) -> AppResult<PullSummary> {
    if names.is_empty() {
        return Err(AppError::Config("No prompts configured to pull".to_string()));
    }

    let mut store = PromptStore::new();

    for name in names {
        println!("\n📥 Pulling: {}", name);

        let prompt = match client.pull(name).await {
            Ok(prompt) => prompt,
            Err(e) => {
                print_status(false, &format!("Failed to pull {}: {}", name, e));
                tracing::error!("Aborting pull after failure on '{}'", name);
                return Err(e);
            }
        };

        store.insert(name.as_str(), &record_from_hub(name, &prompt, pulled_at()))?;
        print_status(true, "Pulled");
    }

    println!("\n💾 Saving prompts to: {}", output.display());
    save_store(&store, output)?;
    print_status(true, "Store saved");

    Ok(PullSummary {
        pulled: names.to_vec(),
        output: output.to_path_buf(),
    })
}

/// Normalize a fetched template into the local record shape.
pub fn record_from_hub(name: &str, prompt: &HubPrompt, pulled_at: String) -> PromptRecord {
    PromptRecord {
        name: Some(name.to_string()),
        description: Some(format!("Prompt pulled from LangSmith Hub: {}", name)),
        system_prompt: Some(prompt.content()),
        version: Some(PULLED_VERSION.to_string()),
        source: Some(HUB_SOURCE.to_string()),
        pulled_at: Some(pulled_at),
        ..Default::default()
    }
}

fn pulled_at() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::FakeHub;
    use promptsync_hub::manifest::decode_manifest;
    use promptsync_hub::PromptMessage;
    use serde_json::json;
    use promptsync_prompt::load_store;
    use tempfile::TempDir;

    fn text(template: &str) -> HubPrompt {
        HubPrompt::Text {
            template: template.to_string(),
            input_variables: Vec::new(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_from_hub() {
        let record = record_from_hub("demo", &text("Be concise."), "2025-01-01T00:00:00".into());
        assert_eq!(record.name.as_deref(), Some("demo"));
        assert_eq!(
            record.description.as_deref(),
            Some("Prompt pulled from LangSmith Hub: demo")
        );
        assert_eq!(record.system_prompt.as_deref(), Some("Be concise."));
        assert_eq!(record.version.as_deref(), Some("v1"));
        assert_eq!(record.source.as_deref(), Some("langsmith_hub"));
        assert_eq!(record.user_prompt, None);
    }

    #[test]
    fn test_record_from_chat_prompt() {
        let prompt = HubPrompt::chat(
            vec![
                PromptMessage::system("You are a PM."),
                PromptMessage::human("{bug_report}"),
            ],
            vec!["bug_report".to_string()],
        );
        let record = record_from_hub("chat", &prompt, "now".into());
        assert_eq!(
            record.system_prompt.as_deref(),
            Some("system: You are a PM.\n\nhuman: {bug_report}")
        );
    }

    #[test]
    fn test_pulled_at_is_iso_8601() {
        let stamp = pulled_at();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[tokio::test]
    async fn test_pull_writes_all_prompts_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("prompts/raw_prompts.yml");
        let hub = FakeHub::new()
            .with_prompt("b", text("Second"))
            .with_prompt("a", text("First"));

        let summary = pull_prompts(&hub, &names(&["a", "b"]), &output)
            .await
            .unwrap();
        assert_eq!(summary.pulled, vec!["a", "b"]);

        let store = load_store(&output).unwrap();
        assert_eq!(store.names(), vec!["a", "b"]);
        assert_eq!(
            store.get("b").unwrap().system_prompt.as_deref(),
            Some("Second")
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("raw_prompts.yml");
        let hub = FakeHub::new().with_prompt("a", text("First"));

        let result = pull_prompts(&hub, &names(&["a", "b", "c"]), &output).await;
        assert!(matches!(result, Err(AppError::Hub(_))));
        assert!(!output.exists());
        // "c" is never requested once "b" fails
        assert_eq!(hub.pulled(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_previous_store_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("raw_prompts.yml");
        std::fs::write(&output, "old: {system_prompt: kept}\n").unwrap();
        let hub = FakeHub::new().with_prompt("a", text("First"));

        assert!(pull_prompts(&hub, &names(&["a", "b"]), &output).await.is_err());
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "old: {system_prompt: kept}\n"
        );
    }

    #[tokio::test]
    async fn test_pull_keeps_unsupported_manifest_as_json() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("raw_prompts.yml");
        let manifest = json!({
            "id": ["langchain", "prompts", "few_shot", "FewShotPromptTemplate"],
            "kwargs": {"prefix": "Examples:"}
        });
        let hub = FakeHub::new()
            .with_prompt("few_shot", decode_manifest(&manifest).unwrap())
            .with_prompt("plain", text("Plain"));

        pull_prompts(&hub, &names(&["few_shot", "plain"]), &output)
            .await
            .unwrap();

        let store = load_store(&output).unwrap();
        assert_eq!(store.names(), vec!["few_shot", "plain"]);
        assert_eq!(
            store.get("few_shot").unwrap().system_prompt,
            Some(manifest.to_string())
        );
    }

    #[tokio::test]
    async fn test_pull_chat_with_messages_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("raw_prompts.yml");
        let manifest = json!({
            "id": ["langchain", "prompts", "chat", "ChatPromptTemplate"],
            "kwargs": {
                "input_variables": ["history"],
                "messages": [
                    {"id": ["langchain_core", "messages", "SystemMessage"], "kwargs": {"content": "You are a PM."}},
                    {"id": ["langchain", "prompts", "chat", "MessagesPlaceholder"], "kwargs": {"variable_name": "history"}}
                ]
            }
        });
        let hub = FakeHub::new().with_prompt("chat", decode_manifest(&manifest).unwrap());

        pull_prompts(&hub, &names(&["chat"]), &output).await.unwrap();

        let store = load_store(&output).unwrap();
        assert_eq!(
            store.get("chat").unwrap().system_prompt.as_deref(),
            Some("system: You are a PM.\n\nplaceholder: {history}")
        );
    }

    #[tokio::test]
    async fn test_empty_prompt_list_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("raw_prompts.yml");

        let result = pull_prompts(&FakeHub::new(), &[], &output).await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(!output.exists());
    }
}
