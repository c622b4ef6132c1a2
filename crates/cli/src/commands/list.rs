//! List command handler.
//!
//! Shows the prompt store files in the workspace and the prompts they hold.

use clap::Args;
use promptsync_core::{config::AppConfig, AppResult};
use promptsync_prompt::{list_stores, load_store};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// List local prompt stores
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Directory to scan (default: <workspace>/prompts)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One store file and its prompt names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreListing {
    pub path: PathBuf,
    pub prompts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing list command");

        let dir = match &self.dir {
            Some(dir) => config.resolve(dir),
            None => config.prompts_dir(),
        };
        let listings = list_prompt_stores(&dir)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&listings)?);
            return Ok(());
        }

        if listings.is_empty() {
            println!("No prompt stores found in {}", dir.display());
            return Ok(());
        }

        for listing in &listings {
            match &listing.error {
                Some(error) => println!("{}  (unreadable: {})", listing.path.display(), error),
                None => println!(
                    "{}  ({} prompt(s)): {}",
                    listing.path.display(),
                    listing.prompts.len(),
                    listing.prompts.join(", ")
                ),
            }
        }

        Ok(())
    }
}

/// Load every store in `dir`; unreadable files are listed with their error.
pub fn list_prompt_stores(dir: &Path) -> AppResult<Vec<StoreListing>> {
    let listings = list_stores(dir)?
        .into_iter()
        .map(|path| match load_store(&path) {
            Ok(store) => StoreListing {
                path,
                prompts: store.names(),
                error: None,
            },
            Err(e) => StoreListing {
                path,
                prompts: Vec::new(),
                error: Some(e.to_string()),
            },
        })
        .collect();

    Ok(listings)
}
