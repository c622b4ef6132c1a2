//! YAML prompt store: a mapping from prompt name to prompt record.
//!
//! The store keeps the raw YAML mapping so that key order survives a
//! load/save cycle and entries that are not records can be reported instead
//! of rejected. No validation happens here.

use crate::types::PromptRecord;
use promptsync_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// An ordered mapping from prompt name to prompt record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptStore {
    entries: Mapping,
}

/// One entry of a store, in file order.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEntry {
    /// The value parsed as a prompt record
    Record { name: String, record: PromptRecord },

    /// The value is a mapping whose fields do not fit a prompt record
    Invalid { name: String, error: String },

    /// The value is a scalar or a sequence
    NotARecord { name: String },
}

impl StoreEntry {
    pub fn name(&self) -> &str {
        match self {
            StoreEntry::Record { name, .. }
            | StoreEntry::Invalid { name, .. }
            | StoreEntry::NotARecord { name } => name,
        }
    }
}

impl PromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace a record, keeping the original position of an
    /// existing key.
    pub fn insert(&mut self, name: impl Into<String>, record: &PromptRecord) -> AppResult<()> {
        let value = serde_yaml::to_value(record)?;
        self.entries.insert(Value::String(name.into()), value);
        Ok(())
    }

    /// Get a record by name, if present and well-formed.
    pub fn get(&self, name: &str) -> Option<PromptRecord> {
        self.entries
            .get(name)
            .and_then(|value| parse_record(value).ok())
    }

    /// Entry names in file order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().map(key_name).collect()
    }

    /// All entries in file order.
    pub fn entries(&self) -> Vec<StoreEntry> {
        self.entries
            .iter()
            .map(|(key, value)| {
                let name = key_name(key);
                if !value.is_mapping() {
                    tracing::debug!("Entry '{}' is not a mapping", name);
                    return StoreEntry::NotARecord { name };
                }
                match parse_record(value) {
                    Ok(record) => StoreEntry::Record { name, record },
                    Err(e) => StoreEntry::Invalid {
                        name,
                        error: e.to_string(),
                    },
                }
            })
            .collect()
    }
}

fn parse_record(value: &Value) -> AppResult<PromptRecord> {
    if !value.is_mapping() {
        return Err(AppError::Prompt("value is not a mapping".to_string()));
    }
    Ok(serde_yaml::from_value(value.clone())?)
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "<unprintable key>".to_string()),
    }
}

/// Load a prompt store from a YAML file.
///
/// An empty document loads as an empty store. A missing file, unreadable
/// file, malformed YAML, or a top-level value that is not a mapping is an
/// error.
pub fn load_store(path: &Path) -> AppResult<PromptStore> {
    tracing::debug!("Loading prompt store from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt store not found: {:?}",
            path
        )));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Prompt(format!("Failed to read prompt store {:?}: {}", path, e))
    })?;

    let document: Value = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt store {:?}: {}", path, e))
    })?;

    let store = match document {
        Value::Null => PromptStore::new(),
        Value::Mapping(entries) => PromptStore { entries },
        _ => {
            return Err(AppError::Prompt(format!(
                "Prompt store {:?} must be a mapping of prompt name to record",
                path
            )))
        }
    };

    tracing::info!("Loaded {} prompt(s) from {:?}", store.len(), path);

    Ok(store)
}

/// Write a prompt store as YAML, creating parent directories as needed.
pub fn save_store(store: &PromptStore, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let yaml = serde_yaml::to_string(store)?;
    std::fs::write(path, yaml)?;

    tracing::info!("Saved {} prompt(s) to {:?}", store.len(), path);

    Ok(())
}

/// List the YAML store files directly inside `dir`, sorted by path.
pub fn list_stores(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yml") | Some("yaml")
        );
        if path.is_file() && is_yaml {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
