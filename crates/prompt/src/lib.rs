//! Prompt store management for promptsync.
//!
//! This crate provides:
//! - YAML prompt records and stores
//! - Structural validation of records before publishing
//! - Content conventions for finished prompts
//! - Two-turn template building

pub mod builder;
pub mod conventions;
pub mod store;
pub mod types;
pub mod validator;

// Re-export main types
pub use builder::{build_prompt, extract_variables};
pub use conventions::{check_conventions, ConventionCheck, ConventionViolation};
pub use store::{list_stores, load_store, save_store, PromptStore, StoreEntry};
pub use types::{
    BuiltPrompt, BuiltPromptMetadata, FewShotExample, PromptRecord, DEFAULT_USER_PROMPT,
    HUB_SOURCE,
};
pub use validator::{validate, ValidationResult};
