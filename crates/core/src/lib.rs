//! promptsync core library
//!
//! This crate provides the foundational utilities shared by the promptsync
//! crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Environment guard for registry credentials

pub mod config;
pub mod env;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, HubCredentials};
pub use error::{AppError, AppResult};
