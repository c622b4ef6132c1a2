//! Command handlers for promptsync.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod check;
pub mod list;
pub mod output;
pub mod pull;
pub mod push;

#[cfg(test)]
pub mod test_support;

// Re-export command types for convenience
pub use check::CheckCommand;
pub use list::ListCommand;
pub use pull::PullCommand;
pub use push::PushCommand;
