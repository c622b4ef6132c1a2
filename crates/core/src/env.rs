//! Environment guard for required configuration values.
//!
//! Registry operations must not start until every required variable resolves
//! to a non-empty value. The lookup function is injected so callers can check
//! against the process environment, a `.env`-backed map, or a test fixture.

/// Environment variables required by every registry operation.
pub const REQUIRED_ENV_VARS: [&str; 3] = [
    "LANGSMITH_API_KEY",
    "LANGSMITH_PROJECT",
    "USERNAME_LANGSMITH_HUB",
];

/// Return the names in `required` whose value is unset or blank.
///
/// The order of `required` is preserved in the result.
pub fn missing_env_vars<F>(required: &[&str], lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    required
        .iter()
        .filter(|name| {
            lookup(**name)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|name| name.to_string())
        .collect()
}

/// Check that every variable in `required` is set to a non-empty value.
///
/// Each missing variable is reported on the error log. Returns `true` only
/// when nothing is missing.
pub fn check_env_vars<F>(required: &[&str], lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let missing = missing_env_vars(required, lookup);

    for name in &missing {
        tracing::error!("Missing required environment variable: {}", name);
    }

    if !missing.is_empty() {
        tracing::error!("Set the missing variables in your environment or .env file");
    }

    missing.is_empty()
}

/// Look up a variable in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
