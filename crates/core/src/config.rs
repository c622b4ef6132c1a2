//! Configuration management for promptsync.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - A `.env` file in the working directory
//! - Environment variables
//! - Command-line flags
//! - Config file (`promptsync.yaml` in the workspace root)
//!
//! Registry credentials are kept apart from the rest of the configuration in
//! [`HubCredentials`], which operations receive explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::env::{check_env_vars, missing_env_vars, process_env, REQUIRED_ENV_VARS};
use crate::error::{AppError, AppResult};

/// Default namespace used when no hub owner is configured.
pub const DEFAULT_OWNER: &str = "user";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains prompts/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Registry settings
    pub hub: HubConfig,

    /// Pull settings
    pub pull: PullConfig,

    /// Push settings
    pub push: PushConfig,
}

/// Registry provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Registry provider (currently only "langsmith")
    pub provider: String,

    /// Custom API endpoint
    pub endpoint: Option<String>,
}

/// Settings for the pull operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullConfig {
    /// Prompt names to fetch, in order
    pub prompts: Vec<String>,

    /// Store file written after a successful pull (relative to workspace)
    pub output: PathBuf,
}

/// Settings for the push operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Store file read by push (relative to workspace)
    pub source: PathBuf,

    /// Publish prompts publicly
    pub public: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            provider: "langsmith".to_string(),
            endpoint: None,
        }
    }
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            prompts: vec!["bug_to_user_story_v1".to_string()],
            output: PathBuf::from("prompts/raw_prompts.yml"),
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("prompts/bug_to_user_story_v2.yml"),
            public: true,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    hub: Option<HubSection>,
    pull: Option<PullSection>,
    push: Option<PushSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HubSection {
    provider: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PullSection {
    prompts: Option<Vec<String>>,
    output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PushSection {
    source: Option<String>,
    public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            hub: HubConfig::default(),
            pull: PullConfig::default(),
            push: PushConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `PROMPTSYNC_WORKSPACE`: Override workspace path
    /// - `PROMPTSYNC_CONFIG`: Path to config file
    /// - `LANGSMITH_ENDPOINT`: Registry API endpoint
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use promptsync_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with(None, None)
    }

    /// Load configuration, with explicit workspace and config file paths
    /// taking precedence over `PROMPTSYNC_WORKSPACE` and `PROMPTSYNC_CONFIG`.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(workspace) = workspace
            .or_else(|| std::env::var("PROMPTSYNC_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file = config_file
            .or_else(|| std::env::var("PROMPTSYNC_CONFIG").ok().map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.workspace.join("promptsync.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(endpoint) = std::env::var("LANGSMITH_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                config.hub.endpoint = Some(endpoint);
            }
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        // An empty file is a valid (empty) configuration
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        Ok(self.clone().apply_file(config_file))
    }

    fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(hub) = file.hub {
            if let Some(provider) = hub.provider {
                self.hub.provider = provider;
            }
            if hub.endpoint.is_some() {
                self.hub.endpoint = hub.endpoint;
            }
        }

        if let Some(pull) = file.pull {
            if let Some(prompts) = pull.prompts {
                self.pull.prompts = prompts;
            }
            if let Some(output) = pull.output {
                self.pull.output = PathBuf::from(output);
            }
        }

        if let Some(push) = file.push {
            if let Some(source) = push.source {
                self.push.source = PathBuf::from(source);
            }
            if let Some(public) = push.public {
                self.push.public = public;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        self
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the config file and the
    /// environment.
    pub fn with_overrides(mut self, log_level: Option<String>, verbose: bool, no_color: bool) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve a path against the workspace root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Directory holding the prompt store files.
    pub fn prompts_dir(&self) -> PathBuf {
        self.workspace.join("prompts")
    }

    /// Validate configuration for the selected provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["langsmith", "langchain"];

        if !known_providers.contains(&self.hub.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown hub provider: {}. Supported: {}",
                self.hub.provider,
                known_providers.join(", ")
            )));
        }

        Ok(())
    }
}

/// Registry credentials, read once at the start of an operation.
#[derive(Clone)]
pub struct HubCredentials {
    /// API key sent with every registry request
    pub api_key: String,

    /// Project identifier
    pub project: String,

    /// Account namespace prompts are pushed under
    pub owner: Option<String>,
}

impl HubCredentials {
    /// Create credentials directly.
    pub fn new(
        api_key: impl Into<String>,
        project: impl Into<String>,
        owner: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            project: project.into(),
            owner,
        }
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(process_env)
    }

    /// Read credentials through `lookup`, failing when any required
    /// variable is unset or blank.
    ///
    /// The error names every missing variable, not just the first.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !check_env_vars(&REQUIRED_ENV_VARS, &lookup) {
            return Err(AppError::Config(format!(
                "Missing required environment variables: {}",
                missing_env_vars(&REQUIRED_ENV_VARS, &lookup).join(", ")
            )));
        }

        let get = |name: &str| lookup(name).unwrap_or_default().trim().to_string();

        Ok(Self {
            api_key: get("LANGSMITH_API_KEY"),
            project: get("LANGSMITH_PROJECT"),
            owner: Some(get("USERNAME_LANGSMITH_HUB")),
        })
    }

    /// Namespace for pushed prompts, falling back to [`DEFAULT_OWNER`].
    pub fn owner(&self) -> &str {
        self.owner
            .as_deref()
            .filter(|owner| !owner.trim().is_empty())
            .unwrap_or(DEFAULT_OWNER)
    }
}

impl fmt::Debug for HubCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubCredentials")
            .field("api_key", &"<redacted>")
            .field("project", &self.project)
            .field("owner", &self.owner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.hub.provider, "langsmith");
        assert_eq!(config.pull.prompts, vec!["bug_to_user_story_v1"]);
        assert_eq!(config.pull.output, PathBuf::from("prompts/raw_prompts.yml"));
        assert!(config.push.public);
        assert!(!config.verbose);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(None, true, false);

        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/work");

        assert_eq!(
            config.resolve(Path::new("prompts/a.yml")),
            PathBuf::from("/work/prompts/a.yml")
        );
        assert_eq!(
            config.resolve(Path::new("/elsewhere/b.yml")),
            PathBuf::from("/elsewhere/b.yml")
        );
    }

    #[test]
    fn test_merge_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("promptsync.yaml");
        std::fs::write(
            &path,
            r#"
hub:
  endpoint: "http://localhost:1984"
pull:
  prompts: ["a", "b"]
  output: out/pulled.yml
push:
  public: false
logging:
  level: warn
  color: false
"#,
        )
        .unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.hub.provider, "langsmith");
        assert_eq!(config.hub.endpoint.as_deref(), Some("http://localhost:1984"));
        assert_eq!(config.pull.prompts, vec!["a", "b"]);
        assert_eq!(config.pull.output, PathBuf::from("out/pulled.yml"));
        assert_eq!(
            config.push.source,
            PathBuf::from("prompts/bug_to_user_story_v2.yml")
        );
        assert!(!config.push.public);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(config.no_color);
    }

    #[test]
    fn test_load_with_explicit_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        std::fs::write(&config_path, "push:\n  source: out/v3.yml\n").unwrap();

        let config =
            AppConfig::load_with(Some(temp_dir.path().to_path_buf()), Some(config_path)).unwrap();
        assert_eq!(config.workspace, temp_dir.path());
        assert_eq!(config.push.source, PathBuf::from("out/v3.yml"));
    }

    #[test]
    fn test_load_with_missing_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load_with(Some(temp_dir.path().join("absent")), None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_merge_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("promptsync.yaml");
        std::fs::write(&path, "pull: [not, a, mapping").unwrap();

        assert!(AppConfig::default().merge_yaml(&path).is_err());
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.hub.provider = "unknown".to_string();
        assert!(config.validate().is_err());

        config.hub.provider = "langsmith".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let env = env_map(&[
            ("LANGSMITH_API_KEY", "secret"),
            ("LANGSMITH_PROJECT", "demo"),
            ("USERNAME_LANGSMITH_HUB", "alice"),
        ]);

        let creds = HubCredentials::from_lookup(|name: &str| env.get(name).cloned()).unwrap();
        assert_eq!(creds.api_key, "secret");
        assert_eq!(creds.project, "demo");
        assert_eq!(creds.owner(), "alice");
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_credentials_missing_names_all_variables() {
        let env = env_map(&[("LANGSMITH_PROJECT", "demo")]);

        match HubCredentials::from_lookup(|name: &str| env.get(name).cloned()) {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains("LANGSMITH_API_KEY"));
                assert!(msg.contains("USERNAME_LANGSMITH_HUB"));
                assert!(!msg.contains("LANGSMITH_PROJECT"));
            }
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_follow_the_env_guard() {
        let env = env_map(&[
            ("LANGSMITH_API_KEY", "secret"),
            ("LANGSMITH_PROJECT", "   "),
            ("USERNAME_LANGSMITH_HUB", "alice"),
        ]);
        let lookup = |name: &str| env.get(name).cloned();

        assert!(!check_env_vars(&REQUIRED_ENV_VARS, lookup));
        match HubCredentials::from_lookup(lookup) {
            Err(AppError::Config(msg)) => {
                assert!(msg.ends_with("LANGSMITH_PROJECT"));
            }
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_owner_defaults_to_user() {
        let creds = HubCredentials::new("key", "project", None);
        assert_eq!(creds.owner(), DEFAULT_OWNER);

        let creds = HubCredentials::new("key", "project", Some("  ".to_string()));
        assert_eq!(creds.owner(), "user");
    }
}
