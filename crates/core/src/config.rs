//! Configuration management for ragtool.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.ragtool/config.yaml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .ragtool/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Adapter settings from the `rag:` section and environment
    pub rag: RagSettings,
}

/// Adapter settings as read from config.yaml.
///
/// Every field is optional: unset fields keep the defaults of whichever
/// adapter the settings are applied to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RagSettings {
    pub collection_name: Option<String>,

    pub persist_directory: Option<PathBuf>,

    pub embedding_model: Option<String>,

    pub summarize: Option<bool>,

    pub top_k: Option<usize>,

    /// Name of the environment variable holding the embedding API key
    pub embedding_api_key_env: Option<String>,

    /// Explicit embedding API key (environment only, never read from or written to YAML)
    #[serde(skip)]
    pub embedding_api_key: Option<String>,

    /// Extra options passed opaquely to the embedding provider
    #[serde(default)]
    pub embedding_options: serde_json::Map<String, serde_json::Value>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    rag: Option<RagSettings>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
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
            rag: RagSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, the config file and defaults.
    ///
    /// Environment variables:
    /// - `RAGTOOL_WORKSPACE`: Override workspace path
    /// - `RAGTOOL_CONFIG`: Path to config file
    /// - `RAGTOOL_COLLECTION`: Collection name
    /// - `RAGTOOL_EMBEDDING_MODEL`: Embedding model identifier
    /// - `RAGTOOL_TOP_K`: Number of results per query
    /// - `RAGTOOL_SUMMARIZE`: Summarized answers (true/false)
    /// - `RAGTOOL_EMBEDDING_API_KEY`: Embedding API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use ragtool_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with(None, None)
    }

    /// Load configuration, with an explicit workspace and config file
    /// taking precedence over `RAGTOOL_WORKSPACE` and `RAGTOOL_CONFIG`.
    ///
    /// The YAML file is located after these are applied, so a config file
    /// passed on the command line is the one that gets read.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("RAGTOOL_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        if let Some(config_file) =
            config_file.or_else(|| std::env::var("RAGTOOL_CONFIG").ok().map(PathBuf::from))
        {
            config.config_file = Some(config_file);
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.ragtool_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(collection) = std::env::var("RAGTOOL_COLLECTION") {
            config.rag.collection_name = Some(collection);
        }

        if let Ok(model) = std::env::var("RAGTOOL_EMBEDDING_MODEL") {
            config.rag.embedding_model = Some(model);
        }

        if let Ok(top_k) = std::env::var("RAGTOOL_TOP_K") {
            let top_k = top_k.parse::<usize>().map_err(|e| {
                AppError::Config(format!("Invalid RAGTOOL_TOP_K '{}': {}", top_k, e))
            })?;
            config.rag.top_k = Some(top_k);
        }

        if let Ok(summarize) = std::env::var("RAGTOOL_SUMMARIZE") {
            config.rag.summarize = Some(parse_bool("RAGTOOL_SUMMARIZE", &summarize)?);
        }

        config.rag.embedding_api_key = std::env::var("RAGTOOL_EMBEDDING_API_KEY").ok();

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

        self.merge_yaml_str(&contents).map_err(|e| match e {
            AppError::Serialization(msg) => {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, msg))
            }
            other => other,
        })
    }

    fn merge_yaml_str(&self, contents: &str) -> AppResult<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(contents)?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(rag) = config_file.rag {
            result.rag = RagSettings {
                embedding_api_key: result.rag.embedding_api_key.take(),
                ..rag
            };
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables.
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .ragtool directory.
    pub fn ragtool_dir(&self) -> PathBuf {
        self.workspace.join(".ragtool")
    }

    /// Resolve the embedding API key.
    ///
    /// An explicit key wins; otherwise the variable named by
    /// `embeddingApiKeyEnv` is consulted.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.rag.embedding_api_key {
            return Some(key.clone());
        }

        self.rag
            .embedding_api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
    }

    /// Validate the adapter settings.
    pub fn validate(&self) -> AppResult<()> {
        if self.rag.top_k == Some(0) {
            return Err(AppError::Config("topK must be at least 1".to_string()));
        }

        if let Some(ref name) = self.rag.collection_name {
            if name.trim().is_empty() {
                return Err(AppError::Config(
                    "collectionName must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_bool(var: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "Invalid {} '{}': expected true or false",
            var, other
        ))),
    }
}
