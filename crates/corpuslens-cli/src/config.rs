//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use corpuslens_domain::{Connection, UploadStrategy, DEFAULT_BASE_URL};
use corpuslens_sdk::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Where this configuration was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Connection profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Customer (tenant) ID
    pub customer_id: String,

    /// Corpus ID or key
    pub corpus_id: String,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional stored API key; the flag or environment variable wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Per-request timeout in seconds; 0 disables the timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upload strategy used when none is given (`multipart` or `structured`)
    #[serde(default = "default_upload_strategy")]
    pub upload_strategy: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".corpuslens").join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to where it was loaded from (or the default path).
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Profile {
    /// Build a connection, preferring `api_key` over the stored key.
    pub fn connection(&self, api_key: Option<&str>) -> Result<Connection> {
        let key = api_key
            .or(self.api_key.as_deref())
            .ok_or_else(|| {
                CliError::Config(
                    "No API key: pass --api-key or set CORPUSLENS_API_KEY".to_string(),
                )
            })?;

        Connection::new(key, self.customer_id.as_str(), self.corpus_id.as_str())
            .map(|c| c.with_base_url(self.base_url.as_str()))
            .map_err(|e| CliError::Config(format!("{} (use 'connect' or 'profile set')", e)))
    }
}

impl Settings {
    /// Request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Configured default upload strategy
    pub fn upload_strategy(&self) -> Result<UploadStrategy> {
        self.upload_strategy
            .parse()
            .map_err(CliError::Config)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "default".to_string(),
            Profile {
                customer_id: String::new(),
                corpus_id: String::new(),
                base_url: default_base_url(),
                api_key: None,
            },
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            source: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            upload_strategy: default_upload_strategy(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_upload_strategy() -> String {
    UploadStrategy::Multipart.as_str().to_string()
}
