//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use kashshaf_domain::ModelId;
use kashshaf_export::DEFAULT_FILE_NAME;
use kashshaf_extractor::AnalyzerConfig;
use kashshaf_llm::openai::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Directory under the home directory holding config and history
pub const CONFIG_DIR: &str = ".kashshaf";

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

    /// Prompt and request limits passed to the analyzer
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// File this configuration was loaded from
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Run profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Completion model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Completion service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Optional stored API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Optional prompt template file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
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

    /// Default spreadsheet file name
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Print the model's reply after each REPL run
    #[serde(default = "default_true")]
    pub show_reply: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Profile {
    /// The profile's model as a typed identifier.
    pub fn model_id(&self) -> Result<ModelId> {
        self.model.parse().map_err(CliError::Config)
    }

    /// API key with the last four characters visible.
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_secret)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: None,
            template: None,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load configuration, writing the defaults on first run.
    ///
    /// A file that exists but does not parse is an error and is never
    /// overwritten.
    pub fn load_or_init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let first_run = !path.exists();
        let config = Self::load_from(path)?;

        if first_run {
            if let Err(e) = config.save() {
                warn!("Could not write default configuration: {}", e);
            }
        }
        Ok(config)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    ///
    /// The path is remembered; [`Config::save`] writes back to it.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };

        config.path = Some(path);
        Ok(config)
    }

    /// The file this configuration saves to.
    pub fn path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Self::default_path(),
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = self.path()?;

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

    /// Profile names in sorted order.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            analyzer: AnalyzerConfig::default(),
            path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            output_file: default_output_file(),
            show_reply: true,
        }
    }
}

/// `~/.kashshaf`
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(CONFIG_DIR))
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_model() -> String {
    ModelId::default().as_str().to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
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

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_NAME)
}
