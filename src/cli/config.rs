//! Configuration management for ragchat
//!
//! Settings come from a TOML file (default `~/.ragchat/config.toml`) or a
//! JSON file in the `appsettings.json` layout, chosen by extension, and are
//! then overridden by `RAGCHAT_*` environment variables. Validation is
//! presence only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::completion::DEFAULT_COMPLETION_API_VERSION;
use crate::errors::{RagError, Result};
use crate::search::DEFAULT_SEARCH_API_VERSION;

/// Environment variable names and the setting each one overrides
pub const ENV_OVERRIDES: [(&str, &str); 6] = [
    ("RAGCHAT_MODEL_ID", "completion.model_id"),
    ("RAGCHAT_ENDPOINT", "completion.endpoint"),
    ("RAGCHAT_API_KEY", "completion.api_key"),
    ("RAGCHAT_SEARCH_ENDPOINT", "search.endpoint"),
    ("RAGCHAT_SEARCH_API_KEY", "search.api_key"),
    ("RAGCHAT_SEARCH_INDEX", "search.index_name"),
];

/// Complete configuration for ragchat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Chat completion service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Deployment / model identifier
    #[serde(default)]
    pub model_id: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_completion_api_version")]
    pub api_version: String,
}

/// Search service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub index_name: String,
    #[serde(default = "default_semantic_configuration")]
    pub semantic_configuration: String,
    #[serde(default = "default_query_language")]
    pub query_language: String,
    #[serde(default = "default_search_api_version")]
    pub api_version: String,
}

/// HTTP client settings shared by both services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_completion_api_version() -> String {
    DEFAULT_COMPLETION_API_VERSION.to_string()
}
fn default_semantic_configuration() -> String {
    "default".to_string()
}
fn default_query_language() -> String {
    "en-us".to_string()
}
fn default_search_api_version() -> String {
    DEFAULT_SEARCH_API_VERSION.to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            endpoint: String::new(),
            api_key: String::new(),
            api_version: default_completion_api_version(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            index_name: String::new(),
            semantic_configuration: default_semantic_configuration(),
            query_language: default_query_language(),
            api_version: default_search_api_version(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `appsettings.json` layout
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    model_id: String,
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    api_key: String,
    #[serde(default, rename = "azureAISearch")]
    azure_ai_search: AppSettingsSearch,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettingsSearch {
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    index_name: String,
}

impl From<AppSettings> for Config {
    fn from(settings: AppSettings) -> Self {
        Self {
            completion: CompletionConfig {
                model_id: settings.model_id,
                endpoint: settings.endpoint,
                api_key: settings.api_key,
                ..CompletionConfig::default()
            },
            search: SearchConfig {
                endpoint: settings.azure_ai_search.endpoint,
                api_key: settings.azure_ai_search.api_key,
                index_name: settings.azure_ai_search.index_name,
                ..SearchConfig::default()
            },
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or the standard location, apply
    /// environment overrides, and validate
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut config = match path {
            Some(config_path) => Self::load_from_file(&config_path)?,
            None => Self::load_default()?,
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file without validating it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RagError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| RagError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let settings: AppSettings = serde_json::from_str(contents)
            .map_err(|e| RagError::ConfigError(format!("Failed to parse config: {}", e)))?;
        Ok(settings.into())
    }

    /// Load from `~/.ragchat/config.toml` if it exists, empty settings otherwise
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(config_path) if config_path.exists() => Self::load_from_file(&config_path),
            _ => Ok(Config::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".ragchat").join("config.toml"))
    }

    /// Override settings from the environment; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, key) in ENV_OVERRIDES {
            let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            match key {
                "completion.model_id" => self.completion.model_id = value,
                "completion.endpoint" => self.completion.endpoint = value,
                "completion.api_key" => self.completion.api_key = value,
                "search.endpoint" => self.search.endpoint = value,
                "search.api_key" => self.search.api_key = value,
                "search.index_name" => self.search.index_name = value,
                _ => {}
            }
        }
    }

    /// Check every required setting is present, reporting the first missing one
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self.missing_keys().into_iter().next() {
            return Err(RagError::missing(key));
        }
        if self.http.timeout_secs == 0 {
            return Err(RagError::ConfigError(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Required settings that are absent or blank, in declaration order
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let required = [
            ("completion.model_id", &self.completion.model_id),
            ("completion.endpoint", &self.completion.endpoint),
            ("completion.api_key", &self.completion.api_key),
            ("search.endpoint", &self.search.endpoint),
            ("search.api_key", &self.search.api_key),
            ("search.index_name", &self.search.index_name),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key)
            .collect()
    }

    /// Copy with API keys masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.completion.api_key = mask_secret(&self.completion.api_key);
        config.search.api_key = mask_secret(&self.search.api_key);
        config
    }
}

/// Mask a credential, keeping the last four characters of long values
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "<unset>".to_string(),
        n if n <= 8 => "****".to_string(),
        n => format!("****{}", chars[n - 4..].iter().collect::<String>()),
    }
}
