//! Runtime configuration.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional YAML file, then `MATEAI__SECTION__KEY` environment variables, then
//! the legacy single-name variables (`HUGGINGFACE_API_KEY`, `DEBUG`, `HOST`,
//! `PORT`). The resulting [`AppConfig`] is read-only for the process lifetime.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connector::api::RateLimit;
use crate::domain::{DomainError, DEFAULT_MAX_INPUT_LENGTH};

const ENV_PREFIX: &str = "MATEAI";

/// Legacy environment variables and the keys they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HUGGINGFACE_API_KEY", "huggingface.api_key"),
    ("DEBUG", "app.debug"),
    ("HOST", "server.host"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub server: ServerConfig,
    pub huggingface: HuggingFaceConfig,
    pub security: SecurityConfig,
    pub rate_limiting: RateLimitingConfig,
    pub prompts: PromptsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub version: String,
    pub debug: bool,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Mate.AI".to_string(),
            version: "1.0.0".to_string(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HuggingFaceConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL; the model identifier is appended as a path segment.
    pub api_url: String,
    pub max_length: u32,
    pub temperature: f64,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "google/flan-t5-large".to_string(),
            api_url: "https://api-inference.huggingface.co/models".to_string(),
            max_length: 512,
            temperature: 0.7,
            timeout: 30,
        }
    }
}

impl HuggingFaceConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), self.model)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub max_input_length: usize,
    pub max_retries: u32,
    /// Terms rejected case-insensitively in user messages. Empty by default.
    pub blocked_terms: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            max_retries: 3,
            blocked_terms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitingConfig {
    pub enabled: bool,
    /// Limit expression such as `"10 per minute"`.
    pub default: String,
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default: "10 per minute".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory prompt paths are resolved against. Defaults to the directory
    /// of the configuration file, or the working directory.
    pub base_dir: Option<String>,
    pub system_path: Option<String>,
    pub style_path: Option<String>,
    pub safety_path: Option<String>,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            system_path: Some("prompts/system.txt".to_string()),
            style_path: Some("prompts/style.txt".to_string()),
            safety_path: Some("prompts/safety.txt".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs are also written to a daily-rotated file in this directory.
    pub dir: Option<String>,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            dir: None,
            file: "mateai.log".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration, reading `path` if it exists.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let mut config = Self::build(path).map_err(|e| DomainError::config(e.to_string()))?;

        if config.prompts.base_dir.is_none() {
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            config.prompts.base_dir = Some(base.to_string_lossy().into_owned());
        }

        config.validate()?;
        Ok(config)
    }

    fn build(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
        } else {
            debug!("No configuration file at {}, using defaults", path.display());
        }

        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            );

        for (var, key) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.security.max_input_length == 0 {
            return Err(DomainError::config(
                "security.max_input_length must be greater than zero",
            ));
        }
        if self.huggingface.timeout == 0 {
            return Err(DomainError::config(
                "huggingface.timeout must be greater than zero",
            ));
        }
        if !(0.0..=100.0).contains(&self.huggingface.temperature) {
            return Err(DomainError::config(format!(
                "huggingface.temperature out of range: {}",
                self.huggingface.temperature
            )));
        }
        RateLimit::parse(&self.rate_limiting.default)?;
        Ok(())
    }

    pub fn prompts_base_dir(&self) -> PathBuf {
        self.prompts
            .base_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
