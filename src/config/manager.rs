use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::credentials::{CredentialStore, DEFAULT_API_KEY_ENV};
use crate::fs::atomic_write;
use crate::paths;
use crate::translation::{
    AUTO_DETECT, DEFAULT_ENDPOINT, RetryPolicy, TranslationClient, TransportConfig,
};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Default languages in the `[ytr]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YtrConfig {
    /// Default source language, or `auto`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Default target language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Provider settings in the `[api]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Translation endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// API key stored directly in config (the environment is preferred).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// Delay before the first retry; later retries double it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_backoff_ms: Option<u64>,
}

impl ApiConfig {
    /// Name of the environment variable holding the API key.
    pub fn api_key_env_name(&self) -> &str {
        self.api_key_env
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Loads the credential store, preferring the environment over config.
    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::resolve(self.api_key_env_name(), self.api_key.as_deref())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/ytr/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub ytr: YtrConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Source language code, or `auto`.
    pub from: String,
    /// Target language code.
    pub to: String,
    pub endpoint: String,
    pub credentials: CredentialStore,
    pub transport: TransportConfig,
}

impl ResolvedConfig {
    /// Builds an HTTP translation client from these settings.
    pub fn client(&self) -> Result<TranslationClient> {
        TranslationClient::with_http(
            self.credentials.clone(),
            self.endpoint.clone(),
            self.transport,
        )
        .context("Failed to create translation client")
    }
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take precedence
/// over built-in defaults.
///
/// # Errors
///
/// Returns an error if the target language is missing or the timeout is zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let to = options
        .to
        .as_ref()
        .or(config_file.ytr.to.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'to' (target language)\n\n\
                 Please provide it via:\n  \
                 - CLI option: ytr --to <lang>\n  \
                 - Config file: ~/.config/ytr/config.toml"
            )
        })?;

    let from = options
        .from
        .as_ref()
        .or(config_file.ytr.from.as_ref())
        .cloned()
        .unwrap_or_else(|| AUTO_DETECT.to_string());

    let endpoint = options
        .endpoint
        .as_ref()
        .or(config_file.api.endpoint.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let timeout_secs = options
        .timeout_secs
        .or(config_file.api.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        bail!("Invalid configuration: 'timeout_secs' must be greater than 0");
    }

    let retry = RetryPolicy {
        max_retries: options
            .max_retries
            .or(config_file.api.max_retries)
            .unwrap_or_else(|| RetryPolicy::default().max_retries),
        base_delay: Duration::from_millis(
            config_file
                .api
                .retry_backoff_ms
                .unwrap_or(DEFAULT_RETRY_BACKOFF_MS),
        ),
        max_delay: MAX_RETRY_DELAY,
    };

    let credentials = config_file.api.credentials();
    debug!(
        %endpoint,
        timeout_secs,
        max_retries = retry.max_retries,
        api_key_set = credentials.is_set(),
        "configuration resolved"
    );

    Ok(ResolvedConfig {
        from,
        to,
        endpoint,
        credentials,
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout_secs),
            retry,
        },
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/ytr/config.toml`
    /// or `~/.config/ytr/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a config manager for an explicit file path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, or the defaults if there is none yet.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }
}
