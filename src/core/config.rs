use crate::core::currency::CurrencyTable;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BotConfig {
    pub token: Option<String>,
}

/// Connection parameters for the quote API.
///
/// Fields are optional on purpose: an incomplete section still loads, and the
/// quote client reports what is missing on every request.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuoteApiConfig {
    pub host: Option<String>,
    pub api_path: Option<String>,
    pub from_param: Option<String>,
    pub to_param: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for QuoteApiConfig {
    fn default() -> Self {
        QuoteApiConfig {
            host: None,
            api_path: None,
            from_param: None,
            to_param: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl QuoteApiConfig {
    /// Names of the required settings that are unset or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("host", &self.host),
            ("api_path", &self.api_path),
            ("from_param", &self.from_param),
            ("to_param", &self.to_param),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub quote_api: QuoteApiConfig,
    #[serde(default)]
    pub currencies: CurrencyTable,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "quotebot", "quotebot")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_yaml(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, treat it as no sections at all
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Telegram token, if one is configured.
    pub fn bot_token(&self) -> Option<&str> {
        self.bot.token.as_deref().filter(|t| !t.is_empty())
    }
}
