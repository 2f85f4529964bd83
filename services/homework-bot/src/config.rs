//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    /// Never read from the config file, see [`Config::resolve_secrets`]
    #[serde(skip)]
    pub credentials: Credentials,
}

/// Review status API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

/// Poll loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_retry_period", with = "humantime_serde")]
    pub retry_period: Duration,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Also send cycle failures to the chat, not only to the log
    #[serde(default = "default_true")]
    pub relay_errors: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_period: default_retry_period(),
            request_timeout: default_request_timeout(),
            relay_errors: true,
        }
    }
}

/// Tokens and chat id, supplied through the environment
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Names of the environment variables whose values are empty
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Config {
    /// Fill in credentials from the process environment
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_from(|name| std::env::var(name).ok());
        self.validate()
    }

    /// Fill in credentials using `lookup` for each variable name
    pub fn resolve_secrets_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.credentials = Credentials {
            practicum_token: lookup(PRACTICUM_TOKEN_VAR).unwrap_or_default(),
            telegram_token: lookup(TELEGRAM_TOKEN_VAR).unwrap_or_default(),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID_VAR).unwrap_or_default(),
        };
    }

    /// Refuse to start unless every credential is present
    pub fn validate(&self) -> crate::Result<()> {
        let missing = self.credentials.missing();
        if !missing.is_empty() {
            return Err(crate::BotError::MissingCredentials(missing.join(", ")));
        }
        if self.polling.retry_period.is_zero() {
            return Err(crate::BotError::Config(
                "polling.retry_period must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> Duration {
    Duration::from_secs(600)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

/// Load a dotenv file into the process environment.
///
/// Reads `path` when given, otherwise searches for `.env` from the working
/// directory upwards. Variables already set in the environment are kept.
/// Returns the file that was loaded, if any.
pub fn load_dotenv(path: Option<&Path>) -> Option<PathBuf> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match result {
        Ok(loaded) => {
            tracing::debug!("Loaded environment from {:?}", loaded);
            Some(loaded)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable dotenv file: {}", e);
            None
        }
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::BotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
