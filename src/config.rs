//! Application constants and environment-driven relay configuration.
//!
//! The provider credential is deliberately not captured here: it is
//! resolved through `ApiKeySource` on every relay call so a missing key is
//! a recoverable condition rather than a startup failure.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "portfolio-chat";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "PORTFOLIO_CHAT_MODEL";
pub const ENV_ENDPOINT: &str = "PORTFOLIO_CHAT_ENDPOINT";
pub const ENV_MAX_TOKENS: &str = "PORTFOLIO_CHAT_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "PORTFOLIO_CHAT_TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "PORTFOLIO_CHAT_TIMEOUT_SECS";
pub const ENV_BIND: &str = "PORTFOLIO_CHAT_BIND";
pub const ENV_CONTEXT: &str = "PORTFOLIO_CHAT_CONTEXT";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Number of most recent turns forwarded to the provider.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Longest single message accepted by the HTTP surface.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME"))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Where the provider credential comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Read the named environment variable at call time.
    Env(String),
    /// Fixed key, mostly for tests and embedding.
    Fixed(String),
}

impl ApiKeySource {
    /// Resolve the credential. Blank values count as absent.
    pub fn resolve(&self) -> Option<String> {
        let raw = match self {
            ApiKeySource::Env(var) => std::env::var(var).ok()?,
            ApiKeySource::Fixed(key) => key.clone(),
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn is_configured(&self) -> bool {
        self.resolve().is_some()
    }
}

impl Default for ApiKeySource {
    fn default() -> Self {
        ApiKeySource::Env(ENV_API_KEY.to_string())
    }
}

/// Provider settings pinned for the AI relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub history_window: usize,
    pub api_key: ApiKeySource,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            history_window: DEFAULT_HISTORY_WINDOW,
            api_key: ApiKeySource::default(),
        }
    }
}

impl RelayConfig {
    /// Defaults overridden by any `PORTFOLIO_CHAT_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = non_blank(ENV_ENDPOINT, &endpoint)?
                .trim_end_matches('/')
                .to_string();
        }
        if let Some(model) = lookup(ENV_MODEL) {
            config.model = non_blank(ENV_MODEL, &model)?;
        }
        if let Some(value) = lookup(ENV_MAX_TOKENS) {
            config.max_tokens = parse_positive(ENV_MAX_TOKENS, &value)?;
        }
        if let Some(value) = lookup(ENV_TEMPERATURE) {
            let temperature: f32 = parse_var(ENV_TEMPERATURE, &value)?;
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::InvalidValue {
                    var: ENV_TEMPERATURE,
                    value,
                });
            }
            config.temperature = temperature;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_positive(ENV_TIMEOUT_SECS, &value)?;
        }

        Ok(config)
    }
}

fn non_blank(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Zero disables the request outright (no tokens, instant timeout).
fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let parsed: T = parse_var(var, value)?;
    if parsed == T::default() {
        return Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

/// Bind address for `serve`, from the environment or the default.
pub fn bind_addr() -> Result<SocketAddr, ConfigError> {
    let raw = std::env::var(ENV_BIND).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    parse_var(ENV_BIND, &raw)
}

/// Optional portfolio context file from the environment.
pub fn context_path() -> Option<PathBuf> {
    std::env::var_os(ENV_CONTEXT).map(PathBuf::from)
}
