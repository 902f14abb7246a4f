use axum::http::HeaderValue;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment environment, selects logging defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

/// Live-update stream settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SseSettings {
    /// Interval between keep-alive comments; None disables them
    pub keep_alive: Option<Duration>,
    /// Emit `id: <version>` before each event
    pub event_ids: bool,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub allowed_origins: Vec<HeaderValue>,
    pub sse: SseSettings,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns the first variable whose value cannot be parsed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| invalid("PORT", &value))?,
            None => defaults.port,
        };

        let environment = match lookup("ENVIRONMENT").as_deref() {
            Some("development") | Some("dev") => Environment::Development,
            Some("production") | Some("prod") | None => Environment::Production,
            Some(other) => return Err(invalid("ENVIRONMENT", other)),
        };

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|_| invalid("ALLOWED_ORIGINS", origin))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.allowed_origins,
        };

        let keep_alive = match lookup("SSE_KEEP_ALIVE_SECS") {
            Some(value) => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| invalid("SSE_KEEP_ALIVE_SECS", &value))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let event_ids = match lookup("SSE_EVENT_IDS") {
            Some(value) => value
                .parse()
                .map_err(|_| invalid("SSE_EVENT_IDS", &value))?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            environment,
            allowed_origins,
            sse: SseSettings {
                keep_alive,
                event_ids,
            },
        })
    }

    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "tictactoe_server=debug,tower_http=debug",
            Environment::Production => "tictactoe_server=info,tower_http=warn",
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: Environment::Production,
            allowed_origins: vec![HeaderValue::from_static("http://localhost:3000")],
            sse: SseSettings::default(),
        }
    }
}

fn invalid(name: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
    }
}
