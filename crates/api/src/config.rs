use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "INTAKE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// External issue tracker relay. Disabled when `url` is empty.
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Issue creation endpoint. Empty disables the relay.
    #[serde(default)]
    pub url: String,

    /// Bearer token sent with each relay request. Empty sends no credential.
    #[serde(default)]
    pub token: String,

    /// Whole-request timeout for a relay attempt.
    #[serde(default = "default_relay_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            timeout_secs: default_relay_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl RelayConfig {
    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_relay_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    "feature-intake".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. config/default.toml (optional)
    /// 3. config/local.toml (optional, not in git)
    /// 4. Environment variables with INTAKE__ prefix
    /// 5. PORT, when set, for the listening port
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds entirely from embedded defaults so tests never read the
    /// filesystem or the process environment.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 60

            [logging]
            level = "info"
            format = "json"

            [relay]
            url = ""
            token = ""
            timeout_secs = 30
            user_agent = "feature-intake"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.socket_addr().is_err() {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Server host '{}' is not a valid IP address",
                self.server.host
            )));
        }

        if self.relay.is_enabled() {
            let url = reqwest::Url::parse(self.relay.url.trim()).map_err(|e| {
                ConfigValidationError::InvalidValue(format!("relay.url is not a valid URL: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigValidationError::InvalidValue(
                    "relay.url must use http or https".to_string(),
                ));
            }
            if self.relay.timeout_secs == 0 {
                return Err(ConfigValidationError::InvalidValue(
                    "relay.timeout_secs must be greater than 0".to_string(),
                ));
            }
            // Otherwise the server timeout fires first and masks the relay error.
            if self.server.request_timeout_secs <= self.relay.timeout_secs {
                return Err(ConfigValidationError::InvalidValue(
                    "server.request_timeout_secs must exceed relay.timeout_secs".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
