//! Configuration loading: a TOML file with environment variable overrides.
//!
//! Looks for `statehub.toml` in the working directory. Every field has a
//! default except the API password, which must come from the file or from
//! `STATEHUB_API_PASSWORD`. Environment variables take precedence over file
//! values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Shared-secret settings.
    pub auth: AuthConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Optional upstream hub announced through a bridge.
    pub remote: Option<RemoteConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Authentication configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret every API and debug request must present.
    pub api_password: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Upstream hub this instance reports to.
#[derive(Debug, Deserialize)]
pub struct RemoteConfig {
    /// `host`, `host:port` or a full URL of the upstream hub.
    pub host: String,
    /// The upstream hub's API password.
    pub api_password: String,
    /// Name this instance publishes its presence under.
    #[serde(default = "default_instance")]
    pub instance: String,
}

fn default_instance() -> String {
    "statehubd".to_string()
}

impl Config {
    /// Load configuration from `statehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("statehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. `STATEHUB_BIND` wins over the separate
    /// host and port keys, `STATEHUB_LOG` wins over `RUST_LOG`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("STATEHUB_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("STATEHUB_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(bind) = lookup("STATEHUB_BIND")
            && let Some((host, port)) = bind.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(password) = lookup("STATEHUB_API_PASSWORD") {
            self.auth.api_password = password;
        }
        if let Some(filter) = lookup("STATEHUB_LOG").or_else(|| lookup("RUST_LOG")) {
            self.logging.filter = filter;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.api_password.is_empty() {
            return Err(ConfigError::Validation(
                "auth.api_password must be set".to_string(),
            ));
        }
        if let Some(remote) = &self.remote
            && (remote.host.is_empty() || remote.api_password.is_empty())
        {
            return Err(ConfigError::Validation(
                "remote.host and remote.api_password must both be set".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: statehub_adapter_http_axum::SERVER_PORT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "statehubd=info,statehub_app=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
