//! Server configuration module
//!
//! Provides the configuration of the chat server. Values come from the
//! environment (after `dotenv` has loaded `.env`) or from the builder.
//!
//! | Variable                   | Default | Meaning                              |
//! |----------------------------|---------|--------------------------------------|
//! | `SERVER_PORT`              | `8000`  | TCP port the server listens on       |
//! | `DATABASE_URL`             | unset   | Postgres URL; unset means in-memory  |
//! | `DATABASE_MAX_CONNECTIONS` | `10`    | Pool size                            |
//! | `CORS_ORIGIN`              | unset   | Extra allowed origins, comma separated |

use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default Postgres pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Origin of the local frontend dev server, always allowed
pub const DEV_ORIGIN: &str = "http://localhost:5173";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
    /// Postgres connection URL
    pub database_url: Option<String>,
    /// Postgres pool size
    pub database_max_connections: u32,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_origins: vec![DEV_ORIGIN.to_string()],
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(port) = non_empty(lookup("SERVER_PORT")) {
            let port = port.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: port.clone(),
            })?;
            builder = builder.port(port);
        }

        if let Some(url) = non_empty(lookup("DATABASE_URL")) {
            builder = builder.database_url(url);
        }

        if let Some(max) = non_empty(lookup("DATABASE_MAX_CONNECTIONS")) {
            let max = max.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                value: max.clone(),
            })?;
            builder = builder.database_max_connections(max);
        }

        if let Some(origins) = non_empty(lookup("CORS_ORIGIN")) {
            for origin in origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                builder = builder.cors_origin(origin);
            }
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: self.port.to_string(),
            });
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                value: self.database_max_connections.to_string(),
            });
        }
        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        for origin in &self.cors_origins {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(origin.clone()));
            }
        }
        Ok(())
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    database_max_connections: Option<u32>,
    cors_origins: Vec<String>,
}

impl ServerConfigBuilder {
    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the pool size
    pub fn database_max_connections(mut self, max: u32) -> Self {
        self.database_max_connections = Some(max);
        self
    }

    /// Allow an additional CORS origin
    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let mut cors_origins = vec![DEV_ORIGIN.to_string()];
        for origin in self.cors_origins {
            if !cors_origins.contains(&origin) {
                cors_origins.push(origin);
            }
        }

        let config = ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            database_max_connections: self
                .database_max_connections
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            cors_origins,
        };
        config.validate()?;
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
