//! Service configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Database and pool settings.
    pub database: DatabaseConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: IpAddr,

    /// Port to listen on.
    pub port: u16,

    /// Per-request budget for pool acquisition plus query execution, in seconds.
    pub request_timeout_secs: u64,
}

/// PostgreSQL endpoint and pool configuration.
///
/// Credentials are optional here; their absence is surfaced as a configuration
/// error at pool initialization, which leaves the service running degraded
/// rather than refusing to start.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,

    /// Connections opened eagerly at startup as a connectivity probe.
    pub pool_min_size: usize,

    /// Upper bound on live pooled connections.
    pub pool_max_size: usize,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "dados_api=debug,info").
    pub level: String,

    /// Whether to output logs in JSON format.
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: FromStr>(key: &str) -> Option<T> {
    env_var(key).and_then(|v| v.parse().ok())
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// Recognized variables: `PG_HOST`, `PG_PORT`, `PG_DB`, `PG_USER`,
    /// `PG_PASSWORD`, `PG_POOL_MIN`, `PG_POOL_MAX`, `APP_HOST`, `APP_PORT`,
    /// `APP_REQUEST_TIMEOUT_SECS`, `APP_LOG_LEVEL`, `APP_LOG_JSON`.
    #[must_use]
    pub fn from_env() -> Self {
        let pool_min_size = env_parsed("PG_POOL_MIN").unwrap_or(1).max(1);
        let mut pool_max_size = env_parsed("PG_POOL_MAX").unwrap_or(10);
        if pool_max_size < pool_min_size {
            tracing::warn!(
                pool_min_size,
                pool_max_size,
                "PG_POOL_MAX below PG_POOL_MIN, clamping to the minimum"
            );
            pool_max_size = pool_min_size;
        }

        Self {
            server: ServerConfig {
                host: env_parsed("APP_HOST").unwrap_or_else(default_host),
                port: env_parsed("APP_PORT").unwrap_or(3000),
                request_timeout_secs: env_parsed("APP_REQUEST_TIMEOUT_SECS").unwrap_or(30),
            },
            database: DatabaseConfig {
                host: env_var("PG_HOST"),
                port: env_parsed("PG_PORT"),
                dbname: env_var("PG_DB"),
                user: env_var("PG_USER"),
                password: env_var("PG_PASSWORD"),
                pool_min_size,
                pool_max_size,
            },
            logging: LoggingConfig {
                level: env_var("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                json: matches!(env_var("APP_LOG_JSON").as_deref(), Some("true" | "1")),
            },
        }
    }
}

impl DatabaseConfig {
    /// Builds the deadpool configuration from these settings.
    ///
    /// The port defaults to 5432 when unset; everything else is passed
    /// through as-is and validated at pool initialization.
    #[must_use]
    pub fn pg_config(&self) -> deadpool_postgres::Config {
        let mut cfg = deadpool_postgres::Config::new();
        cfg.host = self.host.clone();
        cfg.port = Some(self.port.unwrap_or(5432));
        cfg.dbname = self.dbname.clone();
        cfg.user = self.user.clone();
        cfg.password = self.password.clone();
        cfg.pool = Some(deadpool::managed::PoolConfig::new(self.pool_max_size));
        cfg
    }
}
