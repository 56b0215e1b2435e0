//! Connection pool lifecycle and leasing.

use deadpool::Status;
use deadpool_postgres::{Object, Pool, Runtime};
use tokio_postgres::NoTls;

use crate::config::DatabaseConfig;
use crate::error::DbError;

/// A leased database connection.
///
/// The lease is exclusive for the duration of one request. Dropping it returns
/// the connection to the pool, on every exit path including cancellation.
pub type DbConn = Object;

/// The process-wide connection pool, with its health as an explicit state.
///
/// Initialization happens once at startup. A pool that failed to initialize
/// stays [`DbPool::Unavailable`] for the process lifetime; no retry is
/// attempted and callers see a typed error instead of a crash.
#[derive(Clone)]
pub enum DbPool {
    /// The pool initialized successfully and can lease connections.
    Ready(Pool),
    /// Initialization failed; permanent for the process lifetime.
    Unavailable,
}

impl std::fmt::Debug for DbPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(_) => f.debug_tuple("Ready").field(&"<Pool>").finish(),
            Self::Unavailable => f.debug_tuple("Unavailable").finish(),
        }
    }
}

impl DbPool {
    /// Initializes the pool from configuration.
    ///
    /// On any failure (missing credentials, unreachable host, bad password)
    /// the error is logged and the pool is left [`DbPool::Unavailable`]; the
    /// process keeps running degraded.
    pub async fn initialize(cfg: &DatabaseConfig) -> DbPool {
        match Self::try_initialize(cfg).await {
            Ok(pool) => {
                tracing::info!(
                    max_size = cfg.pool_max_size,
                    warmed = cfg.pool_min_size,
                    "database pool ready"
                );
                DbPool::Ready(pool)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize connection pool, serving degraded");
                DbPool::Unavailable
            }
        }
    }

    async fn try_initialize(cfg: &DatabaseConfig) -> Result<Pool, DbError> {
        if cfg.dbname.is_none() {
            return Err(DbError::Config("dbname is required".to_string()));
        }
        if cfg.host.is_none() {
            return Err(DbError::Config("host is required".to_string()));
        }
        if cfg.user.is_none() {
            return Err(DbError::Config("user is required".to_string()));
        }
        if cfg.password.is_none() {
            return Err(DbError::Config("password is required".to_string()));
        }

        let pool = cfg
            .pg_config()
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DbError::Connection(format!("failed to create Postgres pool: {e}")))?;

        // deadpool opens connections lazily; hold `pool_min_size` leases at
        // once so startup fails fast on an unreachable host or bad
        // credentials, then return them all to the pool.
        let mut warm = Vec::with_capacity(cfg.pool_min_size);
        for _ in 0..cfg.pool_min_size {
            warm.push(pool.get().await?);
        }
        drop(warm);

        Ok(pool)
    }

    /// Whether the pool initialized successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, DbPool::Ready(_))
    }

    /// Leases one connection from the pool.
    ///
    /// Waits according to the pool's internal policy when all connections are
    /// leased, bounded by the configured maximum.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Unavailable`] if the pool never initialized, or a
    /// pool error if acquisition fails.
    pub async fn acquire(&self) -> Result<DbConn, DbError> {
        match self {
            DbPool::Ready(pool) => Ok(pool.get().await?),
            DbPool::Unavailable => Err(DbError::Unavailable),
        }
    }

    /// Pool bookkeeping snapshot, for diagnostics and leak checks in tests.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        match self {
            DbPool::Ready(pool) => Some(pool.status()),
            DbPool::Unavailable => None,
        }
    }
}
