//! Embedded PostgreSQL bootstrap for integration tests.

use postgresql_embedded::PostgreSQL;

use crate::config::DatabaseConfig;

/// Represents a running embedded PostgreSQL instance.
pub struct EmbeddedPostgres {
    pub postgresql: PostgreSQL,
    /// Pool configuration pointing at the embedded instance.
    pub config: DatabaseConfig,
}

/// Set up an embedded PostgreSQL instance and create the given database.
///
/// The returned [`DatabaseConfig`] carries the embedded instance's host,
/// port, and credentials, with a small pool suitable for tests.
///
/// # Errors
///
/// Returns an error if the embedded server cannot be set up, started, or if
/// database creation fails.
pub async fn setup_postgres_embedded(
    dbname: &str,
) -> Result<EmbeddedPostgres, Box<dyn std::error::Error>> {
    let mut postgresql = PostgreSQL::default();

    // Setup PostgreSQL binaries (bundled, so no download conflicts)
    postgresql.setup().await?;
    postgresql.start().await?;

    postgresql.create_database(dbname).await?;

    let settings = postgresql.settings();
    let config = DatabaseConfig {
        host: Some(settings.host.clone()),
        port: Some(settings.port),
        dbname: Some(dbname.to_string()),
        user: Some(settings.username.clone()),
        password: Some(settings.password.clone()),
        pool_min_size: 1,
        pool_max_size: 4,
    };

    Ok(EmbeddedPostgres { postgresql, config })
}

/// Stop a previously started embedded PostgreSQL instance.
pub async fn stop_postgres_embedded(postgres: EmbeddedPostgres) {
    let _ = postgres.postgresql.stop().await;
}
