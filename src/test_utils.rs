//! Test utilities for exercising the service against a real database.

pub mod postgres;

pub use postgres::{EmbeddedPostgres, setup_postgres_embedded, stop_postgres_embedded};
