//! Read-only HTTP API serving a paginated user/unit report from PostgreSQL.
//!
//! The service exposes two routes: a liveness probe at `/` and the report at
//! `/dados`, paginated with `limit`/`offset`. Each request leases one
//! connection from a bounded pool, runs a fixed parameterized query, and
//! returns the rows as JSON.
//!
//! # Design decisions
//!
//! - **Explicit pool health**: the pool is a [`pool::DbPool`] enum carried in
//!   handler state, so "never initialized" is a typed condition answered with
//!   503, not a crash.
//! - **Scoped leases**: connections are returned to the pool by drop, on
//!   every exit path including request timeout.
//! - **Static SQL**: the report text is fixed; caller input is limited to the
//!   two pagination integers, bound positionally.

pub mod api;
pub mod config;
pub mod error;
pub mod pool;
pub mod query;
pub mod report;
pub mod results;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::DbError;
pub use pool::{DbConn, DbPool};
pub use report::{Page, REPORT_SQL, fetch_report};
pub use results::{Record, ResultSet};
pub use types::RowValue;
