//! SQLite connection pool and embedded migrations.
//!
//! Tables: `users`, `contacts`, `spam_reports`, `revoked_tokens`. Contacts,
//! spam reports and revocations cascade with their user, which needs
//! `PRAGMA foreign_keys` on every connection, so the pool sets it on acquire.
//! Each connection also gets `unicode_lower`, since SQLite's own `lower` and
//! `LIKE` only fold ASCII.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::define_sql_function;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

define_sql_function! {
    /// Full Unicode lowercase, matching Rust's `str::to_lowercase`.
    fn unicode_lower(x: Text) -> Text;
}

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            BUSY_TIMEOUT.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)?;

        unicode_lower_utils::register_impl(conn, |value: String| value.to_lowercase())
            .map_err(r2d2::Error::QueryError)
    }
}

/// Build a pool for `database_url`. An in-memory database only lives as long
/// as its connection, so callers using `:memory:` should pass `max_size = 1`.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(10))
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
}

/// Apply any pending migrations, returning how many ran.
pub fn run_migrations(conn: &mut SqliteConnection) -> anyhow::Result<usize> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;
    Ok(applied.len())
}
