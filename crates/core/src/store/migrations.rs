//! Schema versions for the record store.
//!
//! `_migrations` holds one row per applied schema version. On open, every
//! version above the highest recorded one is applied in its own transaction,
//! together with its `_migrations` row.

use super::Error;
use tokio_rusqlite::{Connection, params};

/// Schema versions in apply order: entity rows, then the move catalog.
const MIGRATIONS: &[(i64, &str)] = &[
    (1, include_str!("../../migrations/001_entities.sql")),
    (2, include_str!("../../migrations/002_moves.sql")),
];

const VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
)";

/// Bring the store's schema up to the latest version.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| -> Result<(), Error> {
        conn.execute(VERSION_TABLE, [])?;

        let current: i64 = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?;

        for &(version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > current) {
            let tx = conn.transaction()?;
            tx.execute_batch(sql)
                .map_err(|e| Error::MigrationFailed(format!("schema version {version}: {e}")))?;
            tx.execute(
                "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
                params![version, chrono::Utc::now().to_rfc3339()],
            )?;
            tx.commit()?;
            tracing::debug!(version, "schema version applied");
        }

        Ok(())
    })
    .await
    .map_err(Error::from)
}
