//! SQLite bootstrap for the key/value store.
//!
//! # Invariants
//! - Returned connections carry the current `kv_entries` schema.
//! - `PRAGMA user_version` records the schema revision. A file stamped by a
//!   newer build is refused untouched so its overlay data is never rewritten
//!   by an older reader.
//! - Upgrades run in one transaction.

use super::{StorageError, StorageResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema steps; step `n` upgrades revision `n` to `n + 1`.
const SCHEMA_STEPS: &[&str] = &[include_str!("sql/0001_kv_entries.sql")];

/// Schema revision written by this build.
pub fn schema_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Opens (or creates) the overlay database file at `path`.
///
/// # Side effects
/// - Emits `store_open` events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> StorageResult<Connection> {
    open_logged("file", || Connection::open(path))
}

/// Opens a store that lives only as long as the returned connection.
pub fn open_store_in_memory() -> StorageResult<Connection> {
    open_logged("memory", Connection::open_in_memory)
}

fn open_logged(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<Connection> {
    let started_at = Instant::now();
    let opened = connect()
        .map_err(StorageError::from)
        .and_then(|mut conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            upgrade_schema(&mut conn)?;
            Ok(conn)
        });

    let duration_ms = started_at.elapsed().as_millis();
    match &opened {
        Ok(_) => info!(
            "event=store_open module=storage status=ok mode={mode} schema={} duration_ms={duration_ms}",
            schema_version()
        ),
        Err(err) => error!(
            "event=store_open module=storage status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
    opened
}

fn upgrade_schema(conn: &mut Connection) -> StorageResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = schema_version();
    if found > supported {
        return Err(StorageError::UnsupportedSchemaVersion { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &SCHEMA_STEPS[found as usize..] {
        tx.execute_batch(step)?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {supported};"))?;
    tx.commit()?;
    info!("event=schema_upgrade module=storage status=ok from={found} to={supported}");
    Ok(())
}
