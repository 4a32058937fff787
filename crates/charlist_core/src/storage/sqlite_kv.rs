//! SQLite-backed key/value persistence.
//!
//! # Invariants
//! - Each key holds at most one row in `kv_entries`.
//! - `save` is a single upsert statement, so readers never observe a
//!   half-written value.

use super::{validate_storage_key, PersistencePort, StorageResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Key/value view over a migrated connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Binds a persistence port to `key`.
    ///
    /// # Errors
    /// - Returns `StorageError::InvalidKey` when `key` is not a valid storage key.
    pub fn slot(&self, key: &str) -> StorageResult<SqliteSlot<'conn>> {
        validate_storage_key(key)?;
        Ok(SqliteSlot {
            conn: self.conn,
            key: key.to_string(),
        })
    }

    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_storage_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_storage_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_write module=storage status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    /// Removes `key`; returns whether a row existed.
    pub fn remove(&self, key: &str) -> StorageResult<bool> {
        validate_storage_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Persistence port bound to one key of a [`SqliteKeyValueStore`].
pub struct SqliteSlot<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl SqliteSlot<'_> {
    pub fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl PersistencePort for SqliteSlot<'_> {
    fn load(&self) -> StorageResult<Option<String>> {
        SqliteKeyValueStore::new(self.conn).get(&self.key)
    }

    fn save(&self, value: &str) -> StorageResult<()> {
        SqliteKeyValueStore::new(self.conn).set(&self.key, value)
    }
}
