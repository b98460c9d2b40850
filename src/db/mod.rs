mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Key holding the transaction collection.
pub(crate) const TRANSACTIONS_KEY: &str = "finance-transactions";
/// Key holding the budget collection.
pub(crate) const BUDGETS_KEY: &str = "finance-budgets";

/// A string-keyed store of JSON documents.
///
/// Implementors only move raw strings; the provided `load`/`save` handle
/// (de)serialization so every backend shares the same blob format.
pub(crate) trait Store {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn put_raw(&mut self, key: &str, value: &str) -> Result<()>;

    /// Read `key`, falling back to `T::default()` when nothing is stored yet.
    fn load<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
        Self: Sized,
    {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Stored value for '{key}' is not valid")),
            None => {
                tracing::debug!(key, "no stored value, using default");
                Ok(T::default())
            }
        }
    }

    /// Replace the whole value stored under `key`.
    fn save<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for '{key}'"))?;
        self.put_raw(key, &raw)
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Create the tables on first use and stamp the schema version. A file
    /// stamped by a newer build is refused rather than rewritten.
    fn migrate(&mut self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA_V1)?;

        let stamped: Option<i32> = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })?;

        match stamped {
            None => {
                self.conn.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )?;
                tracing::debug!(version = schema::CURRENT_VERSION, "schema created");
            }
            Some(version) if version > schema::CURRENT_VERSION => anyhow::bail!(
                "Database schema version {version} is newer than this build supports ({})",
                schema::CURRENT_VERSION
            ),
            Some(_) => {}
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

impl Store for Database {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read '{key}'"))?;
        Ok(value)
    }

    fn put_raw(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to write '{key}'"))?;
        tracing::debug!(key, bytes = value.len(), "value saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
