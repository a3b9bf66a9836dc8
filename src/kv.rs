// Durable key-value preferences (theme, persisted profile)
use rusqlite::{params, OptionalExtension};
use std::collections::HashMap;
use thiserror::Error;

use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("Database error: {0}")]
    Database(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),
}

pub trait KvStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError>;
}

/// Process-local store; everything is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryKv {
    values: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backed by the `preferences` table.
pub struct SqliteKv {
    pool: DbPool,
}

impl SqliteKv {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
               value = excluded.value,
               updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }
}
