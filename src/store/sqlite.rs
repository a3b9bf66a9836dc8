// SQLite-backed collections: one JSON body per row in `records`
use rusqlite::{params, OptionalExtension};
use std::marker::PhantomData;

use crate::content::Entity;
use crate::state::DbPool;
use crate::store::backend::Backend;
use crate::store::StoreError;

pub struct SqliteBackend<T> {
    pool: DbPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SqliteBackend<T> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> Backend<T> for SqliteBackend<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT body FROM records WHERE kind = ?1 ORDER BY position ASC")?;

        let bodies: Vec<String> = stmt
            .query_map(params![T::KIND.as_str()], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }

    fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        let conn = self.pool.get()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM records WHERE kind = ?1 AND id = ?2",
                params![T::KIND.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;
        let exists: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM records WHERE kind = ?1 AND id = ?2",
            params![T::KIND.as_str(), id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records WHERE kind = ?1",
            params![T::KIND.as_str()],
            |row| row.get(0),
        )?;
        Ok(count == 0)
    }

    fn push_front(&mut self, record: T) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        let body = serde_json::to_string(&record)?;

        conn.execute(
            "INSERT INTO records (kind, id, position, body)
             VALUES (?1, ?2, (SELECT COALESCE(MIN(position), 0) - 1 FROM records WHERE kind = ?1), ?3)",
            params![T::KIND.as_str(), record.id(), body],
        )?;

        Ok(())
    }

    fn replace(&mut self, record: T) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;
        let body = serde_json::to_string(&record)?;

        let rows = conn.execute(
            "UPDATE records SET body = ?3, updated_at = datetime('now')
             WHERE kind = ?1 AND id = ?2",
            params![T::KIND.as_str(), record.id(), body],
        )?;

        Ok(rows > 0)
    }

    fn replace_all(&mut self, records: Vec<T>) -> Result<(), StoreError> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "UPDATE records SET body = ?3, updated_at = datetime('now')
                 WHERE kind = ?1 AND id = ?2",
            )?;
            for record in &records {
                let body = serde_json::to_string(record)?;
                stmt.execute(params![T::KIND.as_str(), record.id(), body])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;

        let rows = conn.execute(
            "DELETE FROM records WHERE kind = ?1 AND id = ?2",
            params![T::KIND.as_str(), id],
        )?;

        Ok(rows > 0)
    }
}
