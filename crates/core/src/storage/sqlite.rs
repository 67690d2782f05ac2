//! SQLite backend: one `kv` table, one row per key.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{HuntError, Result};
use crate::storage::traits::KeyValueStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened progress database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // Statements are short and never span an await, so a blocking lock is fine.
    fn run<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| HuntError::Storage("sqlite connection lock poisoned".into()))?;
        Ok(f(&conn)?)
    }
}

impl KeyValueStore for SqliteStore {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>> {
        Box::pin(async move {
            self.run(|conn| {
                conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get::<_, String>(0)
                })
                .optional()
            })
        })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.run(|conn| {
                conn.execute(
                    "INSERT INTO kv (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![key, value],
                )
            })?;
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.run(|conn| conn.execute("DELETE FROM kv WHERE key = ?1", params![key]))?;
            Ok(())
        })
    }

    fn list_keys<'a>(
        &'a self,
        prefix: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        Box::pin(async move {
            // substr instead of LIKE so '_' and '%' in the prefix stay literal.
            self.run(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT key FROM kv WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
                )?;
                let keys = stmt
                    .query_map(params![prefix], |row| row.get::<_, String>(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(keys)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("hunt_progress_a").await.unwrap(), None);

        store.set("hunt_progress_a", "{\"0\":true}").await.unwrap();
        store.set("hunt_progress_a", "{\"1\":true}").await.unwrap();
        assert_eq!(
            store.get("hunt_progress_a").await.unwrap().as_deref(),
            Some("{\"1\":true}")
        );

        store.delete("hunt_progress_a").await.unwrap();
        store.delete("hunt_progress_a").await.unwrap();
        assert_eq!(store.get("hunt_progress_a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prefix_is_literal() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("hunt_progress_b", "{}").await.unwrap();
        store.set("hunt_progress_a", "{}").await.unwrap();
        store.set("huntXprogressXc", "{}").await.unwrap();
        store.set("selectedHunt", "a").await.unwrap();

        let keys = store.list_keys("hunt_progress_").await.unwrap();
        assert_eq!(keys, vec!["hunt_progress_a", "hunt_progress_b"]);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!(
            "scavenger-hunt-sqlite-{}.sqlite3",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("mapRevealEnabled", "true").await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("mapRevealEnabled").await.unwrap().as_deref(),
            Some("true")
        );

        drop(store);
        let _ = std::fs::remove_file(&path);
    }
}
