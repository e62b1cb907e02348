use crate::db::models::ConfigEntry;
use crate::db::schema::SQLITE_INIT;
use crate::error::ConfkeepError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const SELECT_COLUMNS: &str = r#"id, "key", value, type"#;

/// Store over the `configs` table. Cloning shares the underlying pool, so
/// every request checks out its own connection.
#[derive(Clone)]
pub struct ConfigStorage {
    pool: SqlitePool,
}

impl ConfigStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the SQLite file if missing.
    pub async fn connect(database_url: &str) -> Result<Self, ConfkeepError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ConfkeepError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Close the pool; in-flight connections are waited on.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn get(&self, key: &str) -> Result<Option<ConfigEntry>, ConfkeepError> {
        let row = sqlx::query_as::<_, ConfigEntry>(&format!(
            r#"SELECT {SELECT_COLUMNS} FROM configs WHERE "key" = ?"#
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&self) -> Result<Vec<ConfigEntry>, ConfkeepError> {
        let rows = sqlx::query_as::<_, ConfigEntry>(&format!(
            "SELECT {SELECT_COLUMNS} FROM configs ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a new entry and return it with its assigned id.
    /// Does not check for an existing key; a duplicate fails on the UNIQUE
    /// constraint and surfaces as a database error.
    pub async fn create(
        &self,
        key: &str,
        value: &str,
        kind: &str,
    ) -> Result<ConfigEntry, ConfkeepError> {
        let row = sqlx::query_as::<_, ConfigEntry>(&format!(
            r#"INSERT INTO configs ("key", value, type) VALUES (?, ?, ?)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(key)
        .bind(value)
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = row.id, key = %row.key, "config created");
        Ok(row)
    }

    /// Overwrite the value of `key`, leaving its type untouched.
    /// Returns `None` when the key does not exist.
    pub async fn update(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Option<ConfigEntry>, ConfkeepError> {
        let row = sqlx::query_as::<_, ConfigEntry>(&format!(
            r#"UPDATE configs SET value = ? WHERE "key" = ?
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(value)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(updated) = row.as_ref() {
            debug!(id = updated.id, key = %updated.key, "config updated");
        }
        Ok(row)
    }

    /// Remove `key` and return the row as it was before deletion.
    pub async fn delete(&self, key: &str) -> Result<Option<ConfigEntry>, ConfkeepError> {
        let row = sqlx::query_as::<_, ConfigEntry>(&format!(
            r#"DELETE FROM configs WHERE "key" = ? RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(deleted) = row.as_ref() {
            debug!(id = deleted.id, key = %deleted.key, "config deleted");
        }
        Ok(row)
    }
}
