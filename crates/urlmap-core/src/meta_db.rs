//! Object metadata store (SQLite via sqlx).
//!
//! Plays the host's part for metadata: rows of `(object_id, meta_key,
//! meta_value)` in insertion order, a raw lookup that bypasses every
//! filter, and the filtered read that consults the rewrite binding first.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

use crate::mapper::{MetaLookup, UrlMapper};
use crate::store::OptionStore;
use crate::value::MetaValue;

/// Identifier of the object (post, attachment, ...) metadata belongs to.
pub type ObjectId = i64;

/// Row identifier; increases with insertion order.
pub type MetaId = i64;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}?mode=rwc", out)
}

/// Handle to the SQLite-backed metadata store.
///
/// The default database lives under the XDG state directory:
/// `~/.local/state/urlmap/meta.db`.
#[derive(Clone)]
pub struct MetaDb {
    pool: Pool<Sqlite>,
}

impl MetaDb {
    /// Open (or create) the default metadata database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("urlmap")?;
        Self::open_at(xdg_dirs.get_state_home().join("meta.db")).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&path_to_sqlite_uri(path))
            .await?;
        let db = MetaDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open a private in-memory database (fixtures and tests).
    pub async fn open_in_memory() -> Result<Self> {
        // Single connection to avoid in-memory pool handing back a different empty DB.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let db = MetaDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS object_meta (
                meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
                object_id INTEGER NOT NULL,
                meta_key TEXT NOT NULL,
                meta_value TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS object_meta_lookup
            ON object_meta (object_id, meta_key);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append a row for `key` on `object_id`.
    pub async fn add_meta(&self, object_id: ObjectId, key: &str, value: &MetaValue) -> Result<MetaId> {
        let row_id = sqlx::query(
            r#"
            INSERT INTO object_meta (object_id, meta_key, meta_value)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(object_id)
        .bind(key)
        .bind(value.encode_for_storage())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(row_id)
    }

    /// Remove every row for `key` on `object_id`. Returns the number removed.
    pub async fn delete_meta(&self, object_id: ObjectId, key: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM object_meta
            WHERE object_id = ?1 AND meta_key = ?2
            "#,
        )
        .bind(object_id)
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Most recently stored raw row, if any.
    pub async fn latest_raw(&self, object_id: ObjectId, key: &str) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT meta_value FROM object_meta
            WHERE object_id = ?1 AND meta_key = ?2
            ORDER BY meta_id DESC
            LIMIT 1
            "#,
        )
        .bind(object_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get::<String, _>("meta_value")))
    }

    /// Every raw row in storage order.
    pub async fn all_raw(&self, object_id: ObjectId, key: &str) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT meta_value FROM object_meta
            WHERE object_id = ?1 AND meta_key = ?2
            ORDER BY meta_id ASC
            "#,
        )
        .bind(object_id)
        .bind(key)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.get::<String, _>("meta_value")).collect())
    }

    /// Decoded rows without any rewriting. `None` when nothing is stored.
    pub async fn load_raw(
        &self,
        object_id: ObjectId,
        key: &str,
        single: bool,
    ) -> Result<Option<MetaLookup>> {
        if single {
            let raw = self.latest_raw(object_id, key).await?;
            return Ok(raw.map(|r| MetaLookup::Single(MetaValue::decode_stored(&r))));
        }

        let rows = self.all_raw(object_id, key).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(MetaLookup::Multiple(
            rows.iter().map(|r| MetaValue::decode_stored(r)).collect(),
        )))
    }

    /// Filtered read: the rewrite binding answers first; when it declines,
    /// the rows are loaded as stored.
    pub async fn read_meta<S: OptionStore>(
        &self,
        mapper: &UrlMapper<S>,
        object_id: ObjectId,
        key: &str,
        single: bool,
    ) -> Result<Option<MetaLookup>> {
        if let Some(filtered) = mapper
            .rewrite_meta_value(self, object_id, key, None, single)
            .await?
        {
            return Ok(Some(filtered));
        }
        self.load_raw(object_id, key, single).await
    }
}
