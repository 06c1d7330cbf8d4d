//! # Dictionary Repository
//!
//! Reads the dictionary table for code generation.
//!
//! ## Entries Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How entries() Is Assembled                           │
//! │                                                                         │
//! │  cmsDictionary d                                                       │
//! │       │                                                                 │
//! │       ├── LEFT JOIN cmsDictionary p   ON p.id = d.parent   → parentKey │
//! │       │                                                                 │
//! │       └── LEFT JOIN cmsLanguageText t ON t.UniqueId = d.id             │
//! │                  AND t.languageId = <first default language>  → value  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY d.key                                                        │
//! │                                                                         │
//! │  parentId comes from d.parent, not p.id: an orphan keeps the parent    │
//! │  id it points at, so it is never mistaken for a root.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::TableRecord;
use crate::error::{DbError, DbResult};
use dictionary_core::DictionaryEntry;

const TABLE: &str = "cmsDictionary";

// =============================================================================
// Record
// =============================================================================

/// One `cmsDictionary` row as stored.
///
/// Ids stay as text so a tier copy writes back exactly what it read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRecord {
    pub pk: i64,
    pub id: String,
    pub parent: Option<String>,
    pub key: String,
}

impl TableRecord for DictionaryRecord {
    const TABLE: &'static str = TABLE;
    const COLUMNS: &'static [&'static str] = &["pk", "id", "parent", "key"];
    const ORDER_BY: &'static str = "pk";

    fn decode(row: &SqliteRow) -> DbResult<Self> {
        Ok(DictionaryRecord {
            pk: row.try_get("pk")?,
            id: row.try_get("id")?,
            parent: row.try_get("parent")?,
            key: row.try_get("key")?,
        })
    }

    fn push_tuple<'args>(self, mut tuple: Separated<'_, 'args, Sqlite, &'static str>) {
        tuple
            .push_bind(self.pk)
            .push_bind(self.id)
            .push_bind(self.parent)
            .push_bind(self.key);
    }
}

/// Decodes one row of the entries query.
fn decode_entry(row: &SqliteRow) -> DbResult<DictionaryEntry> {
    let id: String = row.try_get("id")?;
    let parent_id: Option<String> = row.try_get("parentId")?;

    Ok(DictionaryEntry {
        id: parse_uuid(&id)?,
        key: row.try_get("key")?,
        value: row.try_get("value")?,
        parent_id: parent_id.as_deref().map(parse_uuid).transpose()?,
        parent_key: row.try_get("parentKey")?,
    })
}

fn parse_uuid(raw: &str) -> DbResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| DbError::invalid_data(TABLE, format!("id '{}' is not a UUID: {}", raw, e)))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for `cmsDictionary`.
///
/// ## Usage
/// ```rust,ignore
/// let entries = db.dictionary().entries().await?;
/// let tree = DictionaryTree::build(&entries);
/// ```
#[derive(Debug, Clone)]
pub struct DictionaryRepository {
    pool: SqlitePool,
}

impl DictionaryRepository {
    /// Creates a new DictionaryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DictionaryRepository { pool }
    }

    /// Loads every dictionary entry with its default-language value.
    ///
    /// ## Returns
    /// * `Ok(entries)` - Ordered by raw key
    /// * `Err(DbError::InvalidData)` - An id or parent is not a UUID
    pub async fn entries(&self) -> DbResult<Vec<DictionaryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT
                d.id AS id,
                d."key" AS "key",
                t.value AS value,
                d.parent AS parentId,
                p."key" AS parentKey
            FROM cmsDictionary d
            LEFT JOIN cmsDictionary p ON p.id = d.parent
            LEFT JOIN cmsLanguageText t
                ON t.UniqueId = d.id
                AND t.languageId = (
                    SELECT id FROM umbracoLanguage
                    WHERE isDefaultVariantLang = 1
                    ORDER BY id
                    LIMIT 1
                )
            ORDER BY d."key", d.pk
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .iter()
            .map(decode_entry)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = entries.len(), "Loaded dictionary entries");
        Ok(entries)
    }

    /// Inserts a dictionary item and returns its `pk`.
    pub async fn insert(&self, id: Uuid, parent: Option<Uuid>, key: &str) -> DbResult<i64> {
        let result =
            sqlx::query(r#"INSERT INTO cmsDictionary (id, parent, "key") VALUES (?1, ?2, ?3)"#)
                .bind(id.to_string())
                .bind(parent.map(|p| p.to_string()))
                .bind(key)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Number of rows in the table.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cmsDictionary")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
