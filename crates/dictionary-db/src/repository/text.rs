//! # Language Text Repository
//!
//! Translated values, one row per (dictionary item, language).

use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool};
use uuid::Uuid;

use super::TableRecord;
use crate::error::DbResult;

/// One `cmsLanguageText` row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTextRecord {
    pub pk: i64,
    pub language_id: i64,
    /// Dictionary item id, kept as the stored text.
    pub unique_id: String,
    pub value: String,
}

impl TableRecord for LanguageTextRecord {
    const TABLE: &'static str = "cmsLanguageText";
    const COLUMNS: &'static [&'static str] = &["pk", "languageId", "UniqueId", "value"];
    const ORDER_BY: &'static str = "pk";

    fn decode(row: &SqliteRow) -> DbResult<Self> {
        Ok(LanguageTextRecord {
            pk: row.try_get("pk")?,
            language_id: row.try_get("languageId")?,
            unique_id: row.try_get("UniqueId")?,
            value: row.try_get("value")?,
        })
    }

    fn push_tuple<'args>(self, mut tuple: Separated<'_, 'args, Sqlite, &'static str>) {
        tuple
            .push_bind(self.pk)
            .push_bind(self.language_id)
            .push_bind(self.unique_id)
            .push_bind(self.value);
    }
}

/// Repository for `cmsLanguageText`.
#[derive(Debug, Clone)]
pub struct LanguageTextRepository {
    pool: SqlitePool,
}

impl LanguageTextRepository {
    /// Creates a new LanguageTextRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LanguageTextRepository { pool }
    }

    /// Stores the text of a dictionary item in one language.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The item already has text in that language
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown item or language
    pub async fn insert(&self, language_id: i64, unique_id: Uuid, value: &str) -> DbResult<i64> {
        let result = sqlx::query(
            "INSERT INTO cmsLanguageText (languageId, UniqueId, value) VALUES (?1, ?2, ?3)",
        )
        .bind(language_id)
        .bind(unique_id.to_string())
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Number of rows in the table.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cmsLanguageText")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::error::DbError;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_text() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let language = db.languages().insert("en-GB", "English", true).await.unwrap();
        let item = Uuid::new_v4();
        db.dictionary().insert(item, None, "Save").await.unwrap();

        db.language_texts().insert(language, item, "Save").await.unwrap();
        assert_eq!(db.language_texts().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_text_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let language = db.languages().insert("en-GB", "English", true).await.unwrap();
        let item = Uuid::new_v4();
        db.dictionary().insert(item, None, "Save").await.unwrap();
        db.language_texts().insert(language, item, "Save").await.unwrap();

        let err = db
            .language_texts()
            .insert(language, item, "Save again")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_text_for_unknown_item_is_fk_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let language = db.languages().insert("en-GB", "English", true).await.unwrap();

        let err = db
            .language_texts()
            .insert(language, Uuid::new_v4(), "Orphan")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
