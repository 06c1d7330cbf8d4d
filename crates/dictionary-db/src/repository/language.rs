//! # Language Repository
//!
//! The flat language table. One row should be flagged as the default
//! variant language; codegen embeds its ISO code.

use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::debug;

use super::TableRecord;
use crate::error::DbResult;
use dictionary_core::LanguageEntry;

// =============================================================================
// Record
// =============================================================================

/// One `umbracoLanguage` row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRecord {
    pub id: i64,
    pub iso_code: String,
    pub culture_name: String,
    pub is_default: bool,
}

impl From<LanguageRecord> for LanguageEntry {
    fn from(record: LanguageRecord) -> Self {
        LanguageEntry::new(
            record.id,
            record.iso_code,
            record.culture_name,
            record.is_default,
        )
    }
}

impl TableRecord for LanguageRecord {
    const TABLE: &'static str = "umbracoLanguage";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "languageISOCode",
        "languageCultureName",
        "isDefaultVariantLang",
    ];
    const ORDER_BY: &'static str = "id";

    fn decode(row: &SqliteRow) -> DbResult<Self> {
        Ok(LanguageRecord {
            id: row.try_get("id")?,
            iso_code: row.try_get("languageISOCode")?,
            culture_name: row.try_get("languageCultureName")?,
            is_default: row.try_get("isDefaultVariantLang")?,
        })
    }

    fn push_tuple<'args>(self, mut tuple: Separated<'_, 'args, Sqlite, &'static str>) {
        tuple
            .push_bind(self.id)
            .push_bind(self.iso_code)
            .push_bind(self.culture_name)
            .push_bind(self.is_default);
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for `umbracoLanguage`.
#[derive(Debug, Clone)]
pub struct LanguageRepository {
    pool: SqlitePool,
}

impl LanguageRepository {
    /// Creates a new LanguageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LanguageRepository { pool }
    }

    /// Returns every language ordered by id.
    ///
    /// Id order is the order languages were added in the CMS, which is
    /// the order the culture registry lists them.
    pub async fn all(&self) -> DbResult<Vec<LanguageEntry>> {
        let rows = sqlx::query(&LanguageRecord::select_sql())
            .fetch_all(&self.pool)
            .await?;

        let languages = rows
            .iter()
            .map(|row| LanguageRecord::decode(row).map(LanguageEntry::from))
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = languages.len(), "Loaded languages");
        Ok(languages)
    }

    /// Inserts a language and returns its id.
    pub async fn insert(
        &self,
        iso_code: &str,
        culture_name: &str,
        is_default: bool,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            "INSERT INTO umbracoLanguage (languageISOCode, languageCultureName, isDefaultVariantLang) \
             VALUES (?1, ?2, ?3)",
        )
        .bind(iso_code)
        .bind(culture_name)
        .bind(is_default)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Number of rows in the table.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM umbracoLanguage")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_all_orders_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.languages();

        let en = repo.insert("en-GB", "English (United Kingdom)", true).await.unwrap();
        let fr = repo.insert("fr-FR", "French (France)", false).await.unwrap();

        let languages = repo.all().await.unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].id, en);
        assert_eq!(languages[0].iso_code, "en-GB");
        assert!(languages[0].is_default);
        assert_eq!(languages[1].id, fr);
        assert!(!languages[1].is_default);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.languages().all().await.unwrap().is_empty());
    }
}
