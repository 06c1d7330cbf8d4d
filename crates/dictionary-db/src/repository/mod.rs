//! # Repository Module
//!
//! Repositories for the three CMS localization tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  rebuild command                      sync engine                      │
//! │       │                                    │                            │
//! │       │  db.dictionary().entries()         │  TableRecord::decode        │
//! │       │  db.languages().all()              │  TableRecord::push_tuple    │
//! │       ▼                                    ▼                            │
//! │  DictionaryRepository ─┐        DictionaryRecord ─┐                     │
//! │  LanguageRepository   ─┼─ SQL   LanguageRecord   ─┼─ one row, as stored │
//! │  LanguageTextRepository┘        LanguageTextRecord┘                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hand out domain types (`DictionaryEntry`, `LanguageEntry`).
//! Records keep every column exactly as stored so a tier copy is lossless.
//!
//! ## Available Repositories
//!
//! - [`DictionaryRepository`](dictionary::DictionaryRepository) - Dictionary entries for codegen
//! - [`LanguageRepository`](language::LanguageRepository) - Language list
//! - [`LanguageTextRepository`](text::LanguageTextRepository) - Translated values

pub mod dictionary;
pub mod language;
pub mod text;

use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::Sqlite;

use crate::error::DbResult;

/// A raw table row that can be read from one database and written to another.
///
/// ## Example
/// ```rust,ignore
/// let sql = LanguageRecord::select_sql();
/// let mut rows = sqlx::query(&sql).fetch(source.pool());
/// while let Some(row) = rows.try_next().await? {
///     batch.push(LanguageRecord::decode(&row)?);
/// }
/// ```
pub trait TableRecord: Sized + Send + Unpin + 'static {
    /// Table name as it appears in SQL.
    const TABLE: &'static str;

    /// Every column, in insert order.
    const COLUMNS: &'static [&'static str];

    /// Column the source rows are streamed in.
    const ORDER_BY: &'static str;

    /// Decodes one row selected with [`TableRecord::select_sql`].
    fn decode(row: &SqliteRow) -> DbResult<Self>;

    /// Binds this record's values, in `COLUMNS` order.
    fn push_tuple<'args>(self, tuple: Separated<'_, 'args, Sqlite, &'static str>);

    /// `SELECT <columns> FROM <table> ORDER BY <order>`.
    fn select_sql() -> String {
        format!(
            "SELECT {} FROM {} ORDER BY {}",
            quoted_columns(Self::COLUMNS),
            Self::TABLE,
            Self::ORDER_BY
        )
    }

    /// `INSERT INTO <table> (<columns>) ` ready for `push_values`.
    fn insert_prefix() -> String {
        format!(
            "INSERT INTO {} ({}) ",
            Self::TABLE,
            quoted_columns(Self::COLUMNS)
        )
    }
}

/// `key` is a keyword in most SQL dialects.
fn quoted_columns(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::dictionary::DictionaryRecord;
    use super::language::LanguageRecord;
    use super::*;

    #[test]
    fn test_select_sql_quotes_columns() {
        assert_eq!(
            DictionaryRecord::select_sql(),
            "SELECT \"pk\", \"id\", \"parent\", \"key\" FROM cmsDictionary ORDER BY pk"
        );
    }

    #[test]
    fn test_insert_prefix() {
        assert_eq!(
            LanguageRecord::insert_prefix(),
            "INSERT INTO umbracoLanguage (\"id\", \"languageISOCode\", \"languageCultureName\", \"isDefaultVariantLang\") "
        );
    }
}
