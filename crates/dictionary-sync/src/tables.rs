//! # Synchronised Tables
//!
//! The three localization tables and the foreign keys between them.
//!
//! ```text
//! umbracoLanguage ◄──────────── cmsLanguageText ────────────► cmsDictionary
//!                   languageId                     UniqueId        │  ▲
//!                                                                  └──┘
//!                                                                 parent
//!
//! transfer: umbracoLanguage → cmsDictionary → cmsLanguageText
//! clear:    cmsLanguageText → cmsDictionary → umbracoLanguage
//! ```

use std::fmt;

use dictionary_db::{DictionaryRecord, LanguageRecord, LanguageTextRecord, TableRecord};

/// One foreign key between the synchronised tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub referenced_table: &'static str,
    pub referenced_column: &'static str,
}

impl fmt::Display for ForeignKeyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}.{} -> {}.{})",
            self.name, self.table, self.column, self.referenced_table, self.referenced_column
        )
    }
}

const DICTIONARY_PARENT: ForeignKeyConstraint = ForeignKeyConstraint {
    name: "FK_cmsDictionary_cmsDictionary_id",
    table: "cmsDictionary",
    column: "parent",
    referenced_table: "cmsDictionary",
    referenced_column: "id",
};

const TEXT_DICTIONARY: ForeignKeyConstraint = ForeignKeyConstraint {
    name: "FK_cmsLanguageText_cmsDictionary_id",
    table: "cmsLanguageText",
    column: "UniqueId",
    referenced_table: "cmsDictionary",
    referenced_column: "id",
};

const TEXT_LANGUAGE: ForeignKeyConstraint = ForeignKeyConstraint {
    name: "FK_cmsLanguageText_umbracoLanguage_id",
    table: "cmsLanguageText",
    column: "languageId",
    referenced_table: "umbracoLanguage",
    referenced_column: "id",
};

/// A table the sync engine clears and refills, with its outgoing constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSyncTarget {
    pub table: &'static str,
    pub constraints: &'static [ForeignKeyConstraint],
}

/// The synchronised tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyncTable {
    Language,
    Dictionary,
    LanguageText,
}

impl SyncTable {
    /// Referenced tables come before the tables that point at them.
    pub const TRANSFER_ORDER: [SyncTable; 3] = [
        SyncTable::Language,
        SyncTable::Dictionary,
        SyncTable::LanguageText,
    ];

    /// Dependents are emptied before the tables they reference.
    pub const CLEAR_ORDER: [SyncTable; 3] = [
        SyncTable::LanguageText,
        SyncTable::Dictionary,
        SyncTable::Language,
    ];

    /// Table name in SQL.
    pub fn name(self) -> &'static str {
        match self {
            SyncTable::Language => LanguageRecord::TABLE,
            SyncTable::Dictionary => DictionaryRecord::TABLE,
            SyncTable::LanguageText => LanguageTextRecord::TABLE,
        }
    }

    /// Columns copied for this table, identity column included.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            SyncTable::Language => LanguageRecord::COLUMNS,
            SyncTable::Dictionary => DictionaryRecord::COLUMNS,
            SyncTable::LanguageText => LanguageTextRecord::COLUMNS,
        }
    }

    pub fn target(self) -> TableSyncTarget {
        let constraints: &'static [ForeignKeyConstraint] = match self {
            SyncTable::Language => &[],
            SyncTable::Dictionary => &[DICTIONARY_PARENT],
            SyncTable::LanguageText => &[TEXT_DICTIONARY, TEXT_LANGUAGE],
        };
        TableSyncTarget {
            table: self.name(),
            constraints,
        }
    }
}

impl fmt::Display for SyncTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[SyncTable], name: &str) -> usize {
        order.iter().position(|t| t.name() == name).unwrap()
    }

    #[test]
    fn test_transfer_order_satisfies_constraints() {
        for table in SyncTable::TRANSFER_ORDER {
            for fk in table.target().constraints {
                assert!(
                    position(&SyncTable::TRANSFER_ORDER, fk.referenced_table)
                        <= position(&SyncTable::TRANSFER_ORDER, fk.table),
                    "{fk} copied before its referenced table"
                );
            }
        }
    }

    #[test]
    fn test_clear_order_is_reverse_of_transfer() {
        let mut reversed = SyncTable::TRANSFER_ORDER;
        reversed.reverse();
        assert_eq!(reversed, SyncTable::CLEAR_ORDER);
    }

    #[test]
    fn test_constraint_names() {
        let names: Vec<&str> = SyncTable::TRANSFER_ORDER
            .iter()
            .flat_map(|t| t.target().constraints.iter().map(|c| c.name))
            .collect();
        assert_eq!(
            names,
            vec![
                "FK_cmsDictionary_cmsDictionary_id",
                "FK_cmsLanguageText_cmsDictionary_id",
                "FK_cmsLanguageText_umbracoLanguage_id",
            ]
        );
    }

    #[test]
    fn test_columns_include_identity() {
        assert_eq!(SyncTable::Language.columns()[0], "id");
        assert_eq!(SyncTable::Dictionary.columns()[0], "pk");
        assert_eq!(SyncTable::LanguageText.to_string(), "cmsLanguageText");
    }
}
