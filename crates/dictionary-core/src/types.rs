//! # Record Types
//!
//! Flat row representations of the two localization tables.
//!
//! ## Table Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Record Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │    DictionaryEntry       │        │     LanguageEntry        │      │
//! │  │  ──────────────────────  │        │  ──────────────────────  │      │
//! │  │  id (UUID)               │◄──┐    │  id (int)                │      │
//! │  │  key                     │   │    │  iso_code   "en-GB"      │      │
//! │  │  value (default lang)    │   │    │  culture_name            │      │
//! │  │  parent_id (UUID?)  ─────┼───┘    │  is_default              │      │
//! │  │  parent_key              │        └──────────────────────────┘      │
//! │  └──────────────────────────┘                                          │
//! │                                                                         │
//! │  Self-referencing parent chain      Flat list, one marked default      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both record sets are loaded once per operation and never mutated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Dictionary Entry
// =============================================================================

/// One localizable key from the dictionary table.
///
/// `parent_id` is `None` for root entries. A parent id that points at no
/// other entry is tolerated; such an entry is simply never visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Unique identifier of the dictionary item.
    pub id: Uuid,

    /// Raw key as typed by content editors (e.g. "General", "Save button").
    pub key: String,

    /// Text in the default language, if one has been entered.
    pub value: Option<String>,

    /// Parent dictionary item.
    pub parent_id: Option<Uuid>,

    /// Key of the parent dictionary item.
    pub parent_key: Option<String>,
}

impl DictionaryEntry {
    /// Creates a root entry with no value.
    pub fn root(id: Uuid, key: impl Into<String>) -> Self {
        DictionaryEntry {
            id,
            key: key.into(),
            value: None,
            parent_id: None,
            parent_key: None,
        }
    }

    /// Creates an entry nested under `parent`.
    pub fn child_of(parent: &DictionaryEntry, id: Uuid, key: impl Into<String>) -> Self {
        DictionaryEntry {
            id,
            key: key.into(),
            value: None,
            parent_id: Some(parent.id),
            parent_key: Some(parent.key.clone()),
        }
    }

    /// Sets the default-language value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Returns true if this entry sits at the top of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// =============================================================================
// Language Entry
// =============================================================================

/// One row of the language table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Integer identity of the language row.
    pub id: i64,

    /// ISO code, e.g. "en-GB".
    pub iso_code: String,

    /// Display name, e.g. "English (United Kingdom)".
    pub culture_name: String,

    /// Whether this is the default variant language.
    pub is_default: bool,
}

impl LanguageEntry {
    pub fn new(
        id: i64,
        iso_code: impl Into<String>,
        culture_name: impl Into<String>,
        is_default: bool,
    ) -> Self {
        LanguageEntry {
            id,
            iso_code: iso_code.into(),
            culture_name: culture_name.into(),
            is_default,
        }
    }
}

/// Returns the default language.
///
/// Only one row should be flagged default. If several are, the first one in
/// list order wins. `None` means no default was configured, which makes the
/// culture model impossible to render.
pub fn default_language(languages: &[LanguageEntry]) -> Option<&LanguageEntry> {
    languages.iter().find(|language| language.is_default)
}

// =============================================================================
// Unit Tests
// =============================================================================
