//! # Error Types
//!
//! Domain errors for dictionary-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dictionary-core errors (this file)                                    │
//! │  └── CoreError        - Rendering and naming failures                  │
//! │                                                                         │
//! │  dictionary-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  dictionary-sync errors (separate crate)                               │
//! │  └── SyncError        - Tier copy failures                             │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CommandError     - What the output channel shows                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while turning records into source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No language row is flagged as the default variant.
    ///
    /// ## When This Occurs
    /// - The language table is empty
    /// - Every language has `isDefaultVariantLang = 0`
    ///
    /// The default ISO code is embedded in the culture model, so that
    /// artifact cannot be rendered without one.
    #[error("No default language is configured in the language table")]
    MissingDefaultLanguage,

    /// A namespace template resolved to nothing usable.
    ///
    /// ## When This Occurs
    /// - Template is empty
    /// - Template only contains characters that get stripped
    #[error("Namespace template '{template}' resolves to an empty namespace")]
    EmptyNamespace { template: String },

    /// Unknown artifact name (from configuration or CLI input).
    #[error("Unknown artifact: '{0}'")]
    UnknownArtifact(String),
}
