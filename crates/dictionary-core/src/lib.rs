//! # dictionary-core: Pure Logic for the Dictionary Builder
//!
//! Everything between "rows came back from the database" and "here is the
//! text of a C# file" lives here, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dictionary Builder Data Flow                        │
//! │                                                                         │
//! │  dictionary-db ── DictionaryEntry / LanguageEntry rows                 │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ dictionary-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐   ┌───────────┐   ┌───────────┐   ┌─────────┐  │   │
//! │  │   │   types   │──►│   tree    │──►│  codegen  │   │ naming  │  │   │
//! │  │   │  records  │   │ hierarchy │   │  C# text  │   │ ns/path │  │   │
//! │  │   └───────────┘   └─────┬─────┘   └───────────┘   └─────────┘  │   │
//! │  │                   ┌─────┴─────┐                                 │   │
//! │  │                   │ sanitize  │                                 │   │
//! │  │                   └───────────┘                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILE SYSTEM • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  apps/dictionary-builder ── writes the rendered files to disk          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record types for dictionary and language rows
//! - [`tree`] - Hierarchy and flat registry built from the rows
//! - [`sanitize`] - Key and culture name to identifier rules
//! - [`codegen`] - C# emitters for the six generated artifacts
//! - [`artifact`] - The artifact catalogue and default locations
//! - [`naming`] - Namespace templates and path joining
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dictionary_core::{DictionaryEntry, DictionaryTree};
//! use dictionary_core::codegen::emit_flat_key_registry;
//! use uuid::Uuid;
//!
//! let general = DictionaryEntry::root(Uuid::new_v4(), "General");
//! let save = DictionaryEntry::child_of(&general, Uuid::new_v4(), "Save");
//! let entries = vec![general, save];
//!
//! let tree = DictionaryTree::build(&entries);
//! let source = emit_flat_key_registry("Acme.Models", &tree);
//! assert!(source.contains("DictionaryKey Save = DictionaryKey.FromString(\"Save\")"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod artifact;
pub mod codegen;
pub mod error;
pub mod naming;
pub mod sanitize;
pub mod tree;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use artifact::Artifact;
pub use codegen::{render, ArtifactNamespaces, CodegenInput, RenderedArtifact};
pub use error::{CoreError, CoreResult};
pub use sanitize::{sanitize_culture_name, sanitize_identifier};
pub use tree::{children_of, has_children, roots_of, CodegenWarning, DictionaryTree, TreeNode};
pub use types::{default_language, DictionaryEntry, LanguageEntry};
