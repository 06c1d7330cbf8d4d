//! # Code Emitter
//!
//! Renders the dictionary tree and language list into C# source text.
//!
//! ## Artifact Family
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Generated C# files                               │
//! │                                                                         │
//! │  DictionaryKey.cs          struct DictionaryKey        (namespace System)│
//! │                            class  DictionaryKeys       ◄── single source │
//! │                                  │                          of truth     │
//! │  Dictionary.cs             class  Dictionary           ─────┘            │
//! │                              └── nested classes mirroring the tree      │
//! │                                                                         │
//! │  UmbracoCulture.cs         struct UmbracoCulture       (namespace System)│
//! │                            class  UmbracoCultures                       │
//! │                                                                         │
//! │  IDictionaryService.cs     interface IDictionaryService                 │
//! │  DictionaryService.cs      class DictionaryService : IDictionaryService │
//! │  DictionaryExtensions.cs   static class DictionaryServiceExtensions     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The wrapper structs live in `System` so every other artifact can use them
//! without the generated namespaces depending on each other.
//!
//! Output is deterministic: tab indentation, `\n` line endings and key
//! ordering fixed by [`DictionaryTree`]. Line-ending conversion happens when
//! the host writes the file.

mod culture;
mod hierarchy;
mod keys;
mod service;

use std::collections::BTreeMap;

use crate::artifact::Artifact;
use crate::error::CoreResult;
use crate::tree::{CodegenWarning, DictionaryTree};
use crate::types::LanguageEntry;

pub use culture::{emit_culture_struct, emit_language_registry, render_culture_model};
pub use hierarchy::emit_hierarchy;
pub use keys::{emit_flat_key_registry, emit_key_struct, render_dictionary_key_model};
pub use service::{
    emit_service, emit_service_extensions, emit_service_interface, render_service,
    render_service_extensions, render_service_interface,
};

/// Namespace that holds the key and culture wrapper structs.
pub const SHARED_NAMESPACE: &str = "System";

// =============================================================================
// Input / Output
// =============================================================================

/// Resolved namespace for every artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactNamespaces {
    namespaces: BTreeMap<Artifact, String>,
}

impl ArtifactNamespaces {
    /// Every artifact in its default namespace.
    pub fn defaults() -> Self {
        let mut namespaces = Self::default();
        for artifact in Artifact::ALL {
            namespaces.set(artifact, artifact.default_namespace());
        }
        namespaces
    }

    pub fn set(&mut self, artifact: Artifact, namespace: impl Into<String>) {
        self.namespaces.insert(artifact, namespace.into());
    }

    /// Namespace for `artifact`, falling back to its default.
    pub fn get(&self, artifact: Artifact) -> &str {
        self.namespaces
            .get(&artifact)
            .map(String::as_str)
            .unwrap_or_else(|| artifact.default_namespace())
    }
}

/// Everything the emitters read. Borrowed from an immutable snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CodegenInput<'a, 'b> {
    pub tree: &'b DictionaryTree<'a>,
    pub languages: &'b [LanguageEntry],
    pub namespaces: &'b ArtifactNamespaces,
}

/// Source text for one artifact plus anything left out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub artifact: Artifact,
    pub source: String,
    pub warnings: Vec<CodegenWarning>,
}

/// Renders one artifact.
///
/// ## Returns
/// * `Ok(RenderedArtifact)` - Complete file contents
/// * `Err(CoreError::MissingDefaultLanguage)` - Culture model without a default language
pub fn render(artifact: Artifact, input: CodegenInput<'_, '_>) -> CoreResult<RenderedArtifact> {
    let ns = input.namespaces;

    let (source, warnings) = match artifact {
        Artifact::CultureModel => render_culture_model(ns.get(artifact), input.languages)?,
        Artifact::DictionaryModel => (
            emit_hierarchy(
                ns.get(artifact),
                ns.get(Artifact::DictionaryKeyModel),
                input.tree,
            ),
            Vec::new(),
        ),
        Artifact::DictionaryKeyModel => (
            render_dictionary_key_model(ns.get(artifact), input.tree),
            Vec::new(),
        ),
        Artifact::Service => (
            render_service(
                ns.get(artifact),
                ns.get(Artifact::ServiceInterface),
                ns.get(Artifact::ServiceExtensions),
            ),
            Vec::new(),
        ),
        Artifact::ServiceInterface => (render_service_interface(ns.get(artifact)), Vec::new()),
        Artifact::ServiceExtensions => (
            render_service_extensions(ns.get(artifact), ns.get(Artifact::Service)),
            Vec::new(),
        ),
    };

    Ok(RenderedArtifact {
        artifact,
        source,
        warnings,
    })
}

// =============================================================================
// Source Writer
// =============================================================================

const INDENT: char = '\t';

/// Line-oriented builder with tab indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, depth: usize, text: &str) {
        self.out.extend(std::iter::repeat(INDENT).take(depth));
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Writes a three-line `<summary>` doc comment.
    pub(crate) fn summary(&mut self, depth: usize, text: &str) {
        self.line(depth, "/// <summary>");
        self.line(depth, &format!("/// {text}"));
        self.line(depth, "/// </summary>");
    }

    /// Writes sorted, de-duplicated `using` directives and a blank line.
    pub(crate) fn usings<'s>(&mut self, namespaces: impl IntoIterator<Item = &'s str>) {
        let mut namespaces: Vec<&str> = namespaces.into_iter().collect();
        namespaces.sort_unstable();
        namespaces.dedup();
        for namespace in namespaces {
            self.line(0, &format!("using {namespace};"));
        }
        self.blank();
    }

    /// Appends a block that already ends in a newline.
    pub(crate) fn block(&mut self, block: &str) {
        self.out.push_str(block);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

/// Quotes a value as a C# string literal.
pub(crate) fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            other => literal.push(other),
        }
    }
    literal.push('"');
    literal
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DictionaryEntry;
    use uuid::Uuid;

    fn sample() -> (Vec<DictionaryEntry>, Vec<LanguageEntry>) {
        let general = DictionaryEntry::root(Uuid::from_u128(1), "General");
        let save = DictionaryEntry::child_of(&general, Uuid::from_u128(2), "Save");
        let languages = vec![
            LanguageEntry::new(1, "en-GB", "English (United Kingdom)", true),
            LanguageEntry::new(2, "fr-FR", "French (France)", false),
        ];
        (vec![save, general], languages)
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_usings_sorted_and_deduplicated() {
        let mut writer = SourceWriter::new();
        writer.usings(["System.Linq", "System", "System.Linq"]);
        assert_eq!(writer.finish(), "using System;\nusing System.Linq;\n\n");
    }

    #[test]
    fn test_render_every_artifact() {
        let (entries, languages) = sample();
        let tree = DictionaryTree::build(&entries);
        let namespaces = ArtifactNamespaces::defaults();
        let input = CodegenInput {
            tree: &tree,
            languages: &languages,
            namespaces: &namespaces,
        };

        for artifact in Artifact::ALL {
            let rendered = render(artifact, input).unwrap();
            assert_eq!(rendered.artifact, artifact);
            assert!(rendered.source.starts_with("using System;\n"));
            assert!(rendered.source.ends_with("}\n"));
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let (entries, languages) = sample();
        let namespaces = ArtifactNamespaces::defaults();

        let first_tree = DictionaryTree::build(&entries);
        let mut reversed = entries.clone();
        reversed.reverse();
        let second_tree = DictionaryTree::build(&reversed);

        for artifact in Artifact::ALL {
            let first = render(
                artifact,
                CodegenInput {
                    tree: &first_tree,
                    languages: &languages,
                    namespaces: &namespaces,
                },
            )
            .unwrap();
            let second = render(
                artifact,
                CodegenInput {
                    tree: &second_tree,
                    languages: &languages,
                    namespaces: &namespaces,
                },
            )
            .unwrap();
            assert_eq!(first.source, second.source, "{artifact} differs");
        }
    }

    #[test]
    fn test_culture_model_without_default_fails() {
        let (entries, _) = sample();
        let tree = DictionaryTree::build(&entries);
        let languages = vec![LanguageEntry::new(1, "fr-FR", "French (France)", false)];
        let namespaces = ArtifactNamespaces::defaults();
        let input = CodegenInput {
            tree: &tree,
            languages: &languages,
            namespaces: &namespaces,
        };

        assert_eq!(
            render(Artifact::CultureModel, input).unwrap_err(),
            crate::CoreError::MissingDefaultLanguage
        );
        assert!(render(Artifact::DictionaryModel, input).is_ok());
    }
}
