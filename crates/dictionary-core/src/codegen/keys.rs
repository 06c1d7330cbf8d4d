//! Dictionary key wrapper and the flat `DictionaryKeys` registry.

use super::{string_literal, SourceWriter, SHARED_NAMESPACE};
use crate::tree::{DictionaryTree, REGISTRY_CLASS};

/// Emits the `DictionaryKey` wrapper struct inside `namespace`.
///
/// Conversions to and from `string` are explicit (`FromString` /
/// `ToString`); there are no implicit operators.
pub fn emit_key_struct(namespace: &str) -> String {
    let mut w = SourceWriter::new();

    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(1, "Typed handle for an Umbraco dictionary key.");
    w.line(1, "public struct DictionaryKey : IEquatable<DictionaryKey>");
    w.line(1, "{");
    w.line(2, "public readonly string Key;");
    w.blank();
    w.line(2, "public bool HasValue => !string.IsNullOrWhiteSpace(Key);");
    w.blank();
    w.line(2, "public DictionaryKey(string key)");
    w.line(2, "{");
    w.line(3, "Key = key;");
    w.line(2, "}");
    w.blank();
    w.line(2, "public static DictionaryKey FromString(string key)");
    w.line(2, "{");
    w.line(3, "return new DictionaryKey(key);");
    w.line(2, "}");
    w.blank();
    w.line(2, "public override string ToString()");
    w.line(2, "{");
    w.line(3, "return Key;");
    w.line(2, "}");
    w.blank();
    w.line(2, "public bool Equals(DictionaryKey other)");
    w.line(2, "{");
    w.line(3, "return string.Equals(Key, other.Key, StringComparison.Ordinal);");
    w.line(2, "}");
    w.blank();
    w.line(2, "public override bool Equals(object obj)");
    w.line(2, "{");
    w.line(3, "return obj is DictionaryKey other && Equals(other);");
    w.line(2, "}");
    w.blank();
    w.line(2, "public override int GetHashCode()");
    w.line(2, "{");
    w.line(3, "return Key == null ? 0 : StringComparer.Ordinal.GetHashCode(Key);");
    w.line(2, "}");
    w.line(1, "}");
    w.line(0, "}");

    w.finish()
}

/// Emits `DictionaryKeys` with one field per registry identifier.
///
/// Fields follow raw key order and cover the whole snapshot, nested
/// entries included.
pub fn emit_flat_key_registry(namespace: &str, tree: &DictionaryTree<'_>) -> String {
    let mut w = SourceWriter::new();

    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(1, "Defines the Umbraco dictionary keys.");
    w.line(1, &format!("public partial class {REGISTRY_CLASS}"));
    w.line(1, "{");
    for field in tree.registry() {
        w.line(
            2,
            &format!(
                "public static readonly DictionaryKey {} = DictionaryKey.FromString({});",
                field.identifier,
                string_literal(&field.entry.key)
            ),
        );
    }
    w.line(1, "}");
    w.line(0, "}");

    w.finish()
}

/// Complete `DictionaryKey.cs`: usings, wrapper struct, registry.
pub fn render_dictionary_key_model(namespace: &str, tree: &DictionaryTree<'_>) -> String {
    let mut w = SourceWriter::new();
    w.usings(["System"]);
    w.block(&emit_key_struct(SHARED_NAMESPACE));
    w.blank();
    w.block(&emit_flat_key_registry(namespace, tree));
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DictionaryEntry;
    use uuid::Uuid;

    #[test]
    fn test_registry_fields_in_key_order() {
        let general = DictionaryEntry::root(Uuid::from_u128(1), "General");
        let save = DictionaryEntry::child_of(&general, Uuid::from_u128(2), "Save");
        let entries = vec![save, general];
        let tree = DictionaryTree::build(&entries);

        let registry = emit_flat_key_registry("Acme.Models", &tree);
        let expected = "namespace Acme.Models\n\
{\n\
\t/// <summary>\n\
\t/// Defines the Umbraco dictionary keys.\n\
\t/// </summary>\n\
\tpublic partial class DictionaryKeys\n\
\t{\n\
\t\tpublic static readonly DictionaryKey General = DictionaryKey.FromString(\"General\");\n\
\t\tpublic static readonly DictionaryKey Save = DictionaryKey.FromString(\"Save\");\n\
\t}\n\
}\n";
        assert_eq!(registry, expected);
    }

    #[test]
    fn test_registry_keeps_raw_key_in_literal() {
        let entries = vec![DictionaryEntry::root(Uuid::from_u128(1), "form \"submit\"")];
        let tree = DictionaryTree::build(&entries);

        let registry = emit_flat_key_registry("Acme", &tree);
        assert!(registry.contains(
            "DictionaryKey FormSubmit = DictionaryKey.FromString(\"form \\\"submit\\\"\");"
        ));
    }

    #[test]
    fn test_registry_class_name_is_not_a_field() {
        let entries = vec![
            DictionaryEntry::root(Uuid::from_u128(1), "DictionaryKeys"),
            DictionaryEntry::root(Uuid::from_u128(2), "Title"),
        ];
        let tree = DictionaryTree::build(&entries);

        let registry = emit_flat_key_registry("Acme", &tree);
        assert!(!registry.contains("DictionaryKey DictionaryKeys ="));
        assert!(registry.contains("DictionaryKey Title ="));
        assert_eq!(tree.warnings().len(), 1);
    }

    #[test]
    fn test_empty_registry_is_empty_class() {
        let tree = DictionaryTree::build(&[]);
        let registry = emit_flat_key_registry("Acme", &tree);
        assert!(registry.contains("public partial class DictionaryKeys\n\t{\n\t}\n"));
    }

    #[test]
    fn test_key_struct_has_no_implicit_operators() {
        let source = emit_key_struct(SHARED_NAMESPACE);
        assert!(source.starts_with("namespace System\n{\n"));
        assert!(source.contains("public static DictionaryKey FromString(string key)"));
        assert!(source.contains("public bool HasValue"));
        assert!(!source.contains("implicit operator"));
    }

    #[test]
    fn test_full_file_layout() {
        let entries = vec![DictionaryEntry::root(Uuid::from_u128(1), "General")];
        let tree = DictionaryTree::build(&entries);

        let source = render_dictionary_key_model("Acme", &tree);
        assert!(source.starts_with("using System;\n\nnamespace System\n"));
        assert!(source.contains("}\n\nnamespace Acme\n"));
    }
}
