//! Nested `Dictionary` classes mirroring the dictionary tree.
//!
//! ```text
//! General            public partial class General
//! ├── Save    ──►    {
//! └── Cancel             public static DictionaryKey Key => DictionaryKeys.General;
//!                        public static DictionaryKey Cancel => DictionaryKeys.Cancel;
//!                        public static DictionaryKey Save => DictionaryKeys.Save;
//!                    }
//! ```

use super::{SourceWriter, SHARED_NAMESPACE};
use crate::tree::{
    DictionaryTree, TreeNode, CONTAINER_KEY_MEMBER, HIERARCHY_CLASS, REGISTRY_CLASS,
};

/// Emits `Dictionary.cs`: the `Dictionary` class with one nested member
/// per root.
///
/// Nodes with children become nested partial classes exposing a `Key`
/// accessor; leaves become accessor properties. Recursion is depth-first,
/// children in key order. The key registry namespace is imported when it
/// differs from `namespace`.
pub fn emit_hierarchy(
    namespace: &str,
    key_registry_namespace: &str,
    tree: &DictionaryTree<'_>,
) -> String {
    let mut usings = vec![SHARED_NAMESPACE];
    if key_registry_namespace != namespace {
        usings.push(key_registry_namespace);
    }

    let mut w = SourceWriter::new();
    w.usings(usings);
    w.line(0, &format!("namespace {namespace}"));
    w.line(0, "{");
    w.summary(1, "Defines the Umbraco dictionary hierarchy.");
    w.line(1, &format!("public partial class {HIERARCHY_CLASS}"));
    w.line(1, "{");
    write_members(&mut w, tree.roots(), 2);
    w.line(1, "}");
    w.line(0, "}");

    w.finish()
}

/// Classes are separated from their neighbours by a blank line, runs of
/// accessors are not.
fn write_members(w: &mut SourceWriter, nodes: &[TreeNode<'_>], depth: usize) {
    let mut previous_was_class = false;

    for (index, node) in nodes.iter().enumerate() {
        let is_class = node.has_children();
        if index > 0 && (is_class || previous_was_class) {
            w.blank();
        }

        if is_class {
            write_class(w, node, depth);
        } else {
            write_accessor(w, node, depth);
        }
        previous_was_class = is_class;
    }
}

fn write_class(w: &mut SourceWriter, node: &TreeNode<'_>, depth: usize) {
    w.summary(
        depth,
        &format!(
            "Defines the <see cref=\"{}\"/> Umbraco dictionary keys.",
            node.identifier
        ),
    );
    w.line(depth, &format!("public partial class {}", node.identifier));
    w.line(depth, "{");
    w.line(
        depth + 1,
        &format!(
            "public static DictionaryKey {CONTAINER_KEY_MEMBER} => {REGISTRY_CLASS}.{};",
            node.identifier
        ),
    );
    w.blank();
    write_members(w, &node.children, depth + 1);
    w.line(depth, "}");
}

fn write_accessor(w: &mut SourceWriter, node: &TreeNode<'_>, depth: usize) {
    w.line(
        depth,
        &format!(
            "public static DictionaryKey {} => {REGISTRY_CLASS}.{};",
            node.identifier, node.identifier
        ),
    );
}
