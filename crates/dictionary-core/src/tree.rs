//! # Dictionary Tree
//!
//! Builds the parent/child hierarchy out of the flat dictionary rows.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Flat rows → DictionaryTree                          │
//! │                                                                         │
//! │  id  key        parent              registry (all rows, key order)     │
//! │  ──  ─────────  ──────              ───────────────────────────────    │
//! │  1   General    -                   Cancel, General, Save, Title       │
//! │  2   Save       1                                                       │
//! │  3   Cancel     1                   roots (key order)                  │
//! │  4   Title      -                   ───────────────────────────────    │
//! │                                     General                            │
//! │                                     ├── Cancel                         │
//! │                                     └── Save                           │
//! │                                     Title                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Roots, children and the registry are all sorted by the raw key using
//! ordinal string comparison. The sort is stable so equal keys keep their
//! input order, which keeps regeneration byte-identical across runs.
//!
//! ## Identifier Collisions
//! Two keys can sanitise to the same identifier ("save button" and
//! "SaveButton"). The first entry in raw-key order owns the identifier.
//! Later entries are left out of both the registry and the hierarchy, and a
//! [`CodegenWarning`] is recorded for each so the host can report it.
//!
//! ## Reserved Identifiers
//! C# forbids a member named after its enclosing type, and every container
//! class already declares a `Key` accessor. An identifier that would clash
//! with either is skipped the same way a collision is. When a skipped entry
//! has children, one more warning records how many keys went with it.

use std::collections::{HashMap, HashSet};
use std::fmt;

use uuid::Uuid;

use crate::sanitize::sanitize_identifier;
use crate::types::DictionaryEntry;

// =============================================================================
// Flat Queries
// =============================================================================

/// Returns every entry without a parent, ordered by key.
pub fn roots_of(entries: &[DictionaryEntry]) -> Vec<&DictionaryEntry> {
    let mut roots: Vec<&DictionaryEntry> = entries.iter().filter(|e| e.is_root()).collect();
    roots.sort_by(|a, b| a.key.cmp(&b.key));
    roots
}

/// Returns every entry whose parent is `id`, ordered by key.
pub fn children_of(entries: &[DictionaryEntry], id: Uuid) -> Vec<&DictionaryEntry> {
    let mut children: Vec<&DictionaryEntry> = entries
        .iter()
        .filter(|e| e.parent_id == Some(id))
        .collect();
    children.sort_by(|a, b| a.key.cmp(&b.key));
    children
}

/// Returns true if any entry names `entry` as its parent.
pub fn has_children(entries: &[DictionaryEntry], entry: &DictionaryEntry) -> bool {
    entries.iter().any(|e| e.parent_id == Some(entry.id))
}

/// Class holding the flat key registry.
pub const REGISTRY_CLASS: &str = "DictionaryKeys";

/// Outermost class of the hierarchy.
pub const HIERARCHY_CLASS: &str = "Dictionary";

/// Accessor every container class declares for its own key.
pub const CONTAINER_KEY_MEMBER: &str = "Key";

// =============================================================================
// Warnings
// =============================================================================

/// Something the emitter left out. None of these stop generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenWarning {
    /// The key sanitised to an identifier another entry already owns.
    DuplicateIdentifier {
        identifier: String,
        key: String,
        kept_key: String,
    },

    /// Nothing remained of the key after sanitisation.
    EmptyIdentifier { key: String },

    /// The identifier would clash with a member the emitter writes itself.
    ReservedIdentifier {
        identifier: String,
        key: String,
        enclosing: String,
    },

    /// The entry appears in its own parent chain (duplicate ids in the data).
    RepeatedAncestor { key: String, id: Uuid },

    /// A skipped entry took its descendants out of the hierarchy with it.
    DroppedDescendants { key: String, count: usize },

    /// Two languages produce the same culture field name.
    DuplicateCulture {
        identifier: String,
        iso_code: String,
        kept_iso_code: String,
    },

    /// Nothing remained of the culture name after sanitisation.
    EmptyCulture { iso_code: String },
}

impl fmt::Display for CodegenWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenWarning::DuplicateIdentifier {
                identifier,
                key,
                kept_key,
            } => write!(
                f,
                "Skipped key '{}': identifier '{}' is already used by key '{}'",
                key, identifier, kept_key
            ),
            CodegenWarning::EmptyIdentifier { key } => {
                write!(f, "Skipped key '{}': no valid identifier characters", key)
            }
            CodegenWarning::ReservedIdentifier {
                identifier,
                key,
                enclosing,
            } => write!(
                f,
                "Skipped key '{}': identifier '{}' is reserved inside '{}'",
                key, identifier, enclosing
            ),
            CodegenWarning::RepeatedAncestor { key, id } => {
                write!(f, "Skipped key '{}': id {} repeats in its parent chain", key, id)
            }
            CodegenWarning::DroppedDescendants { key, count } => write!(
                f,
                "Skipped {} nested key(s) under skipped key '{}'",
                count, key
            ),
            CodegenWarning::DuplicateCulture {
                identifier,
                iso_code,
                kept_iso_code,
            } => write!(
                f,
                "Skipped culture '{}': identifier '{}' is already used by culture '{}'",
                iso_code, identifier, kept_iso_code
            ),
            CodegenWarning::EmptyCulture { iso_code } => {
                write!(f, "Skipped culture '{}': no valid identifier characters", iso_code)
            }
        }
    }
}

// =============================================================================
// Tree
// =============================================================================

/// One emitted node of the hierarchy.
#[derive(Debug, Clone)]
pub struct TreeNode<'a> {
    pub entry: &'a DictionaryEntry,
    pub identifier: String,
    pub children: Vec<TreeNode<'a>>,
}

impl TreeNode<'_> {
    /// Containers get a nested class, leaves get an accessor.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Length of the longest chain below and including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}

/// One field of the flat key registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryField<'a> {
    pub identifier: String,
    pub entry: &'a DictionaryEntry,
}

/// The dictionary snapshot arranged for code emission.
#[derive(Debug, Clone)]
pub struct DictionaryTree<'a> {
    roots: Vec<TreeNode<'a>>,
    registry: Vec<RegistryField<'a>>,
    warnings: Vec<CodegenWarning>,
}

impl<'a> DictionaryTree<'a> {
    /// Builds the registry and hierarchy from a snapshot.
    ///
    /// Orphans (a parent id that matches nothing) are never visited.
    pub fn build(entries: &'a [DictionaryEntry]) -> Self {
        let mut warnings = Vec::new();

        let mut by_key: Vec<usize> = (0..entries.len()).collect();
        by_key.sort_by(|&a, &b| entries[a].key.cmp(&entries[b].key));

        // Registry: first entry in key order owns each identifier
        let mut owners: HashMap<String, usize> = HashMap::new();
        let mut identifiers: Vec<Option<String>> = vec![None; entries.len()];
        let mut registry = Vec::new();

        for &index in &by_key {
            let entry = &entries[index];
            let identifier = sanitize_identifier(&entry.key);

            if identifier.is_empty() {
                warnings.push(CodegenWarning::EmptyIdentifier {
                    key: entry.key.clone(),
                });
                continue;
            }

            if identifier == REGISTRY_CLASS {
                warnings.push(CodegenWarning::ReservedIdentifier {
                    identifier,
                    key: entry.key.clone(),
                    enclosing: REGISTRY_CLASS.to_string(),
                });
                continue;
            }

            if let Some(&owner) = owners.get(&identifier) {
                warnings.push(CodegenWarning::DuplicateIdentifier {
                    identifier,
                    key: entry.key.clone(),
                    kept_key: entries[owner].key.clone(),
                });
                continue;
            }

            owners.insert(identifier.clone(), index);
            identifiers[index] = Some(identifier.clone());
            registry.push(RegistryField { identifier, entry });
        }

        // Hierarchy: children indexed by parent id, already in key order
        let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for &index in &by_key {
            match entries[index].parent_id {
                Some(parent) => children.entry(parent).or_default().push(index),
                None => roots.push(index),
            }
        }

        let builder = NodeBuilder {
            entries,
            identifiers: &identifiers,
            children: &children,
        };
        let mut path = Vec::new();
        let roots = roots
            .into_iter()
            .filter_map(|index| builder.node(index, HIERARCHY_CLASS, &mut path, &mut warnings))
            .collect();

        DictionaryTree {
            roots,
            registry,
            warnings,
        }
    }

    /// Root nodes ordered by key.
    pub fn roots(&self) -> &[TreeNode<'a>] {
        &self.roots
    }

    /// Flat registry ordered by key.
    pub fn registry(&self) -> &[RegistryField<'a>] {
        &self.registry
    }

    /// Entries that were left out, in the order they were found.
    pub fn warnings(&self) -> &[CodegenWarning] {
        &self.warnings
    }

    /// Longest parent chain among emitted nodes.
    pub fn depth(&self) -> usize {
        self.roots.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

struct NodeBuilder<'a, 'b> {
    entries: &'a [DictionaryEntry],
    identifiers: &'b [Option<String>],
    children: &'b HashMap<Uuid, Vec<usize>>,
}

impl<'a> NodeBuilder<'a, '_> {
    /// `enclosing` is the class the node would be declared in.
    fn node(
        &self,
        index: usize,
        enclosing: &str,
        path: &mut Vec<Uuid>,
        warnings: &mut Vec<CodegenWarning>,
    ) -> Option<TreeNode<'a>> {
        let entry = &self.entries[index];

        // Skipped entries already produced a registry warning
        let Some(identifier) = self.identifiers[index].clone() else {
            self.drop_descendants(entry, warnings);
            return None;
        };

        if path.contains(&entry.id) {
            warnings.push(CodegenWarning::RepeatedAncestor {
                key: entry.key.clone(),
                id: entry.id,
            });
            return None;
        }

        let is_child = !path.is_empty();
        if identifier == enclosing || (is_child && identifier == CONTAINER_KEY_MEMBER) {
            warnings.push(CodegenWarning::ReservedIdentifier {
                identifier,
                key: entry.key.clone(),
                enclosing: enclosing.to_string(),
            });
            self.drop_descendants(entry, warnings);
            return None;
        }

        path.push(entry.id);
        let children = self
            .children
            .get(&entry.id)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&child| self.node(child, &identifier, path, warnings))
                    .collect()
            })
            .unwrap_or_default();
        path.pop();

        Some(TreeNode {
            entry,
            identifier,
            children,
        })
    }

    /// Records how many entries sit below a skipped entry.
    fn drop_descendants(&self, entry: &DictionaryEntry, warnings: &mut Vec<CodegenWarning>) {
        let count = self.descendant_count(entry.id);
        if count > 0 {
            warnings.push(CodegenWarning::DroppedDescendants {
                key: entry.key.clone(),
                count,
            });
        }
    }

    /// Each id is expanded once, so cycles in the data still terminate.
    fn descendant_count(&self, id: Uuid) -> usize {
        let mut expanded = HashSet::new();
        let mut pending = vec![id];
        let mut count = 0;

        while let Some(id) = pending.pop() {
            if !expanded.insert(id) {
                continue;
            }
            if let Some(indices) = self.children.get(&id) {
                count += indices.len();
                pending.extend(indices.iter().map(|&child| self.entries[child].id));
            }
        }
        count
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
