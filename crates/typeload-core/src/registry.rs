//! Lookup tables consulted by the resolution strategies.
//!
//! | Type | Keyed by | Purpose |
//! |------|----------|---------|
//! | [`NamespaceRegistry`] | namespace prefix | Base path (and PSR-0 flag) for a namespace subtree |
//! | [`ClassMap`] | exact type name | Explicit file for a single type |
//! | [`CoreNamespaces`] | position | Namespaces whose members may be used unqualified |
//!
//! All three are append/overwrite-only; nothing is ever removed during normal
//! operation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typeload_paths::{is_namespace_prefix, normalize_prefix, normalize_type_name};

// =============================================================================
// NamespaceRegistry
// =============================================================================

/// A registered namespace subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    /// Namespace prefix without leading or trailing separators.
    pub prefix: String,
    /// Directory the subtree is laid out under.
    pub base_path: PathBuf,
    /// Whether the subtree follows PSR-0 and must be loaded unconditionally.
    #[serde(default)]
    pub psr: bool,
}

impl NamespaceEntry {
    pub fn new(prefix: &str, base_path: impl Into<PathBuf>, psr: bool) -> Self {
        Self {
            prefix: normalize_prefix(prefix).to_string(),
            base_path: base_path.into(),
            psr,
        }
    }
}

/// Where merged entries go relative to the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOrder {
    /// New keys go after existing entries; colliding keys keep their position.
    #[default]
    Append,
    /// Merged entries go ahead of existing entries in match order.
    Prepend,
}

/// Which value survives when a merged key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// The merged entry replaces the existing one.
    #[default]
    Incoming,
    /// The existing entry is kept; the merged one is dropped.
    Existing,
}

/// Ordered mapping from namespace prefix to base path.
///
/// Iteration order is match order: earlier entries are tried first.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    entries: IndexMap<String, NamespaceEntry>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `prefix`.
    ///
    /// An overwritten entry keeps its position. Returns the previous entry.
    pub fn insert(
        &mut self,
        prefix: &str,
        base_path: impl Into<PathBuf>,
        psr: bool,
    ) -> Option<NamespaceEntry> {
        let entry = NamespaceEntry::new(prefix, base_path, psr);
        self.entries.insert(entry.prefix.clone(), entry)
    }

    /// Bulk insert with explicit ordering and collision rules.
    ///
    /// With [`MergeOrder::Prepend`], a colliding key sits at the position of
    /// whichever entry wins under `precedence`. With [`MergeOrder::Append`],
    /// a colliding key always keeps its existing position.
    pub fn merge<I>(&mut self, entries: I, order: MergeOrder, precedence: Precedence)
    where
        I: IntoIterator<Item = NamespaceEntry>,
    {
        let incoming = entries.into_iter().map(|mut entry| {
            entry.prefix = normalize_prefix(&entry.prefix).to_string();
            entry
        });

        match order {
            MergeOrder::Append => {
                for entry in incoming {
                    if precedence == Precedence::Existing && self.entries.contains_key(&entry.prefix) {
                        continue;
                    }
                    self.entries.insert(entry.prefix.clone(), entry);
                }
            }
            MergeOrder::Prepend => {
                let mut merged: IndexMap<String, NamespaceEntry> = IndexMap::new();
                for entry in incoming {
                    if precedence == Precedence::Existing && self.entries.contains_key(&entry.prefix) {
                        continue;
                    }
                    merged.insert(entry.prefix.clone(), entry);
                }
                for (prefix, entry) in std::mem::take(&mut self.entries) {
                    merged.entry(prefix).or_insert(entry);
                }
                self.entries = merged;
            }
        }
    }

    /// The entry registered for `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&NamespaceEntry> {
        self.entries.get(normalize_prefix(prefix))
    }

    /// The base path registered for `prefix`.
    pub fn base_path(&self, prefix: &str) -> Option<&Path> {
        self.get(prefix).map(|entry| entry.base_path.as_path())
    }

    /// Entries whose prefix is a separator-aligned prefix of `namespace`, in match order.
    pub fn matching<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a NamespaceEntry> + 'a {
        self.entries
            .values()
            .filter(move |entry| is_namespace_prefix(&entry.prefix, namespace))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespaceEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// ClassMap
// =============================================================================

/// Explicit type name → file overrides. Last write per name wins.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    classes: HashMap<String, PathBuf>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path previously registered for `name`, if any.
    pub fn insert(&mut self, name: &str, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.classes
            .insert(normalize_type_name(name).to_string(), path.into())
    }

    pub fn extend<I, K, P>(&mut self, classes: I)
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        for (name, path) in classes {
            self.insert(name.as_ref(), path);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.classes
            .get(normalize_type_name(name))
            .map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(normalize_type_name(name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// =============================================================================
// CoreNamespaces
// =============================================================================

/// Ordered list of namespaces whose members can be requested unqualified.
#[derive(Debug, Clone, Default)]
pub struct CoreNamespaces {
    namespaces: Vec<String>,
}

impl CoreNamespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `namespace` ahead of (`prefix == true`) or behind all existing entries.
    pub fn add(&mut self, namespace: &str, prefix: bool) {
        let namespace = normalize_prefix(namespace).to_string();
        if prefix {
            self.namespaces.insert(0, namespace);
        } else {
            self.namespaces.push(namespace);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.namespaces.clone()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// The three tables together, as read by a single resolution.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub namespaces: NamespaceRegistry,
    pub classes: ClassMap,
    pub core: CoreNamespaces,
}
