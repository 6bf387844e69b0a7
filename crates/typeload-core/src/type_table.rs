//! Runtime type table with alias forwarding.
//!
//! Every defined type gets a [`TypeId`]. Names map to ids, and an alias is
//! just another name mapped to an existing id, so a type and its aliases are
//! indistinguishable at the identity level: same definition, same
//! initializer, same instances.

use std::collections::HashMap;
use std::path::PathBuf;

use typeload_paths::normalize_type_name;

use crate::error::LoadError;

/// Identity of a defined type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A defined type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub id: TypeId,
    /// Name the type was declared with.
    pub name: String,
    pub parent: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    /// Whether the type exposes a post-load initializer.
    pub has_init: bool,
    /// File the type was declared in.
    pub source: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    defs: Vec<TypeDef>,
    names: HashMap<String, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new type under `name`.
    pub fn define(
        &mut self,
        name: &str,
        parent: Option<TypeId>,
        interfaces: Vec<TypeId>,
        has_init: bool,
        source: PathBuf,
    ) -> Result<TypeId, LoadError> {
        let name = normalize_type_name(name);
        if self.names.contains_key(name) {
            return Err(LoadError::Redeclared {
                name: name.to_string(),
            });
        }
        let id = TypeId(self.defs.len() as u32);
        self.defs.push(TypeDef {
            id,
            name: name.to_string(),
            parent,
            interfaces,
            has_init,
            source,
        });
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Bind `alias` to the type named `original`.
    ///
    /// Re-binding an alias to the type it already names is a no-op.
    pub fn alias(&mut self, original: &str, alias: &str) -> Result<TypeId, LoadError> {
        let id = self.lookup(original).ok_or_else(|| LoadError::UndefinedType {
            name: normalize_type_name(original).to_string(),
        })?;
        let alias = normalize_type_name(alias);
        match self.names.get(alias) {
            Some(existing) if *existing == id => Ok(id),
            Some(existing) => Err(LoadError::AliasConflict {
                original: normalize_type_name(original).to_string(),
                alias: alias.to_string(),
                existing: self.defs[existing.index()].name.clone(),
            }),
            None => {
                self.names.insert(alias.to_string(), id);
                Ok(id)
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(normalize_type_name(name)).copied()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.defs.get(id.index())
    }

    pub fn by_name(&self, name: &str) -> Option<&TypeDef> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Whether `child` is `ancestor` or derives from / implements it.
    pub fn is_subtype(&self, child: TypeId, ancestor: TypeId) -> bool {
        let mut stack = vec![child];
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if let Some(def) = self.get(current) {
                stack.extend(def.parent);
                stack.extend(def.interfaces.iter().copied());
            }
        }
        false
    }

    /// Every name bound to `id`, sorted.
    pub fn names_of(&self, id: TypeId) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .names
            .iter()
            .filter(|(_, bound)| **bound == id)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.defs.iter()
    }

    /// Number of distinct types (aliases not counted).
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn define(table: &mut TypeTable, name: &str) -> TypeId {
        table
            .define(name, None, Vec::new(), false, PathBuf::from("t.json"))
            .unwrap()
    }

    #[test]
    fn test_alias_shares_identity() {
        let mut table = TypeTable::new();
        let id = define(&mut table, "Core\\Foo");
        table.alias("\\Core\\Foo", "Foo").unwrap();

        assert_eq!(table.lookup("Foo"), Some(id));
        assert_eq!(table.len(), 1);
        assert_eq!(table.names_of(id), vec!["Core\\Foo", "Foo"]);
    }

    #[test]
    fn test_redeclare_rejected() {
        let mut table = TypeTable::new();
        define(&mut table, "Foo");
        let err = table
            .define("\\Foo", None, Vec::new(), false, PathBuf::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::Redeclared { .. }));
    }

    #[test]
    fn test_alias_conflict_and_idempotence() {
        let mut table = TypeTable::new();
        define(&mut table, "Core\\Foo");
        define(&mut table, "Foo");

        let err = table.alias("Core\\Foo", "Foo").unwrap_err();
        assert!(matches!(err, LoadError::AliasConflict { .. }));

        table.alias("Core\\Foo", "Bar").unwrap();
        assert!(table.alias("Core\\Foo", "Bar").is_ok());
    }

    #[test]
    fn test_alias_of_undefined_type() {
        let mut table = TypeTable::new();
        let err = table.alias("Missing", "Other").unwrap_err();
        assert!(matches!(err, LoadError::UndefinedType { .. }));
    }

    #[test]
    fn test_is_subtype_follows_parents_and_interfaces() {
        let mut table = TypeTable::new();
        let countable = define(&mut table, "Countable");
        let base = define(&mut table, "Base");
        let child = table
            .define("Child", Some(base), vec![countable], false, PathBuf::new())
            .unwrap();

        assert!(table.is_subtype(child, base));
        assert!(table.is_subtype(child, countable));
        assert!(!table.is_subtype(base, child));
    }
}
