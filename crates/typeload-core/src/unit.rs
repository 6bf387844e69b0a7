//! Unit files and where they come from.
//!
//! A unit is the content of one type file: the types it declares, each with
//! its supertype, interfaces and whether it has a post-load initializer.
//! On disk a unit is JSON:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "App\\Model\\User", "extends": "Fw\\Core\\Model", "init": true }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Declaration of one type inside a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    /// Whether the type has a post-load initializer.
    #[serde(default)]
    pub init: bool,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            implements: Vec::new(),
            init: false,
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    pub fn with_init(mut self) -> Self {
        self.init = true;
        self
    }

    /// Types that must be defined before this one can be.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.extends
            .iter()
            .chain(self.implements.iter())
            .map(String::as_str)
    }
}

/// The content of one type file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Unit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    /// Decode a unit from JSON text read from `path`.
    pub fn parse(path: &Path, text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::MalformedUnit {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Where the runtime reads unit files from.
pub trait UnitSource {
    fn exists(&self, path: &Path) -> bool;

    fn read_unit(&self, path: &Path) -> Result<Unit>;
}

/// Units held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    units: HashMap<PathBuf, Unit>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unit previously stored at `path`, if any.
    pub fn insert(&mut self, path: impl Into<PathBuf>, unit: Unit) -> Option<Unit> {
        self.units.insert(path.into(), unit)
    }

    pub fn with_unit(mut self, path: impl Into<PathBuf>, unit: Unit) -> Self {
        self.insert(path, unit);
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl UnitSource for MemorySource {
    fn exists(&self, path: &Path) -> bool {
        self.units.contains_key(path)
    }

    fn read_unit(&self, path: &Path) -> Result<Unit> {
        self.units.get(path).cloned().ok_or_else(|| {
            LoadError::MissingFile {
                path: path.to_path_buf(),
            }
            .into()
        })
    }
}

/// JSON unit files on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl UnitSource for FsSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_unit(&self, path: &Path) -> Result<Unit> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read unit file {}", path.display()))?;
        Ok(Unit::parse(path, &text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_defaults() {
        let unit = Unit::parse(
            Path::new("u.json"),
            r#"{"types":[{"name":"A"},{"name":"B","extends":"A","implements":["I"],"init":true}]}"#,
        )
        .unwrap();

        assert_eq!(unit.types.len(), 2);
        assert!(!unit.types[0].init);
        assert_eq!(unit.types[1].dependencies().collect::<Vec<_>>(), vec!["A", "I"]);
        assert!(unit.types[1].init);
    }

    #[test]
    fn test_parse_malformed_unit() {
        let err = Unit::parse(Path::new("bad.json"), "{ not json").unwrap_err();
        assert!(matches!(err, LoadError::MalformedUnit { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_fs_source_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mailer.json");
        std::fs::write(&path, r#"{"types":[{"name":"Mailer","init":true}]}"#).unwrap();

        assert!(FsSource.exists(&path));
        assert!(!FsSource.exists(&dir.path().join("other.json")));
        let unit = FsSource.read_unit(&path).unwrap();
        assert_eq!(unit, Unit::new().with_type(TypeDecl::new("Mailer").with_init()));
    }
}
