//! Reference host runtime.
//!
//! [`TypeRuntime`] implements [`Host`] over a [`UnitSource`]. Including a unit
//! defines its types in a [`TypeTable`]; before a type can be defined, its
//! supertype and interfaces must be, and any that are missing are resolved
//! through the registered fallback loaders. That is where nested resolution
//! comes from: loading `App\User` may load `Fw\Core\Model` while the outer
//! load is still in progress.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::error::LoadError;
use crate::host::{Host, TypeLoader};
use crate::type_table::{TypeId, TypeTable};
use crate::unit::{Unit, UnitSource};

/// An object constructed from a defined type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instance {
    pub type_id: TypeId,
}

pub struct TypeRuntime<S> {
    source: S,
    types: TypeTable,
    included: HashSet<PathBuf>,
    include_order: Vec<PathBuf>,
    /// Fallback loaders, most recently registered first.
    loaders: Vec<Arc<dyn TypeLoader>>,
    initialized: Vec<String>,
}

impl<S: UnitSource> TypeRuntime<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            types: TypeTable::new(),
            included: HashSet::new(),
            include_order: Vec::new(),
            loaders: Vec::new(),
            initialized: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Files included so far, in include order.
    pub fn included(&self) -> &[PathBuf] {
        &self.include_order
    }

    /// Canonical names of types whose initializer ran, in call order.
    pub fn initialized(&self) -> &[String] {
        &self.initialized
    }

    /// How many times `name`'s initializer ran.
    pub fn init_count(&self, name: &str) -> usize {
        let Some(def) = self.types.by_name(name) else {
            return 0;
        };
        self.initialized.iter().filter(|n| **n == def.name).count()
    }

    pub fn loader_count(&self) -> usize {
        self.loaders.len()
    }

    /// Resolve a type reference, consulting fallback loaders when it is undefined.
    ///
    /// Loaders are tried most recently registered first; the search stops as
    /// soon as the name is defined.
    pub fn resolve_type(&mut self, name: &str) -> Result<TypeId> {
        if let Some(id) = self.types.lookup(name) {
            return Ok(id);
        }
        let loaders = self.loaders.clone();
        for loader in loaders {
            loader.load(self, name)?;
            if let Some(id) = self.types.lookup(name) {
                return Ok(id);
            }
        }
        Err(LoadError::UndefinedType {
            name: name.trim_start_matches('\\').to_string(),
        }
        .into())
    }

    /// Construct an instance of `name`, loading the type if needed.
    pub fn instantiate(&mut self, name: &str) -> Result<Instance> {
        let type_id = self.resolve_type(name)?;
        Ok(Instance { type_id })
    }

    /// Whether `instance` is usable where `name` is expected.
    pub fn is_instance_of(&self, instance: &Instance, name: &str) -> bool {
        self.types
            .lookup(name)
            .is_some_and(|id| self.types.is_subtype(instance.type_id, id))
    }

    /// Define every type a unit declares.
    ///
    /// Types already defined from `path` by an earlier, rolled back include
    /// are skipped, so a retry picks up where the failed attempt stopped.
    fn define_unit(&mut self, path: &Path, unit: Unit) -> Result<()> {
        for decl in unit.types {
            if self
                .types
                .by_name(&decl.name)
                .is_some_and(|def| def.source.as_path() == path)
            {
                continue;
            }
            let mut resolved = decl
                .dependencies()
                .map(|dependency| self.resolve_type(dependency))
                .collect::<Result<Vec<_>>>()?;
            let parent = decl.extends.is_some().then(|| resolved.remove(0));
            self.types
                .define(&decl.name, parent, resolved, decl.init, path.to_path_buf())?;
        }
        Ok(())
    }
}

impl<S: UnitSource> Host for TypeRuntime<S> {
    fn file_exists(&self, path: &Path) -> bool {
        self.source.exists(path)
    }

    fn include(&mut self, path: &Path) -> Result<()> {
        if self.included.contains(path) {
            return Ok(());
        }
        if !self.source.exists(path) {
            return Err(LoadError::MissingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        let unit = self.source.read_unit(path)?;
        // Marked before defining so cyclic references hit the no-op above.
        self.included.insert(path.to_path_buf());
        self.include_order.push(path.to_path_buf());
        debug!(path = %path.display(), types = unit.types.len(), "including unit");

        if let Err(err) = self.define_unit(path, unit) {
            self.included.remove(path);
            self.include_order.retain(|included| included != path);
            debug!(path = %path.display(), error = %err, "include rolled back");
            return Err(err);
        }
        Ok(())
    }

    fn is_defined(&self, name: &str) -> bool {
        self.types.lookup(name).is_some()
    }

    fn alias_type(&mut self, original: &str, alias: &str) -> Result<()> {
        self.types.alias(original, alias)?;
        Ok(())
    }

    fn initialize(&mut self, name: &str) -> Result<bool> {
        let Some(def) = self.types.by_name(name) else {
            return Ok(false);
        };
        if !def.has_init {
            return Ok(false);
        }
        debug!(type_name = %def.name, "running initializer");
        self.initialized.push(def.name.clone());
        Ok(true)
    }

    fn register_loader(&mut self, loader: Arc<dyn TypeLoader>) {
        self.loaders.insert(0, loader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{MemorySource, TypeDecl};

    /// Loads `<name>` from `/<name>.json`, ignoring namespaces.
    struct FlatLoader;

    impl TypeLoader for FlatLoader {
        fn load(&self, host: &mut dyn Host, type_name: &str) -> Result<bool> {
            let path = PathBuf::from(format!("/{}.json", type_name));
            if !host.file_exists(&path) {
                return Ok(false);
            }
            host.include(&path)?;
            Ok(true)
        }
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_unit("/Base.json", Unit::new().with_type(TypeDecl::new("Base")))
            .with_unit(
                "/Child.json",
                Unit::new().with_type(TypeDecl::new("Child").extends("Base").with_init()),
            )
    }

    #[test]
    fn test_include_is_idempotent() {
        let mut runtime = TypeRuntime::new(source());
        runtime.include(Path::new("/Base.json")).unwrap();
        runtime.include(Path::new("/Base.json")).unwrap();

        assert_eq!(runtime.included().len(), 1);
        assert_eq!(runtime.types().len(), 1);
    }

    #[test]
    fn test_include_missing_file_is_typed_error() {
        let mut runtime = TypeRuntime::new(source());
        let err = runtime.include(Path::new("/Nope.json")).unwrap_err();
        let load_err = err.downcast_ref::<LoadError>().unwrap();
        assert!(load_err.is_missing_file());
    }

    #[test]
    fn test_dependencies_resolved_through_loaders() {
        let mut runtime = TypeRuntime::new(source());
        runtime.register_loader(Arc::new(FlatLoader));

        let child = runtime.instantiate("Child").unwrap();
        assert!(runtime.is_instance_of(&child, "Base"));
        assert_eq!(
            runtime.included(),
            &[PathBuf::from("/Child.json"), PathBuf::from("/Base.json")]
        );
    }

    #[test]
    fn test_unresolved_reference_without_loaders() {
        let mut runtime = TypeRuntime::new(source());
        let err = runtime.resolve_type("\\Child").unwrap_err();
        assert_eq!(err.to_string(), "type Child is not defined");
    }

    #[test]
    fn test_initialize_only_types_with_initializer() {
        let mut runtime = TypeRuntime::new(source());
        runtime.include(Path::new("/Base.json")).unwrap();
        runtime.include(Path::new("/Child.json")).unwrap();

        assert!(!runtime.initialize("Base").unwrap());
        assert!(runtime.initialize("Child").unwrap());
        assert!(!runtime.initialize("Unknown").unwrap());
        assert_eq!(runtime.init_count("Child"), 1);
    }

    #[test]
    fn test_failed_include_is_rolled_back() {
        let mut runtime = TypeRuntime::new(
            MemorySource::new().with_unit(
                "/Bundle.json",
                Unit::new()
                    .with_type(TypeDecl::new("First"))
                    .with_type(TypeDecl::new("Second").extends("Base"))
                    .with_type(TypeDecl::new("Third")),
            ),
        );
        runtime.register_loader(Arc::new(FlatLoader));

        let err = runtime.include(Path::new("/Bundle.json")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UndefinedType { name }) if name == "Base"
        ));
        assert!(runtime.included().is_empty());
        assert!(runtime.is_defined("First"));
        assert!(!runtime.is_defined("Third"));

        runtime
            .source_mut()
            .insert("/Base.json", Unit::new().with_type(TypeDecl::new("Base")));
        runtime.include(Path::new("/Bundle.json")).unwrap();

        assert!(runtime.is_defined("Second"));
        assert!(runtime.is_defined("Third"));
        assert_eq!(runtime.types().len(), 4);
        assert_eq!(
            runtime.included(),
            &[PathBuf::from("/Bundle.json"), PathBuf::from("/Base.json")]
        );
    }
}
