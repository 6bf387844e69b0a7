//! Host runtime interface.
//!
//! The autoloader decides *which* file defines a type; the host decides what
//! loading a file means. A host supplies:
//! - a file-existence predicate
//! - an include primitive (idempotent per path)
//! - a defined-type predicate
//! - an aliasing primitive with full identity equivalence
//! - post-load initializer invocation
//! - registration of fallback loaders for unresolved type references
//!
//! [`crate::runtime::TypeRuntime`] is the in-crate implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

/// Services the autoloader consumes from its host.
pub trait Host {
    /// Whether `path` names an existing, loadable file.
    fn file_exists(&self, path: &Path) -> bool;

    /// Load and execute `path`, making the types it defines available.
    ///
    /// Including an already-included path is a no-op. Including a missing path
    /// fails with [`crate::LoadError::MissingFile`].
    fn include(&mut self, path: &Path) -> Result<()>;

    /// Whether `name` (or an alias of it) is currently defined.
    fn is_defined(&self, name: &str) -> bool;

    /// Bind `alias` as a second name for the type currently named `original`.
    fn alias_type(&mut self, original: &str, alias: &str) -> Result<()>;

    /// Run the post-load initializer of `name` if the type exposes one.
    ///
    /// Returns whether an initializer ran.
    fn initialize(&mut self, name: &str) -> Result<bool>;

    /// Install `loader` as a fallback handler for unresolved type references.
    fn register_loader(&mut self, loader: Arc<dyn TypeLoader>);
}

/// A fallback handler the host consults when a type reference is unresolved.
pub trait TypeLoader: Send + Sync {
    /// Try to make `type_name` defined in `host`.
    ///
    /// `Ok(false)` means this loader has no opinion about the name.
    fn load(&self, host: &mut dyn Host, type_name: &str) -> Result<bool>;
}
