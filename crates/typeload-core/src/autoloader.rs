//! # Autoloader
//!
//! The resolver context: registries, layout, ownership guard and the ordered
//! strategy chain. One [`Autoloader`] is built per process (or per isolated
//! execution unit), shared by `Arc`, and registered with a [`Host`] as its
//! fallback loader.
//!
//! ## Resolution
//!
//! ```text
//! load(name)
//!   │ normalize, claim ownership if idle
//!   ▼
//! ┌──────────────────────┐   first plan wins   ┌─────────────┐
//! │ strategies (ordered) │ ──────────────────▶ │   execute   │──▶ Ok(true)
//! └──────────────────────┘                     └─────────────┘
//!   │ none planned                               │ include / alias / complete
//!   ▼                                            ▼
//! Ok(false)                                    Err(..) on a broken load contract
//!
//! ownership is released on every exit path
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use typeload_core::{Autoloader, Layout, MemorySource, TypeDecl, TypeRuntime, Unit};
//!
//! let mut source = MemorySource::new();
//! source.insert("/pkg/auth/Login.json", Unit::new().with_type(TypeDecl::new("Auth\\Login")));
//!
//! let loader = Arc::new(Autoloader::new(Layout::new("/app")));
//! loader.add_namespace("Auth", "/pkg/auth", false);
//!
//! let mut runtime = TypeRuntime::new(source);
//! loader.register(&mut runtime);
//!
//! assert!(runtime.resolve_type("Auth\\Login").is_ok());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};
use typeload_paths::{alias_name, qualify, TypeName, DEFAULT_EXTENSION};

use crate::guard::OwnershipGuard;
use crate::host::{Host, TypeLoader};
use crate::registry::{MergeOrder, NamespaceEntry, Precedence, Registries};
use crate::strategy::{default_strategies, PlanContext, Resolution, Strategy};

/// Directory under the application path that holds conventionally laid out types.
pub const DEFAULT_CLASSES_DIR: &str = "classes";

// =============================================================================
// Layout
// =============================================================================

/// Fixed file-system conventions of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Application root.
    pub app_path: PathBuf,
    /// Directory under `app_path` holding conventionally named types.
    pub classes_dir: String,
    /// Extension of type files, without the leading dot.
    pub extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Layout {
    pub fn new(app_path: impl Into<PathBuf>) -> Self {
        Self {
            app_path: app_path.into(),
            classes_dir: DEFAULT_CLASSES_DIR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_classes_dir(mut self, classes_dir: impl Into<String>) -> Self {
        self.classes_dir = classes_dir.into();
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Root of the conventional layout.
    pub fn classes_root(&self) -> PathBuf {
        self.app_path.join(&self.classes_dir)
    }
}

/// A dry-run answer: which strategy would handle a name, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub strategy: &'static str,
    pub resolution: Resolution,
}

// =============================================================================
// Autoloader
// =============================================================================

pub struct Autoloader {
    registries: RwLock<Registries>,
    layout: Layout,
    guard: OwnershipGuard,
    strategies: Vec<Box<dyn Strategy>>,
}

impl std::fmt::Debug for Autoloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autoloader")
            .field("registries", &*self.registries.read())
            .field("layout", &self.layout)
            .field("owner", &self.guard.owner())
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for Autoloader {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl Autoloader {
    /// Create an autoloader with empty registries and the default strategy chain.
    pub fn new(layout: Layout) -> Self {
        Self {
            registries: RwLock::new(Registries::default()),
            layout,
            guard: OwnershipGuard::new(),
            strategies: default_strategies(),
        }
    }

    /// Append a strategy to the end of the chain.
    pub fn push_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Install this autoloader as `host`'s fallback loader.
    pub fn register(self: &Arc<Self>, host: &mut dyn Host) {
        debug!(app_path = %self.layout.app_path.display(), "registering autoloader");
        host.register_loader(self.clone());
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Insert or overwrite the base path for a namespace prefix.
    pub fn add_namespace(&self, prefix: &str, path: impl Into<PathBuf>, psr: bool) {
        self.registries.write().namespaces.insert(prefix, path, psr);
    }

    /// Bulk-register namespaces.
    ///
    /// `prepend == false` overwrites values of existing prefixes in place and
    /// appends new ones. `prepend == true` moves the given entries ahead of
    /// all existing ones, their values winning on collision.
    pub fn add_namespaces<I>(&self, entries: I, prepend: bool)
    where
        I: IntoIterator<Item = NamespaceEntry>,
    {
        let order = if prepend {
            MergeOrder::Prepend
        } else {
            MergeOrder::Append
        };
        self.merge_namespaces(entries, order, Precedence::Incoming);
    }

    /// Bulk-register namespaces with explicit ordering and collision rules.
    pub fn merge_namespaces<I>(&self, entries: I, order: MergeOrder, precedence: Precedence)
    where
        I: IntoIterator<Item = NamespaceEntry>,
    {
        self.registries
            .write()
            .namespaces
            .merge(entries, order, precedence);
    }

    /// Base path registered for `prefix`.
    pub fn namespace_path(&self, prefix: &str) -> Option<PathBuf> {
        self.registries
            .read()
            .namespaces
            .base_path(prefix)
            .map(Path::to_path_buf)
    }

    /// Registered namespaces in match order.
    pub fn namespaces(&self) -> Vec<NamespaceEntry> {
        self.registries.read().namespaces.iter().cloned().collect()
    }

    /// Load `name` from `path`, bypassing every search.
    pub fn add_class(&self, name: &str, path: impl Into<PathBuf>) {
        self.registries.write().classes.insert(name, path);
    }

    pub fn add_classes<I, K, P>(&self, classes: I)
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        self.registries.write().classes.extend(classes);
    }

    pub fn class_path(&self, name: &str) -> Option<PathBuf> {
        self.registries
            .read()
            .classes
            .get(name)
            .map(Path::to_path_buf)
    }

    /// Make members of `namespace` usable unqualified.
    ///
    /// With `prefix == true` the namespace is checked before every previously
    /// added one; otherwise after all of them.
    pub fn add_core_namespace(&self, namespace: &str, prefix: bool) {
        self.registries.write().core.add(namespace, prefix);
    }

    pub fn core_namespaces(&self) -> Vec<String> {
        self.registries.read().core.to_vec()
    }

    /// Give `type_name` a second name in `namespace` (global when empty).
    ///
    /// Returns the alias name.
    pub fn alias_to_namespace(
        &self,
        host: &mut dyn Host,
        type_name: &str,
        namespace: &str,
    ) -> Result<String> {
        let alias = alias_name(type_name, namespace);
        host.alias_type(type_name, &alias)?;
        trace!(type_name, alias = %alias, "aliased type");
        Ok(alias)
    }

    /// Type currently entitled to its initializer, if a resolution is in flight.
    pub fn owner(&self) -> Option<String> {
        self.guard.owner()
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Report how `type_name` would be resolved, without loading anything.
    pub fn explain(&self, host: &dyn Host, type_name: &str) -> Option<Plan> {
        self.plan(host, &TypeName::parse(type_name))
    }

    /// Resolve and load `type_name`.
    ///
    /// Returns `Ok(false)` when no strategy applies. Errors are reserved for
    /// broken load contracts, such as a PSR-registered file that is missing.
    pub fn load(&self, host: &mut dyn Host, type_name: &str) -> Result<bool> {
        let name = TypeName::parse(type_name);
        let claim = self.guard.claim(name.full());

        let Some(plan) = self.plan(&*host, &name) else {
            debug!(type_name = name.full(), "no strategy resolved type");
            return Ok(false);
        };

        debug!(
            type_name = claim.type_name(),
            strategy = plan.strategy,
            path = %plan.resolution.path().display(),
            owner = claim.is_owner(),
            "resolving type"
        );
        self.execute(host, &name, plan.resolution)
    }

    fn plan(&self, host: &dyn Host, name: &TypeName<'_>) -> Option<Plan> {
        let registries = self.registries.read();
        let ctx = PlanContext {
            registries: &registries,
            layout: &self.layout,
            host,
        };
        for strategy in &self.strategies {
            if let Some(resolution) = strategy.plan(&ctx, name) {
                return Some(Plan {
                    strategy: strategy.name(),
                    resolution,
                });
            }
            trace!(type_name = name.full(), strategy = strategy.name(), "strategy declined");
        }
        None
    }

    fn execute(&self, host: &mut dyn Host, name: &TypeName<'_>, resolution: Resolution) -> Result<bool> {
        let full = name.full();
        match resolution {
            Resolution::Include { path } => {
                host.include(&path)?;
            }
            Resolution::CoreAlias { qualified, path } => {
                if !host.is_defined(&qualified) {
                    host.include(&path)?;
                }
                self.alias_to_namespace(host, &qualified, "")?;
            }
            Resolution::Conventional { path } => {
                host.include(&path)?;
                if !host.is_defined(full) {
                    let qualified = self
                        .core_namespaces()
                        .iter()
                        .map(|namespace| qualify(namespace, full))
                        .find(|candidate| host.is_defined(candidate));
                    if let Some(qualified) = qualified {
                        self.alias_to_namespace(host, &qualified, "")?;
                    }
                }
            }
            Resolution::Psr { path } => {
                if let Err(err) = host.include(&path) {
                    warn!(type_name = full, path = %path.display(), error = %err, "PSR include failed");
                    return Err(err);
                }
                return Ok(true);
            }
        }
        self.complete(host, full)?;
        Ok(true)
    }

    /// Run `type_name`'s initializer if it owns the current resolution.
    fn complete(&self, host: &mut dyn Host, type_name: &str) -> Result<()> {
        if self.guard.complete(type_name) {
            let ran = host.initialize(type_name)?;
            trace!(type_name, initialized = ran, "completion check");
        }
        Ok(())
    }
}

impl TypeLoader for Autoloader {
    fn load(&self, host: &mut dyn Host, type_name: &str) -> Result<bool> {
        Autoloader::load(self, host, type_name)
    }
}
