//! # Resolution Strategies
//!
//! The autoloader tries an ordered list of strategies; the first one that
//! produces a [`Resolution`] wins. Strategies only *plan*: they read the
//! registries and ask the host whether files exist, but never load anything.
//! The [`crate::Autoloader`] executes the chosen plan.
//!
//! Default order:
//!
//! | # | Strategy | Applies to | Result |
//! |---|----------|------------|--------|
//! | 1 | [`ExplicitOverride`] | any name in the class map | [`Resolution::Include`] |
//! | 2 | [`CoreNamespaceShortcut`] | global names whose core-qualified form is in the class map | [`Resolution::CoreAlias`] |
//! | 3 | [`ConventionalPath`] | global names with a file under the classes root | [`Resolution::Conventional`] |
//! | 4 | [`NamespaceSearch`] | namespaced names under a registered prefix | [`Resolution::Include`] or [`Resolution::Psr`] |

use std::path::{Path, PathBuf};

use typeload_paths::{conventional_path, namespaced_path, psr_path, qualify, TypeName};

use crate::autoloader::Layout;
use crate::host::Host;
use crate::registry::Registries;

/// How a planned load is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Include `path`, then run the completion check.
    Include { path: PathBuf },
    /// Include `path` unless `qualified` is already defined, alias `qualified`
    /// to the requested global name, then run the completion check.
    CoreAlias { qualified: String, path: PathBuf },
    /// Include `path`; if the requested name is still undefined afterwards,
    /// alias the first defined core-qualified form to it. Then complete.
    Conventional { path: PathBuf },
    /// Include `path` unconditionally and return. No completion check.
    Psr { path: PathBuf },
}

impl Resolution {
    /// File this resolution will include.
    pub fn path(&self) -> &Path {
        match self {
            Resolution::Include { path }
            | Resolution::CoreAlias { path, .. }
            | Resolution::Conventional { path }
            | Resolution::Psr { path } => path,
        }
    }

    /// Whether the completion check (and so the initializer) runs after loading.
    pub fn runs_initializer(&self) -> bool {
        !matches!(self, Resolution::Psr { .. })
    }
}

/// Everything a strategy may consult while planning.
pub struct PlanContext<'a> {
    pub registries: &'a Registries,
    pub layout: &'a Layout,
    pub host: &'a dyn Host,
}

/// One link in the fallback chain.
pub trait Strategy: Send + Sync {
    /// Short identifier used in logs and dry-run output.
    fn name(&self) -> &'static str;

    /// Plan a load for `type_name`, or decline with `None`.
    fn plan(&self, ctx: &PlanContext<'_>, type_name: &TypeName<'_>) -> Option<Resolution>;
}

/// The default chain, in evaluation order.
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(ExplicitOverride),
        Box::new(CoreNamespaceShortcut),
        Box::new(ConventionalPath),
        Box::new(NamespaceSearch),
    ]
}

// =============================================================================
// Strategies
// =============================================================================

/// Exact name → file lookups in the class map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitOverride;

impl Strategy for ExplicitOverride {
    fn name(&self) -> &'static str {
        "explicit-override"
    }

    fn plan(&self, ctx: &PlanContext<'_>, type_name: &TypeName<'_>) -> Option<Resolution> {
        ctx.registries
            .classes
            .get(type_name.full())
            .map(|path| Resolution::Include {
                path: path.to_path_buf(),
            })
    }
}

/// Global names served by a class-map entry in one of the core namespaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreNamespaceShortcut;

impl Strategy for CoreNamespaceShortcut {
    fn name(&self) -> &'static str {
        "core-namespace"
    }

    fn plan(&self, ctx: &PlanContext<'_>, type_name: &TypeName<'_>) -> Option<Resolution> {
        if type_name.is_namespaced() {
            return None;
        }
        ctx.registries.core.iter().find_map(|namespace| {
            let qualified = qualify(namespace, type_name.full());
            ctx.registries
                .classes
                .get(&qualified)
                .map(|path| Resolution::CoreAlias {
                    path: path.to_path_buf(),
                    qualified,
                })
        })
    }
}

/// Global names living under the application's classes directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalPath;

impl Strategy for ConventionalPath {
    fn name(&self) -> &'static str {
        "conventional-path"
    }

    fn plan(&self, ctx: &PlanContext<'_>, type_name: &TypeName<'_>) -> Option<Resolution> {
        if type_name.is_namespaced() {
            return None;
        }
        let path = conventional_path(
            &ctx.layout.classes_root(),
            type_name.full(),
            &ctx.layout.extension,
        );
        ctx.host
            .file_exists(&path)
            .then_some(Resolution::Conventional { path })
    }
}

/// Namespaced names resolved against the namespace registry.
///
/// Entries are scanned in registration order. A matching PSR entry ends the
/// scan whether or not its file exists; a matching non-PSR entry only ends it
/// when its file exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceSearch;

impl Strategy for NamespaceSearch {
    fn name(&self) -> &'static str {
        "namespace-search"
    }

    fn plan(&self, ctx: &PlanContext<'_>, type_name: &TypeName<'_>) -> Option<Resolution> {
        let namespace = type_name.namespace()?;
        let extension = &ctx.layout.extension;

        for entry in ctx.registries.namespaces.matching(namespace) {
            if entry.psr {
                return Some(Resolution::Psr {
                    path: psr_path(&entry.base_path, type_name.full(), extension),
                });
            }
            let path = namespaced_path(&entry.base_path, &entry.prefix, type_name.full(), extension);
            if ctx.host.file_exists(&path) {
                return Some(Resolution::Include { path });
            }
        }
        None
    }
}
