//! Typeload Core
//!
//! Lazy type resolution: given a type name, decide which file defines it,
//! load it once, optionally alias it into another namespace, and run its
//! post-load initializer only when it was the type actually requested.
//!
//! This crate provides:
//! - [`autoloader`]: The resolver context and the resolution algorithm
//! - [`strategy`]: The ordered fallback chain the autoloader evaluates
//! - [`registry`]: Namespace registry, explicit class map and core namespace list
//! - [`guard`]: Single-slot ownership tracking for initializers
//! - [`host`]: The interface to the runtime that actually loads files
//! - [`runtime`], [`type_table`], [`unit`]: A reference host runtime
//! - [`config`]: JSON configuration for building an autoloader

pub mod autoloader;
pub mod config;
pub mod error;
pub mod guard;
pub mod host;
pub mod registry;
pub mod runtime;
pub mod strategy;
pub mod type_table;
pub mod unit;

pub use autoloader::{Autoloader, Layout, Plan, DEFAULT_CLASSES_DIR};
pub use config::{LoaderConfig, NamespaceConfig};
pub use error::LoadError;
pub use guard::{Claim, OwnershipGuard};
pub use host::{Host, TypeLoader};
pub use registry::{
    ClassMap, CoreNamespaces, MergeOrder, NamespaceEntry, NamespaceRegistry, Precedence,
    Registries,
};
pub use runtime::{Instance, TypeRuntime};
pub use strategy::{Resolution, Strategy};
pub use type_table::{TypeDef, TypeId, TypeTable};
pub use unit::{FsSource, MemorySource, TypeDecl, Unit, UnitSource};
