//! Typeload
//!
//! Lazy type resolution and loading driven by namespace registries.
//!
//! - **Resolution**: an ordered chain of strategies maps a type name to the
//!   file that defines it (explicit overrides, core namespaces, a conventional
//!   application layout, registered namespace subtrees including PSR-0)
//! - **Initialization**: only the type a caller actually asked for gets its
//!   post-load initializer, even when loading it pulls in dependencies
//! - **Aliasing**: types from core namespaces can be used unqualified
//!
//! See [`Autoloader`] for the resolver and [`TypeRuntime`] for the reference
//! host it plugs into. Name-to-path translation lives in [`paths`].

pub use typeload_core::*;
pub use typeload_paths as paths;
