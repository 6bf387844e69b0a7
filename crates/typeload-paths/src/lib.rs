//! Typeload Paths
//!
//! Type name normalization and name-to-path translation for typeload.
//!
//! This crate provides:
//! - [`name`]: Parsing of namespaced type names and namespace prefix matching
//! - [`translate`]: Pure translations from a type name to the file expected to define it
//!
//! # Naming Model
//!
//! A type name is a sequence of namespace segments followed by a short name,
//! joined by [`NS_SEPARATOR`]:
//! - `Mailer` is a global (non-namespaced) name
//! - `App\Model\User` has namespace `App\Model` and short name `User`
//! - `\App\Model\User` is the same name with a leading separator
//!
//! Nothing in this crate touches the file system; existence checks and loading
//! belong to the host runtime.

pub mod name;
pub mod translate;

pub use name::{
    alias_name, is_namespace_prefix, normalize_prefix, normalize_type_name, qualify, TypeName,
    NS_SEPARATOR,
};
pub use translate::{conventional_path, namespaced_path, psr_path, DEFAULT_EXTENSION};
