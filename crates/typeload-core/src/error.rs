//! Typed load errors.
//!
//! Most fallible APIs in this crate return `anyhow::Result`. The conditions
//! below are the ones callers match on, so they are raised as [`LoadError`]
//! and can be recovered with `err.downcast_ref::<LoadError>()`.

use std::path::PathBuf;

/// A violated load contract.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file that had to exist was not there.
    #[error("failed to include {}: file not found", path.display())]
    MissingFile { path: PathBuf },

    /// A type name was declared twice.
    #[error("cannot redeclare type {name}")]
    Redeclared { name: String },

    /// A type was referenced but no loader could define it.
    #[error("type {name} is not defined")]
    UndefinedType { name: String },

    /// An alias name is already bound to a different type.
    #[error("cannot alias {original} as {alias}: name already bound to {existing}")]
    AliasConflict {
        original: String,
        alias: String,
        existing: String,
    },

    /// A unit file could not be decoded.
    #[error("malformed unit file {}: {reason}", path.display())]
    MalformedUnit { path: PathBuf, reason: String },
}

impl LoadError {
    /// Whether this error reports a missing file.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, LoadError::MissingFile { .. })
    }
}
