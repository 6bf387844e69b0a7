//! Name-to-path translation.
//!
//! Three layouts are supported:
//! - **PSR-0**: every namespace segment is a directory and underscores in the
//!   short name are directories too; case is preserved
//! - **Namespaced**: like PSR-0, but the registered prefix is stripped first
//!   so the remaining segments are relative to the prefix's base path
//! - **Conventional**: global names live under a single root, lower-cased,
//!   with underscores as directories
//!
//! Empty segments are dropped: a leading, trailing or doubled separator or
//! underscore never produces an empty directory or file name, so
//! `Model_` maps to `model.json` and `A__B` to `a/b.json`.
//!
//! All functions are pure. They never check that the computed file exists.

use std::path::{Path, PathBuf};

use crate::name::{normalize_prefix, TypeName, NS_SEPARATOR};

/// Extension appended to translated file names when none is configured.
pub const DEFAULT_EXTENSION: &str = "json";

/// Translate a type name to its PSR-0 location under `base`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use typeload_paths::translate::psr_path;
///
/// let path = psr_path(Path::new("/vendor"), "Acme\\Log\\Stream_Handler", "json");
/// assert_eq!(
///     path,
///     PathBuf::from("/vendor/Acme/Log/Stream/Handler.json")
/// );
/// ```
pub fn psr_path(base: &Path, type_name: &str, extension: &str) -> PathBuf {
    let name = TypeName::parse(type_name);
    let mut parts: Vec<String> = name
        .namespace()
        .map(split_namespace)
        .unwrap_or_default();
    parts.extend(split_short_name(name.short_name()));
    finish(base, parts, extension)
}

/// Translate a type name to its location under a non-PSR namespace entry.
///
/// `prefix` is the registered namespace the entry matched on; it is removed
/// from the requested namespace and the rest is laid out below `base`.
/// Case is preserved.
pub fn namespaced_path(base: &Path, prefix: &str, type_name: &str, extension: &str) -> PathBuf {
    let name = TypeName::parse(type_name);
    let prefix = normalize_prefix(prefix);
    let namespace = name.namespace().unwrap_or("");
    let remainder = namespace
        .strip_prefix(prefix)
        .unwrap_or(namespace)
        .trim_start_matches(NS_SEPARATOR);

    let mut parts = split_namespace(remainder);
    parts.extend(split_short_name(name.short_name()));
    finish(base, parts, extension)
}

/// Translate a global type name to its conventional location under `root`.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use typeload_paths::translate::conventional_path;
///
/// let path = conventional_path(Path::new("app/classes"), "Controller_Admin", "json");
/// assert_eq!(path, PathBuf::from("app/classes/controller/admin.json"));
/// ```
pub fn conventional_path(root: &Path, type_name: &str, extension: &str) -> PathBuf {
    let lowered = type_name.to_lowercase();
    finish(root, split_short_name(&lowered), extension)
}

fn split_namespace(namespace: &str) -> Vec<String> {
    namespace
        .split(NS_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_short_name(short: &str) -> Vec<String> {
    short
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn finish(base: &Path, mut parts: Vec<String>, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    if let Some(last) = parts.last_mut() {
        if !extension.is_empty() {
            last.push('.');
            last.push_str(extension);
        }
    }
    let mut path = base.to_path_buf();
    path.extend(parts);
    path
}
