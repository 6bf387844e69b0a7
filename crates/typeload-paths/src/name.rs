//! Type name normalization utilities.
//!
//! Type names reach the loader in several shapes:
//! - Global: "Mailer"
//! - Namespaced: "App\Model\User"
//! - Fully qualified with a leading separator: "\App\Model\User"
//!
//! This module normalizes them to a consistent form and answers namespace
//! prefix questions against the normalized form.

/// Separator between namespace segments and the short type name.
pub const NS_SEPARATOR: char = '\\';

/// Strip leading namespace separators from a type name.
///
/// # Examples
///
/// ```
/// use typeload_paths::name::normalize_type_name;
///
/// assert_eq!(normalize_type_name("\\App\\Model\\User"), "App\\Model\\User");
/// assert_eq!(normalize_type_name("Mailer"), "Mailer");
/// ```
pub fn normalize_type_name(raw: &str) -> &str {
    raw.trim_start_matches(NS_SEPARATOR)
}

/// Strip leading and trailing separators from a namespace prefix.
///
/// Registries key their entries by the normalized prefix, so `\App\` and
/// `App` name the same entry.
pub fn normalize_prefix(raw: &str) -> &str {
    raw.trim_matches(NS_SEPARATOR)
}

/// A type name split into its namespace and short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeName<'a> {
    full: &'a str,
    /// Byte offset of the last separator, if any.
    split: Option<usize>,
}

impl<'a> TypeName<'a> {
    /// Parse a raw type name, dropping any leading separator.
    pub fn parse(raw: &'a str) -> Self {
        let full = normalize_type_name(raw);
        Self {
            full,
            split: full.rfind(NS_SEPARATOR),
        }
    }

    /// The normalized, fully-qualified name.
    pub fn full(&self) -> &'a str {
        self.full
    }

    /// Whether the name carries a namespace.
    pub fn is_namespaced(&self) -> bool {
        self.split.is_some()
    }

    /// Everything before the final separator.
    pub fn namespace(&self) -> Option<&'a str> {
        self.split.map(|pos| &self.full[..pos])
    }

    /// Everything after the final separator (the whole name when global).
    pub fn short_name(&self) -> &'a str {
        match self.split {
            Some(pos) => &self.full[pos + NS_SEPARATOR.len_utf8()..],
            None => self.full,
        }
    }
}

/// Check whether `prefix` names `namespace` or one of its ancestors.
///
/// Matching is aligned on separators: `App` matches `App` and `App\Model`
/// but never `Application`. The empty prefix matches every namespace.
///
/// # Examples
///
/// ```
/// use typeload_paths::name::is_namespace_prefix;
///
/// assert!(is_namespace_prefix("App", "App\\Model"));
/// assert!(!is_namespace_prefix("App", "Application\\Model"));
/// ```
pub fn is_namespace_prefix(prefix: &str, namespace: &str) -> bool {
    let prefix = normalize_prefix(prefix);
    let namespace = normalize_type_name(namespace);
    if prefix.is_empty() {
        return true;
    }
    match namespace.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(NS_SEPARATOR),
        None => false,
    }
}

/// Join a namespace and a name with the separator.
///
/// An empty namespace returns the name unchanged.
pub fn qualify(namespace: &str, name: &str) -> String {
    let namespace = normalize_prefix(namespace);
    let name = normalize_type_name(name);
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", namespace, NS_SEPARATOR, name)
    }
}

/// Name under which `type_name` is visible once aliased into `namespace`.
///
/// An empty namespace means the global namespace.
///
/// ```
/// use typeload_paths::name::alias_name;
///
/// assert_eq!(alias_name("Core\\Arr", ""), "Arr");
/// assert_eq!(alias_name("Core\\Arr", "\\Util\\"), "Util\\Arr");
/// ```
pub fn alias_name(type_name: &str, namespace: &str) -> String {
    qualify(namespace, TypeName::parse(type_name).short_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_name() {
        let name = TypeName::parse("Mailer");
        assert!(!name.is_namespaced());
        assert_eq!(name.namespace(), None);
        assert_eq!(name.short_name(), "Mailer");
    }

    #[test]
    fn test_parse_namespaced_name() {
        let name = TypeName::parse("\\App\\Model\\User_Profile");
        assert!(name.is_namespaced());
        assert_eq!(name.full(), "App\\Model\\User_Profile");
        assert_eq!(name.namespace(), Some("App\\Model"));
        assert_eq!(name.short_name(), "User_Profile");
    }

    #[test]
    fn test_prefix_is_separator_aligned() {
        assert!(is_namespace_prefix("App", "App"));
        assert!(is_namespace_prefix("App", "App\\Sub"));
        assert!(is_namespace_prefix("\\App\\", "App\\Sub"));
        assert!(is_namespace_prefix("App\\Sub", "App\\Sub\\Deeper"));
        assert!(!is_namespace_prefix("App", "AppX\\Sub"));
        assert!(!is_namespace_prefix("App\\Sub", "App"));
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        assert!(is_namespace_prefix("", "Anything\\At\\All"));
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("Fw\\Core", "Input"), "Fw\\Core\\Input");
        assert_eq!(qualify("", "Input"), "Input");
    }

    #[test]
    fn test_alias_name_global_and_nested() {
        assert_eq!(alias_name("Fw\\Core\\Input", ""), "Input");
        assert_eq!(alias_name("Fw\\Core\\Input", "App"), "App\\Input");
        assert_eq!(alias_name("Input", "App"), "App\\Input");
    }
}
