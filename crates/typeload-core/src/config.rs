//! Loader configuration.
//!
//! A JSON document describing the layout and registries of one application:
//!
//! ```json
//! {
//!   "app_path": "app",
//!   "extension": "json",
//!   "namespaces": [
//!     { "prefix": "Auth", "path": "packages/auth" },
//!     { "prefix": "Acme", "path": "vendor", "psr": true }
//!   ],
//!   "classes": { "Fw\\Core\\Arr": "core/arr.json" },
//!   "core_namespaces": ["Fw\\Core"]
//! }
//! ```
//!
//! Relative paths are resolved against the directory of the config file when
//! it is loaded with [`LoaderConfig::from_path`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use typeload_paths::DEFAULT_EXTENSION;

use crate::autoloader::{Autoloader, Layout, DEFAULT_CLASSES_DIR};
use crate::registry::NamespaceEntry;

/// Environment variable overriding [`LoaderConfig::app_path`].
pub const ENV_APP_PATH: &str = "TYPELOAD_APP_PATH";
/// Environment variable overriding [`LoaderConfig::extension`].
pub const ENV_EXTENSION: &str = "TYPELOAD_EXTENSION";

/// One namespace registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    pub prefix: String,
    pub path: PathBuf,
    #[serde(default)]
    pub psr: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub app_path: PathBuf,
    pub classes_dir: String,
    pub extension: String,
    /// Namespace registrations in match order.
    pub namespaces: Vec<NamespaceConfig>,
    /// Explicit type name → file overrides.
    pub classes: BTreeMap<String, PathBuf>,
    /// Core namespaces, first checked first.
    pub core_namespaces: Vec<String>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            app_path: PathBuf::from("."),
            classes_dir: DEFAULT_CLASSES_DIR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            namespaces: Vec::new(),
            classes: BTreeMap::new(),
            core_namespaces: Vec::new(),
            base_dir: None,
        }
    }
}

impl LoaderConfig {
    /// Parse a config document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse loader config")
    }

    /// Load a config file; relative paths inside it resolve against its directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read loader config {}", path.display()))?;
        let mut config = Self::from_json(&text)
            .with_context(|| format!("Invalid loader config {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Apply `TYPELOAD_APP_PATH` and `TYPELOAD_EXTENSION` overrides.
    ///
    /// A relative app path from the environment is taken relative to the
    /// current directory, not the config file.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(app_path) = std::env::var_os(ENV_APP_PATH) {
            let app_path = PathBuf::from(app_path);
            self.app_path = if app_path.is_absolute() {
                app_path
            } else {
                std::env::current_dir()
                    .context("Failed to read current directory")?
                    .join(app_path)
            };
        }
        if let Ok(extension) = std::env::var(ENV_EXTENSION) {
            self.extension = extension;
        }
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.resolve(&self.app_path))
            .with_classes_dir(self.classes_dir.clone())
            .with_extension(&self.extension)
    }

    /// Build an autoloader populated from this config.
    pub fn build(&self) -> Autoloader {
        let loader = Autoloader::new(self.layout());
        loader.add_namespaces(
            self.namespaces
                .iter()
                .map(|ns| NamespaceEntry::new(&ns.prefix, self.resolve(&ns.path), ns.psr)),
            false,
        );
        loader.add_classes(
            self.classes
                .iter()
                .map(|(name, path)| (name.as_str(), self.resolve(path))),
        );
        for namespace in &self.core_namespaces {
            loader.add_core_namespace(namespace, false);
        }
        loader
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
