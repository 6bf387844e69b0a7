//! Fixture helpers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use typeload::{Autoloader, Layout, MemorySource, TypeDecl, TypeRuntime, Unit};

/// App root used by in-memory fixtures.
pub const APP_PATH: &str = "/app";

/// An autoloader registered with an in-memory runtime.
pub struct Fixture {
    pub loader: Arc<Autoloader>,
    pub runtime: TypeRuntime<MemorySource>,
}

impl Fixture {
    /// Store a unit at `path` in the runtime's source.
    pub fn unit(&mut self, path: &str, decls: Vec<TypeDecl>) -> &mut Self {
        self.runtime.source_mut().insert(path, unit(decls));
        self
    }

    pub fn load(&mut self, type_name: &str) -> anyhow::Result<bool> {
        self.loader.load(&mut self.runtime, type_name)
    }

    pub fn included(&self) -> Vec<PathBuf> {
        self.runtime.included().to_vec()
    }

    pub fn initialized(&self) -> Vec<String> {
        self.runtime.initialized().to_vec()
    }
}

/// Fresh fixture with an empty source, the loader already registered.
pub fn memory_fixture() -> Fixture {
    let loader = Arc::new(Autoloader::new(Layout::new(APP_PATH)));
    let mut runtime = TypeRuntime::new(MemorySource::new());
    loader.register(&mut runtime);
    Fixture { loader, runtime }
}

pub fn unit(decls: Vec<TypeDecl>) -> Unit {
    decls.into_iter().fold(Unit::new(), Unit::with_type)
}

/// Write `decls` as a JSON unit file at `root/relative`, creating directories.
pub fn write_unit(root: &Path, relative: &str, decls: Vec<TypeDecl>) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let text = serde_json::to_string_pretty(&unit(decls)).unwrap();
    std::fs::write(&path, text).unwrap();
    path
}

/// Write a loader config to `root/typeload.json`.
pub fn write_config(root: &Path, config: serde_json::Value) -> PathBuf {
    let path = root.join("typeload.json");
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}
