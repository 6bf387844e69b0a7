//! Resolution against unit files on disk, configured from a loader config file.

mod common;

use std::sync::Arc;

use common::{write_config, write_unit};
use serde_json::json;
use tempfile::TempDir;
use typeload::{FsSource, LoadError, LoaderConfig, TypeDecl, TypeRuntime};

fn setup(config: serde_json::Value) -> (TempDir, Arc<typeload::Autoloader>, TypeRuntime<FsSource>) {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), config);
    let loader = Arc::new(LoaderConfig::from_path(&config_path).unwrap().build());
    let mut runtime = TypeRuntime::new(FsSource);
    loader.register(&mut runtime);
    (dir, loader, runtime)
}

#[test]
fn test_nested_chain_on_disk() {
    let (dir, loader, mut runtime) = setup(json!({
        "app_path": "app",
        "namespaces": [{ "prefix": "Auth", "path": "packages/auth" }],
        "core_namespaces": ["Fw\\Core"],
        "classes": { "Fw\\Core\\Model": "core/model.json" }
    }));
    let root = dir.path();
    write_unit(
        root,
        "app/classes/model/user.json",
        vec![TypeDecl::new("Model_User")
            .extends("Model")
            .implements("Auth\\Identity")
            .with_init()],
    );
    write_unit(
        root,
        "core/model.json",
        vec![TypeDecl::new("Fw\\Core\\Model").with_init()],
    );
    write_unit(
        root,
        "packages/auth/Identity.json",
        vec![TypeDecl::new("Auth\\Identity")],
    );

    let user = runtime.instantiate("Model_User").unwrap();

    assert!(runtime.is_instance_of(&user, "Model"));
    assert!(runtime.is_instance_of(&user, "Fw\\Core\\Model"));
    assert!(runtime.is_instance_of(&user, "Auth\\Identity"));
    assert_eq!(runtime.initialized(), &["Model_User".to_string()]);
    assert_eq!(
        runtime.included(),
        &[
            root.join("app/classes/model/user.json"),
            root.join("core/model.json"),
            root.join("packages/auth/Identity.json"),
        ]
    );
    assert_eq!(loader.owner(), None);
}

#[test]
fn test_psr_missing_file_message() {
    let (dir, loader, mut runtime) = setup(json!({
        "namespaces": [{ "prefix": "Acme", "path": "vendor", "psr": true }]
    }));

    let err = loader.load(&mut runtime, "Acme\\Mail\\Transport").unwrap_err();
    let expected = dir.path().join("vendor/Acme/Mail/Transport.json");

    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::MissingFile { path }) if path == &expected
    ));
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn test_malformed_unit_is_reported() {
    let (dir, loader, mut runtime) = setup(json!({
        "namespaces": [{ "prefix": "App", "path": "src" }]
    }));
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/Broken.json"), "{ not json").unwrap();

    let err = loader.load(&mut runtime, "App\\Broken").unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Broken.json"), "unexpected error: {message}");
    assert!(runtime.included().is_empty());
}

#[test]
fn test_custom_extension_and_classes_dir() {
    let (dir, loader, mut runtime) = setup(json!({
        "app_path": ".",
        "classes_dir": "lib",
        "extension": ".type"
    }));
    write_unit(
        dir.path(),
        "lib/view/layout.type",
        vec![TypeDecl::new("View_Layout").with_init()],
    );

    assert!(loader.load(&mut runtime, "View_Layout").unwrap());
    assert_eq!(loader.layout().extension, "type");
    assert_eq!(runtime.initialized(), &["View_Layout".to_string()]);
}
