//! Integration tests for dotconf-store.
//!
//! These drive the store against real namespace files on disk, the way an
//! application would use it.

use dotconf_common::test_utils::{init_test_logging, ConfigDirFixture, APP_JSON, DATABASE_YAML, MAIL_TOML};
use dotconf_store::{
    ErrorKind, FileLoader, Loader, NamespaceStore, Result, SharedStore, SourceFormat, Value,
};
use serde_json::json;
use std::cell::Cell;
use std::fs;

/// Wraps a loader and counts how often it is asked for a namespace.
struct CountingLoader<L> {
    inner: L,
    calls: Cell<usize>,
}

impl<L: Loader> Loader for CountingLoader<L> {
    fn load(&self, namespace: &str) -> Result<Value> {
        self.calls.set(self.calls.get() + 1);
        self.inner.load(namespace)
    }
}

fn app_fixture() -> ConfigDirFixture {
    init_test_logging();
    ConfigDirFixture::new().with_namespace("app", "json", APP_JSON)
}

#[test]
fn test_open_missing_directory_fails_before_loading() {
    let fixture = ConfigDirFixture::new();
    let err = NamespaceStore::open(fixture.missing_path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.is_configuration_error());
}

#[test]
fn test_open_file_instead_of_directory_fails() {
    let fixture = app_fixture();
    let err = NamespaceStore::open(fixture.path().join("app.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_open_is_lazy() {
    let fixture = app_fixture();
    let store = NamespaceStore::open(fixture.path()).unwrap();
    assert!(store.get_all().is_empty());
}

#[test]
fn test_usage_walkthrough() {
    let fixture = app_fixture();
    let mut config = NamespaceStore::open(fixture.path()).unwrap();

    assert_eq!(config.get("app.url", Value::Null).unwrap(), json!("https://example.com"));

    assert!(config.delete("app.twig.auto").unwrap());
    assert_eq!(config.get("app.twig.cache", Value::Null).unwrap(), json!("/tmp/twig"));
    assert!(config.exists("app.twig").unwrap());
    assert!(!config.exists("app.twig.auto").unwrap());

    let whole = config.get("app", Value::Null).unwrap();
    assert_eq!(whole["name"], json!("MyApp"));
    assert!(whole["twig"].get("auto").is_none());

    assert!(config.set("app.url", json!("https://google.com")).unwrap());
    assert!(config.set("app.twig.cache", json!(false)).unwrap());
    assert_eq!(config.get("app.twig.cache", json!("fb")).unwrap(), json!(false));

    assert!(config.set("app", json!({ "name": "NewApp" })).unwrap());
    assert_eq!(config.get("app.name", Value::Null).unwrap(), json!("NewApp"));
    assert_eq!(config.get("app.url", json!("fallback")).unwrap(), json!("fallback"));
}

#[test]
fn test_mutations_are_never_written_back() {
    let fixture = app_fixture();
    let mut config = NamespaceStore::open(fixture.path()).unwrap();

    config.set("app.name", json!("Changed")).unwrap();
    config.delete("app.twig").unwrap();

    assert_eq!(fs::read_to_string(fixture.path().join("app.json")).unwrap(), APP_JSON);
}

#[test]
fn test_namespace_is_not_reloaded_after_source_changes() {
    let fixture = app_fixture();
    let mut config = NamespaceStore::open(fixture.path()).unwrap();
    assert_eq!(config.get("app.name", Value::Null).unwrap(), json!("MyApp"));

    fixture.write_namespace("app", "json", r#"{ "name": "Rewritten" }"#);
    assert_eq!(config.get("app.name", Value::Null).unwrap(), json!("MyApp"));
}

#[test]
fn test_load_count_is_one_per_namespace() {
    let fixture = app_fixture().with_namespace("cache", "json", r#"{ "ttl": 60 }"#);
    let loader = CountingLoader {
        inner: FileLoader::new(fixture.path(), SourceFormat::Json).unwrap(),
        calls: Cell::new(0),
    };
    let mut config = NamespaceStore::new(loader);

    for _ in 0..5 {
        config.get("app.name", Value::Null).unwrap();
        config.exists("app.twig").unwrap();
    }
    assert_eq!(config.loader().calls.get(), 1);

    config.get("cache.ttl", Value::Null).unwrap();
    config.delete("cache").unwrap();
    assert_eq!(config.loader().calls.get(), 2);
}

#[test]
fn test_missing_namespace_file_is_not_found() {
    let fixture = app_fixture();
    let mut config = NamespaceStore::open(fixture.path()).unwrap();

    for result in [
        config.get("session.lifetime", Value::Null).map(|_| ()),
        config.set("session.lifetime", json!(30)).map(|_| ()),
        config.exists("session").map(|_| ()),
        config.delete("session.lifetime").map(|_| ()),
    ] {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }
    assert!(config.get_all().is_empty());
}

#[test]
fn test_non_mapping_document_is_invalid_format() {
    let fixture = app_fixture()
        .with_namespace("list", "json", "[1, 2, 3]")
        .with_namespace("scalar", "json", "42");
    let mut config = NamespaceStore::open(fixture.path()).unwrap();

    assert_eq!(config.get("list", Value::Null).unwrap_err().kind(), ErrorKind::InvalidFormat);
    assert_eq!(config.exists("scalar.x").unwrap_err().kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_unparseable_document_is_invalid_format() {
    let fixture = app_fixture().with_namespace("broken", "json", "{ not json");
    let mut config = NamespaceStore::open(fixture.path()).unwrap();

    let err = config.get("broken.key", Value::Null).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_non_utf8_document_is_invalid_format() {
    let fixture = app_fixture();
    fs::write(fixture.path().join("binary.json"), [0xff, 0xfe, 0x7b, 0x7d]).unwrap();
    let mut config = NamespaceStore::open(fixture.path()).unwrap();

    let err = config.get("binary.key", Value::Null).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert!(err.is_configuration_error());
    assert!(!config.is_loaded("binary"));
}

#[test]
fn test_yaml_and_toml_namespaces() {
    let fixture = ConfigDirFixture::new()
        .with_namespace("database", "yaml", DATABASE_YAML)
        .with_namespace("mail", "toml", MAIL_TOML);

    let mut yaml = NamespaceStore::open_with_format(fixture.path(), SourceFormat::Yaml).unwrap();
    assert_eq!(yaml.get("database.connection.pool", Value::Null).unwrap(), json!(4));

    let mut toml = NamespaceStore::open_with_format(fixture.path(), SourceFormat::Toml).unwrap();
    assert_eq!(toml.get("mail.smtp.host", Value::Null).unwrap(), json!("smtp.example.com"));
    assert!(toml.exists("mail.from").unwrap());
}

#[test]
fn test_empty_yaml_document_is_invalid_format() {
    let fixture = ConfigDirFixture::new().with_namespace("empty", "yaml", "");
    let mut config = NamespaceStore::open_with_format(fixture.path(), SourceFormat::Yaml).unwrap();
    assert_eq!(config.get("empty", Value::Null).unwrap_err().kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_get_all_reports_only_loaded_namespaces() {
    let fixture = app_fixture().with_namespace("cache", "json", r#"{ "ttl": 60 }"#);
    let mut config = NamespaceStore::open(fixture.path()).unwrap();

    config.get("cache.ttl", Value::Null).unwrap();
    let all = config.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all["cache"]["ttl"], json!(60));
}

#[test]
fn test_shared_store_over_files() {
    let fixture = app_fixture();
    let config = SharedStore::new(NamespaceStore::open(fixture.path()).unwrap());

    let worker = {
        let config = config.clone();
        std::thread::spawn(move || config.set("app.twig.cache", json!(false)))
    };
    assert!(worker.join().unwrap().unwrap());
    assert_eq!(config.get("app.twig.cache", Value::Null).unwrap(), json!(false));
}
