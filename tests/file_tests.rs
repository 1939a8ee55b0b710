use std::fs;
use std::io::Read;

use beanpath::config::Config;
use beanpath::file::loader::{load_value_file, parse_document};
use beanpath::file::saver::{save_value_file, serialize_value};
use beanpath::file::Format;
use beanpath::value::Value;
use flate2::read::GzDecoder;
use serde_json::json;
use tempfile::TempDir;

fn sample() -> Value {
    Value::from(json!({
        "name": "Alice",
        "tags": ["a", "b"],
        "address": {"city": "Oslo", "zip": 150}
    }))
}

#[test]
fn test_format_from_path() {
    assert_eq!(Format::from_path("a.json"), Some(Format::Json));
    assert_eq!(Format::from_path("a.yml"), Some(Format::Yaml));
    assert_eq!(Format::from_path("dir/a.yaml.gz"), Some(Format::Yaml));
    assert_eq!(Format::from_path("a.JSON.gz"), Some(Format::Json));
    assert_eq!(Format::from_path("a.txt"), None);
    assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
    assert!("xml".parse::<Format>().is_err());
}

#[test]
fn test_json_and_yaml_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();

    for name in ["doc.json", "doc.yaml", "doc.json.gz", "doc.yml.gz"] {
        let path = temp_dir.path().join(name);
        save_value_file(&path, &sample(), &config).unwrap();
        let loaded = load_value_file(&path).unwrap();
        assert_eq!(loaded, sample(), "{}", name);
    }
}

#[test]
fn test_gzipped_file_is_compressed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.json.gz");
    save_value_file(&path, &sample(), &Config::default()).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

    let mut decoder = GzDecoder::new(&bytes[..]);
    let mut content = String::new();
    decoder.read_to_string(&mut content).unwrap();
    assert!(content.contains("\"Alice\""));
}

#[test]
fn test_unknown_extension_uses_output_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.txt");
    let config = Config {
        output_format: Format::Yaml,
        ..Config::default()
    };
    save_value_file(&path, &Value::from(json!({"a": 1})), &config).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n");

    // Sniffed on load.
    assert_eq!(load_value_file(&path).unwrap()["a"], 1);
}

#[test]
fn test_backup_created_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.json");
    fs::write(&path, "{\"old\": true}").unwrap();

    let config = Config {
        create_backup: true,
        ..Config::default()
    };
    save_value_file(&path, &sample(), &config).unwrap();

    let backup = temp_dir.path().join("doc.json.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), "{\"old\": true}");
    assert_eq!(load_value_file(&path).unwrap(), sample());
}

#[test]
fn test_no_backup_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.json");
    fs::write(&path, "{}").unwrap();

    save_value_file(&path, &sample(), &Config::default()).unwrap();
    assert!(!temp_dir.path().join("doc.json.bak").exists());
    assert!(!temp_dir.path().join(".doc.json.tmp").exists());
}

#[test]
fn test_compact_json() {
    let config = Config {
        pretty: false,
        ..Config::default()
    };
    let out = serialize_value(&Value::from(json!({"a": [1, 2]})), Format::Json, &config).unwrap();
    assert_eq!(out, "{\"a\":[1,2]}\n");
}

#[test]
fn test_load_errors() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_value_file(temp_dir.path().join("missing.json")).is_err());

    let path = temp_dir.path().join("bad.json");
    fs::write(&path, "{not json").unwrap();
    let err = load_value_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("bad.json"));

    assert!(parse_document("a: [", None).is_err());
}
