use beanpath::bean::NamingStrategy;
use beanpath::config::{Config, CopyConfig};
use beanpath::file::Format;
use beanpath::value::Value;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.output_format, Format::Json);
    assert!(config.pretty);
    assert_eq!(config.log_level, "warn");
    assert!(!config.create_backup);
    assert_eq!(config.copy, CopyConfig::default());
}

#[test]
fn test_copy_defaults() {
    let copy = CopyConfig::default();

    assert!(!copy.ignore_case);
    assert!(!copy.ignore_error);
    assert!(!copy.ignore_null_value);
    assert!(copy.excluded_fields.is_empty());
    assert_eq!(copy.naming_strategy, NamingStrategy::Default);
    assert!(copy.field_mapping.is_empty());
}

#[test]
fn test_config_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config {
        output_format: Format::Yaml,
        pretty: false,
        log_level: "debug".to_string(),
        create_backup: true,
        ..Config::default()
    };
    config.copy.ignore_case = true;
    config.copy.excluded_fields = vec!["password".to_string()];
    config.copy.naming_strategy = NamingStrategy::LowerUnderline;
    config
        .copy
        .field_mapping
        .insert("login".to_string(), "username".to_string());

    config.save_to(&config_path).unwrap();
    assert!(config_path.exists());

    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
output_format = "yaml"

[copy]
ignore_null_value = true
naming_strategy = "upper_dashed"
"#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert_eq!(config.output_format, Format::Yaml);
    assert!(config.pretty);
    assert!(config.copy.ignore_null_value);
    assert_eq!(config.copy.naming_strategy, NamingStrategy::UpperDashed);
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "output_format = \"xml\"").unwrap();

    let err = Config::load_from(&config_path).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid config"));
    assert!(Config::load_from(temp_dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_load_optional_reports_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    assert_eq!(Config::load_optional(&config_path).unwrap(), Config::default());

    std::fs::write(&config_path, "pretty = \"sometimes\"").unwrap();
    let err = Config::load_optional(&config_path).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid config"));
}

#[test]
fn test_copy_config_drives_copier() {
    let config: Config = toml::from_str(
        r#"
[copy]
ignore_null_value = true
excluded_fields = ["secret"]
naming_strategy = "lower_underline"

[copy.field_mapping]
login = "userName"
"#,
    )
    .unwrap();
    let options = config.copy.to_options();

    let source = Value::from(json!({"login": "ann", "secret": "x", "lastSeen": null}));
    let mut target = Value::map();
    beanpath::bean::util::copy_properties_with(&source, &mut target, &options).unwrap();
    assert_eq!(target, Value::from(json!({"user_name": "ann"})));
}
