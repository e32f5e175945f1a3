//! Tests for configuration loading and validation

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use super::*;

const PROVIDER: &str = r#"
[log]
level = "debug"
format = "json"

[global]
outdir = "maps"
ipv6 = false

[[maps]]
name = "ip_to_provider"
merge = "push"
header = "IP to provider mapping"

[[maps.sources]]
name = "aws"
path = "data/aws.map"
output = "ip_to_aws"

[[maps.sources]]
name = "droplist"
type = "list"
path = "data/drop.txt"
label = "DROP"

[[maps]]
name = "ip_to_asn"
reduce = false
enabled = false
"#;

fn parse_err(toml: &str) -> ConfigError {
    Config::from_str(toml).unwrap_err()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_full_config() {
    let config = Config::from_str(PROVIDER).unwrap();

    assert_eq!(config.log.level, LogLevel::Debug);
    assert_eq!(config.log.format, LogFormat::Json);
    assert_eq!(config.global.outdir, PathBuf::from("maps"));
    assert!(config.global.ipv4_only());

    assert_eq!(config.maps.len(), 2);
    let enabled: Vec<_> = config.enabled_maps().map(|m| m.name.as_str()).collect();
    assert_eq!(enabled, vec!["ip_to_provider"]);

    let provider = &config.maps[0];
    assert_eq!(provider.merge, MergeStrategy::Push);
    assert!(provider.reduce);
    assert_eq!(provider.header.as_deref(), Some("IP to provider mapping"));
    assert_eq!(provider.sources.len(), 2);
    assert_eq!(provider.sources[0].output.as_deref(), Some("ip_to_aws"));
    assert_eq!(provider.sources[1].source_type, SourceType::List);
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.log.level, LogLevel::Info);
    assert_eq!(config.global, GlobalConfig::default());
    assert!(config.maps.is_empty());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PROVIDER.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.maps[0].name, "ip_to_provider");
}

#[test]
fn test_from_missing_file() {
    let err = Config::from_file("/nonexistent/ipmap.toml").unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
}

#[test]
fn test_invalid_toml() {
    assert!(matches!(parse_err("[[maps]\nname ="), ConfigError::ParseError(_)));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_empty_config_has_no_maps() {
    assert!(matches!(parse_err(""), ConfigError::NoMapsEnabled));
}

#[test]
fn test_all_maps_disabled() {
    let toml = r#"
[[maps]]
name = "ip_to_asn"
enabled = false
"#;
    assert!(matches!(parse_err(toml), ConfigError::NoMapsEnabled));
}

#[test]
fn test_duplicate_map() {
    let toml = r#"
[[maps]]
name = "ip_to_asn"
[[maps.sources]]
name = "a"
path = "a.map"

[[maps]]
name = "ip_to_asn"
[[maps.sources]]
name = "b"
path = "b.map"
"#;
    assert!(matches!(parse_err(toml), ConfigError::DuplicateMap(name) if name == "ip_to_asn"));
}

#[test]
fn test_map_without_name() {
    let toml = r#"
[[maps]]
[[maps.sources]]
name = "a"
path = "a.map"
"#;
    assert!(matches!(
        parse_err(toml),
        ConfigError::MissingField { component: "map", field: "name", .. }
    ));
}

#[test]
fn test_map_without_sources() {
    let toml = r#"
[[maps]]
name = "ip_to_asn"
"#;
    assert!(matches!(
        parse_err(toml),
        ConfigError::InvalidValue { field: "sources", .. }
    ));
}

#[test]
fn test_duplicate_source() {
    let toml = r#"
[[maps]]
name = "ip_to_provider"
[[maps.sources]]
name = "aws"
path = "a.map"
[[maps.sources]]
name = "aws"
path = "b.map"
"#;
    assert!(matches!(parse_err(toml), ConfigError::DuplicateSource { .. }));
}

#[test]
fn test_source_without_path() {
    let toml = r#"
[[maps]]
name = "ip_to_provider"
[[maps.sources]]
name = "aws"
"#;
    assert!(matches!(
        parse_err(toml),
        ConfigError::MissingField { field: "path", .. }
    ));
}

#[test]
fn test_list_requires_label() {
    let toml = r#"
[[maps]]
name = "ip_to_droplist"
[[maps.sources]]
name = "drop"
type = "list"
path = "drop.txt"
"#;
    assert!(matches!(
        parse_err(toml),
        ConfigError::MissingField { field: "label", .. }
    ));
}

#[test]
fn test_label_on_map_source_rejected() {
    let toml = r#"
[[maps]]
name = "ip_to_provider"
[[maps.sources]]
name = "aws"
path = "aws.map"
label = "AWS"
"#;
    assert!(matches!(
        parse_err(toml),
        ConfigError::InvalidValue { field: "label", .. }
    ));
}

#[test]
fn test_output_requires_push() {
    let toml = r#"
[[maps]]
name = "ip_to_provider"
[[maps.sources]]
name = "aws"
path = "aws.map"
output = "ip_to_aws"
"#;
    assert!(matches!(
        parse_err(toml),
        ConfigError::InvalidValue { field: "output", .. }
    ));
}

#[test]
fn test_output_collides_with_map() {
    let toml = r#"
[[maps]]
name = "ip_to_aws"
[[maps.sources]]
name = "aws"
path = "aws.map"

[[maps]]
name = "ip_to_provider"
merge = "push"
[[maps.sources]]
name = "aws"
path = "aws.map"
output = "ip_to_aws"
"#;
    assert!(matches!(parse_err(toml), ConfigError::OutputCollision { .. }));
}

#[test]
fn test_disabled_map_is_not_validated() {
    let toml = r#"
[[maps]]
name = "broken"
enabled = false

[[maps]]
name = "ip_to_aws"
[[maps.sources]]
name = "aws"
path = "aws.map"
"#;
    let config = Config::from_str(toml).unwrap();
    assert_eq!(config.enabled_maps().count(), 1);
}
