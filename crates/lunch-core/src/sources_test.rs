use std::path::Path;

use super::*;

fn source(id: SourceId, name: &str, url: &str) -> SourceConfig {
    SourceConfig {
        id,
        name: name.to_string(),
        url: url.to_string(),
        enabled: true,
        timeout_secs: None,
    }
}

#[test]
fn validate_rejects_empty_name() {
    let sources_file = SourcesFile {
        sources: vec![source(SourceId::Edison, "  ", "https://example.com/")],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_duplicate_id() {
    let sources_file = SourcesFile {
        sources: vec![
            source(SourceId::Kantin, "Kantin", "https://a.example/"),
            source(SourceId::Kantin, "Kantin again", "https://b.example/"),
        ],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("duplicate source id: 'kantin'"));
}

#[test]
fn validate_rejects_relative_url() {
    let sources_file = SourcesFile {
        sources: vec![source(SourceId::Bricks, "Bricks", "/lunch/")],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("invalid url"));
}

#[test]
fn validate_rejects_url_without_host() {
    let sources_file = SourcesFile {
        sources: vec![source(SourceId::Bricks, "Bricks", "https:///lunch")],
    };
    assert!(validate_sources(&sources_file).is_err());
}

#[test]
fn validate_rejects_zero_timeout() {
    let mut eatery = source(SourceId::Eatery, "Eatery", "https://eatery.example/");
    eatery.timeout_secs = Some(0);
    let sources_file = SourcesFile {
        sources: vec![eatery],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("timeout_secs 0"));
}

#[test]
fn validate_accepts_defaults() {
    let defaults = default_sources();
    assert_eq!(defaults.sources.len(), SourceId::ALL.len());
    assert!(validate_sources(&defaults).is_ok());
}

#[test]
fn enabled_defaults_to_true_when_omitted() {
    let yaml = "sources:\n  - id: edison\n    name: Edison\n    url: https://restaurangedison.se/lunch/\n  - id: kantin\n    name: Kantin\n    url: https://www.kantinlund.se/\n    enabled: false\n";
    let parsed: SourcesFile = serde_yaml::from_str(yaml).unwrap();
    let enabled: Vec<SourceId> = parsed.enabled().map(|s| s.id).collect();
    assert_eq!(enabled, vec![SourceId::Edison]);
}

#[test]
fn unknown_source_id_fails_to_parse() {
    let yaml = "sources:\n  - id: mcdonalds\n    name: Nope\n    url: https://example.com/\n";
    let result: Result<SourcesFile, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn load_sources_missing_file_is_io_error() {
    let result = load_sources(Path::new("/definitely/not/here/sources.yaml"));
    assert!(matches!(result, Err(ConfigError::SourcesFileIo { .. })));
}

#[test]
fn load_sources_or_default_falls_back_when_missing() {
    let result = load_sources_or_default(Path::new("/definitely/not/here/sources.yaml"));
    let sources_file = result.unwrap();
    assert_eq!(sources_file.sources, default_sources().sources);
}

#[test]
fn load_sources_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("sources.yaml");
    assert!(
        path.exists(),
        "sources.yaml missing at {path:?}; required for this test"
    );
    let result = load_sources(&path);
    assert!(result.is_ok(), "failed to load sources.yaml: {result:?}");
    let sources_file = result.unwrap();
    assert_eq!(sources_file.sources.len(), SourceId::ALL.len());
}
