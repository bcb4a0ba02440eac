//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading and gate construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config file extension: {0:?}")]
    UnsupportedFormat(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML or JSON file.
///
/// The format is chosen by extension; files without one are read as TOML.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("toml");

    let config = parse_config(&content, extension)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse configuration text in the given format without validating it.
pub fn parse_config(content: &str, format: &str) -> Result<AppConfig, ConfigError> {
    match format {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("grpc-blocker-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let path = write_temp(
            "load.toml",
            r#"
[upstream]
address = "127.0.0.1:9000"

[blocker]
blocked_services = ["blocked.service"]
"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.upstream.address, "127.0.0.1:9000");
        assert_eq!(config.blocker.blocked_services, vec!["blocked.service"]);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_json_plugin_keys() {
        let path = write_temp(
            "load.json",
            r#"{"blocker": {"blockedServices": ["a.Service"], "enableLogging": true}}"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.blocker.blocked_services, vec!["a.Service"]);
        assert!(config.blocker.enable_logging);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_rejects_invalid_entries() {
        let path = write_temp("invalid.toml", "[blocker]\nblocked_services = [\"\"]\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("blocked_services[0] is empty"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/grpc-blocker.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            parse_config("", "yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
