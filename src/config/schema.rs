//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML or JSON
//! config files. Every section has defaults so a minimal file (or none at
//! all) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the gRPC blocker server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where allowed requests are forwarded.
    pub upstream: UpstreamConfig,

    /// Service denylist.
    pub blocker: BlockerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream the companion server relays allowed requests to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:50051").
    pub address: String,

    /// Speak HTTP/2 with prior knowledge (h2c). gRPC upstreams need this.
    pub http2_only: bool,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:50051".to_string(),
            http2_only: true,
            timeout_secs: 30,
        }
    }
}

/// Denylist configuration for the gate.
///
/// Accepts the snake_case keys used throughout this file as well as the
/// camelCase `blockedServices` / `enableLogging` keys of plugin-style JSON
/// configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BlockerConfig {
    /// Service identifiers to reject, e.g. `"myapp.AdminService"`.
    #[serde(alias = "blockedServices")]
    pub blocked_services: Vec<String>,

    /// Emit per-request diagnostic lines.
    #[serde(alias = "enableLogging")]
    pub enable_logging: bool,
}

impl BlockerConfig {
    /// Convenience constructor, mostly for tests and embedding hosts.
    pub fn new<I, S>(blocked_services: I, enable_logging: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocked_services: blocked_services.into_iter().map(Into::into).collect(),
            enable_logging,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocker_defaults() {
        let config = BlockerConfig::default();
        assert!(config.blocked_services.is_empty());
        assert!(!config.enable_logging);
    }

    #[test]
    fn test_minimal_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.upstream.http2_only);
        assert!(config.blocker.blocked_services.is_empty());
    }

    #[test]
    fn test_blocker_section_toml() {
        let config: AppConfig = toml::from_str(
            r#"
[blocker]
blocked_services = ["myapp.AdminService", "grpc.reflection.v1.ServerReflection"]
enable_logging = true
"#,
        )
        .unwrap();
        assert_eq!(config.blocker.blocked_services.len(), 2);
        assert!(config.blocker.enable_logging);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: BlockerConfig =
            serde_json::from_str(r#"{"blockedServices": ["blocked.service"], "enableLogging": true}"#)
                .unwrap();
        assert_eq!(config, BlockerConfig::new(["blocked.service"], true));
    }
}
