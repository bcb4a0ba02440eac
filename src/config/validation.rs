//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics. Every problem is
//! collected so one run reports them all.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{AppConfig, BlockerConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("blocked_services[{index}] is empty")]
    EmptyService { index: usize },

    #[error("blocked_services[{index}] ({name:?}) contains '/' and can never match a service")]
    ServiceContainsSeparator { index: usize, name: String },

    #[error("{field} ({value:?}) is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate the denylist section.
pub fn validate_blocker(config: &BlockerConfig) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = config
        .blocked_services
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            if name.is_empty() {
                Some(ValidationError::EmptyService { index })
            } else if name.contains('/') {
                Some(ValidationError::ServiceContainsSeparator {
                    index,
                    name: name.clone(),
                })
            } else {
                None
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_blocker(&config.blocker).err().unwrap_or_default();

    let addresses = [
        ("listener.bind_address", &config.listener.bind_address),
        ("upstream.address", &config.upstream.address),
    ];
    for (field, value) in addresses {
        if value.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            });
        }
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let config = BlockerConfig::new(["a.Service", "a.Service"], false);
        assert!(validate_blocker(&config).is_ok());
    }

    #[test]
    fn test_reports_every_bad_entry() {
        let config = BlockerConfig::new(["ok.Service", "", "pkg.Service/Method"], false);
        let errors = validate_blocker(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyService { index: 1 },
                ValidationError::ServiceContainsSeparator {
                    index: 2,
                    name: "pkg.Service/Method".into(),
                },
            ]
        );
    }

    #[test]
    fn test_invalid_addresses() {
        let mut config = AppConfig::default();
        config.upstream.address = "not-an-address".into();
        config.blocker.blocked_services.push(String::new());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[1].to_string().contains("upstream.address"));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = AppConfig::default();
        config.upstream.timeout_secs = 0;
        assert_eq!(validate_config(&config), Err(vec![ValidationError::ZeroTimeout]));
    }
}
