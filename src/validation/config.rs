//! Validator configuration

use serde::{Deserialize, Serialize};

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Stop at the first failing field (default: false)
    #[serde(default)]
    pub fail_fast: bool,

    /// Emit a VALIDATION_FAILED event for each failed struct (default: true)
    #[serde(default = "default_log_failures")]
    pub log_failures: bool,
}

fn default_log_failures() -> bool {
    true
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            log_failures: default_log_failures(),
        }
    }
}

impl ValidatorConfig {
    /// Create a config that stops at the first failing field
    pub fn fail_fast() -> Self {
        Self {
            fail_fast: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert!(!config.fail_fast);
        assert!(config.log_failures);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ValidatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ValidatorConfig::default());

        let config: ValidatorConfig =
            serde_json::from_str(r#"{"fail_fast": true, "log_failures": false}"#).unwrap();
        assert!(config.fail_fast);
        assert!(!config.log_failures);
    }

    #[test]
    fn test_fail_fast_constructor() {
        let config = ValidatorConfig::fail_fast();
        assert!(config.fail_fast);
        assert!(config.log_failures);
    }
}
