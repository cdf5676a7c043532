pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment flavour of the running process
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Reads `APP_ENV`; anything other than "production" is development.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Name and version reported by the root and health endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Environment variable value, or `default` when unset
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Environment variable value, or an error naming the missing key
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parses an environment variable, falling back to `default` when unset.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Boolean flag: "1", "true", "yes" and "on" (any case) are true.
pub fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("INVENTORY_TEST_VAR", Some("set"), || {
            assert_eq!(env_or_default("INVENTORY_TEST_VAR", "fallback"), "set");
        });
        temp_env::with_var_unset("INVENTORY_TEST_VAR", || {
            assert_eq!(env_or_default("INVENTORY_TEST_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("INVENTORY_REQUIRED", || {
            let err = env_required("INVENTORY_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("INVENTORY_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_uses_default_when_unset() {
        temp_env::with_var_unset("INVENTORY_POOL", || {
            assert_eq!(env_parse("INVENTORY_POOL", 10u32).unwrap(), 10);
        });
    }

    #[test]
    fn test_env_parse_reports_key_on_garbage() {
        temp_env::with_var("INVENTORY_POOL", Some("ten"), || {
            let err = env_parse::<u32>("INVENTORY_POOL", 10).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::ParseError { ref key, .. } if key == "INVENTORY_POOL"
            ));
        });
    }

    #[test]
    fn test_env_flag() {
        temp_env::with_var("INVENTORY_FLAG", Some("TRUE"), || {
            assert!(env_flag("INVENTORY_FLAG", false));
        });
        temp_env::with_var("INVENTORY_FLAG", Some("0"), || {
            assert!(!env_flag("INVENTORY_FLAG", true));
        });
        temp_env::with_var_unset("INVENTORY_FLAG", || {
            assert!(env_flag("INVENTORY_FLAG", true));
        });
    }

    #[test]
    fn test_app_info_macro_reads_package_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
