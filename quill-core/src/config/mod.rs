mod loader;
pub mod secrets;
pub mod value;

use std::collections::HashMap;
use std::path::Path;

pub use secrets::{DefaultSecretResolver, SecretResolver};
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable selecting the active profile.
pub const PROFILE_ENV: &str = "QUILL_PROFILE";

/// Only environment variables with this prefix are overlaid onto the config.
const ENV_PREFIX: &str = "QUILL_";

/// A single constraint violation found while validating a typed section.
#[derive(Debug, Clone)]
pub struct ConfigValidationDetail {
    pub key: String,
    pub message: String,
}

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// Constraint violations in a typed section.
    Validation(Vec<ConfigValidationDetail>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Validation(details) => {
                write!(f, "Config validation errors:")?;
                for detail in details {
                    write!(f, "\n  - {}: {}", detail.key, detail.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A strongly typed configuration section read from a [`QuillConfig`].
pub trait ConfigProperties: Sized {
    fn from_config(config: &QuillConfig) -> Result<Self, ConfigError>;
}

/// Layered key/value configuration.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml`
/// 2. `application-{profile}.yaml`
/// 3. `.env` then `.env.{profile}` (loaded into the process environment,
///    never overwriting variables that are already set)
/// 4. `${...}` placeholders in string values are resolved
/// 5. `QUILL_*` environment variables (`QUILL_MAIL_FROM` -> `quill.mail.from`)
///
/// The profile is `QUILL_PROFILE` if set, else the argument given to `load`.
#[derive(Debug, Clone)]
pub struct QuillConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl QuillConfig {
    /// Load configuration from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile, &DefaultSecretResolver)
    }

    /// Load configuration from `dir` with a custom secret resolver.
    pub fn load_from_dir(
        dir: &Path,
        profile: &str,
        resolver: &dyn SecretResolver,
    ) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());
        let mut values = HashMap::new();

        loader::load_yaml_file(&dir.join("application.yaml"), &mut values)?;
        loader::load_yaml_file(&dir.join(format!("application-{profile}.yaml")), &mut values)?;

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{profile}")));

        resolve_string_values(&mut values, resolver)?;

        let overrides: Vec<(String, String)> = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX) && key != PROFILE_ENV)
            .collect();
        for (env_key, env_val) in overrides {
            let known = values
                .keys()
                .map(String::as_str)
                .chain(crate::settings::SETTING_KEYS.iter().copied());
            let key = loader::env_key_for(&env_key, known);
            values.insert(key, ConfigValue::String(env_val));
        }

        Ok(QuillConfig { values, profile })
    }

    /// Build a config from a YAML document, without touching the environment.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(QuillConfig {
            values,
            profile: profile.to_string(),
        })
    }

    pub fn empty() -> Self {
        QuillConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Typed lookup of a dot-separated key.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotFound` if the key is absent, `ConfigError::TypeMismatch`
    /// if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Like [`get`](Self::get), but a missing key yields `default`. A present
    /// key with the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}

fn resolve_string_values(
    values: &mut HashMap<String, ConfigValue>,
    resolver: &dyn SecretResolver,
) -> Result<(), ConfigError> {
    for value in values.values_mut() {
        resolve_value(value, resolver)?;
    }
    Ok(())
}

fn resolve_value(
    value: &mut ConfigValue,
    resolver: &dyn SecretResolver,
) -> Result<(), ConfigError> {
    match value {
        ConfigValue::String(s) if s.contains("${") => {
            *s = secrets::resolve_placeholders(s, resolver)?;
        }
        ConfigValue::List(items) => {
            for item in items {
                resolve_value(item, resolver)?;
            }
        }
        _ => {}
    }
    Ok(())
}
