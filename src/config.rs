use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_PATH: &str = "todos.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub base_path: String,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingSecret,
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingSecret => write!(f, "TODO_JWT_SECRET must be set and non-empty"),
            ConfigError::InvalidPort(value) => write!(f, "TODO_PORT is not a valid port: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("TODO_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = lookup("TODO_JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        Ok(Config {
            port,
            db_path: lookup("TODO_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            jwt_secret,
            base_path: lookup("TODO_BASE_PATH")
                .map(|path| normalize_base_path(&path))
                .unwrap_or_default(),
            static_dir: lookup("TODO_STATIC_DIR").map(PathBuf::from),
        })
    }
}

/// `api/` becomes `/api`; an empty or `/` prefix means no nesting.
pub fn normalize_base_path(path: &str) -> String {
    let path = path.trim().trim_end_matches('/');
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = config_from(&[("TODO_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.base_path, "");
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(config_from(&[]).unwrap_err(), ConfigError::MissingSecret);
        assert_eq!(
            config_from(&[("TODO_JWT_SECRET", "")]).unwrap_err(),
            ConfigError::MissingSecret
        );
    }

    #[test]
    fn bad_port_is_reported() {
        let err = config_from(&[("TODO_JWT_SECRET", "s"), ("TODO_PORT", "http")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path("todo/"), "/todo");
        assert_eq!(normalize_base_path("/todo"), "/todo");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
    }
}
