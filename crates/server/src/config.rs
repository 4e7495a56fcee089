use std::{env, net::SocketAddr};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub oidc_issuer_url: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine, the variables may come from the process
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                name: "RUN_MIGRATIONS",
                value,
            })?,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            run_migrations,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/school"),
            ("OIDC_ISSUER_URL", "https://id.example.org"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert!(!config.run_migrations);
        assert_eq!(config.database_url, "postgres://localhost/school");
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[("OIDC_ISSUER_URL", "https://id.example.org")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_values() {
        let base = [
            ("DATABASE_URL", "postgres://localhost/school"),
            ("OIDC_ISSUER_URL", "https://id.example.org"),
        ];

        let mut vars = base.to_vec();
        vars.push(("BIND_ADDR", "localhost"));
        assert!(matches!(
            load(&vars),
            Err(ConfigError::Invalid { name: "BIND_ADDR", .. })
        ));

        let mut vars = base.to_vec();
        vars.push(("RUN_MIGRATIONS", "sometimes"));
        assert!(matches!(
            load(&vars),
            Err(ConfigError::Invalid { name: "RUN_MIGRATIONS", .. })
        ));

        let mut vars = base.to_vec();
        vars.push(("RUN_MIGRATIONS", "TRUE"));
        assert!(load(&vars).unwrap().run_migrations);
    }
}
