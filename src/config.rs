use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfkeepError, SchemaError};

/// Server settings. Defaults are overridden by `HOST`, `PORT`, `LOG_LEVEL`
/// and `DATABASE_URL` from the environment (or `.env`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            database_url: "sqlite://config.db".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfkeepError> {
        Self::figment().extract().map_err(ConfkeepError::from)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(&[
            "host",
            "port",
            "log_level",
            "database_url",
        ]))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the `schema-check` utility, read from `SCHEMA_CHECK_*`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaCheckConfig {
    pub base_url: Url,
    pub endpoint: String,
    pub method: String,
}

impl Default for SchemaCheckConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8000").expect("static url is valid"),
            endpoint: "/configs".to_string(),
            method: "post".to_string(),
        }
    }
}

impl SchemaCheckConfig {
    pub fn load() -> Result<Self, SchemaError> {
        Figment::from(Serialized::defaults(SchemaCheckConfig::default()))
            .merge(Env::prefixed("SCHEMA_CHECK_"))
            .extract()
            .map_err(|e| SchemaError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_environment() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.bind_addr(), "localhost:8000");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "9090");
            jail.set_env("DATABASE_URL", "sqlite::memory:");
            jail.set_env("LOG_LEVEL", "debug");
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.port, 9090);
            assert_eq!(cfg.database_url, "sqlite::memory:");
            assert_eq!(cfg.log_level, "debug");
            assert_eq!(cfg.host, "localhost");
            Ok(())
        });
    }

    #[test]
    fn schema_check_reads_prefixed_environment() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("SCHEMA_CHECK_ENDPOINT", "/users");
            let cfg = SchemaCheckConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(cfg.endpoint, "/users");
            assert_eq!(cfg.method, "post");
            Ok(())
        });
    }
}
