//! Data source configuration.
//!
//! Settings can come from a TOML file with a `[database]` table:
//!
//! ```toml
//! [database]
//! url = "postgres://localhost:5432/app"
//! user = "app"
//! password = "secret"
//! max_pool_size = 8
//! ```
//!
//! or from `ENTMAP_DATABASE_*` environment variables.

use crate::error::{OrmError, OrmResult};
use serde::Deserialize;
use std::path::Path;

pub const ENV_URL: &str = "ENTMAP_DATABASE_URL";
pub const ENV_USER: &str = "ENTMAP_DATABASE_USER";
pub const ENV_PASSWORD: &str = "ENTMAP_DATABASE_PASSWORD";
pub const ENV_MAX_POOL_SIZE: &str = "ENTMAP_DATABASE_MAX_POOL_SIZE";

const DEFAULT_MAX_POOL_SIZE: usize = 16;

/// Connection settings for a data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSourceConfig {
    pub url: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,
}

fn default_max_pool_size() -> usize {
    DEFAULT_MAX_POOL_SIZE
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    database: DataSourceConfig,
}

impl DataSourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    /// Parse the `[database]` table of a TOML document.
    pub fn from_toml_str(raw: &str) -> OrmResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| OrmError::configuration(format!("failed to parse config: {e}")))?;
        file.database.validate()?;
        Ok(file.database)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> OrmResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            OrmError::configuration(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Build from `ENTMAP_DATABASE_*` environment variables.
    pub fn from_env() -> OrmResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> OrmResult<Self> {
        let url = lookup(ENV_URL)
            .ok_or_else(|| OrmError::configuration(format!("{ENV_URL} is not set")))?;
        let max_pool_size = match lookup(ENV_MAX_POOL_SIZE) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                OrmError::configuration(format!("{ENV_MAX_POOL_SIZE}={raw:?}: {e}"))
            })?,
            None => DEFAULT_MAX_POOL_SIZE,
        };

        let config = Self {
            url,
            user: lookup(ENV_USER),
            password: lookup(ENV_PASSWORD),
            max_pool_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> OrmResult<()> {
        if self.url.trim().is_empty() {
            return Err(OrmError::configuration("database url must not be empty"));
        }
        if self.max_pool_size == 0 {
            return Err(OrmError::configuration("max_pool_size must be > 0"));
        }
        Ok(())
    }

    /// Parse the URL and apply the user/password overrides.
    pub fn pg_config(&self) -> OrmResult<tokio_postgres::Config> {
        let mut pg: tokio_postgres::Config = self
            .url
            .parse()
            .map_err(|e: tokio_postgres::Error| OrmError::Connection(e.to_string()))?;
        if let Some(user) = &self.user {
            pg.user(user);
        }
        if let Some(password) = &self.password {
            pg.password(password);
        }
        Ok(pg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_database_table() {
        let cfg = DataSourceConfig::from_toml_str(
            r#"
            [database]
            url = "postgres://localhost:5432/app"
            user = "app"
            password = "secret"
            max_pool_size = 4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.user.as_deref(), Some("app"));
        assert_eq!(cfg.max_pool_size, 4);
    }

    #[test]
    fn pool_size_defaults() {
        let cfg = DataSourceConfig::from_toml_str(
            "[database]\nurl = \"postgres://localhost/app\"\n",
        )
        .unwrap();
        assert_eq!(cfg.max_pool_size, DEFAULT_MAX_POOL_SIZE);
        assert_eq!(cfg.password, None);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(DataSourceConfig::from_toml_str("[database]\nurl = \"\"\n").is_err());
        assert!(
            DataSourceConfig::from_toml_str(
                "[database]\nurl = \"postgres://localhost/app\"\nmax_pool_size = 0\n"
            )
            .is_err()
        );
        assert!(DataSourceConfig::from_toml_str("url = 3").is_err());
    }

    #[test]
    fn reads_environment_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_URL, "postgres://db/app"),
            (ENV_USER, "reader"),
            (ENV_MAX_POOL_SIZE, " 3 "),
        ]
        .into_iter()
        .collect();
        let cfg =
            DataSourceConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(
            cfg,
            DataSourceConfig::new("postgres://db/app")
                .user("reader")
                .max_pool_size(3)
        );
    }

    #[test]
    fn environment_requires_url() {
        assert!(DataSourceConfig::from_lookup(|_| None).is_err());
        let bad = DataSourceConfig::from_lookup(|k| match k {
            ENV_URL => Some("postgres://db/app".into()),
            ENV_MAX_POOL_SIZE => Some("many".into()),
            _ => None,
        });
        assert!(bad.is_err());
    }

    #[test]
    fn pg_config_applies_overrides() {
        let pg = DataSourceConfig::new("postgres://someone@localhost:5432/app")
            .user("app")
            .password("pw")
            .pg_config()
            .unwrap();
        assert_eq!(pg.get_user(), Some("app"));
        assert_eq!(pg.get_password(), Some(&b"pw"[..]));
        assert_eq!(pg.get_dbname(), Some("app"));
    }
}
