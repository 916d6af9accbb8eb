use crate::db::PoolConfig;

use quarry_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Port used when a connection URL is assembled from parts and none is
/// given.
const DEFAULT_PORT: u16 = 1433;

/// Settings for one datastore, as handed to
/// [`Adapter::register_datastore`](crate::Adapter::register_datastore).
///
/// Either `url` is set, or the URL is assembled from `driver`, `host`,
/// `port`, `database`, `user` and `password`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatastoreConfig {
    pub identity: String,
    pub url: Option<String>,

    /// URL scheme used when assembling from parts
    pub driver: String,

    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,

    pub pool: PoolSettings,
}

/// Connection pool section of a [`DatastoreConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    pub max_size: Option<usize>,
    pub wait_timeout_ms: Option<u64>,
    pub create_timeout_ms: Option<u64>,
    pub recycle_timeout_ms: Option<u64>,
}

impl DatastoreConfig {
    pub fn new(identity: impl Into<String>) -> DatastoreConfig {
        DatastoreConfig {
            identity: identity.into(),
            ..DatastoreConfig::default()
        }
    }

    /// A datastore reached through a full connection URL.
    pub fn with_url(identity: impl Into<String>, url: impl Into<String>) -> DatastoreConfig {
        DatastoreConfig {
            url: Some(url.into()),
            ..DatastoreConfig::new(identity)
        }
    }

    /// Returns the connection URL, assembling it from parts when no `url` was
    /// given.
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let Some(host) = &self.host else {
            return Err(self.missing("host"));
        };

        let Some(database) = &self.database else {
            return Err(self.missing("database"));
        };

        let port = self.port.unwrap_or(DEFAULT_PORT);

        let mut url = Url::parse(&format!("{}://{host}:{port}/{database}", self.driver))
            .map_err(|err| {
                Error::bad_configuration(format!(
                    "Datastore `{}` has an invalid connection URL: {err}",
                    self.identity
                ))
            })?;

        if let Some(user) = &self.user {
            url.set_username(user).map_err(|_| self.missing("user"))?;
        }

        if self.password.is_some() {
            url.set_password(self.password.as_deref())
                .map_err(|_| self.missing("password"))?;
        }

        Ok(url.into())
    }

    pub fn pool_config(&self) -> PoolConfig {
        let mut config = PoolConfig::default();

        if let Some(max_size) = self.pool.max_size {
            config.max_size = max_size;
        }

        config.timeouts.wait = self.pool.wait_timeout_ms.map(Duration::from_millis);
        config.timeouts.create = self.pool.create_timeout_ms.map(Duration::from_millis);
        config.timeouts.recycle = self.pool.recycle_timeout_ms.map(Duration::from_millis);
        config
    }

    fn missing(&self, field: &str) -> Error {
        Error::bad_configuration(format!(
            "Datastore `{}` configuration is missing or has an invalid `{field}`.",
            self.identity
        ))
    }
}

impl Default for DatastoreConfig {
    fn default() -> DatastoreConfig {
        DatastoreConfig {
            identity: String::new(),
            url: None,
            driver: "sqlite".to_string(),
            host: None,
            port: None,
            database: None,
            user: None,
            password: None,
            pool: PoolSettings::default(),
        }
    }
}
