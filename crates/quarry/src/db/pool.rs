//! Per-datastore connection pools.

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use deadpool::managed::{self, PoolError, Timeouts};
use quarry_core::{
    driver::{Capability, Compiler, Connection, Driver},
    Error, Result,
};

const RELEASE_FAILED: &str = "There was an error releasing the connection back into the pool.";

/// Sizing and timeouts of a datastore's pool.
///
/// `max_size` defaults to deadpool's own default, twice the number of
/// logical cores. Timeouts are unset unless configured.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: usize,
    pub timeouts: Timeouts,
}

impl Default for PoolConfig {
    fn default() -> PoolConfig {
        PoolConfig {
            max_size: managed::PoolConfig::default().max_size,
            timeouts: Timeouts::default(),
        }
    }
}

/// A connection pool for one datastore, together with the driver facts the
/// executor needs.
#[derive(Debug)]
pub struct Pool {
    inner: managed::Pool<Manager>,
    capability: &'static Capability,
    compiler: Arc<dyn Compiler>,
    url: String,
}

impl Pool {
    /// Creates a pool over `driver` and checks that a connection can be
    /// opened.
    pub async fn new(driver: Box<dyn Driver>, config: PoolConfig) -> Result<Self> {
        let capability = driver.capability();
        let compiler = driver.compiler();
        let url = driver.url().into_owned();

        // Drivers such as in-memory SQLite cannot share their database
        // between connections.
        let max_size = match driver.max_connections() {
            Some(max_connections) => config.max_size.min(max_connections),
            None => config.max_size,
        };

        let inner = managed::Pool::builder(Manager { driver })
            .runtime(deadpool::Runtime::Tokio1)
            .max_size(max_size)
            .timeouts(config.timeouts)
            .build()
            .map_err(Error::connection_pool)?;

        // Surface a bad URL or missing database file at registration.
        drop(inner.get().await.map_err(pool_error)?);

        Ok(Self {
            inner,
            capability,
            compiler,
            url,
        })
    }

    /// Retrieves a connection from the pool.
    pub async fn get(&self) -> Result<PoolConnection> {
        let connection = self.inner.get().await.map_err(pool_error)?;
        Ok(PoolConnection { inner: connection })
    }

    /// Returns the database driver's capabilities.
    pub fn capability(&self) -> &'static Capability {
        self.capability
    }

    pub fn compiler(&self) -> &dyn Compiler {
        &*self.compiler
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Closes the pool. Idle connections are dropped right away, checked
    /// out ones when they come back.
    pub fn close(&self) {
        self.inner.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

/// Driver errors raised while opening a connection keep their own
/// classification.
fn pool_error(err: PoolError<Error>) -> Error {
    match err {
        PoolError::Backend(err) => err,
        err => Error::connection_pool(err),
    }
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Self::Type> {
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _obj: &mut Self::Type,
        _metrics: &managed::Metrics,
    ) -> managed::RecycleResult<Self::Error> {
        Ok(())
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse. Prefer
/// [`PoolConnection::release`], which resets the connection first.
#[derive(Debug)]
pub struct PoolConnection {
    inner: managed::Object<Manager>,
}

impl PoolConnection {
    /// Resets the connection and hands it back to the pool.
    ///
    /// A connection that fails to reset is detached from the pool and
    /// closed, and the failure is returned.
    pub async fn release(mut self) -> Result<()> {
        match self.inner.release().await {
            Ok(()) => Ok(()),
            Err(err) => {
                drop(managed::Object::take(self.inner));
                Err(err.context(Error::bad_connection(RELEASE_FAILED)))
            }
        }
    }
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
