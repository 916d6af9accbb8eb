use quarry_core::{
    async_trait,
    driver::{Capability, Compiler, NativeQuery, Response},
    Connection, Driver, Error, Result,
};
use std::{
    borrow::Cow,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

/// A driver wrapper that records every native query its connections run.
///
/// It can also be told to fail every connection release, to exercise the
/// release error paths.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Every query executed through this driver, in order
    queries: Arc<Mutex<Vec<NativeQuery>>>,

    fail_release: Arc<AtomicBool>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            queries: Arc::default(),
            fail_release: Arc::default(),
        }
    }

    /// Get a handle to access the query log
    pub fn queries_handle(&self) -> Arc<Mutex<Vec<NativeQuery>>> {
        self.queries.clone()
    }

    /// Get a handle that switches release failures on and off
    pub fn fail_release_handle(&self) -> Arc<AtomicBool> {
        self.fail_release.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    fn compiler(&self) -> Arc<dyn Compiler> {
        self.inner.compiler()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            queries: self.queries_handle(),
            fail_release: self.fail_release_handle(),
        }))
    }

    fn max_connections(&self) -> Option<usize> {
        self.inner.max_connections()
    }
}

#[derive(Debug)]
pub struct LoggingConnection {
    inner: Box<dyn Connection>,
    queries: Arc<Mutex<Vec<NativeQuery>>>,
    fail_release: Arc<AtomicBool>,
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, query: NativeQuery) -> Result<Response> {
        self.queries
            .lock()
            .expect("Failed to acquire query log lock")
            .push(query.clone());

        self.inner.exec(query).await
    }

    async fn release(&mut self) -> Result<()> {
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(Error::bad_connection("connection reset by peer"));
        }

        self.inner.release().await
    }
}
