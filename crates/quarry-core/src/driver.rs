mod capability;
pub use capability::Capability;

mod compiler;
pub use compiler::{CompiledQuery, Compiler};

mod footprint;
pub use footprint::{Footprint, FootprintIdentity};

mod native_query;
pub use native_query::{NativeQuery, QueryKind};

mod response;
pub use response::{Response, Rows};

use crate::async_trait;

use std::{borrow::Cow, fmt::Debug, sync::Arc};

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Returns the URL this driver is connecting to.
    fn url(&self) -> Cow<'_, str>;

    /// Describes the driver's capability, which informs the executor.
    fn capability(&self) -> &'static Capability;

    /// Returns the statement compiler for this driver's SQL dialect.
    fn compiler(&self) -> Arc<dyn Compiler>;

    /// Creates a new connection to the database.
    ///
    /// This method is called by the connection pool whenever a new connection is needed.
    async fn connect(&self) -> crate::Result<Box<dyn Connection>>;

    /// Returns the maximum number of simultaneous database connections supported. For example,
    /// this is `Some(1)` for the in-memory SQLite driver which cannot be pooled.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// A single connection to a database, checked out of a pool for the length of
/// one logical operation.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Executes a compiled native query.
    ///
    /// Failures reported by the database are classified into a
    /// [`Footprint`] and returned through [`crate::Error::query_failed`];
    /// failures of the connection itself are returned as
    /// [`crate::Error::bad_connection`].
    async fn exec(&mut self, query: NativeQuery) -> crate::Result<Response>;

    /// Prepares the connection for being handed back to its pool.
    ///
    /// An error means the connection must not be reused.
    async fn release(&mut self) -> crate::Result<()> {
        Ok(())
    }
}
