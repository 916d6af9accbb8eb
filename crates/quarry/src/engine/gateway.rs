use crate::{datastore::Datastore, db::PoolConnection, Meta};

use quarry_core::{driver::Connection, Error, Result};
use tokio::sync::OwnedMutexGuard;

/// The connection one operation runs on.
pub(crate) enum ConnectionHandle {
    /// Checked out of the pool for this operation, released when it ends.
    Spawned(PoolConnection),

    /// Lent by the caller, who keeps ownership.
    Leased(OwnedMutexGuard<PoolConnection>),
}

impl ConnectionHandle {
    /// Uses the caller's leased connection if `meta` carries one, otherwise
    /// checks one out of the datastore's pool.
    pub(crate) async fn spawn_or_lease(datastore: &Datastore, meta: &Meta) -> Result<Self> {
        let Some(leased) = &meta.leased_connection else {
            return Ok(ConnectionHandle::Spawned(datastore.pool.get().await?));
        };

        if leased.identity() != datastore.identity() {
            return Err(Error::invalid_options(format!(
                "meta.leasedConnection (it belongs to datastore `{}`, not `{}`)",
                leased.identity(),
                datastore.identity()
            )));
        }

        Ok(ConnectionHandle::Leased(leased.lock().await))
    }

    pub(crate) fn connection(&mut self) -> &mut Box<dyn Connection> {
        match self {
            ConnectionHandle::Spawned(connection) => connection,
            ConnectionHandle::Leased(connection) => connection,
        }
    }

    pub(crate) fn is_leased(&self) -> bool {
        matches!(self, ConnectionHandle::Leased(_))
    }

    /// Ends the operation: a spawned connection goes back to the pool, a
    /// leased one is only unlocked.
    ///
    /// When both the operation and the release fail, the operation's error
    /// is returned.
    pub(crate) async fn release<T>(self, result: Result<T>) -> Result<T> {
        let ConnectionHandle::Spawned(connection) = self else {
            return result;
        };

        match (result, connection.release().await) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(release_err)) => {
                tracing::warn!(
                    error = %release_err,
                    "failed to release connection after a failed operation"
                );
                Err(err)
            }
        }
    }
}
