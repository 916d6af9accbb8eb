use super::{DriverOperationFailed, Error, ErrorKind};
use crate::driver::{Footprint, FootprintIdentity};
use std::sync::Arc;

/// A vendor error that has been run through a driver's error classifier.
#[derive(Debug)]
pub(super) struct QueryFailed {
    pub(super) footprint: Footprint,
    pub(super) inner: Arc<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for QueryFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.inner)
    }
}

impl core::fmt::Display for QueryFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.footprint.identity {
            FootprintIdentity::NotUnique if self.footprint.keys.is_empty() => {
                write!(f, "not unique: {}", self.inner)
            }
            FootprintIdentity::NotUnique => {
                write!(f, "not unique ({}): {}", self.footprint.keys.join(", "), self.inner)
            }
            FootprintIdentity::Catchall => write!(f, "query failed: {}", self.inner),
        }
    }
}

impl Error {
    /// Creates a classified query error.
    pub fn query_failed(
        footprint: Footprint,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(ErrorKind::QueryFailed(QueryFailed {
            footprint,
            inner: Arc::new(err),
        }))
    }

    /// Returns the footprint of a classified query error.
    pub fn footprint(&self) -> Option<&Footprint> {
        self.chain().find_map(|err| match err.kind() {
            ErrorKind::QueryFailed(err) => Some(&err.footprint),
            _ => None,
        })
    }

    /// Returns `true` if the database rejected a write because it would break
    /// a uniqueness constraint.
    pub fn is_not_unique(&self) -> bool {
        self.footprint()
            .is_some_and(|footprint| footprint.identity == FootprintIdentity::NotUnique)
    }

    /// Re-wraps a `catchall` classification as a plain driver failure so
    /// callers never see an empty footprint. Any other error is returned
    /// unchanged.
    pub fn without_catchall(self) -> Error {
        let ErrorKind::QueryFailed(err) = self.kind() else {
            return self;
        };

        if err.footprint.identity != FootprintIdentity::Catchall {
            return self;
        }

        Error::from(ErrorKind::DriverOperationFailed(DriverOperationFailed {
            inner: err.inner.clone(),
        }))
    }
}
