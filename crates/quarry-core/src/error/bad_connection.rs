use super::Error;

/// Error when a connection could not be used or handed back to its pool.
#[derive(Debug)]
pub(super) struct BadConnection {
    pub(super) message: Box<str>,
}

impl std::error::Error for BadConnection {}

impl core::fmt::Display for BadConnection {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "bad connection: {}", self.message)
    }
}

impl Error {
    pub fn bad_connection(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::BadConnection(BadConnection {
            message: message.into().into(),
        }))
    }

    /// Returns `true` for connection-level failures, including errors raised
    /// by the connection pool itself.
    pub fn is_bad_connection(&self) -> bool {
        self.any_kind(|kind| {
            matches!(
                kind,
                super::ErrorKind::BadConnection(_) | super::ErrorKind::ConnectionPool(_)
            )
        })
    }
}
