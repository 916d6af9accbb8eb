use super::Error;

/// Error when a datastore or its model definitions cannot be used.
///
/// Raised before any connection is opened, for example when:
/// - a datastore identity is registered twice
/// - the connection settings are incomplete
/// - a model's primary key is neither `required` nor auto-incrementing
#[derive(Debug)]
pub(super) struct BadConfiguration {
    pub(super) message: Box<str>,
}

impl std::error::Error for BadConfiguration {}

impl core::fmt::Display for BadConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "bad configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn bad_configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::BadConfiguration(BadConfiguration {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_bad_configuration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::BadConfiguration(_)))
    }
}
