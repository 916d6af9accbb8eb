use super::Error;

/// Error when an internal invariant of an operation breaks.
///
/// These are always fatal for the operation that raised them and are never
/// retried.
#[derive(Debug)]
pub(super) struct ConsistencyViolation {
    pub(super) message: Box<str>,
}

impl std::error::Error for ConsistencyViolation {}

impl core::fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Consistency violation: {}", self.message)
    }
}

impl Error {
    pub fn consistency_violation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ConsistencyViolation(
            ConsistencyViolation {
                message: message.into().into(),
            },
        ))
    }

    pub fn is_consistency_violation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ConsistencyViolation(_)))
    }
}
