use super::Error;

/// Error when an executor is called with options that do not fit the
/// operation, detected before any I/O happens.
#[derive(Debug)]
pub(super) struct InvalidOptions {
    pub(super) option: Box<str>,
}

impl std::error::Error for InvalidOptions {}

impl core::fmt::Display for InvalidOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Invalid option used in options argument. Missing or invalid {}.",
            self.option
        )
    }
}

impl Error {
    /// Creates an invalid options error naming the offending option.
    pub fn invalid_options(option: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOptions(InvalidOptions {
            option: option.into().into(),
        }))
    }

    pub fn is_invalid_options(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidOptions(_)))
    }
}
