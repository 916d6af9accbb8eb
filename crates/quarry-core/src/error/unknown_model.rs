use super::Error;

/// Error when a query names a table that no registered model maps to.
#[derive(Debug)]
pub(super) struct UnknownModel {
    pub(super) name: Box<str>,
}

impl std::error::Error for UnknownModel {}

impl core::fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no model is registered for `{}`", self.name)
    }
}

impl Error {
    pub fn unknown_model(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownModel(UnknownModel {
            name: name.into().into(),
        }))
    }

    pub fn is_unknown_model(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownModel(_)))
    }
}
