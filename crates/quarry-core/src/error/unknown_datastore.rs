use super::Error;

#[derive(Debug)]
pub(super) struct UnknownDatastore {
    pub(super) identity: Box<str>,
}

impl std::error::Error for UnknownDatastore {}

impl core::fmt::Display for UnknownDatastore {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Invalid data store identity. No data store exist with that identity. (identity: `{}`)",
            self.identity
        )
    }
}

impl Error {
    pub fn unknown_datastore(identity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownDatastore(UnknownDatastore {
            identity: identity.into().into(),
        }))
    }

    pub fn is_unknown_datastore(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownDatastore(_)))
    }
}
