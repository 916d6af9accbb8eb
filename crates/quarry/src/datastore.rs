use crate::{db::Pool, DatastoreConfig};

use quarry_core::Models;

/// A registered datastore: its settings, connection pool and models.
#[derive(Debug)]
pub(crate) struct Datastore {
    pub(crate) config: DatastoreConfig,
    pub(crate) pool: Pool,
    pub(crate) models: Models,
}

impl Datastore {
    pub(crate) fn identity(&self) -> &str {
        &self.config.identity
    }
}
