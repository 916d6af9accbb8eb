mod attribute;
pub use attribute::{Association, AttrType, Attribute};

mod model;
pub use model::Model;

use crate::{Error, Result};

use indexmap::IndexMap;

/// The model definitions of one datastore, indexed both by identity and by
/// table name.
#[derive(Debug, Default, Clone)]
pub struct Models {
    models: IndexMap<String, Model>,

    /// table name -> identity
    tables: IndexMap<String, String>,
}

impl Models {
    pub fn new(models: impl IntoIterator<Item = Model>) -> Models {
        let mut ret = Models::default();
        for model in models {
            ret.insert(model);
        }
        ret
    }

    pub fn insert(&mut self, model: Model) {
        self.tables
            .insert(model.table_name.clone(), model.identity.clone());
        self.models.insert(model.identity.clone(), model);
    }

    pub fn get(&self, identity: &str) -> Option<&Model> {
        self.models.get(identity)
    }

    pub fn by_table(&self, table_name: &str) -> Option<&Model> {
        self.tables
            .get(table_name)
            .and_then(|identity| self.models.get(identity))
    }

    /// Finds a model by table name, falling back to its identity.
    pub fn resolve(&self, name: &str) -> Result<&Model> {
        self.by_table(name)
            .or_else(|| self.get(name))
            .ok_or_else(|| Error::unknown_model(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<Model> for Models {
    fn from_iter<T: IntoIterator<Item = Model>>(iter: T) -> Self {
        Models::new(iter)
    }
}
