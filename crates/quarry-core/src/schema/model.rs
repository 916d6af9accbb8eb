use super::Attribute;
use crate::{Error, Result};

use indexmap::IndexMap;
use serde::Deserialize;

/// A model definition as supplied by the ORM. Read-only for the adapter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub identity: String,
    pub table_name: String,

    /// Name of the primary key attribute
    pub primary_key: String,

    pub definition: IndexMap<String, Attribute>,
}

impl Model {
    pub fn new(
        identity: impl Into<String>,
        table_name: impl Into<String>,
        primary_key: impl Into<String>,
    ) -> Model {
        Model {
            identity: identity.into(),
            table_name: table_name.into(),
            primary_key: primary_key.into(),
            definition: IndexMap::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Model {
        self.definition.insert(name.into(), attribute);
        self
    }

    pub fn primary_key_attribute(&self) -> Result<&Attribute> {
        self.definition.get(&self.primary_key).ok_or_else(|| {
            Error::bad_configuration(format!(
                "In model `{}`, primary key `{}` is not one of its attributes.",
                self.identity, self.primary_key
            ))
        })
    }

    /// Column holding the primary key.
    pub fn primary_key_column(&self) -> &str {
        self.definition
            .get(&self.primary_key)
            .map(|attr| attr.column_name.as_str())
            .unwrap_or(&self.primary_key)
    }

    /// Columns stored in the model's own table, in definition order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.definition
            .values()
            .filter(|attr| !attr.is_plural())
            .map(|attr| attr.column_name.as_str())
    }

    /// Finds the attribute stored in `column`.
    pub fn attribute_by_column(&self, column: &str) -> Option<(&str, &Attribute)> {
        self.definition
            .iter()
            .find(|(_, attr)| attr.column_name == column)
            .map(|(name, attr)| (name.as_str(), attr))
    }
}
