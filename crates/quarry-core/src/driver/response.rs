use crate::{
    stmt::{Record, Value},
    Error, Result,
};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by a query
    Values(Vec<Record>),

    /// Result of an `INSERT`, with whatever generated keys the database
    /// reported
    Inserted { count: u64, ids: Vec<Value> },
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(values: Vec<Record>) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }

    pub fn inserted(count: u64, ids: Vec<Value>) -> Self {
        Self {
            rows: Rows::Inserted { count, ids },
        }
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        match self.rows {
            Rows::Values(values) => Ok(values),
            rows => Err(Error::invalid_result(format!(
                "expected rows, got {}",
                rows.describe()
            ))),
        }
    }

    /// Returns the generated keys of an `INSERT`.
    pub fn into_inserted_ids(self) -> Result<Vec<Value>> {
        match self.rows {
            Rows::Inserted { ids, .. } => Ok(ids),
            rows => Err(Error::invalid_result(format!(
                "expected inserted ids, got {}",
                rows.describe()
            ))),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Count(_) => "Count",
            Self::Values(_) => "Values",
            Self::Inserted { .. } => "Inserted",
        }
    }
}
