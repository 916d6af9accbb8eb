//! The adapter's input: one query type per operation.
//!
//! Queries address tables and columns directly. Every query carries a
//! [`Meta`], which holds the `fetch` flag and an optional leased connection.

mod criteria;
pub use criteria::Criteria;

mod join;
pub use join::{Join, JoinInstruction, Strategy};

mod meta;
pub use meta::Meta;

use quarry_core::stmt::Record;

/// Inserts one record.
#[derive(Debug, Clone)]
pub struct CreateQuery {
    /// Table name or model identity
    pub using: String,
    pub new_record: Record,
    pub meta: Meta,
}

/// Inserts several records.
#[derive(Debug, Clone)]
pub struct CreateEachQuery {
    pub using: String,
    pub new_records: Vec<Record>,
    pub meta: Meta,
}

/// Selects records, optionally populating associations.
#[derive(Debug, Clone)]
pub struct FindQuery {
    pub using: String,
    pub criteria: Criteria,
    pub joins: Vec<Join>,
    pub meta: Meta,
}

#[derive(Debug, Clone)]
pub struct UpdateQuery {
    pub using: String,
    pub criteria: Criteria,
    pub values_to_set: Record,
    pub meta: Meta,
}

#[derive(Debug, Clone)]
pub struct DestroyQuery {
    pub using: String,
    pub criteria: Criteria,
    pub meta: Meta,
}

/// Shared by `avg`, `sum` and `count`.
#[derive(Debug, Clone)]
pub struct AggregateQuery {
    pub using: String,
    pub criteria: Criteria,

    /// Column to average or sum. Ignored by `count`.
    pub numeric_column: Option<String>,
    pub meta: Meta,
}

macro_rules! impl_meta {
    ( $( $ty:ident ),* ) => {
        $(
            impl $ty {
                /// Requests the affected records back.
                pub fn fetch(mut self) -> $ty {
                    self.meta.fetch = true;
                    self
                }

                pub fn meta(mut self, meta: Meta) -> $ty {
                    self.meta = meta;
                    self
                }
            }
        )*
    };
}

impl_meta!(
    CreateQuery,
    CreateEachQuery,
    FindQuery,
    UpdateQuery,
    DestroyQuery,
    AggregateQuery
);

impl CreateQuery {
    pub fn new(using: impl Into<String>, new_record: Record) -> CreateQuery {
        CreateQuery {
            using: using.into(),
            new_record,
            meta: Meta::default(),
        }
    }
}

impl CreateEachQuery {
    pub fn new(using: impl Into<String>, new_records: Vec<Record>) -> CreateEachQuery {
        CreateEachQuery {
            using: using.into(),
            new_records,
            meta: Meta::default(),
        }
    }
}

impl FindQuery {
    pub fn new(using: impl Into<String>, criteria: Criteria) -> FindQuery {
        FindQuery {
            using: using.into(),
            criteria,
            joins: vec![],
            meta: Meta::default(),
        }
    }

    pub fn join(mut self, join: Join) -> FindQuery {
        self.joins.push(join);
        self
    }
}

impl UpdateQuery {
    pub fn new(using: impl Into<String>, criteria: Criteria, values_to_set: Record) -> UpdateQuery {
        UpdateQuery {
            using: using.into(),
            criteria,
            values_to_set,
            meta: Meta::default(),
        }
    }
}

impl DestroyQuery {
    pub fn new(using: impl Into<String>, criteria: Criteria) -> DestroyQuery {
        DestroyQuery {
            using: using.into(),
            criteria,
            meta: Meta::default(),
        }
    }
}

impl AggregateQuery {
    pub fn new(using: impl Into<String>, criteria: Criteria) -> AggregateQuery {
        AggregateQuery {
            using: using.into(),
            criteria,
            numeric_column: None,
            meta: Meta::default(),
        }
    }

    pub fn numeric_column(mut self, column: impl Into<String>) -> AggregateQuery {
        self.numeric_column = Some(column.into());
        self
    }
}
