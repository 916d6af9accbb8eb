mod adapter;
pub use adapter::{Adapter, LeasedConnection};

mod config;
pub use config::{DatastoreConfig, PoolSettings};

mod datastore;

pub mod db;

mod engine;
pub use engine::join::{ChildQueryKind, ChildQueryStrategy, PaginatedUnion};

pub mod query;
pub use query::{
    AggregateQuery, CreateEachQuery, CreateQuery, Criteria, DestroyQuery, FindQuery, Join,
    JoinInstruction, Meta, Strategy, UpdateQuery,
};

pub use quarry_core::{
    record,
    schema::{Attribute, Model, Models},
    stmt::{Record, Value},
    Error, Result,
};
