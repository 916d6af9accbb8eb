mod aggregate;
pub(crate) use aggregate::{aggregate, aggregate_f64, aggregate_u64};

mod columns;

mod create;
pub(crate) use create::{create, create_each};

mod destroy;
pub(crate) use destroy::destroy;

mod exec;
use exec::Exec;

mod find;
pub(crate) use find::find;

mod gateway;

pub(crate) mod join;

mod normalize;

mod update;
pub(crate) use update::update;
