mod delete;
pub use delete::Delete;

mod expr;
pub use expr::Expr;

mod expr_compare;
pub use expr_compare::{CompareOp, ExprCompare};

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_logical;
pub use expr_logical::{ExprAnd, ExprOr};

mod expr_parse;

mod insert;
pub use insert::Insert;

mod record;
pub use record::Record;

mod select;
pub use select::{
    AggregateFunc, Direction, Join, JoinKind, OrderBy, Returning, Select, SelectItem, Source,
};

mod statement;
pub use statement::Statement;

mod union;
pub use union::Union;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

pub mod visit;
pub use visit::Visit;

pub mod visit_mut;
pub use visit_mut::VisitMut;
