use super::{Expr, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,

    /// Values to set, keyed by column
    pub assignments: Record,

    pub filter: Expr,
}
