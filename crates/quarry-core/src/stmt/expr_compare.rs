use super::{Expr, Value};

/// A leaf comparison between a column and a literal value.
///
/// Comparing against `Value::Null` with `Eq`/`Ne` compiles to
/// `IS NULL`/`IS NOT NULL` and binds nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCompare {
    /// Column name, optionally qualified as `table.column`.
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    NotLike,
}

impl ExprCompare {
    /// True when the comparison is a null check, which binds no parameter.
    pub fn is_null_check(&self) -> bool {
        self.value.is_null() && matches!(self.op, CompareOp::Eq | CompareOp::Ne)
    }
}

impl From<ExprCompare> for Expr {
    fn from(value: ExprCompare) -> Self {
        Self::Compare(value)
    }
}
