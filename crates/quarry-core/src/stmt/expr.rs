use super::{CompareOp, ExprAnd, ExprCompare, ExprInList, ExprOr, Value};

/// A predicate tree, as found in the `where` clause of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// All operands must hold. An empty `And` always holds.
    And(ExprAnd),

    /// At least one operand must hold. An empty `Or` never holds.
    Or(ExprOr),

    /// `column <op> value`
    Compare(ExprCompare),

    /// `column IN (..)`
    InList(ExprInList),

    /// `column NOT IN (..)`
    NotInList(ExprInList),
}

impl Expr {
    /// The predicate that matches every row.
    pub fn r#true() -> Expr {
        Expr::And(ExprAnd { operands: vec![] })
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Expr::And(expr) if expr.operands.is_empty())
    }

    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Expr {
        ExprCompare {
            column: column.into(),
            op,
            value: value.into(),
        }
        .into()
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::compare(column, CompareOp::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::compare(column, CompareOp::Ne, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::compare(column, CompareOp::Gt, value)
    }

    pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::compare(column, CompareOp::Ge, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::compare(column, CompareOp::Lt, value)
    }

    pub fn le(column: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::compare(column, CompareOp::Le, value)
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Expr {
        Expr::compare(column, CompareOp::Like, pattern.into())
    }

    pub fn in_list(column: impl Into<String>, list: impl IntoIterator<Item = Value>) -> Expr {
        Expr::InList(ExprInList::new(column, list))
    }

    pub fn not_in_list(column: impl Into<String>, list: impl IntoIterator<Item = Value>) -> Expr {
        Expr::NotInList(ExprInList::new(column, list))
    }

    /// Appends an operand to the top-level conjunction, wrapping `self` in an
    /// `And` when it is not one already.
    pub fn and(self, rhs: impl Into<Expr>) -> Expr {
        let rhs = rhs.into();

        match self {
            lhs if lhs.is_true() => Expr::and_from_vec(vec![rhs]),
            Expr::And(mut lhs) => {
                lhs.operands.push(rhs);
                Expr::And(lhs)
            }
            lhs => Expr::and_from_vec(vec![lhs, rhs]),
        }
    }

    pub fn and_from_vec(operands: Vec<Expr>) -> Expr {
        Expr::And(ExprAnd { operands })
    }

    pub fn or_from_vec(operands: Vec<Expr>) -> Expr {
        Expr::Or(ExprOr { operands })
    }

    /// Operands of the top-level conjunction. Any other predicate is treated
    /// as a conjunction of itself.
    pub fn conjuncts(&self) -> &[Expr] {
        match self {
            Expr::And(expr) => &expr.operands,
            other => std::slice::from_ref(other),
        }
    }
}

impl Default for Expr {
    fn default() -> Expr {
        Expr::r#true()
    }
}
