use super::Value;

/// Membership test shared by [`Expr::InList`](super::Expr::InList) and
/// [`Expr::NotInList`](super::Expr::NotInList). Every list member is bound
/// as its own parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub column: String,
    pub list: Vec<Value>,
}

impl ExprInList {
    pub fn new(column: impl Into<String>, list: impl IntoIterator<Item = Value>) -> ExprInList {
        ExprInList {
            column: column.into(),
            list: list.into_iter().collect(),
        }
    }
}
