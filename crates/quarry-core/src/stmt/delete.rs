use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub from: String,
    pub filter: Expr,
}
