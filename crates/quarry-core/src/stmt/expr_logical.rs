use super::Expr;

/// Conjunction of predicates. With no operands it matches every row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprAnd {
    pub operands: Vec<Expr>,
}

/// Disjunction of predicates. With no operands it matches no row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprOr {
    pub operands: Vec<Expr>,
}

macro_rules! logical {
    ($ty:ident, $variant:ident) => {
        impl $ty {
            pub fn len(&self) -> usize {
                self.operands.len()
            }

            pub fn is_empty(&self) -> bool {
                self.operands.is_empty()
            }
        }

        impl<'a> IntoIterator for &'a $ty {
            type IntoIter = std::slice::Iter<'a, Expr>;
            type Item = &'a Expr;

            fn into_iter(self) -> Self::IntoIter {
                self.operands.iter()
            }
        }

        impl From<$ty> for Expr {
            fn from(value: $ty) -> Expr {
                Expr::$variant(value)
            }
        }
    };
}

logical!(ExprAnd, And);
logical!(ExprOr, Or);
