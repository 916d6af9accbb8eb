use super::{Column, Comma, Delimited, Formatter, Params, ToSql};

use quarry_core::stmt::{self, CompareOp};

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) => compound(f, &expr.operands, " AND ", "1 = 1"),
            Or(expr) => compound(f, &expr.operands, " OR ", "1 = 0"),
            Compare(expr) if expr.is_null_check() => {
                let column = Column(&expr.column);
                if expr.op == CompareOp::Ne {
                    fmt!(f, column " IS NOT NULL");
                } else {
                    fmt!(f, column " IS NULL");
                }
            }
            Compare(expr) => {
                let value = &expr.value;
                fmt!(f, Column(&expr.column) " " expr.op " " value);
            }
            InList(expr) => in_list(f, expr, " IN ", "1 = 0"),
            NotInList(expr) => in_list(f, expr, " NOT IN ", "1 = 1"),
        }
    }
}

impl ToSql for CompareOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Like => "LIKE",
            CompareOp::NotLike => "NOT LIKE",
        })
    }
}

fn compound<P: Params>(
    f: &mut Formatter<'_, P>,
    operands: &[stmt::Expr],
    delimiter: &'static str,
    empty: &'static str,
) {
    match operands {
        [] => fmt!(f, empty),
        [operand] => operand.to_sql(f),
        operands => {
            let nested = f.depth > 0;

            if nested {
                fmt!(f, "(");
            }

            f.depth += 1;
            fmt!(f, Delimited(operands, delimiter));
            f.depth -= 1;

            if nested {
                fmt!(f, ")");
            }
        }
    }
}

// An empty list binds nothing and folds to a constant predicate.
fn in_list<P: Params>(
    f: &mut Formatter<'_, P>,
    expr: &stmt::ExprInList,
    op: &'static str,
    empty: &'static str,
) {
    if expr.list.is_empty() {
        fmt!(f, empty);
    } else {
        fmt!(f, Column(&expr.column) op "(" Comma(&expr.list) ")");
    }
}
