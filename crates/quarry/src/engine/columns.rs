use quarry_core::stmt::{visit::Visit, CompareOp, ExprCompare, ExprInList, Record, Statement};

/// Lists the logical column of every value `stmt` binds, in bind order.
///
/// Values are bound in the order the statement is serialized: written
/// records with their keys sorted, then the predicate tree depth-first, one
/// entry per `IN` member. A null comparison that the compiled SQL shows as
/// `IS NULL`/`IS NOT NULL` binds nothing and is skipped.
pub(crate) fn extract_columns(stmt: &Statement, sql: &str) -> Vec<String> {
    let mut extractor = ColumnExtractor {
        sql: FoldedSql::new(sql),
        columns: vec![],
    };

    extractor.visit_stmt(stmt);
    extractor.columns
}

struct ColumnExtractor {
    sql: FoldedSql,
    columns: Vec<String>,
}

impl Visit for ColumnExtractor {
    fn visit_record(&mut self, i: &Record) {
        self.columns
            .extend(i.sorted_keys().into_iter().map(str::to_string));
    }

    fn visit_expr_compare(&mut self, i: &ExprCompare) {
        if i.is_null_check() && self.sql.folds(i) {
            return;
        }

        self.columns.push(i.column.clone());
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        self.push_members(i);
    }

    fn visit_expr_not_in_list(&mut self, i: &ExprInList) {
        self.push_members(i);
    }
}

impl ColumnExtractor {
    fn push_members(&mut self, i: &ExprInList) {
        self.columns
            .extend(std::iter::repeat(i.column.clone()).take(i.list.len()));
    }
}

/// Compiled SQL lowercased and stripped of identifier quoting.
struct FoldedSql(String);

impl FoldedSql {
    fn new(sql: &str) -> FoldedSql {
        FoldedSql(
            sql.to_lowercase()
                .chars()
                .filter(|c| !matches!(c, '"' | '`' | '[' | ']'))
                .collect(),
        )
    }

    fn folds(&self, expr: &ExprCompare) -> bool {
        let check = match expr.op {
            CompareOp::Ne => "is not null",
            _ => "is null",
        };

        let needle = format!("{} {check}", expr.column.to_lowercase());

        // `name is null` must not match inside `username is null`
        self.0.match_indices(&needle).any(|(at, _)| {
            !self.0[..at]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
        })
    }
}
