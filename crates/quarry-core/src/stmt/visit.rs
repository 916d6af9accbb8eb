#![allow(unused_variables)]

use super::{
    Delete, Expr, ExprAnd, ExprCompare, ExprInList, ExprOr, Insert, Record, Select, Source,
    Statement, Union, Update,
};

/// Read-only traversal of a statement.
///
/// Nodes are visited in the order the compiler serializes them, so a visitor
/// that collects bound values sees them in placeholder order.
pub trait Visit {
    fn visit_stmt(&mut self, i: &Statement) {
        visit_stmt(self, i);
    }

    fn visit_stmt_select(&mut self, i: &Select) {
        visit_stmt_select(self, i);
    }

    fn visit_stmt_insert(&mut self, i: &Insert) {
        visit_stmt_insert(self, i);
    }

    fn visit_stmt_update(&mut self, i: &Update) {
        visit_stmt_update(self, i);
    }

    fn visit_stmt_delete(&mut self, i: &Delete) {
        visit_stmt_delete(self, i);
    }

    fn visit_stmt_union(&mut self, i: &Union) {
        visit_stmt_union(self, i);
    }

    fn visit_source(&mut self, i: &Source) {
        visit_source(self, i);
    }

    /// A record of values being written: one row of an insert, or the
    /// assignments of an update.
    fn visit_record(&mut self, i: &Record) {}

    fn visit_expr(&mut self, i: &Expr) {
        visit_expr(self, i);
    }

    fn visit_expr_and(&mut self, i: &ExprAnd) {
        visit_expr_and(self, i);
    }

    fn visit_expr_or(&mut self, i: &ExprOr) {
        visit_expr_or(self, i);
    }

    fn visit_expr_compare(&mut self, i: &ExprCompare) {}

    fn visit_expr_in_list(&mut self, i: &ExprInList) {}

    fn visit_expr_not_in_list(&mut self, i: &ExprInList) {}
}

impl<V: Visit> Visit for &mut V {
    fn visit_stmt(&mut self, i: &Statement) {
        Visit::visit_stmt(&mut **self, i);
    }

    fn visit_stmt_select(&mut self, i: &Select) {
        Visit::visit_stmt_select(&mut **self, i);
    }

    fn visit_stmt_insert(&mut self, i: &Insert) {
        Visit::visit_stmt_insert(&mut **self, i);
    }

    fn visit_stmt_update(&mut self, i: &Update) {
        Visit::visit_stmt_update(&mut **self, i);
    }

    fn visit_stmt_delete(&mut self, i: &Delete) {
        Visit::visit_stmt_delete(&mut **self, i);
    }

    fn visit_stmt_union(&mut self, i: &Union) {
        Visit::visit_stmt_union(&mut **self, i);
    }

    fn visit_source(&mut self, i: &Source) {
        Visit::visit_source(&mut **self, i);
    }

    fn visit_record(&mut self, i: &Record) {
        Visit::visit_record(&mut **self, i);
    }

    fn visit_expr(&mut self, i: &Expr) {
        Visit::visit_expr(&mut **self, i);
    }

    fn visit_expr_and(&mut self, i: &ExprAnd) {
        Visit::visit_expr_and(&mut **self, i);
    }

    fn visit_expr_or(&mut self, i: &ExprOr) {
        Visit::visit_expr_or(&mut **self, i);
    }

    fn visit_expr_compare(&mut self, i: &ExprCompare) {
        Visit::visit_expr_compare(&mut **self, i);
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        Visit::visit_expr_in_list(&mut **self, i);
    }

    fn visit_expr_not_in_list(&mut self, i: &ExprInList) {
        Visit::visit_expr_not_in_list(&mut **self, i);
    }
}

pub fn visit_stmt<V>(v: &mut V, node: &Statement)
where
    V: Visit + ?Sized,
{
    match node {
        Statement::Select(stmt) => v.visit_stmt_select(stmt),
        Statement::Insert(stmt) => v.visit_stmt_insert(stmt),
        Statement::Update(stmt) => v.visit_stmt_update(stmt),
        Statement::Delete(stmt) => v.visit_stmt_delete(stmt),
        Statement::Union(stmt) => v.visit_stmt_union(stmt),
    }
}

pub fn visit_stmt_select<V>(v: &mut V, node: &Select)
where
    V: Visit + ?Sized,
{
    v.visit_source(&node.source);
    v.visit_expr(&node.filter);
}

pub fn visit_stmt_insert<V>(v: &mut V, node: &Insert)
where
    V: Visit + ?Sized,
{
    for record in &node.records {
        v.visit_record(record);
    }
}

pub fn visit_stmt_update<V>(v: &mut V, node: &Update)
where
    V: Visit + ?Sized,
{
    v.visit_record(&node.assignments);
    v.visit_expr(&node.filter);
}

pub fn visit_stmt_delete<V>(v: &mut V, node: &Delete)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.filter);
}

pub fn visit_stmt_union<V>(v: &mut V, node: &Union)
where
    V: Visit + ?Sized,
{
    for branch in &node.branches {
        v.visit_stmt_select(branch);
    }
}

pub fn visit_source<V>(v: &mut V, node: &Source)
where
    V: Visit + ?Sized,
{
    if let Source::Subquery { select, .. } = node {
        v.visit_stmt_select(select);
    }
}

pub fn visit_expr<V>(v: &mut V, node: &Expr)
where
    V: Visit + ?Sized,
{
    match node {
        Expr::And(expr) => v.visit_expr_and(expr),
        Expr::Or(expr) => v.visit_expr_or(expr),
        Expr::Compare(expr) => v.visit_expr_compare(expr),
        Expr::InList(expr) => v.visit_expr_in_list(expr),
        Expr::NotInList(expr) => v.visit_expr_not_in_list(expr),
    }
}

pub fn visit_expr_and<V>(v: &mut V, node: &ExprAnd)
where
    V: Visit + ?Sized,
{
    for expr in node {
        v.visit_expr(expr);
    }
}

pub fn visit_expr_or<V>(v: &mut V, node: &ExprOr)
where
    V: Visit + ?Sized,
{
    for expr in node {
        v.visit_expr(expr);
    }
}

/// Calls `f` for every leaf predicate of `expr`, in serialization order.
pub fn for_each_leaf<F>(expr: &Expr, f: F)
where
    F: FnMut(&Expr),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F: FnMut(&Expr)> Visit for ForEach<F> {
        fn visit_expr(&mut self, i: &Expr) {
            match i {
                Expr::And(_) | Expr::Or(_) => visit_expr(self, i),
                leaf => (self.f)(leaf),
            }
        }
    }

    ForEach { f }.visit_expr(expr);
}
