#![allow(unused_variables)]

use super::{
    Delete, Expr, ExprAnd, ExprCompare, ExprInList, ExprOr, Select, Source, Statement, Union,
    Update,
};

/// Mutable traversal of a statement, used to rewrite predicate trees in
/// place.
pub trait VisitMut {
    fn visit_stmt_mut(&mut self, i: &mut Statement) {
        visit_stmt_mut(self, i);
    }

    fn visit_stmt_select_mut(&mut self, i: &mut Select) {
        visit_stmt_select_mut(self, i);
    }

    fn visit_stmt_update_mut(&mut self, i: &mut Update) {
        visit_stmt_update_mut(self, i);
    }

    fn visit_stmt_delete_mut(&mut self, i: &mut Delete) {
        visit_stmt_delete_mut(self, i);
    }

    fn visit_stmt_union_mut(&mut self, i: &mut Union) {
        visit_stmt_union_mut(self, i);
    }

    fn visit_source_mut(&mut self, i: &mut Source) {
        visit_source_mut(self, i);
    }

    fn visit_expr_mut(&mut self, i: &mut Expr) {
        visit_expr_mut(self, i);
    }

    fn visit_expr_and_mut(&mut self, i: &mut ExprAnd) {
        visit_expr_and_mut(self, i);
    }

    fn visit_expr_or_mut(&mut self, i: &mut ExprOr) {
        visit_expr_or_mut(self, i);
    }

    fn visit_expr_compare_mut(&mut self, i: &mut ExprCompare) {}

    fn visit_expr_in_list_mut(&mut self, i: &mut ExprInList) {}

    fn visit_expr_not_in_list_mut(&mut self, i: &mut ExprInList) {}
}

pub fn visit_stmt_mut<V>(v: &mut V, node: &mut Statement)
where
    V: VisitMut + ?Sized,
{
    match node {
        Statement::Select(stmt) => v.visit_stmt_select_mut(stmt),
        Statement::Insert(_) => {}
        Statement::Update(stmt) => v.visit_stmt_update_mut(stmt),
        Statement::Delete(stmt) => v.visit_stmt_delete_mut(stmt),
        Statement::Union(stmt) => v.visit_stmt_union_mut(stmt),
    }
}

pub fn visit_stmt_select_mut<V>(v: &mut V, node: &mut Select)
where
    V: VisitMut + ?Sized,
{
    v.visit_source_mut(&mut node.source);
    v.visit_expr_mut(&mut node.filter);
}

pub fn visit_stmt_update_mut<V>(v: &mut V, node: &mut Update)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.filter);
}

pub fn visit_stmt_delete_mut<V>(v: &mut V, node: &mut Delete)
where
    V: VisitMut + ?Sized,
{
    v.visit_expr_mut(&mut node.filter);
}

pub fn visit_stmt_union_mut<V>(v: &mut V, node: &mut Union)
where
    V: VisitMut + ?Sized,
{
    for branch in &mut node.branches {
        v.visit_stmt_select_mut(branch);
    }
}

pub fn visit_source_mut<V>(v: &mut V, node: &mut Source)
where
    V: VisitMut + ?Sized,
{
    if let Source::Subquery { select, .. } = node {
        v.visit_stmt_select_mut(select);
    }
}

pub fn visit_expr_mut<V>(v: &mut V, node: &mut Expr)
where
    V: VisitMut + ?Sized,
{
    match node {
        Expr::And(expr) => v.visit_expr_and_mut(expr),
        Expr::Or(expr) => v.visit_expr_or_mut(expr),
        Expr::Compare(expr) => v.visit_expr_compare_mut(expr),
        Expr::InList(expr) => v.visit_expr_in_list_mut(expr),
        Expr::NotInList(expr) => v.visit_expr_not_in_list_mut(expr),
    }
}

pub fn visit_expr_and_mut<V>(v: &mut V, node: &mut ExprAnd)
where
    V: VisitMut + ?Sized,
{
    for expr in &mut node.operands {
        v.visit_expr_mut(expr);
    }
}

pub fn visit_expr_or_mut<V>(v: &mut V, node: &mut ExprOr)
where
    V: VisitMut + ?Sized,
{
    for expr in &mut node.operands {
        v.visit_expr_mut(expr);
    }
}
