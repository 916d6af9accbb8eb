use super::{ChildQueryKind, ChildQueryStrategy};
use crate::{Criteria, Join, Strategy};

use quarry_core::{
    driver::Capability,
    schema::Model,
    stmt::{
        self, visit::for_each_leaf, Expr, ExprCompare, ExprInList, JoinKind, OrderBy, Returning,
        Select, SelectItem, Source, Statement, Union, Value, VisitMut,
    },
    Error, Models, Result,
};

const INVALID_PARENT: &str =
    "Invalid parent table name used when caching query results. Perhaps the join criteria is invalid?";

/// Column holding the parent key on child rows reached through a junction
/// table.
pub(crate) const PARENT_FK: &str = "_parent_fk";

/// Separates the association alias from the column name of an inlined child
/// column: `<alias>__<column>`.
pub(crate) const ALIAS_SEPARATOR: &str = "__";

/// The statements a find with populated associations runs.
#[derive(Debug)]
pub(crate) struct Plan {
    /// Selects the parent rows, with every inlined association joined in.
    pub(crate) parent: Select,

    /// Aliases of the associations whose children come back inline with the
    /// parent rows.
    pub(crate) inline: Vec<String>,

    /// One per association that is not inlined, in join order.
    pub(crate) children: Vec<ChildQuery>,
}

/// A child select waiting for the parent keys.
#[derive(Debug, Clone)]
pub(crate) struct ChildQuery {
    /// Position of the association in the find's joins
    pub(crate) join: usize,

    pub(crate) kind: ChildQueryKind,

    /// The last conjunct of the filter is a placeholder on `key_column`.
    template: Select,

    key_column: String,
}

impl Plan {
    /// Checks every join against the schema and splits the find into a
    /// parent select and child queries.
    ///
    /// An association is inlined as a `LEFT OUTER JOIN` when it carries no
    /// criteria of its own and the parent rows are not paginated.
    pub(crate) fn build(
        models: &Models,
        model: &Model,
        criteria: &Criteria,
        joins: &[Join],
        strategy: &dyn ChildQueryStrategy,
    ) -> Result<Plan> {
        for join in joins {
            validate(models, model, join)?;
        }

        let inline: Vec<usize> = joins
            .iter()
            .enumerate()
            .filter(|(_, join)| join.criteria.is_empty() && !criteria.is_paginated())
            .map(|(index, _)| index)
            .collect();

        let parent = if inline.is_empty() {
            parent_select(model, criteria, joins)
        } else {
            inline_select(models, model, criteria, joins, &inline)?
        };

        let mut children = vec![];

        for (index, join) in joins.iter().enumerate() {
            if !inline.contains(&index) {
                children.push(ChildQuery::new(models, index, join, strategy.choose(join))?);
            }
        }

        Ok(Plan {
            parent,
            inline: inline
                .into_iter()
                .map(|index| joins[index].alias.clone())
                .collect(),
            children,
        })
    }
}

impl ChildQuery {
    fn new(models: &Models, index: usize, join: &Join, kind: ChildQueryKind) -> Result<ChildQuery> {
        let child = child_model(models, join)?;
        let criteria = &join.criteria;
        let last = join.last();

        let (mut template, key_column) = match join.strategy {
            Strategy::HasFk | Strategy::ViaFk => {
                let mut select = criteria.to_select(&last.child);

                if let Some(columns) = &criteria.select {
                    select = select.columns(with_columns(
                        columns.iter().map(String::as_str),
                        [last.child_key.as_str()],
                    ));
                }

                (select, last.child_key.clone())
            }
            Strategy::ViaJunctor => {
                let first = join.first();
                let table = &last.child;
                let junction = &first.child;

                let columns = match &criteria.select {
                    Some(columns) => with_columns(
                        columns.iter().map(String::as_str),
                        [last.child_key.as_str()],
                    ),
                    None => child.columns().collect(),
                };

                let key_column = format!("{junction}.{}", first.child_key);

                let mut items: Vec<_> = columns
                    .into_iter()
                    .map(|column| SelectItem::aliased(format!("{table}.{column}"), column))
                    .collect();
                items.push(SelectItem::aliased(key_column.clone(), PARENT_FK));

                let select = Select {
                    returning: Returning::Items(items),
                    source: Source::table(table),
                    joins: vec![stmt::Join {
                        kind: JoinKind::Inner,
                        table: junction.clone(),
                        alias: None,
                        on: (
                            format!("{junction}.{}", last.parent_key),
                            format!("{table}.{}", last.child_key),
                        ),
                    }],
                    filter: qualified_filter(table, &criteria.r#where),
                    order_by: qualified_sort(table, &criteria.sort),
                    limit: criteria.limit,
                    offset: criteria.skip,
                };

                (select, key_column)
            }
        };

        let filter = std::mem::take(&mut template.filter);
        template.filter = filter.and(Expr::in_list(key_column.clone(), []));

        Ok(ChildQuery {
            join: index,
            kind,
            template,
            key_column,
        })
    }

    /// Fills the placeholder with the parent keys: an `IN` list, or one
    /// `UNION ALL` branch per key.
    pub(crate) fn substitute(&self, keys: &[Value]) -> Statement {
        match self.kind {
            ChildQueryKind::In => self
                .with_key(Expr::in_list(self.key_column.clone(), keys.iter().cloned()))
                .into(),
            ChildQueryKind::Union => Union {
                branches: keys
                    .iter()
                    .map(|key| self.with_key(Expr::eq(self.key_column.clone(), key.clone())))
                    .collect(),
            }
            .into(),
        }
    }

    /// Most parent keys one substituted statement may carry without going
    /// over the database's compound select or bind parameter limits.
    pub(crate) fn max_keys(&self, capability: &Capability) -> usize {
        let mut binds = 0;
        for_each_leaf(&self.template.filter, |leaf| match leaf {
            Expr::Compare(expr) if !expr.is_null_check() => binds += 1,
            Expr::InList(expr) | Expr::NotInList(expr) => binds += expr.list.len(),
            _ => {}
        });

        let limit = match self.kind {
            // Every key is one more `IN` member.
            ChildQueryKind::In => capability
                .max_bind_params
                .map(|max| max.saturating_sub(binds)),
            // Every key is another branch repeating the template's binds.
            ChildQueryKind::Union => {
                let by_params = capability.max_bind_params.map(|max| max / (binds + 1));

                match (capability.max_compound_select, by_params) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                }
            }
        };

        limit.unwrap_or(usize::MAX).max(1)
    }

    fn with_key(&self, predicate: Expr) -> Select {
        let mut select = self.template.clone();

        if let Expr::And(filter) = &mut select.filter {
            if let Some(placeholder) = filter.operands.last_mut() {
                *placeholder = predicate;
            }
        }

        select
    }
}

fn validate(models: &Models, model: &Model, join: &Join) -> Result<()> {
    join.validate()?;

    let parent = &join.first().parent;
    if *parent != model.table_name || models.by_table(parent).is_none() {
        return Err(Error::consistency_violation(INVALID_PARENT));
    }

    child_model(models, join).map(|_| ())
}

pub(crate) fn child_model<'a>(models: &'a Models, join: &Join) -> Result<&'a Model> {
    let table = &join.last().child;
    models
        .by_table(table)
        .ok_or_else(|| Error::unknown_model(table.as_str()))
}

/// The parent select when nothing is inlined. A narrowed column list still
/// returns the primary key and every key the joins read.
fn parent_select(model: &Model, criteria: &Criteria, joins: &[Join]) -> Select {
    let mut select = criteria.to_select(&model.table_name);

    if let Some(columns) = &criteria.select {
        select = select.columns(with_columns(
            columns.iter().map(String::as_str),
            required_columns(model, joins),
        ));
    }

    select
}

fn inline_select(
    models: &Models,
    model: &Model,
    criteria: &Criteria,
    joins: &[Join],
    inline: &[usize],
) -> Result<Select> {
    let table = &model.table_name;

    let columns = match &criteria.select {
        Some(columns) => with_columns(
            columns.iter().map(String::as_str),
            required_columns(model, joins),
        ),
        None => with_columns(model.columns(), required_columns(model, joins)),
    };

    let mut items: Vec<_> = columns
        .into_iter()
        .map(|column| SelectItem::aliased(format!("{table}.{column}"), column))
        .collect();

    let mut sql_joins = vec![];

    for &index in inline {
        let join = &joins[index];
        let child = child_model(models, join)?;
        let alias = &join.alias;
        let first = join.first();
        let last = join.last();

        match join.strategy {
            Strategy::HasFk | Strategy::ViaFk => sql_joins.push(stmt::Join {
                kind: JoinKind::LeftOuter,
                table: first.child.clone(),
                alias: Some(alias.clone()),
                on: (
                    format!("{table}.{}", first.parent_key),
                    format!("{alias}.{}", first.child_key),
                ),
            }),
            Strategy::ViaJunctor => {
                let junctor = inline_key(alias, "junctor");

                sql_joins.push(stmt::Join {
                    kind: JoinKind::LeftOuter,
                    table: first.child.clone(),
                    alias: Some(junctor.clone()),
                    on: (
                        format!("{table}.{}", first.parent_key),
                        format!("{junctor}.{}", first.child_key),
                    ),
                });
                sql_joins.push(stmt::Join {
                    kind: JoinKind::LeftOuter,
                    table: last.child.clone(),
                    alias: Some(alias.clone()),
                    on: (
                        format!("{junctor}.{}", last.parent_key),
                        format!("{alias}.{}", last.child_key),
                    ),
                });

                items.push(SelectItem::aliased(
                    format!("{junctor}.{}", first.child_key),
                    inline_key(alias, PARENT_FK),
                ));
            }
        }

        for column in with_columns(child.columns(), [last.child_key.as_str()]) {
            items.push(SelectItem::aliased(
                format!("{alias}.{column}"),
                inline_key(alias, column),
            ));
        }
    }

    Ok(Select {
        returning: Returning::Items(items),
        source: Source::table(table),
        joins: sql_joins,
        filter: qualified_filter(table, &criteria.r#where),
        order_by: qualified_sort(table, &criteria.sort),
        limit: None,
        offset: None,
    })
}

fn inline_key(alias: &str, column: &str) -> String {
    format!("{alias}{ALIAS_SEPARATOR}{column}")
}

/// The primary key, then the parent-side key of every join.
fn required_columns<'a>(model: &'a Model, joins: &'a [Join]) -> Vec<&'a str> {
    let mut columns = vec![model.primary_key_column()];
    columns.extend(joins.iter().map(|join| join.first().parent_key.as_str()));
    columns
}

/// `selected`, followed by whichever of `required` it lacks.
fn with_columns<'a>(
    selected: impl IntoIterator<Item = &'a str>,
    required: impl IntoIterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut columns: Vec<&str> = selected.into_iter().collect();

    for column in required {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }

    columns
}

fn qualified_filter(table: &str, filter: &Expr) -> Expr {
    let mut filter = filter.clone();
    Qualify(table).visit_expr_mut(&mut filter);
    filter
}

fn qualified_sort(table: &str, sort: &[OrderBy]) -> Vec<OrderBy> {
    sort.iter()
        .map(|order_by| OrderBy {
            column: qualify(table, &order_by.column),
            direction: order_by.direction,
        })
        .collect()
}

/// Prefixes bare column names with a table, so a predicate stays
/// unambiguous once other tables are joined in.
struct Qualify<'a>(&'a str);

impl VisitMut for Qualify<'_> {
    fn visit_expr_compare_mut(&mut self, i: &mut ExprCompare) {
        i.column = qualify(self.0, &i.column);
    }

    fn visit_expr_in_list_mut(&mut self, i: &mut ExprInList) {
        i.column = qualify(self.0, &i.column);
    }

    fn visit_expr_not_in_list_mut(&mut self, i: &mut ExprInList) {
        i.column = qualify(self.0, &i.column);
    }
}

fn qualify(table: &str, column: &str) -> String {
    if column.contains('.') {
        column.to_string()
    } else {
        format!("{table}.{column}")
    }
}
