use super::Exec;
use crate::{datastore::Datastore, AggregateQuery, Criteria};

use quarry_core::{
    stmt::{AggregateFunc, Expr, Returning, Select, SelectItem, Source, Value},
    Error, Result,
};

/// Alias of the single column an aggregate select returns.
const RESULT: &str = "result";

pub(crate) async fn aggregate(
    datastore: &Datastore,
    query: AggregateQuery,
    func: AggregateFunc,
) -> Result<Value> {
    let model = datastore.models.resolve(&query.using)?;

    let column = match func {
        AggregateFunc::Count => None,
        AggregateFunc::Avg | AggregateFunc::Sum => Some(
            query
                .numeric_column
                .filter(|column| !column.is_empty())
                .ok_or_else(|| Error::invalid_options("numericAttrName"))?,
        ),
    };

    let select = aggregate_select(&model.table_name, &query.criteria, func, column);

    let mut exec = Exec::open(datastore, &query.meta).await?;
    let result = exec.select(select).await.and_then(|rows| {
        rows.into_iter()
            .next()
            .and_then(|mut row| row.remove(RESULT))
            .ok_or_else(|| Error::invalid_result("aggregate query returned no rows"))
    });
    exec.finish(result).await
}

/// `SELECT AGG(column) AS "result"`, over the filtered table or, when the
/// criteria paginate, over a sub-select holding the page.
fn aggregate_select(
    table: &str,
    criteria: &Criteria,
    func: AggregateFunc,
    column: Option<String>,
) -> Select {
    let returning = Returning::Items(vec![SelectItem::Aggregate {
        func,
        column: column.clone(),
        alias: Some(RESULT.to_string()),
    }]);

    if !criteria.is_paginated() {
        let mut select = Select::from_table(table).filter(criteria.r#where.clone());
        select.returning = returning;
        return select;
    }

    let mut page = criteria.to_select(table);
    page.returning = match column {
        Some(column) => Returning::Items(vec![SelectItem::column(column)]),
        None => Returning::All,
    };

    Select {
        returning,
        source: Source::Subquery {
            select: Box::new(page),
            alias: "paginated".to_string(),
        },
        joins: vec![],
        filter: Expr::r#true(),
        order_by: vec![],
        limit: None,
        offset: None,
    }
}

/// Reads an `AVG`/`SUM` result. Aggregating no rows yields `0`.
pub(crate) fn aggregate_f64(value: Value) -> Result<f64> {
    match value {
        Value::Null => Ok(0.0),
        value => value.as_f64().ok_or_else(|| {
            Error::invalid_result(format!("expected a numeric aggregate, got {value:?}"))
        }),
    }
}

pub(crate) fn aggregate_u64(value: Value) -> Result<u64> {
    match value {
        Value::Null => Ok(0),
        Value::I64(count) => u64::try_from(count)
            .map_err(|_| Error::invalid_result(format!("negative count {count}"))),
        value => Err(Error::invalid_result(format!(
            "expected an integer count, got {value:?}"
        ))),
    }
}
