use super::{normalize, Exec};
use crate::{datastore::Datastore, UpdateQuery};

use quarry_core::{
    schema::Model,
    stmt::{Record, Select, Update, Value},
    Error, Result,
};

const PK_COLLISION: &str =
    "Updated multiple records to have the same primary key value. (PK values should be unique!)";

pub(crate) async fn update(
    datastore: &Datastore,
    query: UpdateQuery,
) -> Result<Option<Vec<Record>>> {
    let UpdateQuery {
        using,
        criteria,
        mut values_to_set,
        meta,
    } = query;

    let model = datastore.models.resolve(&using)?;

    if values_to_set.is_empty() {
        return Err(Error::invalid_options("valuesToSet"));
    }

    if criteria.is_paginated() {
        return Err(Error::invalid_options(
            "criteria (`limit` and `skip` cannot narrow an update)",
        ));
    }

    normalize::pre_process(&mut values_to_set, model)?;

    let stmt = Update {
        table: model.table_name.clone(),
        assignments: values_to_set,
        filter: criteria.r#where,
    };

    let mut exec = Exec::open(datastore, &meta).await?;

    let result = if meta.fetch {
        update_fetched(&mut exec, model, stmt).await.map(Some)
    } else {
        exec.exec(stmt).await.map(|_| None)
    };

    exec.finish(result).await
}

/// Collects the keys of the matching rows, runs the update, then reads the
/// rows back by key.
///
/// When the update assigns the primary key itself the old keys no longer
/// address anything. The new key stands in for the old one, which is only
/// sound when a single row matched; that is checked before anything is
/// written.
async fn update_fetched(exec: &mut Exec<'_>, model: &Model, stmt: Update) -> Result<Vec<Record>> {
    let pk = model.primary_key_column();

    let select = Select::from_table(&model.table_name)
        .columns([pk])
        .filter(stmt.filter.clone());

    let mut keys: Vec<Value> = exec
        .select(select)
        .await?
        .into_iter()
        .map(|mut row| row.remove(pk).unwrap_or_default())
        .collect();

    if let Some(new_key) = stmt.assignments.get(pk) {
        match keys.len() {
            0 => {}
            1 => keys = vec![new_key.clone()],
            _ => return Err(Error::consistency_violation(PK_COLLISION)),
        }
    }

    exec.exec(stmt).await?;

    if keys.is_empty() {
        return Ok(vec![]);
    }

    exec.select_by_keys(model, keys).await
}
