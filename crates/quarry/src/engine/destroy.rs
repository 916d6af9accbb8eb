use super::{normalize, Exec};
use crate::{datastore::Datastore, DestroyQuery};

use quarry_core::{
    schema::Model,
    stmt::{Delete, Record, Select},
    Error, Result,
};

pub(crate) async fn destroy(
    datastore: &Datastore,
    query: DestroyQuery,
) -> Result<Option<Vec<Record>>> {
    let DestroyQuery {
        using,
        criteria,
        meta,
    } = query;

    let model = datastore.models.resolve(&using)?;

    if criteria.is_paginated() {
        return Err(Error::invalid_options(
            "criteria (`limit` and `skip` cannot narrow a destroy)",
        ));
    }

    let stmt = Delete {
        from: model.table_name.clone(),
        filter: criteria.r#where,
    };

    let mut exec = Exec::open(datastore, &meta).await?;

    let result = if meta.fetch {
        destroy_fetched(&mut exec, model, stmt).await.map(Some)
    } else {
        exec.exec(stmt).await.map(|_| None)
    };

    exec.finish(result).await
}

/// Snapshots the matching rows, then deletes them.
async fn destroy_fetched(exec: &mut Exec<'_>, model: &Model, stmt: Delete) -> Result<Vec<Record>> {
    let select = Select::from_table(&model.table_name).filter(stmt.filter.clone());

    let mut records = exec.select(select).await?;
    exec.exec(stmt).await?;

    normalize::post_process(&mut records, model, exec.models())?;
    Ok(records)
}
