use super::{
    join::{self, ChildQueryStrategy, Plan},
    normalize, Exec,
};
use crate::{datastore::Datastore, FindQuery};

use quarry_core::{
    schema::Model,
    stmt::{Record, Returning, Select, SelectItem},
    Result,
};

pub(crate) async fn find(
    datastore: &Datastore,
    strategy: &dyn ChildQueryStrategy,
    query: FindQuery,
) -> Result<Vec<Record>> {
    let FindQuery {
        using,
        criteria,
        joins,
        meta,
    } = query;

    let model = datastore.models.resolve(&using)?;

    // Joins are checked against the schema before a connection is taken.
    let plan = if joins.is_empty() {
        None
    } else {
        Some(Plan::build(
            &datastore.models,
            model,
            &criteria,
            &joins,
            strategy,
        )?)
    };

    let mut exec = Exec::open(datastore, &meta).await?;

    let result = match plan {
        Some(plan) => join::populate(&mut exec, model, &joins, plan).await,
        None => select(&mut exec, model, criteria.to_select(&model.table_name)).await,
    };

    exec.finish(result).await
}

async fn select(
    exec: &mut Exec<'_>,
    model: &Model,
    mut select: Select,
) -> Result<Vec<Record>> {
    let pk = model.primary_key_column();

    // A narrowed column list still returns the primary key.
    if let Returning::Items(items) = &mut select.returning {
        let has_pk = items
            .iter()
            .any(|item| matches!(item, SelectItem::Column { name, .. } if name == pk));

        if !has_pk {
            items.push(SelectItem::column(pk));
        }
    }

    let mut records = exec.select(select).await?;
    normalize::post_process(&mut records, model, exec.models())?;
    Ok(records)
}
