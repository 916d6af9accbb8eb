use super::{normalize, Exec};
use crate::{datastore::Datastore, CreateEachQuery, CreateQuery};

use quarry_core::{
    schema::Model,
    stmt::{Insert, Record, Value},
    Error, Result,
};

pub(crate) async fn create(datastore: &Datastore, query: CreateQuery) -> Result<Option<Record>> {
    let CreateQuery {
        using,
        new_record,
        meta,
    } = query;

    let model = datastore.models.resolve(&using)?;
    let record = prepare(new_record, model)?;

    let mut exec = Exec::open(datastore, &meta).await?;
    let result = create_one(&mut exec, model, record, meta.fetch).await;
    exec.finish(result).await
}

pub(crate) async fn create_each(
    datastore: &Datastore,
    query: CreateEachQuery,
) -> Result<Option<Vec<Record>>> {
    let CreateEachQuery {
        using,
        new_records,
        meta,
    } = query;

    let model = datastore.models.resolve(&using)?;

    if new_records.is_empty() {
        return Ok(meta.fetch.then(Vec::new));
    }

    let records = new_records
        .into_iter()
        .map(|record| prepare(record, model))
        .collect::<Result<Vec<_>>>()?;

    let mut exec = Exec::open(datastore, &meta).await?;

    let result = if meta.fetch {
        create_many_fetched(&mut exec, model, records).await.map(Some)
    } else {
        create_many(&mut exec, model, records).await.map(|_| None)
    };

    exec.finish(result).await
}

async fn create_one(
    exec: &mut Exec<'_>,
    model: &Model,
    record: Record,
    fetch: bool,
) -> Result<Option<Record>> {
    let key = insert_one(exec, model, record).await?;

    if !fetch {
        return Ok(None);
    }

    let key = key.ok_or_else(|| missing_key(model))?;
    let mut records = exec.select_by_keys(model, vec![key]).await?;

    if records.len() != 1 {
        return Err(Error::invalid_result(format!(
            "expected to read back 1 created `{}` record, found {}",
            model.identity,
            records.len()
        )));
    }

    Ok(records.pop())
}

async fn create_many(exec: &mut Exec<'_>, model: &Model, records: Vec<Record>) -> Result<()> {
    if same_shape(&records) {
        exec.exec(Insert::many(&model.table_name, records)).await?;
        return Ok(());
    }

    for record in records {
        exec.exec(Insert::one(&model.table_name, record)).await?;
    }

    Ok(())
}

/// Inserts every record and reads them back, ordered by primary key.
///
/// Unless the database reports every key of a batched insert, records are
/// inserted one at a time so each generated key can be captured.
async fn create_many_fetched(
    exec: &mut Exec<'_>,
    model: &Model,
    records: Vec<Record>,
) -> Result<Vec<Record>> {
    let pk = model.primary_key_column();
    let supplies_keys = records.iter().any(|record| record.contains_key(pk));

    let keys = if exec.capability().bulk_insert_ids && !supplies_keys && same_shape(&records) {
        let expected = records.len();
        let keys = exec
            .exec(Insert::many(&model.table_name, records))
            .await?
            .into_inserted_ids()?;

        if keys.len() != expected {
            return Err(Error::invalid_result(format!(
                "batched insert into `{}` reported {} generated keys for {expected} records",
                model.table_name,
                keys.len()
            )));
        }

        keys
    } else {
        let mut keys = Vec::with_capacity(records.len());

        for record in records {
            let key = insert_one(exec, model, record).await?;
            keys.push(key.ok_or_else(|| missing_key(model))?);
        }

        keys
    };

    exec.select_by_keys(model, keys).await
}

/// Inserts one record and returns its primary key: the one supplied with
/// the record, or else the one the database generated.
async fn insert_one(exec: &mut Exec<'_>, model: &Model, record: Record) -> Result<Option<Value>> {
    let supplied = record.get(model.primary_key_column()).cloned();

    let generated = exec
        .exec(Insert::one(&model.table_name, record))
        .await?
        .into_inserted_ids()?;

    Ok(supplied.or_else(|| generated.into_iter().next()))
}

/// Strips a null primary key, so the database generates one, and
/// stringifies JSON attributes.
fn prepare(mut record: Record, model: &Model) -> Result<Record> {
    if model.primary_key.is_empty() {
        return Err(Error::invalid_options("primaryKey"));
    }

    let pk = model.primary_key_column();
    if record.get(pk).is_some_and(Value::is_null) {
        record.remove(pk);
    }

    normalize::pre_process(&mut record, model)?;
    Ok(record)
}

/// True when every record carries the same set of columns, which a single
/// batched `INSERT` requires. Empty records only batch alone.
fn same_shape(records: &[Record]) -> bool {
    let Some((first, rest)) = records.split_first() else {
        return true;
    };

    let keys = first.sorted_keys();
    if keys.is_empty() {
        return rest.is_empty();
    }

    rest.iter().all(|record| record.sorted_keys() == keys)
}

fn missing_key(model: &Model) -> Error {
    Error::invalid_result(format!(
        "the database did not report the primary key of the created `{}` record",
        model.identity
    ))
}
