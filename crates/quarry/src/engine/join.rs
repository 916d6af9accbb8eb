//! Populating associations: a parent select, then one query per association
//! that could not be joined inline, stitched back into nested records.

mod cache;
use cache::QueryCache;

mod detect;
use detect::detect_children_records;

mod plan;
pub(crate) use plan::Plan;

mod strategy;
pub use strategy::{ChildQueryKind, ChildQueryStrategy, PaginatedUnion};

use super::{normalize, Exec};
use crate::Join;

use quarry_core::{schema::Model, stmt::Record, Result};

/// Runs `plan` and returns the parent records with their associations
/// attached.
///
/// Child queries run one after the other on the operation's connection,
/// once the parent keys are known. Parent keys are split across several
/// child queries when one statement would exceed the database's limits.
pub(crate) async fn populate(
    exec: &mut Exec<'_>,
    model: &Model,
    joins: &[Join],
    plan: Plan,
) -> Result<Vec<Record>> {
    let models = exec.models();
    let primary_key = model.primary_key_column();

    let Plan {
        parent,
        inline,
        children,
    } = plan;

    let rows = exec.select(parent).await?;
    let detected = detect_children_records(primary_key, rows, &inline);

    let mut cache = QueryCache::new(models, joins, primary_key, detected.parents);

    for (alias, records) in detected.children {
        if let Some(index) = joins.iter().position(|join| join.alias == alias) {
            cache.extend(index, records);
        }
    }

    for child in &children {
        let keys = cache.parent_keys(child.join);
        let max_keys = child.max_keys(exec.capability());

        for chunk in keys.chunks(max_keys) {
            let rows = exec.exec(child.substitute(chunk)).await?.into_values()?;
            cache.extend(child.join, rows);
        }
    }

    let mut records = cache.combine_records()?;
    normalize::post_process(&mut records, model, models)?;
    Ok(records)
}
