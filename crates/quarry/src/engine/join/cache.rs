use super::plan::{child_model, PARENT_FK};
use crate::{engine::normalize, Join, Strategy};

use indexmap::{IndexMap, IndexSet};
use quarry_core::{
    stmt::{Record, Value},
    Error, Models, Result,
};

/// Child records gathered for one association of one parent.
#[derive(Debug)]
struct Entry {
    /// Distinct children, in the order they were found
    records: IndexSet<Record>,

    /// Key the children are attached under on the parent
    key_name: String,

    singular: bool,
}

/// Matches child rows to parent rows and reassembles them into nested
/// records.
///
/// Every parent gets exactly one entry per association, created up front,
/// so a parent without children still receives an empty list or null.
#[derive(Debug)]
pub(crate) struct QueryCache<'a> {
    models: &'a Models,
    joins: &'a [Join],
    primary_key: &'a str,
    parents: Vec<Record>,

    /// Keyed by association alias and parent primary key
    entries: IndexMap<(String, Value), Entry>,
}

impl<'a> QueryCache<'a> {
    pub(crate) fn new(
        models: &'a Models,
        joins: &'a [Join],
        primary_key: &'a str,
        parents: Vec<Record>,
    ) -> QueryCache<'a> {
        let mut entries = IndexMap::with_capacity(joins.len() * parents.len());

        for join in joins {
            for parent in &parents {
                let pk = parent.get_or_null(primary_key).clone();

                entries.insert(
                    (join.alias.clone(), pk),
                    Entry {
                        records: IndexSet::new(),
                        key_name: join.key_name().to_string(),
                        singular: join.strategy.is_singular(),
                    },
                );
            }
        }

        QueryCache {
            models,
            joins,
            primary_key,
            parents,
            entries,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Distinct non-null values of the parent-side key of `join`, in parent
    /// order. These are what a child query filters on.
    pub(crate) fn parent_keys(&self, join: usize) -> Vec<Value> {
        let parent_key = &self.joins[join].first().parent_key;

        self.parents
            .iter()
            .map(|parent| parent.get_or_null(parent_key))
            .filter(|key| !key.is_null())
            .cloned()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Files child rows of `join` under every parent they link to.
    ///
    /// A child links to a parent when its key equals the parent-side key of
    /// the join. Rows reached through a junction table carry the parent key
    /// in a synthetic column, which is dropped once matched. Null keys never
    /// match.
    pub(crate) fn extend(&mut self, join: usize, rows: Vec<Record>) {
        let joins = self.joins;
        let join = &joins[join];
        let parent_key = &join.first().parent_key;

        let mut by_link: IndexMap<Value, Vec<Value>> = IndexMap::new();

        for parent in &self.parents {
            let link = parent.get_or_null(parent_key);

            if !link.is_null() {
                by_link
                    .entry(link.clone())
                    .or_default()
                    .push(parent.get_or_null(self.primary_key).clone());
            }
        }

        let total = rows.len();
        let mut matched = 0;

        for mut row in rows {
            let link = match join.strategy {
                Strategy::ViaJunctor => row.remove(PARENT_FK).unwrap_or_default(),
                Strategy::HasFk | Strategy::ViaFk => {
                    row.get_or_null(&join.last().child_key).clone()
                }
            };

            let Some(pks) = by_link.get(&link) else {
                continue;
            };

            for pk in pks {
                if let Some(entry) = self.entries.get_mut(&(join.alias.clone(), pk.clone())) {
                    entry.records.insert(row.clone());
                    matched += 1;
                }
            }
        }

        tracing::trace!(alias = %join.alias, rows = total, matched, "cached child records");
    }

    /// Attaches the cached children to their parents: a nested record (or
    /// null) for a singular association, a list for a plural one. Children
    /// are post-processed with their own model.
    pub(crate) fn combine_records(self) -> Result<Vec<Record>> {
        let QueryCache {
            models,
            joins,
            primary_key,
            parents,
            mut entries,
        } = self;

        let mut combined = Vec::with_capacity(parents.len());

        for mut parent in parents {
            let pk = parent.get_or_null(primary_key).clone();

            for join in joins {
                let entry = entries
                    .swap_remove(&(join.alias.clone(), pk.clone()))
                    .ok_or_else(|| {
                        Error::consistency_violation(format!(
                            "no cached `{}` records for parent {pk:?}",
                            join.alias
                        ))
                    })?;

                let mut children: Vec<Record> = entry.records.into_iter().collect();
                normalize::post_process(&mut children, child_model(models, join)?, models)?;

                let value = if entry.singular {
                    children.into_iter().next().map_or(Value::Null, Value::Record)
                } else {
                    Value::List(children.into_iter().map(Value::Record).collect())
                };

                parent.insert(entry.key_name, value);
            }

            combined.push(parent);
        }

        Ok(combined)
    }
}
