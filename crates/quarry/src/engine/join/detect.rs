use super::plan::{ALIAS_SEPARATOR, PARENT_FK};

use indexmap::IndexMap;
use quarry_core::stmt::{Record, Value};

/// Parent rows and inlined child rows, pulled apart.
#[derive(Debug, Default)]
pub(crate) struct Detected {
    /// Distinct parent rows, in the order first seen
    pub(crate) parents: Vec<Record>,

    /// Child rows found inline, by association alias
    pub(crate) children: IndexMap<String, Vec<Record>>,
}

/// Splits the flat rows of a parent select into parent and child records.
///
/// A `LEFT OUTER JOIN` repeats the parent columns once per child, so
/// parents are told apart by primary key. Columns named `<alias>__<column>`
/// belong to the child of `alias`. A child part whose own columns are all
/// null is a parent without children; the junction's parent key does not
/// count, since a junction row may point at a missing child.
pub(crate) fn detect_children_records(
    primary_key: &str,
    rows: Vec<Record>,
    aliases: &[String],
) -> Detected {
    let mut parents: IndexMap<Value, Record> = IndexMap::new();
    let mut children: IndexMap<String, Vec<Record>> = aliases
        .iter()
        .map(|alias| (alias.clone(), vec![]))
        .collect();

    for row in rows {
        let mut parent = Record::new();
        let mut parts: IndexMap<&str, Record> = IndexMap::new();

        for (key, value) in row {
            match split(&key, aliases) {
                Some((alias, column)) => {
                    parts.entry(alias).or_default().insert(column, value);
                }
                None => {
                    parent.insert(key, value);
                }
            }
        }

        for (alias, part) in parts {
            if part
                .iter()
                .all(|(column, value)| column == PARENT_FK || value.is_null())
            {
                continue;
            }

            if let Some(records) = children.get_mut(alias) {
                records.push(part);
            }
        }

        let key = parent.get_or_null(primary_key).clone();
        parents.entry(key).or_insert(parent);
    }

    Detected {
        parents: parents.into_values().collect(),
        children,
    }
}

fn split<'a>(key: &str, aliases: &'a [String]) -> Option<(&'a str, String)> {
    aliases.iter().find_map(|alias| {
        let column = key
            .strip_prefix(alias.as_str())?
            .strip_prefix(ALIAS_SEPARATOR)?;

        Some((alias.as_str(), column.to_string()))
    })
}
