//! Coercions between stored and returned values, driven by model attribute
//! types.

use quarry_core::{
    schema::{Association, AttrType, Model},
    stmt::{Record, Value},
    Error, Models, Result,
};

const DEEP_ITERATION: &str =
    "Incoming new records in a s3q should never necessitate deep iteration!";

/// Prepares a record about to be written: JSON attributes are stored as
/// text.
///
/// Only the record's own attributes are visited. An association holding a
/// nested record or list is a caller error.
pub(crate) fn pre_process(record: &mut Record, model: &Model) -> Result<()> {
    for attr in model.definition.values() {
        let Some(value) = record.get_mut(&attr.column_name) else {
            continue;
        };

        if attr.association.is_some() && (value.is_record() || value.is_list()) {
            return Err(Error::consistency_violation(DEEP_ITERATION));
        }

        if attr.ty == AttrType::Json && !value.is_null() {
            *value = Value::String(value.to_json().to_string());
        }
    }

    Ok(())
}

/// Restores returned records: booleans from `0`/`1`, JSON from text. Nested
/// association values are followed to any depth.
///
/// Running it on already restored records changes nothing.
pub(crate) fn post_process(records: &mut [Record], model: &Model, models: &Models) -> Result<()> {
    for record in records {
        post_process_record(record, model, models)?;
    }

    Ok(())
}

fn post_process_record(record: &mut Record, model: &Model, models: &Models) -> Result<()> {
    for attr in model.definition.values() {
        let Some(value) = record.get_mut(&attr.column_name) else {
            continue;
        };

        match (&attr.association, value) {
            (Some(Association::Model(target)), Value::Record(nested)) => {
                post_process_record(nested, target_model(models, target)?, models)?;
            }
            (Some(Association::Collection(target)), Value::List(items)) => {
                let target = target_model(models, target)?;

                for item in items {
                    if let Value::Record(nested) = item {
                        post_process_record(nested, target, models)?;
                    }
                }
            }
            (_, value) => coerce(value, attr.ty),
        }
    }

    Ok(())
}

fn coerce(value: &mut Value, ty: AttrType) {
    match (ty, &*value) {
        (AttrType::Boolean, Value::I64(0)) => *value = Value::Bool(false),
        (AttrType::Boolean, Value::I64(1)) => *value = Value::Bool(true),
        (AttrType::Json, Value::String(text)) => match serde_json::from_str(text) {
            Ok(json) => *value = Value::Json(json),
            Err(err) => {
                tracing::trace!(%err, "JSON column holds text that does not parse; leaving it as is");
            }
        },
        _ => {}
    }
}

fn target_model<'a>(models: &'a Models, identity: &str) -> Result<&'a Model> {
    models.get(identity).ok_or_else(|| Error::unknown_model(identity))
}
