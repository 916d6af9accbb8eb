use super::{CompareOp, Expr, Value};
use crate::{Error, Result};

use serde_json::{Map, Value as Json};

/// Parses a criteria `where` clause written in the ORM's object notation:
///
/// ```json
/// { "and": [ { "age": { ">": 30 } }, { "role": { "in": ["admin", "owner"] } } ] }
/// ```
///
/// An object with several keys is the conjunction of those keys. A bare
/// array value is shorthand for `in`.
impl TryFrom<&Json> for Expr {
    type Error = Error;

    fn try_from(json: &Json) -> Result<Expr> {
        match json {
            Json::Null => Ok(Expr::r#true()),
            Json::Object(clause) => parse_clause(clause),
            other => Err(Error::invalid_statement(format!(
                "`where` must be an object; got `{other}`"
            ))),
        }
    }
}

impl TryFrom<Json> for Expr {
    type Error = Error;

    fn try_from(json: Json) -> Result<Expr> {
        Expr::try_from(&json)
    }
}

fn parse_clause(clause: &Map<String, Json>) -> Result<Expr> {
    let mut operands = Vec::with_capacity(clause.len());

    for (key, value) in clause {
        operands.push(match key.as_str() {
            "and" => Expr::and_from_vec(parse_branches(key, value)?),
            "or" => Expr::or_from_vec(parse_branches(key, value)?),
            column => parse_constraint(column, value)?,
        });
    }

    Ok(match operands.len() {
        1 => operands.remove(0),
        _ => Expr::and_from_vec(operands),
    })
}

fn parse_branches(key: &str, value: &Json) -> Result<Vec<Expr>> {
    let Json::Array(branches) = value else {
        return Err(Error::invalid_statement(format!(
            "`{key}` must be an array of clauses"
        )));
    };

    branches.iter().map(Expr::try_from).collect()
}

fn parse_constraint(column: &str, value: &Json) -> Result<Expr> {
    match value {
        Json::Array(items) => Ok(Expr::in_list(column, items.iter().map(Value::from_json))),
        Json::Object(modifiers) => {
            let mut operands = Vec::with_capacity(modifiers.len());

            for (modifier, operand) in modifiers {
                operands.push(parse_modifier(column, modifier, operand)?);
            }

            Ok(match operands.len() {
                1 => operands.remove(0),
                _ => Expr::and_from_vec(operands),
            })
        }
        scalar => Ok(Expr::eq(column, Value::from_json(scalar))),
    }
}

fn parse_modifier(column: &str, modifier: &str, operand: &Json) -> Result<Expr> {
    let op = match modifier {
        "in" | "nin" => {
            let Json::Array(items) = operand else {
                return Err(Error::invalid_statement(format!(
                    "`{modifier}` modifier on `{column}` expects an array"
                )));
            };
            let list = items.iter().map(Value::from_json);

            return Ok(if modifier == "in" {
                Expr::in_list(column, list)
            } else {
                Expr::not_in_list(column, list)
            });
        }
        "<" => CompareOp::Lt,
        "<=" => CompareOp::Le,
        ">" => CompareOp::Gt,
        ">=" => CompareOp::Ge,
        "!=" => CompareOp::Ne,
        "like" => CompareOp::Like,
        other => {
            return Err(Error::invalid_statement(format!(
                "unsupported modifier `{other}` on `{column}`"
            )))
        }
    };

    Ok(Expr::compare(column, op, Value::from_json(operand)))
}
