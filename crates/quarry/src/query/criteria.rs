use quarry_core::{
    stmt::{Direction, Expr, OrderBy, Select},
    Error, Result,
};
use serde_json::Value as Json;

/// Which rows an operation applies to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub r#where: Expr,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub sort: Vec<OrderBy>,

    /// Columns to return. `None` returns every column.
    pub select: Option<Vec<String>>,
}

impl Criteria {
    pub fn new() -> Criteria {
        Criteria::default()
    }

    pub fn filter(mut self, expr: Expr) -> Criteria {
        self.r#where = expr;
        self
    }

    pub fn limit(mut self, limit: u64) -> Criteria {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u64) -> Criteria {
        self.skip = Some(skip);
        self
    }

    pub fn sort(mut self, column: impl Into<String>, direction: Direction) -> Criteria {
        self.sort.push(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn select<I, S>(mut self, columns: I) -> Criteria
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// True when the criteria narrows nothing.
    pub fn is_empty(&self) -> bool {
        self.r#where.is_true()
            && !self.is_paginated()
            && self.sort.is_empty()
            && self.select.is_none()
    }

    pub fn is_paginated(&self) -> bool {
        self.limit.is_some() || self.skip.is_some()
    }

    /// `SELECT` over `table` honoring every clause of the criteria.
    pub(crate) fn to_select(&self, table: &str) -> Select {
        let mut select = Select::from_table(table).filter(self.r#where.clone());

        if let Some(columns) = &self.select {
            select = select.columns(columns.iter().cloned());
        }

        select.order_by = self.sort.clone();
        select.limit = self.limit;
        select.offset = self.skip;
        select
    }

    /// Reads criteria from their JSON form:
    ///
    /// ```json
    /// { "where": { "age": { ">": 30 } }, "limit": 10, "skip": 5,
    ///   "sort": [{ "name": "ASC" }], "select": ["id", "name"] }
    /// ```
    pub fn from_json(json: &Json) -> Result<Criteria> {
        let Json::Object(fields) = json else {
            return Err(Error::invalid_options("criteria"));
        };

        let mut criteria = Criteria::new();

        for (key, value) in fields {
            match key.as_str() {
                "where" => criteria.r#where = Expr::try_from(value)?,
                "limit" => criteria.limit = Some(as_count(value, "limit")?),
                "skip" => criteria.skip = Some(as_count(value, "skip")?),
                "sort" => criteria.sort = parse_sort(value)?,
                "select" => {
                    let Json::Array(columns) = value else {
                        return Err(Error::invalid_options("criteria.select"));
                    };

                    criteria.select = Some(
                        columns
                            .iter()
                            .map(|column| {
                                column
                                    .as_str()
                                    .map(str::to_string)
                                    .ok_or_else(|| Error::invalid_options("criteria.select"))
                            })
                            .collect::<Result<_>>()?,
                    );
                }
                other => return Err(Error::invalid_options(format!("criteria.{other}"))),
            }
        }

        Ok(criteria)
    }
}

fn as_count(value: &Json, field: &str) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| Error::invalid_options(format!("criteria.{field}")))
}

fn parse_sort(value: &Json) -> Result<Vec<OrderBy>> {
    let Json::Array(clauses) = value else {
        return Err(Error::invalid_options("criteria.sort"));
    };

    let mut sort = vec![];

    for clause in clauses {
        let Some(clause) = clause.as_object() else {
            return Err(Error::invalid_options("criteria.sort"));
        };

        for (column, direction) in clause {
            let direction = match direction.as_str().map(str::to_ascii_uppercase).as_deref() {
                Some("ASC") => Direction::Asc,
                Some("DESC") => Direction::Desc,
                _ => return Err(Error::invalid_options("criteria.sort")),
            };

            sort.push(OrderBy {
                column: column.clone(),
                direction,
            });
        }
    }

    Ok(sort)
}
