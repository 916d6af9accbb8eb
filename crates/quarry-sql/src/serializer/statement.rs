use super::{Column, Comma, Delimited, Formatter, Ident, Params, ToSql};

use quarry_core::stmt::{self, AggregateFunc, Direction, JoinKind};

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Union(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let returning = &self.returning;
        let source = &self.source;

        fmt!(f, "SELECT " returning " FROM " source);

        for join in &self.joins {
            fmt!(f, join);
        }

        fmt!(f, Where(&self.filter));

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
        .to_sql(f);
    }
}

impl ToSql for &stmt::Returning {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Returning::All => fmt!(f, "*"),
            stmt::Returning::Items(items) => fmt!(f, Comma(items)),
        }
    }
}

impl ToSql for &stmt::SelectItem {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let alias = match self {
            stmt::SelectItem::Column { name, alias } => {
                fmt!(f, Column(name));
                alias
            }
            stmt::SelectItem::Aggregate {
                func,
                column,
                alias,
            } => {
                let func = match func {
                    AggregateFunc::Avg => "AVG(",
                    AggregateFunc::Sum => "SUM(",
                    AggregateFunc::Count => "COUNT(",
                };

                match column {
                    Some(column) => fmt!(f, func Column(column) ")"),
                    None => fmt!(f, func "*)"),
                }
                alias
            }
        };

        if let Some(alias) = alias {
            fmt!(f, " AS " Ident(alias));
        }
    }
}

impl ToSql for &stmt::Source {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Source::Table { name, alias } => {
                fmt!(f, Ident(name));
                if let Some(alias) = alias {
                    fmt!(f, " AS " Ident(alias));
                }
            }
            stmt::Source::Subquery { select, alias } => {
                let depth = std::mem::replace(&mut f.depth, 0);
                let select: &stmt::Select = select;
                fmt!(f, "(" select ") AS " Ident(alias));
                f.depth = depth;
            }
        }
    }
}

impl ToSql for &stmt::Join {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let kind = match self.kind {
            JoinKind::Inner => " INNER JOIN ",
            JoinKind::LeftOuter => " LEFT OUTER JOIN ",
        };
        let (lhs, rhs) = &self.on;

        fmt!(f, kind Ident(&self.table));

        if let Some(alias) = &self.alias {
            fmt!(f, " AS " Ident(alias));
        }

        fmt!(f, " ON " Column(lhs) " = " Column(rhs));
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        };

        fmt!(f, Column(&self.column) direction);
    }
}

impl ToSql for &stmt::Union {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let branches = self
            .branches
            .iter()
            .enumerate()
            .map(|(index, select)| UnionBranch { index, select });

        fmt!(f, Delimited(branches, " UNION ALL "));
    }
}

/// Each branch is wrapped in a derived table so it can keep its own
/// `ORDER BY`/`LIMIT`, which SQLite does not allow on compound members.
struct UnionBranch<'a> {
    index: usize,
    select: &'a stmt::Select,
}

impl ToSql for UnionBranch<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let alias = format!("union_{}", self.index);
        fmt!(f, "SELECT * FROM (" self.select ") AS " Ident(alias));
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let columns = self.records[0].sorted_keys();

        fmt!(f, "INSERT INTO " Ident(&self.into));

        if columns.is_empty() {
            if f.serializer.is_mysql() {
                fmt!(f, " () VALUES ()");
            } else {
                fmt!(f, " DEFAULT VALUES");
            }
            return;
        }

        fmt!(f, " (" Comma(columns.iter().map(Ident)) ") VALUES ");

        let mut s = "";
        for record in &self.records {
            let values = columns.iter().map(|column| record.get_or_null(column));
            fmt!(f, s "(" Comma(values) ")");
            s = ", ";
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = self
            .assignments
            .sorted_keys()
            .into_iter()
            .map(|column| Assignment {
                column,
                value: self.assignments.get_or_null(column),
            });

        fmt!(f, "UPDATE " Ident(&self.table) " SET " Comma(assignments) Where(&self.filter));
    }
}

struct Assignment<'a> {
    column: &'a str,
    value: &'a stmt::Value,
}

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.column) " = " self.value);
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE FROM " Ident(&self.from) Where(&self.filter));
    }
}

/// ` WHERE <filter>`, omitted when the filter matches everything.
struct Where<'a>(&'a stmt::Expr);

impl ToSql for Where<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if !self.0.is_true() {
            fmt!(f, " WHERE " self.0);
        }
    }
}

struct Pagination {
    limit: Option<u64>,
    offset: Option<u64>,
}

impl ToSql for Pagination {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match (self.limit, self.offset) {
            (Some(limit), _) => fmt!(f, " LIMIT " limit),
            // SQLite and MySQL only accept OFFSET after a LIMIT
            (None, Some(_)) if f.serializer.is_sqlite() => fmt!(f, " LIMIT -1"),
            (None, Some(_)) if f.serializer.is_mysql() => fmt!(f, " LIMIT 18446744073709551615"),
            (None, _) => {}
        }

        if let Some(offset) = self.offset {
            fmt!(f, " OFFSET " offset);
        }
    }
}
