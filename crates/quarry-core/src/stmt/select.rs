use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// What the query returns
    pub returning: Returning,

    /// Table or sub-select the rows come from
    pub source: Source,

    /// Joined tables
    pub joins: Vec<Join>,

    /// Row filter
    pub filter: Expr,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Returning {
    /// `*`
    All,
    Items(Vec<SelectItem>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Column {
        /// Column name, optionally qualified as `table.column`
        name: String,
        alias: Option<String>,
    },
    Aggregate {
        func: AggregateFunc,
        /// `None` only for `COUNT(*)`
        column: Option<String>,
        alias: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Avg,
    Sum,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Table {
        name: String,
        alias: Option<String>,
    },
    /// A nested select, used to aggregate over a paginated result.
    Subquery { select: Box<Select>, alias: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,

    /// Name the joined table is referenced by in the rest of the query
    pub alias: Option<String>,

    /// `lhs = rhs`, both qualified column names
    pub on: (String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Select {
    /// `SELECT * FROM <table>`
    pub fn from_table(table: impl Into<String>) -> Select {
        Select {
            returning: Returning::All,
            source: Source::table(table),
            joins: vec![],
            filter: Expr::r#true(),
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Select
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning = Returning::Items(
            columns
                .into_iter()
                .map(SelectItem::column)
                .collect(),
        );
        self
    }

    pub fn filter(mut self, filter: Expr) -> Select {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Select {
        self.order_by.push(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    /// The predicate tree that decides which rows are read.
    ///
    /// Aggregates over a paginated set keep their filter on the inner select,
    /// in which case this unwraps one level.
    pub fn effective_filter(&self) -> &Expr {
        match &self.source {
            Source::Subquery { select, .. } if self.filter.is_true() => select.effective_filter(),
            _ => &self.filter,
        }
    }
}

impl SelectItem {
    pub fn column(name: impl Into<String>) -> SelectItem {
        SelectItem::Column {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> SelectItem {
        SelectItem::Column {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

impl Source {
    pub fn table(name: impl Into<String>) -> Source {
        Source::Table {
            name: name.into(),
            alias: None,
        }
    }
}
