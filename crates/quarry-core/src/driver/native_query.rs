use crate::stmt::{Statement, Value};

/// A compiled query together with the bookkeeping a connection needs to run
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeQuery {
    /// SQL text in the driver's dialect.
    pub sql: String,

    /// Bind values, in placeholder order.
    pub params: Vec<Value>,

    /// Column manifest: the logical column each bind value belongs to. Always
    /// index-aligned with `params`.
    pub columns: Vec<String>,

    pub kind: QueryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl NativeQuery {
    /// Returns the manifest column for the bind value at `index`.
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }
}

impl From<&Statement> for QueryKind {
    fn from(stmt: &Statement) -> QueryKind {
        match stmt {
            Statement::Select(_) | Statement::Union(_) => QueryKind::Select,
            Statement::Insert(_) => QueryKind::Insert,
            Statement::Update(_) => QueryKind::Update,
            Statement::Delete(_) => QueryKind::Delete,
        }
    }
}
