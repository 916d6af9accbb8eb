use crate::{stmt::Statement, stmt::Value, Result};

use std::fmt::Debug;

/// Native SQL produced from a [`Statement`], ready to be executed.
///
/// `values_to_escape` holds the bind values in the order the placeholders
/// appear in `native_query`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub native_query: String,
    pub values_to_escape: Vec<Value>,
}

/// Turns declarative statements into a dialect's native SQL.
pub trait Compiler: Debug + Send + Sync + 'static {
    fn compile(&self, stmt: &Statement) -> Result<CompiledQuery>;
}
