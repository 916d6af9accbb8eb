#[macro_use]
mod fmt;
use fmt::ToSql;

mod column;
use column::Column;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;

use quarry_core::{
    driver::{CompiledQuery, Compiler},
    stmt::{Insert, Statement},
    Error, Result,
};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// Current query depth. Predicates below the top level are wrapped in
    /// parentheses.
    depth: usize,
}

impl Serializer {
    /// Serializes `stmt`, pushing every bound value onto `params` in
    /// placeholder order.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> Result<String> {
        match stmt {
            Statement::Insert(insert) => check_insert(insert)?,
            Statement::Update(update) if update.assignments.is_empty() => {
                return Err(Error::invalid_statement(format!(
                    "update of `{}` has no assignments",
                    update.table
                )));
            }
            Statement::Union(union) if union.branches.is_empty() => {
                return Err(Error::invalid_statement("a union needs at least one branch"));
            }
            _ => {}
        }

        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            depth: 0,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        Ok(ret)
    }

    fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }

    fn is_sqlite(&self) -> bool {
        matches!(self.flavor, Flavor::Sqlite)
    }
}

impl Compiler for Serializer {
    fn compile(&self, stmt: &Statement) -> Result<CompiledQuery> {
        let mut values_to_escape = vec![];
        let native_query = self.serialize(stmt, &mut values_to_escape)?;

        Ok(CompiledQuery {
            native_query,
            values_to_escape,
        })
    }
}

/// A batch insert lists its columns once, so every record must carry the
/// same keys.
fn check_insert(insert: &Insert) -> Result<()> {
    let Some(first) = insert.records.first() else {
        return Err(Error::invalid_statement(format!(
            "insert into `{}` has no records",
            insert.into
        )));
    };

    let columns = first.sorted_keys();

    if columns.is_empty() && insert.records.len() > 1 {
        return Err(Error::invalid_statement(
            "a batch insert cannot consist of empty records",
        ));
    }

    for record in &insert.records[1..] {
        if record.sorted_keys() != columns {
            return Err(Error::invalid_statement(format!(
                "records inserted into `{}` in one batch must have the same keys; \
                 expected {columns:?}, got {:?}",
                insert.into,
                record.sorted_keys()
            )));
        }
    }

    Ok(())
}
