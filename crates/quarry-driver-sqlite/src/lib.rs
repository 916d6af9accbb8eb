mod error;
use error::classify;

mod value;
pub(crate) use value::Value;

use quarry_core::{
    async_trait,
    driver::{Capability, Compiler, NativeQuery, QueryKind, Response},
    stmt::{self, Record},
    Error, Result,
};
use quarry_sql::Serializer;
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL. The path
    /// `:memory:` selects an in-memory database.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::bad_configuration(format!("invalid connection URL `{url_str}`: {err}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::bad_configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl quarry_core::Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn compiler(&self) -> Arc<dyn Compiler> {
        Arc::new(Serializer::sqlite())
    }

    async fn connect(&self) -> Result<Box<dyn quarry_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }

    fn max_connections(&self) -> Option<usize> {
        matches!(self, Self::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory()
            .map_err(|err| Error::bad_connection(err.to_string()))?;

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path.as_ref()).map_err(|err| {
            Error::bad_connection(format!("{}: {err}", path.as_ref().display()))
        })?;

        Ok(Self { connection })
    }

    /// Binding happens inside rusqlite, which cannot say which column a
    /// value was meant for, so unbindable values are caught up front.
    fn check_params(query: &NativeQuery) -> Result<()> {
        if query.columns.len() != query.params.len() {
            return Err(Error::invalid_statement(format!(
                "column manifest has {} entries but the query binds {} values; sql={}",
                query.columns.len(),
                query.params.len(),
                query.sql
            )));
        }

        for (column, param) in query.columns.iter().zip(&query.params) {
            if let stmt::Value::List(_) | stmt::Value::Record(_) = param {
                return Err(Error::invalid_statement(format!(
                    "value bound to column `{column}` is not a scalar"
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl quarry_core::Connection for Connection {
    async fn exec(&mut self, query: NativeQuery) -> Result<Response> {
        Self::check_params(&query)?;

        tracing::trace!(sql = %query.sql, params = query.params.len(), "sqlite exec");

        let mut stmt = self.connection.prepare_cached(&query.sql).map_err(classify)?;

        let params = query
            .params
            .into_iter()
            .map(Value::from)
            .collect::<Vec<_>>();

        if stmt.column_count() == 0 {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(classify)? as u64;

            if query.kind != QueryKind::Insert {
                return Ok(Response::count(count));
            }

            let ids = if count == 1 {
                vec![stmt::Value::I64(self.connection.last_insert_rowid())]
            } else {
                vec![]
            };

            return Ok(Response::inserted(count, ids));
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(classify)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(classify)? {
            let mut record = Record::new();

            for (index, column) in columns.iter().enumerate() {
                let value = Value::from_sql(row, index).map_err(classify)?;
                record.insert(column.as_str(), value.into_inner());
            }

            ret.push(record);
        }

        Ok(Response::values(ret))
    }

    async fn release(&mut self) -> Result<()> {
        // A statement that failed mid-transaction must not leak its
        // transaction into the next borrower.
        if !self.connection.is_autocommit() {
            self.connection
                .execute_batch("ROLLBACK")
                .map_err(|err| Error::bad_connection(err.to_string()))?;
        }

        Ok(())
    }
}
