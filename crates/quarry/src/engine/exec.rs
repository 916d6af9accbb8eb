use super::{columns, gateway::ConnectionHandle, normalize};
use crate::{datastore::Datastore, Meta};

use quarry_core::{
    driver::{Capability, NativeQuery, QueryKind, Response},
    schema::Model,
    stmt::{Direction, Expr, Record, Select, Statement, Value},
    Error, Models, Result,
};

/// Runs the statements of one operation on one connection.
pub(crate) struct Exec<'a> {
    datastore: &'a Datastore,
    connection: ConnectionHandle,
}

impl<'a> Exec<'a> {
    pub(crate) async fn open(datastore: &'a Datastore, meta: &Meta) -> Result<Exec<'a>> {
        let connection = ConnectionHandle::spawn_or_lease(datastore, meta).await?;

        Ok(Exec {
            datastore,
            connection,
        })
    }

    pub(crate) fn capability(&self) -> &'static Capability {
        self.datastore.pool.capability()
    }

    pub(crate) fn models(&self) -> &'a Models {
        &self.datastore.models
    }

    pub(crate) fn model(&self, name: &str) -> Result<&'a Model> {
        self.datastore.models.resolve(name)
    }

    /// Compiles `stmt`, pairs its bind values with the column manifest and
    /// runs it.
    pub(crate) async fn exec(&mut self, stmt: impl Into<Statement>) -> Result<Response> {
        let stmt = stmt.into();
        let compiled = self.datastore.pool.compiler().compile(&stmt)?;
        let columns = columns::extract_columns(&stmt, &compiled.native_query);

        let query = NativeQuery {
            sql: compiled.native_query,
            params: compiled.values_to_escape,
            columns,
            kind: QueryKind::from(&stmt),
        };

        tracing::debug!(
            datastore = %self.datastore.identity(),
            leased = self.connection.is_leased(),
            sql = %query.sql,
            binds = query.params.len(),
            columns = ?query.columns,
            "exec native query"
        );

        self.connection
            .connection()
            .exec(query)
            .await
            .map_err(Error::without_catchall)
    }

    pub(crate) async fn select(&mut self, select: Select) -> Result<Vec<Record>> {
        self.exec(select).await?.into_values()
    }

    /// Reads back the records of `model` whose primary key is in `keys`,
    /// ordered by primary key and post-processed.
    pub(crate) async fn select_by_keys(
        &mut self,
        model: &Model,
        keys: Vec<Value>,
    ) -> Result<Vec<Record>> {
        let pk = model.primary_key_column();

        let select = Select::from_table(&model.table_name)
            .filter(Expr::in_list(pk, keys))
            .order_by(pk, Direction::Asc);

        let mut records = self.select(select).await?;
        normalize::post_process(&mut records, model, self.models())?;
        Ok(records)
    }

    /// Ends the operation, releasing the connection unless it was leased.
    pub(crate) async fn finish<T>(self, result: Result<T>) -> Result<T> {
        self.connection.release(result).await
    }
}
