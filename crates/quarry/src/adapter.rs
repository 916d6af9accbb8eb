use crate::{
    datastore::Datastore,
    db::{self, Pool, PoolConnection},
    engine::{self, join::ChildQueryStrategy},
    query::{AggregateQuery, CreateEachQuery, CreateQuery, DestroyQuery, FindQuery, UpdateQuery},
    DatastoreConfig,
};

use indexmap::IndexMap;
use quarry_core::{
    driver::Driver,
    schema::Model,
    stmt::{AggregateFunc, Record},
    Error, Models, Result,
};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// The adapter: a registry of datastores and the entry point of every
/// operation.
///
/// Cloning an `Adapter` yields another handle to the same registry.
#[derive(Debug, Clone)]
pub struct Adapter {
    datastores: Arc<RwLock<IndexMap<String, Arc<Datastore>>>>,
    child_queries: Arc<dyn ChildQueryStrategy>,
}

/// A connection checked out by the caller and passed to operations through
/// [`Meta::leased_connection`](crate::Meta::leased_connection).
///
/// Operations lock it for their duration and never release it. Dropping the
/// last clone returns it to its pool.
#[derive(Debug, Clone)]
pub struct LeasedConnection {
    identity: Arc<str>,
    connection: Arc<Mutex<PoolConnection>>,
}

impl Adapter {
    pub fn new() -> Adapter {
        Adapter {
            datastores: Arc::default(),
            child_queries: Arc::new(engine::join::PaginatedUnion),
        }
    }

    /// Replaces the rule deciding how populated associations are queried.
    pub fn with_child_query_strategy(
        mut self,
        strategy: impl ChildQueryStrategy + 'static,
    ) -> Adapter {
        self.child_queries = Arc::new(strategy);
        self
    }

    /// Registers a datastore, resolving its driver from the connection URL.
    pub async fn register_datastore(
        &self,
        config: DatastoreConfig,
        models: impl IntoIterator<Item = Model>,
    ) -> Result<()> {
        let models = Models::new(models);
        self.check_registration(&config, &models).await?;

        let driver = db::connect(&config.connection_url()?)?;
        self.register(config, models, driver).await
    }

    /// Registers a datastore backed by `driver`.
    pub async fn register_datastore_with_driver(
        &self,
        config: DatastoreConfig,
        models: impl IntoIterator<Item = Model>,
        driver: impl Driver,
    ) -> Result<()> {
        let models = Models::new(models);
        self.check_registration(&config, &models).await?;

        self.register(config, models, Box::new(driver)).await
    }

    async fn check_registration(&self, config: &DatastoreConfig, models: &Models) -> Result<()> {
        if config.identity.is_empty() {
            return Err(Error::bad_configuration(
                "A datastore must have a non-empty `identity`.",
            ));
        }

        if self.datastores.read().await.contains_key(&config.identity) {
            return Err(already_registered(&config.identity));
        }

        for model in models.iter() {
            let primary_key = model.primary_key_attribute()?;

            if !primary_key.required && !primary_key.auto_increment {
                return Err(Error::bad_configuration(format!(
                    "In model `{}`, primary key `{}` must have either `required` or `autoIncrement` set.",
                    model.identity, model.primary_key
                )));
            }
        }

        Ok(())
    }

    async fn register(
        &self,
        config: DatastoreConfig,
        models: Models,
        driver: Box<dyn Driver>,
    ) -> Result<()> {
        let pool = Pool::new(driver, config.pool_config()).await?;

        let mut datastores = self.datastores.write().await;

        // Another registration may have won while the pool was opening
        if datastores.contains_key(&config.identity) {
            pool.close();
            return Err(already_registered(&config.identity));
        }

        tracing::info!(
            identity = %config.identity,
            url = %pool.url(),
            models = models.len(),
            "registered datastore"
        );

        datastores.insert(
            config.identity.clone(),
            Arc::new(Datastore {
                config,
                pool,
                models,
            }),
        );

        Ok(())
    }

    /// Closes the pool of one datastore, or of every datastore when
    /// `identity` is `None`, and forgets it.
    pub async fn teardown(&self, identity: Option<&str>) -> Result<()> {
        let mut datastores = self.datastores.write().await;

        let removed: Vec<_> = match identity {
            Some(identity) => {
                let Some(datastore) = datastores.shift_remove(identity) else {
                    return Err(Error::unknown_datastore(identity));
                };
                vec![datastore]
            }
            None => datastores.drain(..).map(|(_, datastore)| datastore).collect(),
        };

        for datastore in removed {
            datastore.pool.close();
            tracing::info!(identity = %datastore.identity(), "tore down datastore");
        }

        Ok(())
    }

    /// Identities of the registered datastores, in registration order.
    pub async fn datastores(&self) -> Vec<String> {
        self.datastores.read().await.keys().cloned().collect()
    }

    /// Checks a connection out of a datastore's pool for the caller to pass
    /// to several operations.
    pub async fn lease_connection(&self, identity: &str) -> Result<LeasedConnection> {
        let datastore = self.datastore(identity).await?;
        let connection = datastore.pool.get().await?;

        Ok(LeasedConnection {
            identity: Arc::from(identity),
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn create(&self, identity: &str, query: CreateQuery) -> Result<Option<Record>> {
        let datastore = self.datastore(identity).await?;
        engine::create(&datastore, query).await
    }

    pub async fn create_each(
        &self,
        identity: &str,
        query: CreateEachQuery,
    ) -> Result<Option<Vec<Record>>> {
        let datastore = self.datastore(identity).await?;
        engine::create_each(&datastore, query).await
    }

    pub async fn find(&self, identity: &str, query: FindQuery) -> Result<Vec<Record>> {
        let datastore = self.datastore(identity).await?;
        engine::find(&datastore, &*self.child_queries, query).await
    }

    pub async fn update(&self, identity: &str, query: UpdateQuery) -> Result<Option<Vec<Record>>> {
        let datastore = self.datastore(identity).await?;
        engine::update(&datastore, query).await
    }

    pub async fn destroy(
        &self,
        identity: &str,
        query: DestroyQuery,
    ) -> Result<Option<Vec<Record>>> {
        let datastore = self.datastore(identity).await?;
        engine::destroy(&datastore, query).await
    }

    pub async fn avg(&self, identity: &str, query: AggregateQuery) -> Result<f64> {
        let datastore = self.datastore(identity).await?;
        let value = engine::aggregate(&datastore, query, AggregateFunc::Avg).await?;
        engine::aggregate_f64(value)
    }

    pub async fn sum(&self, identity: &str, query: AggregateQuery) -> Result<f64> {
        let datastore = self.datastore(identity).await?;
        let value = engine::aggregate(&datastore, query, AggregateFunc::Sum).await?;
        engine::aggregate_f64(value)
    }

    pub async fn count(&self, identity: &str, query: AggregateQuery) -> Result<u64> {
        let datastore = self.datastore(identity).await?;
        let value = engine::aggregate(&datastore, query, AggregateFunc::Count).await?;
        engine::aggregate_u64(value)
    }

    async fn datastore(&self, identity: &str) -> Result<Arc<Datastore>> {
        self.datastores
            .read()
            .await
            .get(identity)
            .cloned()
            .ok_or_else(|| Error::unknown_datastore(identity))
    }
}

impl Default for Adapter {
    fn default() -> Adapter {
        Adapter::new()
    }
}

impl LeasedConnection {
    /// Identity of the datastore the connection belongs to.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub(crate) async fn lock(&self) -> OwnedMutexGuard<PoolConnection> {
        self.connection.clone().lock_owned().await
    }

    /// Gives the connection back to its pool. Other clones keep it checked
    /// out until they are dropped.
    pub async fn release(self) -> Result<()> {
        match Arc::try_unwrap(self.connection) {
            Ok(connection) => connection.into_inner().release().await,
            Err(_) => Ok(()),
        }
    }
}

fn already_registered(identity: &str) -> Error {
    Error::bad_configuration(format!("Datastore `{identity}` is already registered."))
}
