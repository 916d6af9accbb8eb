use pretty_assertions::assert_eq;
use quarry::{
    record, Adapter, Attribute, CreateQuery, Criteria, DatastoreConfig, FindQuery, Model, Value,
};
use serde_json::json;
use tests::*;

async fn duplicate_identity_is_refused(t: Fixture) {
    let url = format!("sqlite:{}", t.path.display());

    let err = t
        .adapter
        .register_datastore(DatastoreConfig::with_url(IDENTITY, url), models())
        .await
        .unwrap_err();

    assert!(err.is_bad_configuration());
    assert_eq!(
        err.to_string(),
        "bad configuration: Datastore `default` is already registered."
    );
    assert_eq!(t.adapter.datastores().await, [IDENTITY]);
}

async fn same_database_under_a_second_identity(t: Fixture) {
    t.execute("INSERT INTO users (id, name) VALUES (1, 'ann');");

    let url = format!("sqlite:{}", t.path.display());
    t.adapter
        .register_datastore(DatastoreConfig::with_url("replica", url), models())
        .await
        .unwrap();

    assert_eq!(t.adapter.datastores().await, [IDENTITY, "replica"]);

    let users = t
        .adapter
        .find("replica", FindQuery::new("user", Criteria::new()))
        .await
        .unwrap();
    assert_eq!(users.len(), 1);

    // Queries through the new identity bypass the fixture's logging driver
    assert!(t.log.is_empty());
}

async fn primary_key_needs_required_or_auto_increment(t: Fixture) {
    let model = Model::new("note", "notes", "id")
        .attribute("id", Attribute::number("id"))
        .attribute("body", Attribute::string("body"));

    let err = t
        .adapter
        .register_datastore(DatastoreConfig::with_url("notes", "sqlite::memory:"), [model])
        .await
        .unwrap_err();

    assert!(err.is_bad_configuration());
    assert!(err.to_string().contains("primary key `id`"));
    assert_eq!(t.adapter.datastores().await, [IDENTITY]);
}

async fn teardown_one_datastore(t: Fixture) {
    t.adapter
        .register_datastore(DatastoreConfig::with_url("scratch", "sqlite::memory:"), models())
        .await
        .unwrap();

    t.adapter.teardown(Some(IDENTITY)).await.unwrap();
    assert_eq!(t.adapter.datastores().await, ["scratch"]);

    let err = t
        .adapter
        .create(IDENTITY, CreateQuery::new("user", record! { "name" => "a" }))
        .await
        .unwrap_err();
    assert!(err.is_unknown_datastore());

    let err = t.adapter.teardown(Some(IDENTITY)).await.unwrap_err();
    assert!(err.is_unknown_datastore());
}

async fn teardown_everything(t: Fixture) {
    t.adapter
        .register_datastore(DatastoreConfig::with_url("scratch", "sqlite::memory:"), models())
        .await
        .unwrap();

    t.adapter.teardown(None).await.unwrap();
    assert!(t.adapter.datastores().await.is_empty());

    // Nothing left is not an error
    t.adapter.teardown(None).await.unwrap();
}

async fn identity_can_be_reused_after_teardown(t: Fixture) {
    t.adapter.teardown(Some(IDENTITY)).await.unwrap();

    let url = format!("sqlite:{}", t.path.display());
    t.adapter
        .register_datastore(DatastoreConfig::with_url(IDENTITY, url), models())
        .await
        .unwrap();

    let created = t
        .adapter
        .create(
            IDENTITY,
            CreateQuery::new("user", record! { "name" => "a" }).fetch(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.get("name"), Some(&Value::from("a")));
}

tests!(
    duplicate_identity_is_refused,
    same_database_under_a_second_identity,
    primary_key_needs_required_or_auto_increment,
    teardown_one_datastore,
    teardown_everything,
    identity_can_be_reused_after_teardown,
);

#[tokio::test]
async fn register_from_json_config() {
    init_tracing();

    let config: DatastoreConfig = serde_json::from_value(json!({
        "identity": "memory",
        "url": "sqlite::memory:",
        "pool": { "max_size": 4 },
    }))
    .unwrap();

    let adapter = Adapter::new();
    adapter.register_datastore(config, models()).await.unwrap();
    assert_eq!(adapter.datastores().await, ["memory"]);

    // An empty in-memory database has no tables
    let err = adapter
        .find("memory", FindQuery::new("user", Criteria::new()))
        .await
        .unwrap_err();
    assert!(err.is_driver_operation_failed());
}

#[tokio::test]
async fn unsupported_scheme_is_refused() {
    let adapter = Adapter::new();

    let err = adapter
        .register_datastore(
            DatastoreConfig::with_url("pg", "postgresql://localhost/app"),
            models(),
        )
        .await
        .unwrap_err();

    assert!(err.is_bad_configuration());
    assert!(err
        .to_string()
        .contains("unsupported database; scheme=postgresql"));
    assert!(adapter.datastores().await.is_empty());
}

#[tokio::test]
async fn incomplete_config_is_refused() {
    let adapter = Adapter::new();

    let err = adapter
        .register_datastore(DatastoreConfig::new("parts"), models())
        .await
        .unwrap_err();
    assert!(err.is_bad_configuration());
    assert_eq!(
        err.to_string(),
        "bad configuration: Datastore `parts` configuration is missing or has an invalid `host`."
    );

    let err = adapter
        .register_datastore(DatastoreConfig::with_url("", "sqlite::memory:"), models())
        .await
        .unwrap_err();
    assert!(err.is_bad_configuration());
}
