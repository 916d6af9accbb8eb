use pretty_assertions::assert_eq;
use quarry::{record, CreateEachQuery, CreateQuery, Record, Value};
use quarry_core::driver::QueryKind;
use serde_json::json;
use tests::*;

fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .map(|record| record.get("id").and_then(Value::as_i64).unwrap())
        .collect()
}

async fn create_each_fetch_returns_generated_keys_in_order(t: Fixture) {
    let created = t
        .adapter
        .create_each(
            IDENTITY,
            CreateEachQuery::new("user", vec![record! { "name" => "a" }, record! { "name" => "b" }])
                .fetch(),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.len(), 2);

    let ids = ids(&created);
    assert!(ids[0] < ids[1]);

    let names: Vec<_> = created
        .iter()
        .map(|record| record.get("name").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(names, ["a", "b"]);

    // SQLite cannot report every key of a batch, so each record is inserted
    // alone and then all are read back at once.
    assert_eq!(t.log.count(QueryKind::Insert), 2);
    assert_eq!(t.log.count(QueryKind::Select), 1);
    t.log.assert_aligned();
}

async fn create_each_fetch_many(t: Fixture) {
    let records = (0..5)
        .map(|i| record! { "name" => format!("user {i}"), "age" => 20 + i })
        .collect();

    let created = t
        .adapter
        .create_each(IDENTITY, CreateEachQuery::new("user", records).fetch())
        .await
        .unwrap()
        .unwrap();

    let ids = ids(&created);
    assert_eq!(ids.len(), 5);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(created[4].get("age"), Some(&Value::I64(24)));
}

async fn create_each_without_fetch_batches(t: Fixture) {
    let result = t
        .adapter
        .create_each(
            IDENTITY,
            CreateEachQuery::new(
                "user",
                vec![
                    record! { "name" => "a", "age" => 1 },
                    record! { "age" => 2, "name" => "b" },
                ],
            ),
        )
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(
        t.log.sql(),
        [r#"INSERT INTO "users" ("age", "name") VALUES (?1, ?2), (?3, ?4);"#]
    );
    assert_eq!(t.log.queries()[0].columns, ["age", "name", "age", "name"]);
    assert_eq!(t.row_count("users"), 2);
}

async fn create_each_with_mixed_shapes_inserts_one_by_one(t: Fixture) {
    t.adapter
        .create_each(
            IDENTITY,
            CreateEachQuery::new(
                "user",
                vec![record! { "name" => "a" }, record! { "name" => "b", "age" => 3 }],
            ),
        )
        .await
        .unwrap();

    assert_eq!(t.log.count(QueryKind::Insert), 2);
    assert_eq!(t.row_count("users"), 2);
}

async fn create_each_of_nothing_runs_nothing(t: Fixture) {
    let fetched = t
        .adapter
        .create_each(IDENTITY, CreateEachQuery::new("user", vec![]).fetch())
        .await
        .unwrap();
    assert_eq!(fetched, Some(vec![]));

    let unfetched = t
        .adapter
        .create_each(IDENTITY, CreateEachQuery::new("user", vec![]))
        .await
        .unwrap();
    assert_eq!(unfetched, None);

    assert!(t.log.is_empty());
}

async fn create_fetch_normalizes_the_record(t: Fixture) {
    let created = t
        .adapter
        .create(
            IDENTITY,
            CreateQuery::new(
                "user",
                record! {
                    "name" => "ann",
                    "active" => true,
                    "prefs" => json!({ "theme": "dark", "sizes": [1, 2] }),
                },
            )
            .fetch(),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.get("active"), Some(&Value::Bool(true)));
    assert_eq!(
        created.get("prefs"),
        Some(&Value::Json(json!({ "theme": "dark", "sizes": [1, 2] })))
    );
    assert_eq!(created.get("age"), Some(&Value::Null));

    // JSON is stored as text
    let insert = &t.log.queries()[0];
    assert_eq!(
        insert.params[2],
        Value::String(r#"{"theme":"dark","sizes":[1,2]}"#.to_string())
    );
}

async fn create_without_fetch_returns_nothing(t: Fixture) {
    let created = t
        .adapter
        .create(IDENTITY, CreateQuery::new("user", record! { "name" => "ann" }))
        .await
        .unwrap();

    assert!(created.is_none());
    assert_eq!(t.log.sql(), [r#"INSERT INTO "users" ("name") VALUES (?1);"#]);
}

async fn null_primary_key_is_generated(t: Fixture) {
    let created = t
        .adapter
        .create(
            IDENTITY,
            CreateQuery::new("user", record! { "id" => Value::Null, "name" => "ann" }).fetch(),
        )
        .await
        .unwrap()
        .unwrap();

    assert!(created.get("id").and_then(Value::as_i64).is_some());
    assert_eq!(t.log.queries()[0].columns, ["name"]);
}

async fn supplied_primary_key_is_read_back(t: Fixture) {
    let created = t
        .adapter
        .create_each(
            IDENTITY,
            CreateEachQuery::new(
                "account",
                vec![
                    record! { "code" => "b-2", "balance" => 2.5 },
                    record! { "code" => "a-1", "balance" => 1.0 },
                ],
            )
            .fetch(),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        created,
        [
            record! { "code" => "a-1", "balance" => 1.0 },
            record! { "code" => "b-2", "balance" => 2.5 },
        ]
    );
}

async fn empty_record_uses_defaults(t: Fixture) {
    let created = t
        .adapter
        .create(IDENTITY, CreateQuery::new("user", record! {}).fetch())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.get("name"), Some(&Value::Null));
    assert_eq!(t.log.sql()[0], r#"INSERT INTO "users" DEFAULT VALUES;"#);
}

async fn duplicate_unique_value_is_not_unique(t: Fixture) {
    let query = || CreateQuery::new("user", record! { "name" => "a", "email" => "a@example.com" });

    t.adapter.create(IDENTITY, query()).await.unwrap();
    let err = t.adapter.create(IDENTITY, query()).await.unwrap_err();

    assert!(err.is_not_unique());
    assert_eq!(err.footprint().unwrap().keys, ["email"]);
    assert_eq!(t.row_count("users"), 1);
}

async fn nested_association_values_are_rejected(t: Fixture) {
    let err = t
        .adapter
        .create(
            IDENTITY,
            CreateQuery::new(
                "post",
                record! { "title" => "hello", "user_id" => record! { "name" => "ann" } },
            ),
        )
        .await
        .unwrap_err();

    assert!(err.is_consistency_violation());
    assert!(err
        .to_string()
        .contains("Incoming new records in a s3q should never necessitate deep iteration!"));
    assert!(t.log.is_empty());
}

async fn unknown_model_is_rejected(t: Fixture) {
    let err = t
        .adapter
        .create(IDENTITY, CreateQuery::new("comment", record! { "body" => "hi" }))
        .await
        .unwrap_err();

    assert!(err.is_unknown_model());
    assert!(t.log.is_empty());
}

async fn unknown_datastore_is_rejected(t: Fixture) {
    let err = t
        .adapter
        .create("archive", CreateQuery::new("user", record! { "name" => "a" }))
        .await
        .unwrap_err();

    assert!(err.is_unknown_datastore());
    assert_eq!(
        err.to_string(),
        "Invalid data store identity. No data store exist with that identity. (identity: `archive`)"
    );
}

tests!(
    create_each_fetch_returns_generated_keys_in_order,
    create_each_fetch_many,
    create_each_without_fetch_batches,
    create_each_with_mixed_shapes_inserts_one_by_one,
    create_each_of_nothing_runs_nothing,
    create_fetch_normalizes_the_record,
    create_without_fetch_returns_nothing,
    null_primary_key_is_generated,
    supplied_primary_key_is_read_back,
    empty_record_uses_defaults,
    duplicate_unique_value_is_not_unique,
    nested_association_values_are_rejected,
    unknown_model_is_rejected,
    unknown_datastore_is_rejected,
);
