use pretty_assertions::assert_eq;
use quarry::{record, Criteria, FindQuery, Value};
use quarry_core::stmt::{Direction, Expr};
use serde_json::json;
use tests::*;

fn seed(t: &Fixture) {
    t.execute(
        r#"
        INSERT INTO users (id, name, age, active, prefs, status) VALUES
            (1, 'ann', 25, 1, '{"theme":"dark"}', 'active'),
            (2, 'bob', 31, 0, NULL, 'archived'),
            (3, 'cat', 45, 1, 'not json', NULL),
            (4, 'dan', 38, 0, '[1,2]', 'active');
        "#,
    );
}

async fn booleans_are_restored(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new("user", Criteria::new().filter(Expr::gt("age", 30))),
        )
        .await
        .unwrap();

    assert_eq!(users.len(), 3);
    for user in &users {
        assert!(matches!(user.get("active"), Some(Value::Bool(_))));
    }

    assert_eq!(t.log.sql(), [r#"SELECT * FROM "users" WHERE "age" > ?1;"#]);
    assert_eq!(t.log.queries()[0].columns, ["age"]);
}

async fn json_columns_are_parsed(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new("user", Criteria::new().sort("id", Direction::Asc)),
        )
        .await
        .unwrap();

    let prefs: Vec<_> = users.iter().map(|user| user.get("prefs").cloned()).collect();
    assert_eq!(
        prefs,
        [
            Some(Value::Json(json!({ "theme": "dark" }))),
            Some(Value::Null),
            Some(Value::String("not json".to_string())),
            Some(Value::Json(json!([1, 2]))),
        ]
    );
}

async fn sort_limit_and_skip(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new(
                "user",
                Criteria::new()
                    .sort("age", Direction::Desc)
                    .limit(2)
                    .skip(1),
            ),
        )
        .await
        .unwrap();

    let names: Vec<_> = users
        .iter()
        .map(|user| user.get("name").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(names, ["dan", "bob"]);
    assert_eq!(
        t.log.sql(),
        [r#"SELECT * FROM "users" ORDER BY "age" DESC LIMIT 2 OFFSET 1;"#]
    );
}

async fn skip_without_limit(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new("user", Criteria::new().sort("id", Direction::Asc).skip(3)),
        )
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].get("name"), Some(&Value::from("dan")));
}

async fn narrowed_columns_keep_the_primary_key(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new(
                "user",
                Criteria::new()
                    .select(["name"])
                    .filter(Expr::eq("name", "ann")),
            ),
        )
        .await
        .unwrap();

    assert_eq!(users, [record! { "name" => "ann", "id" => 1 }]);
}

async fn null_predicates_bind_nothing(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new(
                "user",
                Criteria::new().filter(
                    Expr::eq("status", Value::Null)
                        .and(Expr::gt("age", 40))
                        .and(Expr::ne("name", Value::Null)),
                ),
            ),
        )
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].get("name"), Some(&Value::from("cat")));

    let query = &t.log.queries()[0];
    assert_eq!(
        query.sql,
        r#"SELECT * FROM "users" WHERE "status" IS NULL AND "age" > ?1 AND "name" IS NOT NULL;"#
    );
    assert_eq!(query.columns, ["age"]);
    t.log.assert_aligned();
}

async fn in_lists_bind_every_member(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new(
                "user",
                Criteria::new()
                    .filter(
                        Expr::in_list("name", ["ann", "bob", "eve"].map(Value::from))
                            .and(Expr::not_in_list("age", [Value::from(25)])),
                    )
                    .sort("id", Direction::Asc),
            ),
        )
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].get("id"), Some(&Value::I64(2)));
    assert_eq!(t.log.queries()[0].columns, ["name", "name", "name", "age"]);
}

async fn empty_in_list_matches_nothing(t: Fixture) {
    seed(&t);

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new(
                "user",
                Criteria::new().filter(Expr::in_list("id", Vec::<Value>::new())),
            ),
        )
        .await
        .unwrap();

    assert!(users.is_empty());
    assert_eq!(t.log.sql(), [r#"SELECT * FROM "users" WHERE 1 = 0;"#]);
}

async fn criteria_from_json(t: Fixture) {
    seed(&t);

    let criteria = Criteria::from_json(&json!({
        "where": {
            "or": [
                { "name": "ann" },
                { "age": { ">=": 40 }, "active": true },
            ]
        },
        "sort": [{ "id": "desc" }],
        "select": ["name"],
    }))
    .unwrap();

    let users = t
        .adapter
        .find(IDENTITY, FindQuery::new("user", criteria))
        .await
        .unwrap();

    assert_eq!(
        users,
        [
            record! { "name" => "cat", "id" => 3 },
            record! { "name" => "ann", "id" => 1 },
        ]
    );
}

async fn no_matches(t: Fixture) {
    let users = t
        .adapter
        .find(IDENTITY, FindQuery::new("user", Criteria::new()))
        .await
        .unwrap();

    assert!(users.is_empty());
}

async fn unknown_column_fails(t: Fixture) {
    let err = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new("user", Criteria::new().filter(Expr::eq("nickname", "x"))),
        )
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed());
    assert!(err.footprint().is_none());
}

tests!(
    booleans_are_restored,
    json_columns_are_parsed,
    sort_limit_and_skip,
    skip_without_limit,
    narrowed_columns_keep_the_primary_key,
    null_predicates_bind_nothing,
    in_lists_bind_every_member,
    empty_in_list_matches_nothing,
    criteria_from_json,
    no_matches,
    unknown_column_fails,
);
