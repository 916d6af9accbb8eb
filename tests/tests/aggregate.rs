use pretty_assertions::assert_eq;
use quarry::{AggregateQuery, Criteria};
use quarry_core::stmt::{Direction, Expr};
use tests::*;

fn seed(t: &Fixture) {
    t.execute(
        "
        INSERT INTO users (id, name, age, status) VALUES
            (1, 'ann', 20, 'active'),
            (2, 'bob', 30, 'active'),
            (3, 'cat', 40, 'archived'),
            (4, 'dan', 50, 'active');
        ",
    );
}

fn active() -> Criteria {
    Criteria::new().filter(Expr::eq("status", "active"))
}

async fn avg_sum_and_count(t: Fixture) {
    seed(&t);

    let avg = t
        .adapter
        .avg(IDENTITY, AggregateQuery::new("user", active()).numeric_column("age"))
        .await
        .unwrap();
    let sum = t
        .adapter
        .sum(IDENTITY, AggregateQuery::new("user", active()).numeric_column("age"))
        .await
        .unwrap();
    let count = t
        .adapter
        .count(IDENTITY, AggregateQuery::new("user", active()))
        .await
        .unwrap();

    assert!((avg - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(sum, 100.0);
    assert_eq!(count, 3);

    assert_eq!(
        t.log.sql(),
        [
            r#"SELECT AVG("age") AS "result" FROM "users" WHERE "status" = ?1;"#,
            r#"SELECT SUM("age") AS "result" FROM "users" WHERE "status" = ?1;"#,
            r#"SELECT COUNT(*) AS "result" FROM "users" WHERE "status" = ?1;"#,
        ]
    );
}

async fn paginated_aggregates_cover_the_page(t: Fixture) {
    seed(&t);

    let criteria = Criteria::new().sort("age", Direction::Desc).limit(2);

    let sum = t
        .adapter
        .sum(
            IDENTITY,
            AggregateQuery::new("user", criteria.clone()).numeric_column("age"),
        )
        .await
        .unwrap();
    assert_eq!(sum, 90.0);

    let count = t
        .adapter
        .count(IDENTITY, AggregateQuery::new("user", criteria.skip(3)))
        .await
        .unwrap();
    assert_eq!(count, 1);

    assert_eq!(
        t.log.sql()[0],
        r#"SELECT SUM("age") AS "result" FROM (SELECT "age" FROM "users" ORDER BY "age" DESC LIMIT 2) AS "paginated";"#
    );
}

async fn aggregates_of_nothing_are_zero(t: Fixture) {
    let query = || AggregateQuery::new("user", Criteria::new()).numeric_column("age");

    assert_eq!(t.adapter.avg(IDENTITY, query()).await.unwrap(), 0.0);
    assert_eq!(t.adapter.sum(IDENTITY, query()).await.unwrap(), 0.0);
    assert_eq!(t.adapter.count(IDENTITY, query()).await.unwrap(), 0);
}

async fn numeric_column_is_required(t: Fixture) {
    let err = t
        .adapter
        .sum(IDENTITY, AggregateQuery::new("user", Criteria::new()))
        .await
        .unwrap_err();

    assert!(err.is_invalid_options());
    assert_eq!(
        err.to_string(),
        "Invalid option used in options argument. Missing or invalid numericAttrName."
    );

    let err = t
        .adapter
        .avg(
            IDENTITY,
            AggregateQuery::new("user", Criteria::new()).numeric_column(""),
        )
        .await
        .unwrap_err();
    assert!(err.is_invalid_options());

    assert!(t.log.is_empty());
}

tests!(
    avg_sum_and_count,
    paginated_aggregates_cover_the_page,
    aggregates_of_nothing_are_zero,
    numeric_column_is_required,
);
