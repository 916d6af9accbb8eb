use pretty_assertions::assert_eq;
use quarry::{record, CreateQuery, Criteria, DatastoreConfig, FindQuery, Meta};
use quarry_core::stmt::Expr;
use tests::*;

const RELEASE_FAILED: &str = "There was an error releasing the connection back into the pool.";

async fn release_failure_fails_the_operation(t: Fixture) {
    t.fail_release(true);

    let err = t
        .adapter
        .create(IDENTITY, CreateQuery::new("user", record! { "name" => "a" }))
        .await
        .unwrap_err();

    assert!(err.is_bad_connection());
    assert!(err.to_string().contains(RELEASE_FAILED));

    // The statement itself ran
    assert_eq!(t.row_count("users"), 1);

    // The broken connection was dropped; a fresh one takes its place
    t.fail_release(false);
    let users = t
        .adapter
        .find(IDENTITY, FindQuery::new("user", Criteria::new()))
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}

async fn operation_error_wins_over_release_error(t: Fixture) {
    t.fail_release(true);

    let err = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new("user", Criteria::new().filter(Expr::eq("nickname", "a"))),
        )
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed());
    assert!(!err.to_string().contains(RELEASE_FAILED));
}

async fn leased_connection_is_not_released(t: Fixture) {
    let lease = t.adapter.lease_connection(IDENTITY).await.unwrap();
    assert_eq!(lease.identity(), IDENTITY);

    t.fail_release(true);

    let created = t
        .adapter
        .create(
            IDENTITY,
            CreateQuery::new("user", record! { "name" => "ann" })
                .meta(Meta::leased(lease.clone()).with_fetch(true)),
        )
        .await
        .unwrap()
        .unwrap();

    let users = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new("user", Criteria::new())
                .meta(Meta::leased(lease.clone())),
        )
        .await
        .unwrap();
    assert_eq!(users, [created]);

    // Giving the lease back is where the release happens
    let err = lease.release().await.unwrap_err();
    assert!(err.is_bad_connection());
    assert!(err.to_string().contains(RELEASE_FAILED));
}

async fn leased_connection_of_another_datastore_is_refused(t: Fixture) {
    let url = format!("sqlite:{}", t.path.display());
    t.adapter
        .register_datastore(DatastoreConfig::with_url("other", url), models())
        .await
        .unwrap();

    let lease = t.adapter.lease_connection("other").await.unwrap();

    let err = t
        .adapter
        .find(
            IDENTITY,
            FindQuery::new("user", Criteria::new()).meta(Meta::leased(lease)),
        )
        .await
        .unwrap_err();

    assert!(err.is_invalid_options());
    assert_eq!(
        err.to_string(),
        "Invalid option used in options argument. Missing or invalid meta.leasedConnection \
         (it belongs to datastore `other`, not `default`)."
    );
    assert!(t.log.is_empty());
}

async fn lease_of_unknown_datastore(t: Fixture) {
    let err = t.adapter.lease_connection("nope").await.unwrap_err();
    assert!(err.is_unknown_datastore());
}

async fn concurrent_operations_share_the_pool(t: Fixture) {
    t.execute("INSERT INTO users (id, name, age) VALUES (1, 'ann', 20), (2, 'bob', 30);");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let adapter = t.adapter.clone();
            tokio::spawn(async move {
                let criteria = Criteria::new().filter(Expr::ge("age", 20 + (i % 2) * 10));
                adapter
                    .find(IDENTITY, FindQuery::new("user", criteria))
                    .await
                    .unwrap()
                    .len()
            })
        })
        .collect();

    let mut counts = vec![];
    for handle in handles {
        counts.push(handle.await.unwrap());
    }

    assert_eq!(counts, [2, 1, 2, 1, 2, 1, 2, 1]);
    assert_eq!(t.log.len(), 8);
    t.log.assert_aligned();
}

tests!(
    release_failure_fails_the_operation,
    operation_error_wins_over_release_error,
    leased_connection_is_not_released,
    leased_connection_of_another_datastore_is_refused,
    lease_of_unknown_datastore,
    concurrent_operations_share_the_pool,
);
