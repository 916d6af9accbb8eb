mod exec_log;
pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::LoggingDriver;

use quarry::{Adapter, Attribute, DatastoreConfig, Model};
use quarry_driver_sqlite::Sqlite;
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tempfile::TempDir;

/// Identity the fixture registers its datastore under.
pub const IDENTITY: &str = "default";

pub const SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        age INTEGER,
        active INTEGER,
        prefs TEXT,
        status TEXT,
        email TEXT UNIQUE
    );

    CREATE TABLE posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT,
        published INTEGER,
        user_id INTEGER
    );

    CREATE TABLE tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        label TEXT
    );

    CREATE TABLE users_tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        tag_id INTEGER
    );

    CREATE TABLE accounts (
        code TEXT PRIMARY KEY,
        balance REAL
    );
";

/// Models matching [`SCHEMA`].
pub fn models() -> Vec<Model> {
    vec![
        Model::new("user", "users", "id")
            .attribute("id", Attribute::number("id").auto_increment())
            .attribute("name", Attribute::string("name"))
            .attribute("age", Attribute::number("age"))
            .attribute("active", Attribute::boolean("active"))
            .attribute("prefs", Attribute::json("prefs"))
            .attribute("status", Attribute::string("status"))
            .attribute("email", Attribute::string("email").unique())
            .attribute("posts", Attribute::collection("posts", "post"))
            .attribute("tags", Attribute::collection("tags", "tag")),
        Model::new("post", "posts", "id")
            .attribute("id", Attribute::number("id").auto_increment())
            .attribute("title", Attribute::string("title"))
            .attribute("published", Attribute::boolean("published"))
            .attribute("author", Attribute::model("user_id", "user")),
        Model::new("tag", "tags", "id")
            .attribute("id", Attribute::number("id").auto_increment())
            .attribute("label", Attribute::string("label")),
        Model::new("account", "accounts", "code")
            .attribute("code", Attribute::string("code").required())
            .attribute("balance", Attribute::number("balance")),
    ]
}

/// A registered SQLite datastore in a temporary directory, with every
/// query the adapter runs logged.
pub struct Fixture {
    pub adapter: Adapter,
    pub log: ExecLog,
    pub path: PathBuf,
    fail_release: Arc<AtomicBool>,
    _dir: TempDir,
}

impl Fixture {
    pub async fn new() -> Fixture {
        Fixture::with_adapter(Adapter::new()).await
    }

    pub async fn with_adapter(adapter: Adapter) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quarry.db");

        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch(SCHEMA)
            .unwrap();

        let driver = LoggingDriver::new(Box::new(Sqlite::open(&path)));
        let log = ExecLog::new(driver.queries_handle());
        let fail_release = driver.fail_release_handle();

        adapter
            .register_datastore_with_driver(DatastoreConfig::new(IDENTITY), models(), driver)
            .await
            .unwrap();

        Fixture {
            adapter,
            log,
            path,
            fail_release,
            _dir: dir,
        }
    }

    /// Runs `sql` on a connection of its own, bypassing the adapter and the
    /// query log.
    pub fn execute(&self, sql: &str) {
        rusqlite::Connection::open(&self.path)
            .unwrap()
            .execute_batch(sql)
            .unwrap();
    }

    /// Counts the rows of `table`, bypassing the adapter.
    pub fn row_count(&self, table: &str) -> i64 {
        rusqlite::Connection::open(&self.path)
            .unwrap()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .unwrap()
    }

    /// Makes every following connection release fail.
    pub fn fail_release(&self, fail: bool) {
        self.fail_release.store(fail, Ordering::SeqCst);
    }
}

/// Routes `tracing` output through the test harness. Filtered by
/// `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Expands to one `#[tokio::test]` per listed function, each handed a fresh
/// [`Fixture`].
#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+ $(,)?
    ) => {
        mod sqlite {
            $(
                #[tokio::test]
                $( #[$attrs] )*
                async fn $f() {
                    $crate::init_tracing();
                    let fixture = $crate::Fixture::new().await;
                    super::$f(fixture).await;
                }
            )*
        }
    };
}
