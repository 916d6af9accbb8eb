use quarry_core::driver::{NativeQuery, QueryKind};
use std::sync::{Arc, Mutex};

/// A wrapper around the query log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct ExecLog {
    queries: Arc<Mutex<Vec<NativeQuery>>>,
}

impl ExecLog {
    pub(crate) fn new(queries: Arc<Mutex<Vec<NativeQuery>>>) -> Self {
        Self { queries }
    }

    /// Get the number of logged queries
    pub fn len(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.lock().unwrap().is_empty()
    }

    /// Forget every query logged so far
    pub fn clear(&self) {
        self.queries.lock().unwrap().clear();
    }

    pub fn queries(&self) -> Vec<NativeQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// SQL text of every logged query, in execution order
    pub fn sql(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|query| query.sql.clone())
            .collect()
    }

    /// Count queries of the given kind
    pub fn count(&self, kind: QueryKind) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|query| query.kind == kind)
            .count()
    }

    /// Assert that every logged query has exactly one manifest column per
    /// bind value.
    #[track_caller]
    pub fn assert_aligned(&self) {
        for query in self.queries.lock().unwrap().iter() {
            assert_eq!(
                query.columns.len(),
                query.params.len(),
                "manifest {:?} does not match the binds of `{}`",
                query.columns,
                query.sql
            );
        }
    }
}
