use crate::Join;

use std::fmt::Debug;

/// How the children of a non-inlined association are fetched once the
/// parent rows are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildQueryKind {
    /// One query filtering the child key with an `IN` list of every parent
    /// key.
    In,

    /// One branch per parent key, combined with `UNION ALL`. Needed when the
    /// child criteria sort or paginate, as the window applies per parent.
    Union,
}

/// Chooses a [`ChildQueryKind`] for each populated association.
pub trait ChildQueryStrategy: Debug + Send + Sync {
    fn choose(&self, join: &Join) -> ChildQueryKind;
}

/// Uses [`ChildQueryKind::Union`] when the association's criteria carry a
/// `limit` or `skip`, [`ChildQueryKind::In`] otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaginatedUnion;

impl ChildQueryStrategy for PaginatedUnion {
    fn choose(&self, join: &Join) -> ChildQueryKind {
        if join.criteria.is_paginated() {
            ChildQueryKind::Union
        } else {
            ChildQueryKind::In
        }
    }
}
