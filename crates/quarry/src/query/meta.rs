use crate::LeasedConnection;

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct Meta {
    /// Return the records a create, update or destroy touched.
    pub fetch: bool,

    /// Run on this connection instead of one from the pool. The operation
    /// never releases it.
    pub leased_connection: Option<LeasedConnection>,
}

impl Meta {
    pub fn fetch() -> Meta {
        Meta {
            fetch: true,
            ..Meta::default()
        }
    }

    pub fn leased(connection: LeasedConnection) -> Meta {
        Meta {
            leased_connection: Some(connection),
            ..Meta::default()
        }
    }

    pub fn with_fetch(mut self, fetch: bool) -> Meta {
        self.fetch = fetch;
        self
    }
}
