#[derive(Debug)]
pub struct Capability {
    /// The database can report every generated primary key of a batched
    /// `INSERT`. When false, inserts that need their generated keys are
    /// issued one record at a time.
    pub bulk_insert_ids: bool,

    /// The database reports the generated key of a single-record `INSERT`.
    pub last_insert_id: bool,

    /// Most `SELECT`s one compound statement may combine with `UNION ALL`.
    pub max_compound_select: Option<usize>,

    /// Most parameters one statement may bind.
    pub max_bind_params: Option<usize>,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        bulk_insert_ids: false,
        last_insert_id: true,
        max_compound_select: Some(500),
        max_bind_params: Some(32_766),
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        bulk_insert_ids: true,
        max_compound_select: None,
        max_bind_params: Some(65_535),
        ..Self::SQLITE
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        bulk_insert_ids: false,
        max_compound_select: None,
        max_bind_params: Some(65_535),
        ..Self::SQLITE
    };
}
