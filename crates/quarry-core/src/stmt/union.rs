use super::Select;

/// `UNION ALL` of several selects, each of which may carry its own ordering
/// and pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub branches: Vec<Select>,
}
