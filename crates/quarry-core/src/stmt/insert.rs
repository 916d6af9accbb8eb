use super::Record;

/// `INSERT INTO <into> (..) VALUES (..), ..`
///
/// Every record of a batch must carry the same set of keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub into: String,
    pub records: Vec<Record>,
}

impl Insert {
    pub fn one(into: impl Into<String>, record: Record) -> Insert {
        Insert {
            into: into.into(),
            records: vec![record],
        }
    }

    pub fn many(into: impl Into<String>, records: Vec<Record>) -> Insert {
        Insert {
            into: into.into(),
            records,
        }
    }
}
