use serde::Serialize;

/// Structured description of a classified database error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footprint {
    pub identity: FootprintIdentity,

    /// Columns involved in the failure, when the database reports them.
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FootprintIdentity {
    /// A uniqueness constraint rejected the write.
    NotUnique,

    /// The error could not be classified.
    Catchall,
}

impl Footprint {
    pub fn not_unique(keys: Vec<String>) -> Footprint {
        Footprint {
            identity: FootprintIdentity::NotUnique,
            keys,
        }
    }

    pub fn catchall() -> Footprint {
        Footprint {
            identity: FootprintIdentity::Catchall,
            keys: vec![],
        }
    }

    pub fn is_catchall(&self) -> bool {
        self.identity == FootprintIdentity::Catchall
    }
}
