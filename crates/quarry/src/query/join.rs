use super::Criteria;

use quarry_core::{Error, Result};

/// How an association's rows relate to its parent row. The numbering
/// follows the populate strategies of the ORM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Strategy {
    /// The parent row holds the foreign key. Singular.
    HasFk = 1,

    /// The child rows hold the foreign key. Plural.
    ViaFk = 2,

    /// A junction table links parent and child rows. Plural.
    ViaJunctor = 3,
}

impl Strategy {
    pub fn is_singular(self) -> bool {
        matches!(self, Strategy::HasFk)
    }
}

/// One hop between two tables: `parent.parent_key = child.child_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinInstruction {
    pub parent: String,
    pub parent_key: String,
    pub child: String,
    pub child_key: String,
}

/// A populate instruction for one association of the queried model.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Attribute name of the association on the parent model
    pub alias: String,

    pub strategy: Strategy,

    /// One hop, or two for [`Strategy::ViaJunctor`]: parent to junction,
    /// then junction to child.
    pub instructions: Vec<JoinInstruction>,

    /// Filters, sorting and pagination applied to the children of each
    /// parent.
    pub criteria: Criteria,
}

impl JoinInstruction {
    pub fn new(
        parent: impl Into<String>,
        parent_key: impl Into<String>,
        child: impl Into<String>,
        child_key: impl Into<String>,
    ) -> JoinInstruction {
        JoinInstruction {
            parent: parent.into(),
            parent_key: parent_key.into(),
            child: child.into(),
            child_key: child_key.into(),
        }
    }
}

impl Join {
    pub fn has_fk(alias: impl Into<String>, instruction: JoinInstruction) -> Join {
        Join::new(alias, Strategy::HasFk, vec![instruction])
    }

    pub fn via_fk(alias: impl Into<String>, instruction: JoinInstruction) -> Join {
        Join::new(alias, Strategy::ViaFk, vec![instruction])
    }

    pub fn via_junctor(
        alias: impl Into<String>,
        to_junction: JoinInstruction,
        to_child: JoinInstruction,
    ) -> Join {
        Join::new(alias, Strategy::ViaJunctor, vec![to_junction, to_child])
    }

    fn new(
        alias: impl Into<String>,
        strategy: Strategy,
        instructions: Vec<JoinInstruction>,
    ) -> Join {
        Join {
            alias: alias.into(),
            strategy,
            instructions,
            criteria: Criteria::default(),
        }
    }

    pub fn criteria(mut self, criteria: Criteria) -> Join {
        self.criteria = criteria;
        self
    }

    /// Key the populated value is stored under on the parent record. A
    /// singular association replaces its foreign key column; a plural one
    /// gets its attribute name.
    pub(crate) fn key_name(&self) -> &str {
        match self.strategy {
            Strategy::HasFk => &self.first().parent_key,
            _ => &self.alias,
        }
    }

    /// The hop leaving the parent table. Only called once the join has
    /// passed [`Join::validate`], which guarantees at least one hop.
    pub(crate) fn first(&self) -> &JoinInstruction {
        &self.instructions[0]
    }

    /// The hop reaching the child table.
    pub(crate) fn last(&self) -> &JoinInstruction {
        &self.instructions[self.instructions.len() - 1]
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let expected = match self.strategy {
            Strategy::HasFk | Strategy::ViaFk => 1,
            Strategy::ViaJunctor => 2,
        };

        if self.instructions.len() != expected {
            return Err(Error::invalid_options(format!(
                "join `{}` ({:?} takes {expected} instruction(s), got {})",
                self.alias,
                self.strategy,
                self.instructions.len()
            )));
        }

        if self.strategy == Strategy::ViaJunctor
            && self.instructions[0].child != self.instructions[1].parent
        {
            return Err(Error::invalid_options(format!(
                "join `{}` (the junction table must link both instructions)",
                self.alias
            )));
        }

        Ok(())
    }
}
