use super::{Delete, Insert, Select, Union, Update};

/// A declarative, engine-agnostic description of one relational operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Union(Union),
}

impl Statement {
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
            Statement::Union(_) => "union",
        }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Statement::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn as_insert(&self) -> Option<&Insert> {
        match self {
            Statement::Insert(insert) => Some(insert),
            _ => None,
        }
    }

    pub fn as_update(&self) -> Option<&Update> {
        match self {
            Statement::Update(update) => Some(update),
            _ => None,
        }
    }

    pub fn as_delete(&self) -> Option<&Delete> {
        match self {
            Statement::Delete(delete) => Some(delete),
            _ => None,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}

impl From<Union> for Statement {
    fn from(value: Union) -> Self {
        Statement::Union(value)
    }
}
