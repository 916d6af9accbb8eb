use serde::Deserialize;

/// One attribute of a model definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Column backing the attribute. Plural associations have no column of
    /// their own; they use the attribute name.
    pub column_name: String,

    #[serde(rename = "type", default)]
    pub ty: AttrType,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub auto_increment: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub index: bool,

    #[serde(flatten)]
    pub association: Option<Association>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    String,
    Number,
    Boolean,
    Json,
    #[default]
    Ref,
}

/// Link from an attribute to another model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Association {
    /// Singular: the attribute's column holds the foreign key.
    Model(String),

    /// Plural: rows of another model point back at this one.
    Collection(String),
}

impl Attribute {
    pub fn new(column_name: impl Into<String>, ty: AttrType) -> Attribute {
        Attribute {
            column_name: column_name.into(),
            ty,
            required: false,
            auto_increment: false,
            unique: false,
            index: false,
            association: None,
        }
    }

    pub fn string(column_name: impl Into<String>) -> Attribute {
        Attribute::new(column_name, AttrType::String)
    }

    pub fn number(column_name: impl Into<String>) -> Attribute {
        Attribute::new(column_name, AttrType::Number)
    }

    pub fn boolean(column_name: impl Into<String>) -> Attribute {
        Attribute::new(column_name, AttrType::Boolean)
    }

    pub fn json(column_name: impl Into<String>) -> Attribute {
        Attribute::new(column_name, AttrType::Json)
    }

    /// A singular association stored in `column_name`.
    pub fn model(column_name: impl Into<String>, identity: impl Into<String>) -> Attribute {
        Attribute {
            association: Some(Association::Model(identity.into())),
            ..Attribute::new(column_name, AttrType::Number)
        }
    }

    /// A plural association exposed as `attr_name`.
    pub fn collection(attr_name: impl Into<String>, identity: impl Into<String>) -> Attribute {
        Attribute {
            association: Some(Association::Collection(identity.into())),
            ..Attribute::new(attr_name, AttrType::Ref)
        }
    }

    pub fn required(mut self) -> Attribute {
        self.required = true;
        self
    }

    pub fn auto_increment(mut self) -> Attribute {
        self.auto_increment = true;
        self
    }

    pub fn unique(mut self) -> Attribute {
        self.unique = true;
        self
    }

    pub fn is_plural(&self) -> bool {
        matches!(self.association, Some(Association::Collection(_)))
    }
}

impl Association {
    /// Identity of the associated model.
    pub fn target(&self) -> &str {
        match self {
            Association::Model(identity) | Association::Collection(identity) => identity,
        }
    }
}
