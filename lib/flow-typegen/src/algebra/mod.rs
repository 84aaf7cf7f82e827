mod normalize;

use serde::Serialize;

use crate::ast::OperationKind;

pub use normalize::normalize;

/// The output type algebra: the static shape of a response or of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of")]
pub enum FlowType {
    StringLiteral(String),
    List(Box<FlowType>),
    Union(Vec<FlowType>),
    Intersection(Vec<FlowType>),
    Boolean,
    String,
    Number,
    Object(Vec<Property>),
    Nullable(Box<FlowType>),
    /// Opaque named type, used for custom scalars.
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub key: String,
    #[serde(rename = "type")]
    pub property_type: FlowType,
}

impl Property {
    pub fn new(key: impl Into<String>, property_type: FlowType) -> Self {
        Property {
            key: key.into(),
            property_type,
        }
    }
}

impl FlowType {
    pub fn empty_object() -> Self {
        FlowType::Object(Vec::new())
    }

    pub fn nullable(of: FlowType) -> Self {
        FlowType::Nullable(Box::new(of))
    }

    pub fn list(of: FlowType) -> Self {
        FlowType::List(Box::new(of))
    }

    pub fn literal(value: impl Into<String>) -> Self {
        FlowType::StringLiteral(value.into())
    }

    /// Walks the tree depth-first, parents before children.
    pub fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a FlowType)) {
        visitor(self);
        match self {
            FlowType::List(of) | FlowType::Nullable(of) => of.visit(visitor),
            FlowType::Union(members) | FlowType::Intersection(members) => {
                for member in members {
                    member.visit(visitor);
                }
            }
            FlowType::Object(properties) => {
                for property in properties {
                    property.property_type.visit(visitor);
                }
            }
            FlowType::StringLiteral(_)
            | FlowType::Boolean
            | FlowType::String
            | FlowType::Number
            | FlowType::Reference(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: FlowType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedOperation {
    pub kind: OperationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub result: FlowType,
    pub variables: Vec<TypedVariable>,
}

impl TypedOperation {
    pub fn variable(&self, name: &str) -> Option<&FlowType> {
        self.variables
            .iter()
            .find(|variable| variable.name == name)
            .map(|variable| &variable.variable_type)
    }
}

/// Output of the algebra builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypedResult {
    pub operations: Vec<TypedOperation>,
}
