use std::fmt::Display;

use graphql_parser::schema as input;

/// Declared type of a schema field or input value, as written in the SDL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    List(Box<TypeNode>),
    NonNull(Box<TypeNode>),
    Named(String),
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeNode::List(inner) => write!(f, "[{}]", inner),
            TypeNode::NonNull(inner) => write!(f, "{}!", inner),
            TypeNode::Named(name) => write!(f, "{}", name),
        }
    }
}

impl<'a, T: input::Text<'a>> From<&input::Type<'a, T>> for TypeNode {
    fn from(input_type: &input::Type<'a, T>) -> Self {
        match input_type {
            input::Type::ListType(inner) => TypeNode::List(Box::new(inner.as_ref().into())),
            input::Type::NonNullType(inner) => TypeNode::NonNull(Box::new(inner.as_ref().into())),
            input::Type::NamedType(name) => TypeNode::Named(name.as_ref().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeNode;
    use crate::utils::parsing::parse_schema;
    use graphql_parser::schema::{Definition, TypeDefinition};

    #[test]
    fn converts_wrapped_types() {
        let schema = parse_schema("type Query { matrix: [[Float!]]! }").expect("to parse");
        let field_type = match &schema.definitions[0] {
            Definition::TypeDefinition(TypeDefinition::Object(object)) => {
                TypeNode::from(&object.fields[0].field_type)
            }
            _ => panic!("expected an object definition"),
        };

        let float = TypeNode::NonNull(Box::new(TypeNode::Named("Float".to_string())));
        let matrix = TypeNode::List(Box::new(TypeNode::List(Box::new(float))));
        assert_eq!(field_type, TypeNode::NonNull(Box::new(matrix)));
        assert_eq!(field_type.to_string(), "[[Float!]]!");
    }
}
