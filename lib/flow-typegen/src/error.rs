use std::fmt::{Display, Formatter, Result as FmtResult};

use graphql_parser::Pos;

use crate::ast::OperationKind;

/// Location of the document node an error was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl From<Pos> for SourcePosition {
    fn from(pos: Pos) -> Self {
        SourcePosition {
            line: pos.line,
            column: pos.column,
        }
    }
}

impl Display for SourcePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypegenError {
    #[error("Could not resolve type '{type_name}' at {position}")]
    TypeNotFound {
        type_name: String,
        position: SourcePosition,
    },

    #[error("Schema has no root type for {operation_kind} operations")]
    RootOperationNotFound { operation_kind: OperationKind },

    #[error("Could not resolve field '{field_name}' on type '{type_name}' at {position}")]
    FieldNotFound {
        field_name: String,
        type_name: String,
        position: SourcePosition,
    },

    #[error("Type '{type_name}' used at {position} is not a composite type")]
    NotCompositeType {
        type_name: String,
        position: SourcePosition,
    },

    #[error("Type '{type_name}' used at {position} is not an input type")]
    NotInputType {
        type_name: String,
        position: SourcePosition,
    },

    #[error("Type '{type_name}' used at {position} is not an output type")]
    NotOutputType {
        type_name: String,
        position: SourcePosition,
    },

    #[error("Field '{field_name}' of composite type '{type_name}' at {position} has no selection set")]
    MissingSelectionSet {
        field_name: String,
        type_name: String,
        position: SourcePosition,
    },

    #[error("Could not resolve fragment with name '{fragment_name}'")]
    FragmentNotFound { fragment_name: String },

    #[error("Fragments spread each other in a cycle: {}", .fragment_names.join(", "))]
    CyclicFragments { fragment_names: Vec<String> },

    #[error("Input type '{type_name}' references itself")]
    RecursiveInputType { type_name: String },

    #[error("Selection nesting exceeds the maximum depth of {max_depth}")]
    MaxDepthExceeded { max_depth: usize },

    #[error("Internal Error: {0}")]
    Invariant(String),
}
