use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::selection::{RawSelection, Selection};
use super::types::Variable;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    #[serde(rename = "query")]
    Query,
    #[serde(rename = "mutation")]
    Mutation,
    #[serde(rename = "subscription")]
    Subscription,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation<S> {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub selection: S,
    pub variables: Vec<Variable>,
}

impl<S> Operation<S> {
    pub fn try_map_selection<T, E, F>(self, f: F) -> Result<Operation<T>, E>
    where
        F: FnOnce(S) -> Result<T, E>,
    {
        Ok(Operation {
            kind: self.kind,
            name: self.name,
            selection: f(self.selection)?,
            variables: self.variables,
        })
    }
}

/// Output of the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    pub operations: Vec<Operation<RawSelection>>,
    /// Named fragment definitions, in declaration order.
    pub fragments: IndexMap<String, RawSelection>,
}

/// Output of the linker and the flattener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedResult {
    pub operations: Vec<Operation<Selection>>,
}
