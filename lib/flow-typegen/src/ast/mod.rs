mod display;
mod result;
mod selection;
mod types;

pub use result::{LinkedResult, Operation, OperationKind, RawResult};
pub use selection::{RawSelection, Selection};
pub use types::{Field, InputField, InputType, Type, Variable};

pub type QueryDocument = graphql_parser::query::Document<'static, String>;
