pub mod algebra;
pub mod ast;
pub mod error;
pub mod pipeline;
pub mod printer;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod tests;

pub use algebra::{FlowType, Property, TypedOperation, TypedResult, TypedVariable};
pub use error::TypegenError;
pub use pipeline::{transform, transform_with_options, TransformOptions};
pub use printer::print;
pub use schema::SchemaIndex;
