mod build;
mod flatten;
mod link;
mod resolve;

use tracing::instrument;

use crate::algebra::TypedResult;
use crate::ast::QueryDocument;
use crate::error::TypegenError;
use crate::schema::SchemaIndex;

pub use build::build;
pub use flatten::flatten;
pub use link::link;
pub use resolve::resolve;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Deepest selection nesting accepted before failing with `MaxDepthExceeded`.
    pub max_depth: usize,
    /// Type `__typename` of a single-type context as that type's name literal instead of `string`.
    pub exact_typename: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            exact_typename: false,
        }
    }
}

pub fn transform(
    schema: &SchemaIndex,
    document: &QueryDocument,
) -> Result<TypedResult, TypegenError> {
    transform_with_options(schema, document, &TransformOptions::default())
}

#[instrument(level = "trace", skip_all)]
pub fn transform_with_options(
    schema: &SchemaIndex,
    document: &QueryDocument,
    options: &TransformOptions,
) -> Result<TypedResult, TypegenError> {
    let raw = resolve(schema, document, options)?;
    let linked = link(raw, options)?;
    let flattened = flatten(linked);

    build(flattened, options)
}
