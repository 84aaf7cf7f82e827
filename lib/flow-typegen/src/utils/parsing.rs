use crate::ast::QueryDocument;
use crate::schema::SchemaDocument;

#[inline]
pub fn parse_schema(sdl: &str) -> Result<SchemaDocument, graphql_parser::schema::ParseError> {
    graphql_parser::parse_schema::<String>(sdl).map(|doc| doc.into_static())
}

#[inline]
pub fn parse_operation(
    operation: &str,
) -> Result<QueryDocument, graphql_parser::query::ParseError> {
    graphql_parser::parse_query::<String>(operation).map(|doc| doc.into_static())
}
