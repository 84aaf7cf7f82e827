use graphql_parser::query::{
    Definition, Field as QueryField, FragmentDefinition, OperationDefinition,
    Selection as QuerySelection, SelectionSet, TypeCondition, VariableDefinition,
};
use graphql_parser::Pos;
use tracing::{debug, instrument, trace};

use crate::ast::{
    Field, InputField, InputType, Operation, OperationKind, QueryDocument, RawResult,
    RawSelection, Type, Variable,
};
use crate::error::TypegenError;
use crate::pipeline::TransformOptions;
use crate::schema::{SchemaDefinition, SchemaIndex, TypeNode};

const TYPENAME_FIELD: &str = "__typename";

/// Resolves every operation and fragment definition of `document` against the schema.
/// Named fragment spreads are kept as references for the linker.
#[instrument(level = "trace", skip_all)]
pub fn resolve(
    schema: &SchemaIndex,
    document: &QueryDocument,
    options: &TransformOptions,
) -> Result<RawResult, TypegenError> {
    let resolver = Resolver { schema, options };
    let mut result = RawResult::default();

    for definition in &document.definitions {
        match definition {
            Definition::Operation(operation) => {
                result.operations.push(resolver.resolve_operation(operation)?);
            }
            Definition::Fragment(fragment) => {
                let selection = resolver.resolve_fragment(fragment)?;
                // a repeated fragment name replaces the earlier definition
                result.fragments.insert(fragment.name.clone(), selection);
            }
        }
    }

    debug!(
        "resolved {} operation(s) and {} fragment definition(s)",
        result.operations.len(),
        result.fragments.len()
    );

    Ok(result)
}

struct Resolver<'a> {
    schema: &'a SchemaIndex,
    options: &'a TransformOptions,
}

impl Resolver<'_> {
    fn resolve_operation(
        &self,
        operation: &OperationDefinition<'static, String>,
    ) -> Result<Operation<RawSelection>, TypegenError> {
        let (kind, name, variable_definitions, selection_set, position) = match operation {
            OperationDefinition::SelectionSet(selection_set) => (
                OperationKind::Query,
                None,
                &[][..],
                selection_set,
                selection_set.span.0,
            ),
            OperationDefinition::Query(query) => (
                OperationKind::Query,
                query.name.clone(),
                &query.variable_definitions[..],
                &query.selection_set,
                query.position,
            ),
            OperationDefinition::Mutation(mutation) => (
                OperationKind::Mutation,
                mutation.name.clone(),
                &mutation.variable_definitions[..],
                &mutation.selection_set,
                mutation.position,
            ),
            OperationDefinition::Subscription(subscription) => (
                OperationKind::Subscription,
                subscription.name.clone(),
                &subscription.variable_definitions[..],
                &subscription.selection_set,
                subscription.position,
            ),
        };

        trace!("resolving {} operation {:?}", kind, name);

        let root_type = self
            .schema
            .root_type(kind)
            .ok_or(TypegenError::RootOperationNotFound {
                operation_kind: kind,
            })?;

        let variables = variable_definitions
            .iter()
            .map(|variable| self.resolve_variable(variable))
            .collect::<Result<Vec<_>, _>>()?;

        let selection = self.selection_for(root_type, position)?;
        let selection = self.resolve_selection_set(selection, selection_set, 1)?;

        Ok(Operation {
            kind,
            name,
            selection,
            variables,
        })
    }

    fn resolve_fragment(
        &self,
        fragment: &FragmentDefinition<'static, String>,
    ) -> Result<RawSelection, TypegenError> {
        let TypeCondition::On(type_name) = &fragment.type_condition;
        trace!("resolving fragment '{}' on '{}'", fragment.name, type_name);

        let selection = self.selection_for(type_name, fragment.position)?;
        self.resolve_selection_set(selection, &fragment.selection_set, 1)
    }

    /// An empty selection on a composite type, with its possible concrete types.
    fn selection_for(&self, type_name: &str, position: Pos) -> Result<RawSelection, TypegenError> {
        match self.schema.definition(type_name) {
            None => Err(TypegenError::TypeNotFound {
                type_name: type_name.to_string(),
                position: position.into(),
            }),
            Some(definition) if !definition.is_composite_type() => {
                Err(TypegenError::NotCompositeType {
                    type_name: type_name.to_string(),
                    position: position.into(),
                })
            }
            Some(_) => Ok(RawSelection::new(
                type_name.to_string(),
                self.schema.possible_types(type_name),
            )),
        }
    }

    fn resolve_selection_set(
        &self,
        mut selection: RawSelection,
        selection_set: &SelectionSet<'static, String>,
        depth: usize,
    ) -> Result<RawSelection, TypegenError> {
        if depth > self.options.max_depth {
            return Err(TypegenError::MaxDepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        for item in &selection_set.items {
            match item {
                QuerySelection::Field(field) => {
                    let field = self.resolve_field(&selection.on, field, depth)?;
                    selection.fields.push(field);
                }
                QuerySelection::FragmentSpread(spread) => {
                    selection
                        .fragment_references
                        .push(spread.fragment_name.clone());
                }
                QuerySelection::InlineFragment(inline_fragment) => {
                    let branch = match &inline_fragment.type_condition {
                        Some(TypeCondition::On(type_name)) => {
                            self.selection_for(type_name, inline_fragment.position)?
                        }
                        None => RawSelection::new(
                            selection.on.clone(),
                            selection.on_possible.clone(),
                        ),
                    };
                    let branch = self.resolve_selection_set(
                        branch,
                        &inline_fragment.selection_set,
                        depth + 1,
                    )?;
                    selection.fragments.push(branch);
                }
            }
        }

        Ok(selection)
    }

    fn resolve_field(
        &self,
        parent_type: &str,
        field: &QueryField<'static, String>,
        depth: usize,
    ) -> Result<Field<RawSelection>, TypegenError> {
        let response_key = field.alias.as_ref().unwrap_or(&field.name).clone();

        if field.name == TYPENAME_FIELD {
            return Ok(Field {
                name: response_key,
                field_type: Type::Typename,
            });
        }

        let declared_type = self
            .schema
            .definition(parent_type)
            .and_then(SchemaDefinition::fields)
            .and_then(|fields| fields.get(&field.name))
            .ok_or_else(|| TypegenError::FieldNotFound {
                field_name: field.name.clone(),
                type_name: parent_type.to_string(),
                position: field.position.into(),
            })?;

        Ok(Field {
            name: response_key,
            field_type: self.resolve_output_type(declared_type, field, depth)?,
        })
    }

    fn resolve_output_type(
        &self,
        type_node: &TypeNode,
        field: &QueryField<'static, String>,
        depth: usize,
    ) -> Result<Type<RawSelection>, TypegenError> {
        let type_name = match type_node {
            TypeNode::List(of) => {
                return Ok(Type::List(Box::new(
                    self.resolve_output_type(of, field, depth)?,
                )))
            }
            TypeNode::NonNull(of) => {
                return Ok(Type::NotNull(Box::new(
                    self.resolve_output_type(of, field, depth)?,
                )))
            }
            TypeNode::Named(type_name) => type_name,
        };

        match self.schema.definition(type_name) {
            None => Err(TypegenError::TypeNotFound {
                type_name: type_name.clone(),
                position: field.position.into(),
            }),
            Some(SchemaDefinition::Scalar(_)) => Ok(Type::Scalar(type_name.clone())),
            Some(SchemaDefinition::Enum(enum_type)) => Ok(Type::Enum(enum_type.values.clone())),
            Some(SchemaDefinition::InputObject(_)) => Err(TypegenError::NotOutputType {
                type_name: type_name.clone(),
                position: field.position.into(),
            }),
            Some(_) => {
                if field.selection_set.items.is_empty() {
                    return Err(TypegenError::MissingSelectionSet {
                        field_name: field.name.clone(),
                        type_name: type_name.clone(),
                        position: field.position.into(),
                    });
                }

                let selection =
                    RawSelection::new(type_name.clone(), self.schema.possible_types(type_name));
                let selection =
                    self.resolve_selection_set(selection, &field.selection_set, depth + 1)?;

                Ok(Type::Selection(selection))
            }
        }
    }

    fn resolve_variable(
        &self,
        variable: &VariableDefinition<'static, String>,
    ) -> Result<Variable, TypegenError> {
        let declared_type = TypeNode::from(&variable.var_type);
        let mut expanding = Vec::new();

        Ok(Variable {
            name: variable.name.clone(),
            variable_type: self.resolve_input_type(
                &declared_type,
                variable.position,
                &mut expanding,
            )?,
        })
    }

    /// `expanding` holds the input objects currently being expanded, outermost first.
    fn resolve_input_type(
        &self,
        type_node: &TypeNode,
        position: Pos,
        expanding: &mut Vec<String>,
    ) -> Result<InputType, TypegenError> {
        let type_name = match type_node {
            TypeNode::List(of) => {
                return Ok(InputType::List(Box::new(
                    self.resolve_input_type(of, position, expanding)?,
                )))
            }
            TypeNode::NonNull(of) => {
                return Ok(InputType::NotNull(Box::new(
                    self.resolve_input_type(of, position, expanding)?,
                )))
            }
            TypeNode::Named(type_name) => type_name,
        };

        match self.schema.definition(type_name) {
            None => Err(TypegenError::TypeNotFound {
                type_name: type_name.clone(),
                position: position.into(),
            }),
            Some(SchemaDefinition::Scalar(_)) => Ok(InputType::Scalar(type_name.clone())),
            Some(SchemaDefinition::Enum(enum_type)) => {
                Ok(InputType::Enum(enum_type.values.clone()))
            }
            Some(SchemaDefinition::InputObject(input_type)) => {
                if expanding.contains(type_name) {
                    return Err(TypegenError::RecursiveInputType {
                        type_name: type_name.clone(),
                    });
                }

                expanding.push(type_name.clone());
                let mut fields = Vec::with_capacity(input_type.fields.len());
                for (field_name, field_type) in &input_type.fields {
                    fields.push(InputField {
                        name: field_name.clone(),
                        field_type: self.resolve_input_type(field_type, position, expanding)?,
                    });
                }
                expanding.pop();

                Ok(InputType::Input(fields))
            }
            Some(_) => Err(TypegenError::NotInputType {
                type_name: type_name.clone(),
                position: position.into(),
            }),
        }
    }
}
