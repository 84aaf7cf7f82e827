use tracing::{debug, instrument};

use crate::algebra::{normalize, FlowType, Property, TypedOperation, TypedResult, TypedVariable};
use crate::ast::{InputType, LinkedResult, Selection, Type};
use crate::error::TypegenError;
use crate::pipeline::TransformOptions;

/// Converts flattened selection trees and variable types into the normalized type algebra.
#[instrument(level = "trace", skip_all)]
pub fn build(
    flattened: LinkedResult,
    options: &TransformOptions,
) -> Result<TypedResult, TypegenError> {
    let builder = AlgebraBuilder { options };

    let operations = flattened
        .operations
        .into_iter()
        .map(|operation| {
            let result = normalize(builder.selection_type(&operation.selection, 1)?);
            let variables = operation
                .variables
                .into_iter()
                .map(|variable| TypedVariable {
                    variable_type: normalize(builder.input_type(&variable.variable_type, true)),
                    name: variable.name,
                })
                .collect();

            Ok(TypedOperation {
                kind: operation.kind,
                name: operation.name,
                result,
                variables,
            })
        })
        .collect::<Result<Vec<_>, TypegenError>>()?;

    debug!("built types for {} operation(s)", operations.len());

    Ok(TypedResult { operations })
}

struct AlgebraBuilder<'a> {
    options: &'a TransformOptions,
}

impl AlgebraBuilder<'_> {
    fn selection_type(
        &self,
        selection: &Selection,
        depth: usize,
    ) -> Result<FlowType, TypegenError> {
        if depth > self.options.max_depth {
            return Err(TypegenError::MaxDepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        let properties = selection
            .fields
            .iter()
            .map(|field| {
                Ok(Property::new(
                    field.name.clone(),
                    self.output_type(&field.field_type, selection, true, depth)?,
                ))
            })
            .collect::<Result<Vec<_>, TypegenError>>()?;

        let mut branches = selection
            .fragments
            .iter()
            .map(|branch| self.selection_type(branch, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        if !branches.is_empty() && !is_exhaustive(selection) {
            branches.push(FlowType::empty_object());
        }

        Ok(match (properties.is_empty(), branches.is_empty()) {
            (false, false) => FlowType::Intersection(vec![
                FlowType::Object(properties),
                FlowType::Union(branches),
            ]),
            (false, true) => FlowType::Object(properties),
            (true, false) => FlowType::Union(branches),
            (true, true) => FlowType::empty_object(),
        })
    }

    /// `context` is the selection the field belongs to, it types `__typename`.
    fn output_type(
        &self,
        field_type: &Type<Selection>,
        context: &Selection,
        nullable: bool,
        depth: usize,
    ) -> Result<FlowType, TypegenError> {
        Ok(match field_type {
            Type::List(of) => wrap_nullable(
                FlowType::list(self.output_type(of, context, true, depth)?),
                nullable,
            ),
            Type::NotNull(of) => self.output_type(of, context, false, depth)?,
            Type::Scalar(name) => wrap_nullable(scalar_type(name), nullable),
            Type::Enum(values) => wrap_nullable(enum_type(values), nullable),
            Type::Typename => self.typename_type(context),
            Type::Selection(selection) => {
                wrap_nullable(self.selection_type(selection, depth + 1)?, nullable)
            }
        })
    }

    fn typename_type(&self, context: &Selection) -> FlowType {
        match context.on_possible.as_slice() {
            [single] if self.options.exact_typename => FlowType::literal(single.as_str()),
            [_] | [] => FlowType::String,
            possible => FlowType::Union(
                possible
                    .iter()
                    .map(|type_name| FlowType::literal(type_name.as_str()))
                    .collect(),
            ),
        }
    }

    fn input_type(&self, input_type: &InputType, nullable: bool) -> FlowType {
        match input_type {
            InputType::List(of) => {
                wrap_nullable(FlowType::list(self.input_type(of, true)), nullable)
            }
            InputType::NotNull(of) => self.input_type(of, false),
            InputType::Scalar(name) => wrap_nullable(scalar_type(name), nullable),
            InputType::Enum(values) => wrap_nullable(enum_type(values), nullable),
            InputType::Input(fields) => wrap_nullable(
                FlowType::Object(
                    fields
                        .iter()
                        .map(|field| {
                            Property::new(
                                field.name.clone(),
                                self.input_type(&field.field_type, true),
                            )
                        })
                        .collect(),
                ),
                nullable,
            ),
        }
    }
}

/// Every concrete type the selection may be has a branch typed on exactly that type, and there
/// are no other branches.
fn is_exhaustive(selection: &Selection) -> bool {
    selection.fragments.len() == selection.on_possible.len()
        && selection.on_possible.iter().all(|possible_type| {
            selection
                .fragments
                .iter()
                .any(|branch| branch.on == *possible_type)
        })
}

fn scalar_type(name: &str) -> FlowType {
    match name {
        "Int" | "Float" => FlowType::Number,
        "ID" | "String" => FlowType::String,
        "Boolean" => FlowType::Boolean,
        custom => FlowType::Reference(custom.to_string()),
    }
}

fn enum_type(values: &[String]) -> FlowType {
    FlowType::Union(values.iter().map(|value| FlowType::literal(value.as_str())).collect())
}

fn wrap_nullable(flow_type: FlowType, nullable: bool) -> FlowType {
    if nullable {
        FlowType::nullable(flow_type)
    } else {
        flow_type
    }
}
