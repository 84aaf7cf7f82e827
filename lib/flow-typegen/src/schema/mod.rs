mod type_node;

use std::collections::HashMap;

use graphql_parser::schema as input;
use indexmap::IndexMap;
use tracing::{debug, instrument, trace};

use crate::ast::OperationKind;

pub use type_node::TypeNode;

static BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

pub type SchemaDocument = input::Document<'static, String>;

type FieldMap = IndexMap<String, TypeNode>;

#[derive(Debug)]
pub enum SchemaDefinition {
    Object(ObjectDefinition),
    Interface(InterfaceDefinition),
    Union(UnionDefinition),
    Enum(EnumDefinition),
    Scalar(ScalarDefinition),
    InputObject(InputObjectDefinition),
}

#[derive(Debug)]
pub struct ObjectDefinition {
    pub name: String,
    pub fields: FieldMap,
    pub implements: Vec<String>,
}

#[derive(Debug)]
pub struct InterfaceDefinition {
    pub name: String,
    pub fields: FieldMap,
}

#[derive(Debug)]
pub struct UnionDefinition {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug)]
pub struct ScalarDefinition {
    pub name: String,
}

#[derive(Debug)]
pub struct InputObjectDefinition {
    pub name: String,
    pub fields: FieldMap,
}

impl SchemaDefinition {
    pub fn name(&self) -> &str {
        match self {
            SchemaDefinition::Object(object_type) => &object_type.name,
            SchemaDefinition::Interface(interface_type) => &interface_type.name,
            SchemaDefinition::Union(union_type) => &union_type.name,
            SchemaDefinition::Enum(enum_type) => &enum_type.name,
            SchemaDefinition::Scalar(scalar_type) => &scalar_type.name,
            SchemaDefinition::InputObject(input_type) => &input_type.name,
        }
    }

    /// Object, interface and union types: anything a selection set can target.
    pub fn is_composite_type(&self) -> bool {
        matches!(
            self,
            SchemaDefinition::Object(_)
                | SchemaDefinition::Interface(_)
                | SchemaDefinition::Union(_)
        )
    }

    pub fn is_abstract_type(&self) -> bool {
        matches!(
            self,
            SchemaDefinition::Interface(_) | SchemaDefinition::Union(_)
        )
    }

    /// Selectable fields. Unions have none, neither do leaf and input types.
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            SchemaDefinition::Object(object_type) => Some(&object_type.fields),
            SchemaDefinition::Interface(interface_type) => Some(&interface_type.fields),
            _ => None,
        }
    }
}

/// Read-only index over a parsed schema document.
///
/// Definitions keep the declaration order of the SDL, so every list derived from the
/// index (possible types, enum values, input fields) is deterministic.
#[derive(Debug)]
pub struct SchemaIndex {
    definitions: IndexMap<String, SchemaDefinition>,
    /// Concrete object types of every interface and union.
    possible_types: HashMap<String, Vec<String>>,
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
}

impl SchemaIndex {
    #[instrument(level = "trace", skip(schema), name = "new_schema_index")]
    pub fn new(schema: &SchemaDocument) -> Self {
        let mut definitions = Self::build_map(schema);
        Self::apply_extensions(schema, &mut definitions);

        for builtin in BUILTIN_SCALARS {
            if !definitions.contains_key(builtin) {
                definitions.insert(
                    builtin.to_string(),
                    SchemaDefinition::Scalar(ScalarDefinition {
                        name: builtin.to_string(),
                    }),
                );
            }
        }

        let possible_types = Self::build_possible_types(&definitions);
        let (query_type, mutation_type, subscription_type) =
            Self::extract_root_types(schema, &definitions);

        debug!(
            "schema index built with {} definitions (query: {:?}, mutation: {:?}, subscription: {:?})",
            definitions.len(),
            query_type,
            mutation_type,
            subscription_type
        );

        Self {
            definitions,
            possible_types,
            query_type,
            mutation_type,
            subscription_type,
        }
    }

    pub fn definition(&self, type_name: &str) -> Option<&SchemaDefinition> {
        self.definitions.get(type_name)
    }

    pub fn is_abstract_type(&self, type_name: &str) -> bool {
        self.definition(type_name)
            .is_some_and(SchemaDefinition::is_abstract_type)
    }

    /// The concrete object types a value of `type_name` can be at runtime.
    /// A concrete type is its own single possible type.
    pub fn possible_types(&self, type_name: &str) -> Vec<String> {
        if !self.is_abstract_type(type_name) {
            return vec![type_name.to_string()];
        }

        self.possible_types
            .get(type_name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn root_type(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    fn build_map(schema: &SchemaDocument) -> IndexMap<String, SchemaDefinition> {
        schema
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                input::Definition::TypeDefinition(input::TypeDefinition::Object(object_type)) => {
                    Some(SchemaDefinition::Object(ObjectDefinition {
                        name: object_type.name.to_string(),
                        fields: Self::build_fields(&object_type.fields),
                        implements: object_type.implements_interfaces.clone(),
                    }))
                }
                input::Definition::TypeDefinition(input::TypeDefinition::Interface(
                    interface_type,
                )) => Some(SchemaDefinition::Interface(InterfaceDefinition {
                    name: interface_type.name.to_string(),
                    fields: Self::build_fields(&interface_type.fields),
                })),
                input::Definition::TypeDefinition(input::TypeDefinition::Union(union_type)) => {
                    Some(SchemaDefinition::Union(UnionDefinition {
                        name: union_type.name.to_string(),
                        members: union_type.types.clone(),
                    }))
                }
                input::Definition::TypeDefinition(input::TypeDefinition::Enum(enum_type)) => {
                    Some(SchemaDefinition::Enum(EnumDefinition {
                        name: enum_type.name.to_string(),
                        values: enum_type
                            .values
                            .iter()
                            .map(|value| value.name.to_string())
                            .collect(),
                    }))
                }
                input::Definition::TypeDefinition(input::TypeDefinition::Scalar(scalar_type)) => {
                    Some(SchemaDefinition::Scalar(ScalarDefinition {
                        name: scalar_type.name.to_string(),
                    }))
                }
                input::Definition::TypeDefinition(input::TypeDefinition::InputObject(
                    input_object_type,
                )) => Some(SchemaDefinition::InputObject(InputObjectDefinition {
                    name: input_object_type.name.to_string(),
                    fields: Self::build_input_fields(&input_object_type.fields),
                })),
                _ => None,
            })
            .map(|definition| (definition.name().to_string(), definition))
            .collect()
    }

    /// Merges `extend ...` definitions into the type they extend.
    /// Extensions of unknown types are skipped.
    fn apply_extensions(
        schema: &SchemaDocument,
        definitions: &mut IndexMap<String, SchemaDefinition>,
    ) {
        for definition in &schema.definitions {
            let input::Definition::TypeExtension(extension) = definition else {
                continue;
            };

            match extension {
                input::TypeExtension::Object(ext) => {
                    if let Some(SchemaDefinition::Object(object_type)) =
                        definitions.get_mut(&ext.name)
                    {
                        object_type.fields.extend(Self::build_fields(&ext.fields));
                        object_type
                            .implements
                            .extend(ext.implements_interfaces.iter().cloned());
                    }
                }
                input::TypeExtension::Interface(ext) => {
                    if let Some(SchemaDefinition::Interface(interface_type)) =
                        definitions.get_mut(&ext.name)
                    {
                        interface_type.fields.extend(Self::build_fields(&ext.fields));
                    }
                }
                input::TypeExtension::Union(ext) => {
                    if let Some(SchemaDefinition::Union(union_type)) =
                        definitions.get_mut(&ext.name)
                    {
                        union_type.members.extend(ext.types.iter().cloned());
                    }
                }
                input::TypeExtension::Enum(ext) => {
                    if let Some(SchemaDefinition::Enum(enum_type)) = definitions.get_mut(&ext.name)
                    {
                        enum_type
                            .values
                            .extend(ext.values.iter().map(|value| value.name.to_string()));
                    }
                }
                input::TypeExtension::InputObject(ext) => {
                    if let Some(SchemaDefinition::InputObject(input_type)) =
                        definitions.get_mut(&ext.name)
                    {
                        input_type
                            .fields
                            .extend(Self::build_input_fields(&ext.fields));
                    }
                }
                input::TypeExtension::Scalar(_) => {}
            }
        }
    }

    fn build_fields(fields: &[input::Field<'static, String>]) -> FieldMap {
        fields
            .iter()
            .map(|field| (field.name.to_string(), (&field.field_type).into()))
            .collect()
    }

    fn build_input_fields(fields: &[input::InputValue<'static, String>]) -> FieldMap {
        fields
            .iter()
            .map(|field| (field.name.to_string(), (&field.value_type).into()))
            .collect()
    }

    fn build_possible_types(
        definitions: &IndexMap<String, SchemaDefinition>,
    ) -> HashMap<String, Vec<String>> {
        let mut possible_types: HashMap<String, Vec<String>> = HashMap::new();

        for (type_name, definition) in definitions {
            match definition {
                SchemaDefinition::Union(union_type) => {
                    possible_types.insert(type_name.clone(), union_type.members.clone());
                }
                SchemaDefinition::Interface(_) => {
                    let implementations = definitions
                        .values()
                        .filter_map(|candidate| match candidate {
                            SchemaDefinition::Object(object_type)
                                if object_type.implements.contains(type_name) =>
                            {
                                Some(object_type.name.clone())
                            }
                            _ => None,
                        })
                        .collect::<Vec<_>>();

                    trace!(
                        "interface '{}' is implemented by {:?}",
                        type_name,
                        implementations
                    );
                    possible_types.insert(type_name.clone(), implementations);
                }
                _ => {}
            }
        }

        possible_types
    }

    fn extract_root_types(
        schema: &SchemaDocument,
        definitions: &IndexMap<String, SchemaDefinition>,
    ) -> (Option<String>, Option<String>, Option<String>) {
        let schema_definition = schema.definitions.iter().find_map(|d| match d {
            input::Definition::SchemaDefinition(schema_definition) => Some(schema_definition),
            _ => None,
        });

        if let Some(schema_definition) = schema_definition {
            return (
                schema_definition.query.clone(),
                schema_definition.mutation.clone(),
                schema_definition.subscription.clone(),
            );
        }

        let by_convention = |name: &str| match definitions.get(name) {
            Some(SchemaDefinition::Object(_)) => Some(name.to_string()),
            _ => None,
        };

        (
            by_convention("Query"),
            by_convention("Mutation"),
            by_convention("Subscription"),
        )
    }
}
