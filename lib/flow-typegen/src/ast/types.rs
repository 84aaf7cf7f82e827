/// Output type of a selected field, resolved against the schema.
///
/// `S` is the selection representation of the current pipeline stage, so the same
/// wrapper structure is shared by raw (unlinked) and linked selection trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type<S> {
    Scalar(String),
    List(Box<Type<S>>),
    NotNull(Box<Type<S>>),
    Enum(Vec<String>),
    /// The `__typename` meta-field.
    Typename,
    Selection(S),
}

impl<S> Type<S> {
    /// The nested selection, looking through list and non-null wrappers.
    pub fn selection(&self) -> Option<&S> {
        match self {
            Type::List(of) | Type::NotNull(of) => of.selection(),
            Type::Selection(selection) => Some(selection),
            Type::Scalar(_) | Type::Enum(_) | Type::Typename => None,
        }
    }

    /// Rebuilds the type with `f` applied to the nested selection, keeping the wrappers.
    pub fn try_map_selection<T, E, F>(self, f: &mut F) -> Result<Type<T>, E>
    where
        F: FnMut(S) -> Result<T, E>,
    {
        Ok(match self {
            Type::Scalar(name) => Type::Scalar(name),
            Type::List(of) => Type::List(Box::new(of.try_map_selection(f)?)),
            Type::NotNull(of) => Type::NotNull(Box::new(of.try_map_selection(f)?)),
            Type::Enum(values) => Type::Enum(values),
            Type::Typename => Type::Typename,
            Type::Selection(selection) => Type::Selection(f(selection)?),
        })
    }

    pub fn map_selection<T, F>(self, f: &mut F) -> Type<T>
    where
        F: FnMut(S) -> T,
    {
        match self {
            Type::Scalar(name) => Type::Scalar(name),
            Type::List(of) => Type::List(Box::new(of.map_selection(f))),
            Type::NotNull(of) => Type::NotNull(Box::new(of.map_selection(f))),
            Type::Enum(values) => Type::Enum(values),
            Type::Typename => Type::Typename,
            Type::Selection(selection) => Type::Selection(f(selection)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<S> {
    /// Response key: the alias when present, the schema field name otherwise.
    pub name: String,
    pub field_type: Type<S>,
}

/// Type of a variable or of an input object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    Scalar(String),
    Enum(Vec<String>),
    Input(Vec<InputField>),
    List(Box<InputType>),
    NotNull(Box<InputType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: String,
    pub field_type: InputType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub variable_type: InputType,
}
