use super::types::Field;

/// Selection set as produced by the resolver. Named fragment spreads are kept
/// as names until the linker substitutes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSelection {
    /// Composite type the selection set is applied to.
    pub on: String,
    /// Concrete object types `on` may be at runtime.
    pub on_possible: Vec<String>,
    pub fields: Vec<Field<RawSelection>>,
    pub fragments: Vec<RawSelection>,
    pub fragment_references: Vec<String>,
}

impl RawSelection {
    pub fn new(on: String, on_possible: Vec<String>) -> Self {
        RawSelection {
            on,
            on_possible,
            fields: Vec::new(),
            fragments: Vec::new(),
            fragment_references: Vec::new(),
        }
    }
}

/// Selection set with every fragment spread substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub on: String,
    pub on_possible: Vec<String>,
    pub fields: Vec<Field<Selection>>,
    pub fragments: Vec<Selection>,
}

impl Selection {
    /// Appends the fields and fragment branches of `other`, keeping `self`'s type context.
    pub fn absorb(&mut self, other: Selection) {
        self.fields.extend(other.fields);
        self.fragments.extend(other.fragments);
    }
}
