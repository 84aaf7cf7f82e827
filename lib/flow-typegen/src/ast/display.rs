use std::fmt::{Display, Formatter as FmtFormatter, Result as FmtResult};

use super::result::{LinkedResult, Operation, RawResult};
use super::selection::{RawSelection, Selection};
use super::types::{Field, InputType, Type};
use crate::utils::pretty_display::{get_indent, PrettyDisplay};

/// Read access shared by raw and linked selection trees, used for rendering only.
trait SelectionTree: Sized {
    fn on(&self) -> &str;
    fn fields(&self) -> &[Field<Self>];
    fn fragments(&self) -> &[Self];
    fn references(&self) -> &[String];
}

impl SelectionTree for RawSelection {
    fn on(&self) -> &str {
        &self.on
    }

    fn fields(&self) -> &[Field<Self>] {
        &self.fields
    }

    fn fragments(&self) -> &[Self] {
        &self.fragments
    }

    fn references(&self) -> &[String] {
        &self.fragment_references
    }
}

impl SelectionTree for Selection {
    fn on(&self) -> &str {
        &self.on
    }

    fn fields(&self) -> &[Field<Self>] {
        &self.fields
    }

    fn fragments(&self) -> &[Self] {
        &self.fragments
    }

    fn references(&self) -> &[String] {
        &[]
    }
}

fn fmt_type_head<S: SelectionTree>(field_type: &Type<S>, f: &mut FmtFormatter<'_>) -> FmtResult {
    match field_type {
        Type::Scalar(name) => write!(f, "{}", name),
        Type::List(of) => {
            write!(f, "[")?;
            fmt_type_head(of, f)?;
            write!(f, "]")
        }
        Type::NotNull(of) => {
            fmt_type_head(of, f)?;
            write!(f, "!")
        }
        Type::Enum(values) => write!(f, "enum({})", values.join(" | ")),
        Type::Typename => write!(f, "Typename"),
        Type::Selection(selection) => write!(f, "{}", selection.on()),
    }
}

fn fmt_selection_body<S: SelectionTree>(
    selection: &S,
    f: &mut FmtFormatter<'_>,
    depth: usize,
) -> FmtResult {
    let indent = get_indent(depth);

    for field in selection.fields() {
        write!(f, "{}{}: ", indent, field.name)?;
        fmt_type_head(&field.field_type, f)?;
        match field.field_type.selection() {
            Some(nested) => {
                writeln!(f, " {{")?;
                fmt_selection_body(nested, f, depth + 1)?;
                writeln!(f, "{}}}", indent)?;
            }
            None => writeln!(f)?,
        }
    }

    for fragment in selection.fragments() {
        writeln!(f, "{}... on {} {{", indent, fragment.on())?;
        fmt_selection_body(fragment, f, depth + 1)?;
        writeln!(f, "{}}}", indent)?;
    }

    for reference in selection.references() {
        writeln!(f, "{}...{}", indent, reference)?;
    }

    Ok(())
}

fn fmt_operation<S: SelectionTree>(
    operation: &Operation<S>,
    f: &mut FmtFormatter<'_>,
    depth: usize,
) -> FmtResult {
    let indent = get_indent(depth);
    write!(f, "{}{}", indent, operation.kind)?;
    if let Some(name) = &operation.name {
        write!(f, " {}", name)?;
    }
    if !operation.variables.is_empty() {
        write!(f, "(")?;
        for (i, variable) in operation.variables.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "${}: {}", variable.name, variable.variable_type)?;
        }
        write!(f, ")")?;
    }
    writeln!(f, " {{")?;
    fmt_selection_body(&operation.selection, f, depth + 1)?;
    writeln!(f, "{}}}", indent)
}

impl Display for InputType {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        match self {
            InputType::Scalar(name) => write!(f, "{}", name),
            InputType::Enum(values) => write!(f, "enum({})", values.join(" | ")),
            InputType::Input(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.field_type)?;
                }
                write!(f, "}}")
            }
            InputType::List(of) => write!(f, "[{}]", of),
            InputType::NotNull(of) => write!(f, "{}!", of),
        }
    }
}

impl PrettyDisplay for RawResult {
    fn pretty_fmt(&self, f: &mut FmtFormatter<'_>, depth: usize) -> FmtResult {
        for operation in &self.operations {
            fmt_operation(operation, f, depth)?;
        }

        let indent = get_indent(depth);
        for (name, selection) in &self.fragments {
            writeln!(f, "{}fragment {} on {} {{", indent, name, selection.on)?;
            fmt_selection_body(selection, f, depth + 1)?;
            writeln!(f, "{}}}", indent)?;
        }

        Ok(())
    }
}

impl PrettyDisplay for LinkedResult {
    fn pretty_fmt(&self, f: &mut FmtFormatter<'_>, depth: usize) -> FmtResult {
        for operation in &self.operations {
            fmt_operation(operation, f, depth)?;
        }
        Ok(())
    }
}

impl Display for RawResult {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        self.pretty_fmt(f, 0)
    }
}

impl Display for LinkedResult {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        self.pretty_fmt(f, 0)
    }
}
