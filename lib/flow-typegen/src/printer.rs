use std::fmt::{Display, Formatter as FmtFormatter, Result as FmtResult};

use crate::algebra::{FlowType, TypedOperation, TypedResult};
use crate::utils::pretty_display::{get_indent, PrettyDisplay};

/// Renders a type in Flow syntax.
pub fn print(flow_type: &FlowType) -> String {
    flow_type.to_string()
}

fn fmt_members(members: &[FlowType], separator: &str, f: &mut FmtFormatter<'_>) -> FmtResult {
    write!(f, "( ")?;
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", separator)?;
        }
        write!(f, "{}", member)?;
    }
    write!(f, " )")
}

impl Display for FlowType {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        match self {
            FlowType::StringLiteral(value) => {
                let quoted = serde_json::to_string(value).map_err(|_| std::fmt::Error)?;
                write!(f, "{}", quoted)
            }
            FlowType::List(of) => write!(f, "Array<{}>", of),
            FlowType::Union(members) => fmt_members(members, "|", f),
            FlowType::Intersection(members) => fmt_members(members, "&", f),
            FlowType::Boolean => write!(f, "boolean"),
            FlowType::String => write!(f, "string"),
            FlowType::Number => write!(f, "number"),
            FlowType::Object(properties) => {
                write!(f, "{{")?;
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", property.key, property.property_type)?;
                }
                write!(f, "}}")
            }
            FlowType::Nullable(of) => write!(f, "?{}", of),
            FlowType::Reference(name) => write!(f, "{}", name),
        }
    }
}

impl PrettyDisplay for TypedOperation {
    fn pretty_fmt(&self, f: &mut FmtFormatter<'_>, depth: usize) -> FmtResult {
        let indent = get_indent(depth);
        write!(f, "{}{}", indent, self.kind)?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        writeln!(f)?;

        let indent = get_indent(depth + 1);
        for variable in &self.variables {
            writeln!(f, "{}${}: {}", indent, variable.name, variable.variable_type)?;
        }
        writeln!(f, "{}=> {}", indent, self.result)
    }
}

impl Display for TypedOperation {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        self.pretty_fmt(f, 0)
    }
}

impl Display for TypedResult {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        for operation in &self.operations {
            operation.pretty_fmt(f, 0)?;
        }
        Ok(())
    }
}
