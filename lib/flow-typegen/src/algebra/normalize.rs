use indexmap::IndexMap;

use super::{FlowType, Property};

/// Collapses single-member unions and intersections and deduplicates object
/// properties by key. The last value written for a key wins, at the position
/// where the key first appeared.
pub fn normalize(flow_type: FlowType) -> FlowType {
    match flow_type {
        FlowType::List(of) => FlowType::List(Box::new(normalize(*of))),
        FlowType::Nullable(of) => FlowType::Nullable(Box::new(normalize(*of))),
        FlowType::Union(members) => collapse(members, FlowType::Union),
        FlowType::Intersection(members) => collapse(members, FlowType::Intersection),
        FlowType::Object(properties) => {
            let mut merged: IndexMap<String, FlowType> = IndexMap::with_capacity(properties.len());
            for property in properties {
                merged.insert(property.key, normalize(property.property_type));
            }

            FlowType::Object(
                merged
                    .into_iter()
                    .map(|(key, property_type)| Property { key, property_type })
                    .collect(),
            )
        }
        leaf => leaf,
    }
}

fn collapse(mut members: Vec<FlowType>, wrap: fn(Vec<FlowType>) -> FlowType) -> FlowType {
    if members.len() == 1 {
        if let Some(only) = members.pop() {
            return normalize(only);
        }
    }

    wrap(members.into_iter().map(normalize).collect())
}
