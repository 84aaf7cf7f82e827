use indexmap::IndexMap;
use tracing::instrument;

use crate::ast::{Field, LinkedResult, Selection};

/// Merges sibling fragment branches that apply to the same type, at every level.
#[instrument(level = "trace", skip_all)]
pub fn flatten(linked: LinkedResult) -> LinkedResult {
    LinkedResult {
        operations: linked
            .operations
            .into_iter()
            .map(|mut operation| {
                operation.selection = flatten_selection(operation.selection);
                operation
            })
            .collect(),
    }
}

fn flatten_selection(selection: Selection) -> Selection {
    let collapsed = collapse_selection(selection);

    let mut grouped: IndexMap<String, Selection> =
        IndexMap::with_capacity(collapsed.fragments.len());
    for branch in collapsed.fragments {
        match grouped.get_mut(&branch.on) {
            Some(existing) => existing.absorb(branch),
            None => {
                grouped.insert(branch.on.clone(), branch);
            }
        }
    }

    Selection {
        on: collapsed.on,
        on_possible: collapsed.on_possible,
        fields: collapsed
            .fields
            .into_iter()
            .map(|field| Field {
                name: field.name,
                field_type: field.field_type.map_selection(&mut flatten_selection),
            })
            .collect(),
        fragments: grouped.into_values().map(flatten_selection).collect(),
    }
}

/// Folds branches typed like the selection itself into the selection.
fn collapse_selection(selection: Selection) -> Selection {
    let Selection {
        on,
        on_possible,
        fields,
        fragments,
    } = selection;

    let mut collapsed = Selection {
        on,
        on_possible,
        fields,
        fragments: Vec::with_capacity(fragments.len()),
    };

    for branch in fragments {
        if branch.on == collapsed.on {
            collapsed.absorb(branch);
        } else {
            collapsed.fragments.push(branch);
        }
    }

    collapsed
}
