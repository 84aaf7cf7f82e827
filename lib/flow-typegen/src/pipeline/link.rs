use std::collections::HashMap;

use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument, trace};

use crate::ast::{Field, LinkedResult, RawResult, RawSelection, Selection};
use crate::error::TypegenError;
use crate::pipeline::TransformOptions;

/// Substitutes every named fragment spread with the linked selection of that fragment.
/// A substituted fragment counts toward the depth cap at the depth of its spread.
#[instrument(level = "trace", skip_all)]
pub fn link(raw: RawResult, options: &TransformOptions) -> Result<LinkedResult, TypegenError> {
    let order = find_link_order(&raw.fragments)?;
    let RawResult {
        operations,
        mut fragments,
    } = raw;

    let mut ctx = LinkContext {
        max_depth: options.max_depth,
        declared: fragments.keys().cloned().collect(),
        linked: HashMap::with_capacity(fragments.len()),
    };

    for name in order {
        let selection = fragments.swap_remove(&name).ok_or_else(|| {
            TypegenError::Invariant(format!("fragment '{}' was scheduled twice", name))
        })?;
        let (selection, height) = link_selection(selection, &ctx, 1)?;
        trace!("linked fragment '{}' ({} levels)", name, height);
        ctx.linked.insert(name, LinkedFragment { selection, height });
    }

    let operations = operations
        .into_iter()
        .map(|operation| {
            operation.try_map_selection(|selection| {
                link_selection(selection, &ctx, 1).map(|(linked, _)| linked)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LinkedResult { operations })
}

struct LinkedFragment {
    selection: Selection,
    /// Levels the fragment spans when linked on its own, its root selection set counting as one.
    height: usize,
}

struct LinkContext {
    max_depth: usize,
    declared: Vec<String>,
    linked: HashMap<String, LinkedFragment>,
}

impl LinkContext {
    fn lookup(&self, fragment_name: &str) -> Result<&LinkedFragment, TypegenError> {
        match self.linked.get(fragment_name) {
            Some(fragment) => Ok(fragment),
            None if self.declared.iter().any(|name| name == fragment_name) => {
                Err(TypegenError::Invariant(format!(
                    "fragment '{}' is spread before it was linked",
                    fragment_name
                )))
            }
            None => Err(TypegenError::FragmentNotFound {
                fragment_name: fragment_name.to_string(),
            }),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), TypegenError> {
        if depth > self.max_depth {
            return Err(TypegenError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}

/// Links `selection` found at `depth` and returns it with the deepest level reached below it.
fn link_selection(
    selection: RawSelection,
    ctx: &LinkContext,
    depth: usize,
) -> Result<(Selection, usize), TypegenError> {
    ctx.check_depth(depth)?;

    let RawSelection {
        on,
        on_possible,
        fields,
        fragments,
        fragment_references,
    } = selection;

    let mut deepest = depth;

    let fields = fields
        .into_iter()
        .map(|field| {
            Ok(Field {
                name: field.name,
                field_type: field.field_type.try_map_selection(&mut |nested| {
                    let (linked, reached) = link_selection(nested, ctx, depth + 1)?;
                    deepest = deepest.max(reached);
                    Ok::<_, TypegenError>(linked)
                })?,
            })
        })
        .collect::<Result<Vec<_>, TypegenError>>()?;

    let mut branches = Vec::with_capacity(fragments.len() + fragment_references.len());
    for branch in fragments {
        let (linked, reached) = link_selection(branch, ctx, depth + 1)?;
        deepest = deepest.max(reached);
        branches.push(linked);
    }

    for reference in fragment_references {
        let fragment = ctx.lookup(&reference)?;
        // the spread lands as a branch one level below this selection set
        let reached = depth + fragment.height;
        ctx.check_depth(reached)?;
        deepest = deepest.max(reached);
        branches.push(fragment.selection.clone());
    }

    Ok((
        Selection {
            on,
            on_possible,
            fields,
            fragments: branches,
        },
        deepest,
    ))
}

/// Names of the fragments spread anywhere inside `selection`, in document order.
fn collect_references<'a>(selection: &'a RawSelection, references: &mut Vec<&'a str>) {
    for field in &selection.fields {
        if let Some(nested) = field.field_type.selection() {
            collect_references(nested, references);
        }
    }
    for branch in &selection.fragments {
        collect_references(branch, references);
    }
    references.extend(selection.fragment_references.iter().map(String::as_str));
}

/// Orders fragments so that every fragment comes after all the fragments it depends on,
/// directly or transitively. Fragments with fewer dependencies come first and declaration
/// order breaks ties.
pub(crate) fn find_link_order(
    fragments: &IndexMap<String, RawSelection>,
) -> Result<Vec<String>, TypegenError> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(fragments.len(), 0);
    let nodes: Vec<NodeIndex> = (0..fragments.len()).map(|i| graph.add_node(i)).collect();

    for (i, selection) in fragments.values().enumerate() {
        let mut references = Vec::new();
        collect_references(selection, &mut references);

        for reference in references {
            let j = fragments
                .get_index_of(reference)
                .ok_or_else(|| TypegenError::FragmentNotFound {
                    fragment_name: reference.to_string(),
                })?;
            graph.update_edge(nodes[i], nodes[j], ());
        }
    }

    let mut cyclic: Vec<usize> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .flatten()
        .map(|node| graph[node])
        .collect();

    if !cyclic.is_empty() {
        cyclic.sort_unstable();
        return Err(TypegenError::CyclicFragments {
            fragment_names: cyclic
                .into_iter()
                .filter_map(|i| fragments.get_index(i).map(|(name, _)| name.clone()))
                .collect(),
        });
    }

    // transitive closure, propagated until nothing changes
    let size = fragments.len();
    let mut depends_on = vec![vec![false; size]; size];
    for edge in graph.raw_edges() {
        depends_on[graph[edge.source()]][graph[edge.target()]] = true;
    }

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..size {
            for j in 0..size {
                if !depends_on[i][j] {
                    continue;
                }
                for k in 0..size {
                    if depends_on[j][k] && !depends_on[i][k] {
                        depends_on[i][k] = true;
                        changed = true;
                    }
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..size).collect();
    order.sort_by_key(|&i| depends_on[i].iter().filter(|dependency| **dependency).count());

    let order: Vec<String> = order
        .into_iter()
        .filter_map(|i| fragments.get_index(i).map(|(name, _)| name.clone()))
        .collect();

    debug!("fragment link order: {:?}", order);

    Ok(order)
}
