//! Driver loop: select choice sets round by round until none qualifies

use crate::catalog::{ProductIndex, ProductView};
use crate::discriminators::{
    build_conflict_graph, find_cliques, select_choice_set, ChoiceError, ChoiceSet,
    ConflictGraph, Selection, SelectionConfig,
};

/// Run one round against `graph`: enumerate cliques, select, and remove the
/// selected discriminators from the graph.
pub fn reduce_round<P: ProductView>(
    graph: &mut ConflictGraph,
    products: &[P],
    base_name: &str,
    config: &SelectionConfig,
) -> Result<Option<Selection>, ChoiceError> {
    let cliques = find_cliques(graph);
    let selection = select_choice_set(&cliques, products, base_name, graph, config)?;

    if let Some(selection) = &selection {
        graph.remove_nodes(selection.choice_set.discriminators());
    }

    Ok(selection)
}

/// Find the choice sets of one product family, with the rule that selected
/// each one. All products must share one base name.
///
/// Selected cliques with a single member are consumed from the graph but
/// not returned.
pub fn reduce<P, I>(
    products: &[P],
    index: &I,
    config: &SelectionConfig,
) -> Result<Vec<Selection>, ChoiceError>
where
    P: ProductView,
    I: ProductIndex + ?Sized,
{
    let Some(first) = products.first() else {
        return Ok(Vec::new());
    };
    let base_name = first.base_name();

    let mut graph = build_conflict_graph(products, index)?;
    if let Some(limit) = config.max_universe {
        if graph.node_count() > limit {
            return Err(ChoiceError::UniverseTooLarge {
                base_name: base_name.to_string(),
                size: graph.node_count(),
                limit,
            });
        }
    }

    tracing::debug!(
        "{}: conflict graph with {} discriminators and {} edges",
        base_name,
        graph.node_count(),
        graph.edges().len()
    );

    let mut selections = Vec::new();
    while let Some(selection) = reduce_round(&mut graph, products, base_name, config)? {
        if selection.choice_set.len() < 2 {
            tracing::debug!("{}: dropping trivial choice {:?}", base_name, selection.choice_set);
            continue;
        }
        tracing::debug!(
            "{}: selected {:?} ({:?})",
            base_name,
            selection.choice_set,
            selection.rule
        );
        selections.push(selection);
    }

    Ok(selections)
}

/// Find the choice sets of one product family
pub fn choice_groups<P, I>(
    products: &[P],
    index: &I,
    config: &SelectionConfig,
) -> Result<Vec<ChoiceSet>, ChoiceError>
where
    P: ProductView,
    I: ProductIndex + ?Sized,
{
    Ok(reduce(products, index, config)?
        .into_iter()
        .map(|s| s.choice_set)
        .collect())
}
