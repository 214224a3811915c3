//! Conflict graph over the discriminators of one product family

use std::collections::{BTreeMap, BTreeSet};
use crate::catalog::{ProductIndex, ProductView};
use crate::discriminators::{ChoiceError, Discriminator};

/// Undirected simple graph. An edge means the two discriminators were never
/// observed together on one product.
///
/// Ordered maps keep node and neighbour iteration stable, which clique
/// enumeration order depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictGraph {
    adjacency: BTreeMap<Discriminator, BTreeSet<Discriminator>>,
}

impl ConflictGraph {
    /// Complete graph on `nodes`
    pub fn complete<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = Discriminator>,
    {
        let nodes: BTreeSet<Discriminator> = nodes.into_iter().collect();
        let adjacency = nodes
            .iter()
            .map(|n| {
                let neighbors = nodes.iter().filter(|m| *m != n).cloned().collect();
                (n.clone(), neighbors)
            })
            .collect();
        Self { adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Discriminator> {
        self.adjacency.keys()
    }

    pub fn neighbors(&self, node: &str) -> Option<&BTreeSet<Discriminator>> {
        self.adjacency.get(node)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).map_or(false, |n| n.contains(b))
    }

    /// Edges as ordered pairs `(a, b)` with `a < b`
    pub fn edges(&self) -> Vec<(Discriminator, Discriminator)> {
        self.adjacency
            .iter()
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |b| a < *b)
                    .map(move |b| (a.clone(), b.clone()))
            })
            .collect()
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) {
        if let Some(n) = self.adjacency.get_mut(a) {
            n.remove(b);
        }
        if let Some(n) = self.adjacency.get_mut(b) {
            n.remove(a);
        }
    }

    /// Remove every edge between members of `nodes`
    pub fn remove_edges_among<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a Discriminator>,
    {
        let nodes: Vec<&Discriminator> = nodes.into_iter().collect();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                self.remove_edge(a, b);
            }
        }
    }

    /// Remove nodes and their incident edges; unknown nodes are ignored
    pub fn remove_nodes<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a Discriminator>,
    {
        for node in nodes {
            if let Some(neighbors) = self.adjacency.remove(node.as_str()) {
                for n in neighbors {
                    if let Some(back) = self.adjacency.get_mut(&n) {
                        back.remove(node.as_str());
                    }
                }
            }
        }
    }
}

/// Union of all discriminators carried by `products`
pub fn discriminator_universe<P: ProductView>(products: &[P]) -> BTreeSet<Discriminator> {
    products
        .iter()
        .flat_map(|p| p.discriminators().iter().cloned())
        .collect()
}

/// Build the conflict graph of one product family.
///
/// Starts from the complete graph on the discriminator universe, then for
/// each product removes the edges among its discriminators. A can-add whose
/// target's base name is itself a discriminator of the family counts as if
/// the product carried that discriminator.
pub fn build_conflict_graph<P, I>(products: &[P], index: &I) -> Result<ConflictGraph, ChoiceError>
where
    P: ProductView,
    I: ProductIndex + ?Sized,
{
    let universe = discriminator_universe(products);
    let mut graph = ConflictGraph::complete(universe.iter().cloned());

    for p in products {
        let mut effective: BTreeSet<&Discriminator> = p.discriminators().iter().collect();

        for can_add in p.can_adds() {
            let base_name = index.base_name_of(&can_add.code).ok_or_else(|| {
                ChoiceError::UnknownProduct {
                    product: p.code().to_string(),
                    code: can_add.code.clone(),
                }
            })?;
            if let Some(d) = universe.get(base_name) {
                effective.insert(d);
            }
        }

        graph.remove_edges_among(effective);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Product};

    fn d(s: &str) -> Discriminator {
        s.to_string()
    }

    #[test]
    fn test_complete_graph() {
        let graph = ConflictGraph::complete(vec![d("a"), d("b"), d("c")]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edges().len(), 3);
        assert!(graph.has_edge("a", "c"));
        assert!(graph.has_edge("c", "a"));
    }

    #[test]
    fn test_remove_nodes() {
        let mut graph = ConflictGraph::complete(vec![d("a"), d("b"), d("c")]);
        graph.remove_nodes(&[d("b"), d("missing")]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges(), vec![(d("a"), d("c"))]);
        assert!(graph.neighbors("a").unwrap().iter().all(|n| n != "b"));
    }

    #[test]
    fn test_co_occurring_discriminators_lose_edge() {
        let products = vec![
            Product::new("1", "Burger").with_discriminators(&["Small", "Cheese"]),
            Product::new("2", "Burger").with_discriminators(&["Large"]),
        ];
        let catalog = Catalog::new(products.clone()).unwrap();

        let graph = build_conflict_graph(&products, &catalog).unwrap();

        assert!(!graph.has_edge("Small", "Cheese"));
        assert!(graph.has_edge("Small", "Large"));
        assert!(graph.has_edge("Cheese", "Large"));
    }

    #[test]
    fn test_duplicate_discriminators_are_a_set() {
        let products = vec![
            Product::new("1", "Burger").with_discriminators(&["Small", "Small"]),
            Product::new("2", "Burger").with_discriminators(&["Large"]),
        ];
        let catalog = Catalog::new(products.clone()).unwrap();

        let graph = build_conflict_graph(&products, &catalog).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert!(graph.has_edge("Small", "Large"));
    }

    #[test]
    fn test_can_add_counts_as_co_occurrence() {
        // "Bacon" is both a discriminator of the family and the base name of
        // an add-on product that Small burgers can add.
        let products = vec![
            Product::new("1", "Burger")
                .with_discriminators(&["Small"])
                .with_can_add("bacon"),
            Product::new("2", "Burger").with_discriminators(&["Bacon"]),
        ];
        let mut all = products.clone();
        all.push(Product::new("bacon", "Bacon"));
        let catalog = Catalog::new(all).unwrap();

        let graph = build_conflict_graph(&products, &catalog).unwrap();

        assert!(!graph.has_edge("Small", "Bacon"));
    }

    #[test]
    fn test_can_add_outside_universe_ignored() {
        let products = vec![
            Product::new("1", "Burger")
                .with_discriminators(&["Small"])
                .with_can_add("ketchup"),
            Product::new("2", "Burger").with_discriminators(&["Large"]),
        ];
        let mut all = products.clone();
        all.push(Product::new("ketchup", "Ketchup"));
        let catalog = Catalog::new(all).unwrap();

        let graph = build_conflict_graph(&products, &catalog).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert!(graph.has_edge("Small", "Large"));
    }

    #[test]
    fn test_unknown_can_add_is_error() {
        let products = vec![Product::new("1", "Burger")
            .with_discriminators(&["Small"])
            .with_can_add("ghost")];
        let catalog = Catalog::new(products.clone()).unwrap();

        let err = build_conflict_graph(&products, &catalog).unwrap_err();

        assert!(matches!(err, ChoiceError::UnknownProduct { ref code, .. } if code == "ghost"));
    }
}
