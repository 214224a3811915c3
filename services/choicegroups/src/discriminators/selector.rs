//! Pick the next choice set among the maximal cliques of one round

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use crate::catalog::ProductView;
use crate::discriminators::{ChoiceError, ConflictGraph, Discriminator};

/// One finalized group of mutually exclusive alternatives.
///
/// `None` stands for "none of the others", which turns a single
/// discriminator into an on/off toggle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceSet(BTreeSet<Option<Discriminator>>);

impl ChoiceSet {
    pub fn from_clique(clique: &BTreeSet<Discriminator>) -> Self {
        Self(clique.iter().cloned().map(Some).collect())
    }

    /// `{discriminator, None}`
    pub fn binary(discriminator: &str) -> Self {
        Self([Some(discriminator.to_string()), None].into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the set carries the `None` alternative
    pub fn is_optional(&self) -> bool {
        self.0.contains(&None)
    }

    pub fn contains(&self, discriminator: &str) -> bool {
        self.discriminators().any(|d| d == discriminator)
    }

    /// Real discriminators, without `None`
    pub fn discriminators(&self) -> impl Iterator<Item = &Discriminator> {
        self.0.iter().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<Discriminator>> {
        self.0.iter()
    }
}

/// Discriminators known to be independent on/off options, by base name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BinaryChoiceWhitelist(HashMap<String, Vec<Discriminator>>);

impl BinaryChoiceWhitelist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, base_name: &str, discriminators: &[&str]) -> Self {
        self.0
            .entry(base_name.to_string())
            .or_default()
            .extend(discriminators.iter().map(|d| d.to_string()));
        self
    }

    pub fn contains(&self, base_name: &str, discriminator: &str) -> bool {
        self.0
            .get(base_name)
            .map_or(false, |list| list.iter().any(|d| d == discriminator))
    }
}

/// What to do when one product carries several members of a candidate clique
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Count the product against the first member and log a warning
    #[default]
    Lenient,
    /// Fail with `ChoiceError::OverlappingDiscriminators`
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionConfig {
    pub binary_choices: BinaryChoiceWhitelist,
    pub overlap: OverlapPolicy,
    pub max_universe: Option<usize>,
}

/// Why a clique was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Single whitelisted discriminator, paired with `None`
    Whitelist,
    /// Every product carries exactly one member
    ForcedChoice,
    /// No member is carried by more than one product
    UniquePerProduct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub choice_set: ChoiceSet,
    pub rule: SelectionRule,
}

/// Per-clique tally of which member each product picks
#[derive(Debug, Default)]
struct Distribution<'c> {
    per_member: BTreeMap<&'c Discriminator, usize>,
    none: usize,
}

impl Distribution<'_> {
    fn max_member_count(&self) -> usize {
        self.per_member.values().copied().max().unwrap_or(0)
    }
}

fn distribution<'c, P: ProductView>(
    clique: &'c BTreeSet<Discriminator>,
    products: &[P],
    base_name: &str,
    overlap: OverlapPolicy,
) -> Result<Distribution<'c>, ChoiceError> {
    let mut dist = Distribution::default();

    for p in products {
        let hits: Vec<&Discriminator> = clique
            .iter()
            .filter(|c| p.discriminators().contains(c))
            .collect();

        if hits.len() > 1 {
            match overlap {
                OverlapPolicy::Strict => {
                    return Err(ChoiceError::OverlappingDiscriminators {
                        base_name: base_name.to_string(),
                        product: p.code().to_string(),
                        members: hits.into_iter().cloned().collect(),
                    });
                }
                OverlapPolicy::Lenient => tracing::warn!(
                    "Product {} of {} carries {:?} from one candidate choice set, counting {}",
                    p.code(),
                    base_name,
                    hits,
                    hits[0]
                ),
            }
        }

        match hits.first() {
            Some(first) => *dist.per_member.entry(*first).or_default() += 1,
            None => dist.none += 1,
        }
    }

    Ok(dist)
}

/// Select at most one clique as the next choice set.
///
/// Cliques are tried in order and the first match wins:
/// - a single whitelisted discriminator becomes `{discriminator, None}`
/// - otherwise the clique is accepted when every product carries one of its
///   members, or when no member is carried by more than one product
///
/// Accepting a multi-member clique while the next clique has the same size
/// is an `AmbiguousSelection` error. `Ok(None)` means nothing qualifies.
pub fn select_choice_set<P: ProductView>(
    cliques: &[BTreeSet<Discriminator>],
    products: &[P],
    base_name: &str,
    graph: &ConflictGraph,
    config: &SelectionConfig,
) -> Result<Option<Selection>, ChoiceError> {
    for (i, clique) in cliques.iter().enumerate() {
        if clique.len() == 1 {
            if let Some(only) = clique.first() {
                if config.binary_choices.contains(base_name, only) {
                    return Ok(Some(Selection {
                        choice_set: ChoiceSet::binary(only),
                        rule: SelectionRule::Whitelist,
                    }));
                }
            }
        }

        let dist = distribution(clique, products, base_name, config.overlap)?;
        let rule = if dist.none == 0 {
            SelectionRule::ForcedChoice
        } else if dist.max_member_count() == 1 {
            SelectionRule::UniquePerProduct
        } else {
            continue;
        };

        if clique.len() > 1 {
            if let Some(next) = cliques.get(i + 1) {
                if next.len() == clique.len() {
                    return Err(ChoiceError::AmbiguousSelection {
                        base_name: base_name.to_string(),
                        candidates: vec![clique.clone(), next.clone()],
                        edges: graph.edges(),
                        products: products.iter().map(|p| p.code().to_string()).collect(),
                    });
                }
            }
        }

        return Ok(Some(Selection {
            choice_set: ChoiceSet::from_clique(clique),
            rule,
        }));
    }

    Ok(None)
}
