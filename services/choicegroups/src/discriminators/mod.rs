//! Conflict graph → maximal cliques → choice sets
//!
//! Two discriminators are candidates for the same choice group when no
//! product has ever carried both. The reducer repeatedly picks one clique of
//! the conflict graph as a finalized group and removes it from the graph.

pub mod error;
pub mod graph;
pub mod cliques;
pub mod selector;
pub mod reducer;

pub use error::ChoiceError;
pub use graph::{build_conflict_graph, ConflictGraph};
pub use cliques::find_cliques;
pub use selector::{
    select_choice_set, BinaryChoiceWhitelist, ChoiceSet, OverlapPolicy, Selection,
    SelectionConfig, SelectionRule,
};
pub use reducer::{choice_groups, reduce, reduce_round};

/// Opaque variant tag carried by a product, e.g. "Small" or "Cheese"
pub type Discriminator = String;
