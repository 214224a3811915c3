//! Errors raised while discovering choice groups

use std::collections::BTreeSet;
use thiserror::Error;
use crate::discriminators::Discriminator;

#[derive(Debug, Error)]
pub enum ChoiceError {
    /// Two equally sized cliques both qualify in the same round, so the
    /// outcome would depend on enumeration order
    #[error(
        "Choice sets {candidates:?} for discriminator graph {edges:?} ({products:?}) of {base_name} \
         are the same size, which one gets used would be non-deterministic"
    )]
    AmbiguousSelection {
        base_name: String,
        candidates: Vec<BTreeSet<Discriminator>>,
        edges: Vec<(Discriminator, Discriminator)>,
        products: Vec<String>,
    },

    #[error("Product {product} can add unknown product code {code}")]
    UnknownProduct { product: String, code: String },

    /// Only raised when strict overlap checking is enabled
    #[error("Product {product} of {base_name} carries several members {members:?} of one candidate choice set")]
    OverlappingDiscriminators {
        base_name: String,
        product: String,
        members: Vec<Discriminator>,
    },

    #[error("{base_name} has {size} discriminators, more than the limit of {limit}")]
    UniverseTooLarge {
        base_name: String,
        size: usize,
        limit: usize,
    },
}
