//! Discover mutually-exclusive choice groups in a product catalog.
//!
//! Pipeline:
//! 1. Load the catalog and index products by code
//! 2. Group products by base name
//! 3. Build a conflict graph per group and reduce it to choice sets
//! 4. Name the choice sets from the choice name table
//! 5. Write reports

pub mod config;
pub mod catalog;
pub mod discriminators;
pub mod naming;
pub mod outputs;

pub use discriminators::{choice_groups, ChoiceError, ChoiceSet, Discriminator};
