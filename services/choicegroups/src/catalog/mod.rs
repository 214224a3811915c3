//! Product catalog: records, index and loaders

pub mod product;
pub mod ingest;
pub mod mock;

pub use product::*;
pub use ingest::*;
pub use mock::*;
