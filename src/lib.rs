//! Canopy: Client-Side File Tree Synchronization
//!
//! Maintains a local model of a hierarchical file/folder tree backed by a
//! remote node store, and provides tree reconstruction, move validation,
//! selection state tracking, and sequential batch operations over it.

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod node;
pub mod notify;
pub mod preview;
pub mod selection;
pub mod store;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
