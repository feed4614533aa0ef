//! Store module
//!
//! In-memory ownership of the logged item collection.

pub mod item_store;

pub use item_store::{ItemStore, StoreError, StoreResult};
