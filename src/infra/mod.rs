//! Infrastructure layer - External systems integration
//!
//! Holds the user record store abstraction and its in-memory
//! implementation. The store stands in for an external document
//! database collection.

pub mod store;

pub use store::{MemoryStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockUserStore;
