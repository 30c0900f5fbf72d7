//! In-memory rule store backend.
//!
//! The reference `RuleStore` implementation: rules live in process memory
//! behind an async lock, editable at runtime the way an external rule
//! store would be edited by an admin tool. Used by tests and demos, and as
//! the template for real backends.

mod factory;
mod store;

pub use factory::MemoryStoreFactory;
pub use store::MemoryRuleStore;
