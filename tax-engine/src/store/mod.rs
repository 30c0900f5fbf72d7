pub mod factory;
pub mod rule_store;

pub use factory::{RuleStoreFactory, RuleStoreRegistry, StoreConfig};
pub use rule_store::{RuleStore, RuleStoreError};
