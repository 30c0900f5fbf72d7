pub mod cache;
pub mod calculations;
pub mod engine;
pub mod models;
pub mod store;
pub mod validator;

pub use cache::{CacheConfig, RuleCache};
pub use engine::TaxEngine;
pub use models::*;
pub use store::{RuleStore, RuleStoreError, RuleStoreFactory, RuleStoreRegistry, StoreConfig};
