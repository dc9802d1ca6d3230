pub mod codec;
pub mod data_id;
pub mod entity;
pub mod rules;

pub use data_id::{build_key, RuleCategory, StoreKey, GROUP_ID};
pub use entity::RuleEntity;
pub use rules::SyncRule;
