pub mod client;
pub mod config;
pub mod error;
pub mod pool;
pub mod store;
pub mod target;

pub use client::RuleSyncClient;
pub use error::SyncError;
pub use pool::{Deferred, WorkerPool};
pub use store::{ConfigStore, MemoryStore, NacosStore, StoreError};
pub use target::MachineTarget;
