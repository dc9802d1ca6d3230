mod gateway;
mod memory;
mod nacos;

pub use gateway::{ConfigStore, StoreError, DEFAULT_TIMEOUT_MS};
pub use memory::MemoryStore;
pub use nacos::NacosStore;
