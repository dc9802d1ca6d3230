use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use super::gateway::{ConfigStore, StoreError};

/// Process-local store. Counts calls and can be told to fail, which makes
/// it the stand-in for the remote store in tests and dry runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    configs: Arc<DashMap<(String, String), String>>,
    get_calls: Arc<AtomicUsize>,
    publish_calls: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
    reject_publish: Arc<AtomicBool>,
    delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn put(&self, data_id: &str, group: &str, content: impl Into<String>) {
        self.configs
            .insert((data_id.to_string(), group.to_string()), content.into());
    }

    pub fn content(&self, data_id: &str, group: &str) -> Option<String> {
        self.configs
            .get(&(data_id.to_string(), group.to_string()))
            .map(|c| c.value().clone())
    }

    pub fn get_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn publish_count(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_reject_publish(&self, reject: bool) {
        self.reject_publish.store(reject, Ordering::SeqCst);
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marked down".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_config(
        &self,
        data_id: &str,
        group: &str,
        _timeout_ms: u64,
    ) -> Result<Option<String>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.check_available()?;
        Ok(self.content(data_id, group))
    }

    async fn publish_config(
        &self,
        data_id: &str,
        group: &str,
        content: &str,
    ) -> Result<bool, StoreError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.check_available()?;
        if self.reject_publish.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.put(data_id, group, content);
        Ok(true)
    }
}
