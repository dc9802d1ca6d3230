use async_trait::async_trait;

pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// A remote, versioned key/value configuration store.
///
/// Implementations may block for as long as the remote side takes; callers
/// run them on the worker pool only.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` is a store miss.
    async fn get_config(
        &self,
        data_id: &str,
        group: &str,
        timeout_ms: u64,
    ) -> Result<Option<String>, StoreError>;

    /// `Ok(false)` means the store refused the write.
    async fn publish_config(
        &self,
        data_id: &str,
        group: &str,
        content: &str,
    ) -> Result<bool, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Timeout,
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Unavailable(msg) => write!(f, "unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
