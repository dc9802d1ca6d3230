use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_TIMEOUT_MS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub pool: PoolConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    pub server_addr: String,
    #[serde(default)]
    pub namespace: String,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PoolConfig {
    /// 0 sizes the pool to the available parallelism.
    #[serde(default)]
    pub worker_threads: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8848".to_string(),
            namespace: String::new(),
            username: None,
            password: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl PoolConfig {
    pub fn resolved_threads(&self) -> usize {
        if self.worker_threads > 0 {
            return self.worker_threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full() {
        let yaml = r#"
store:
  server_addr: nacos.internal:8848
  namespace: prod
  username: nacos
  password: secret
  timeout_ms: 5000
pool:
  worker_threads: 4
"#;
        let cfg: SyncConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.store.server_addr, "nacos.internal:8848");
        assert_eq!(cfg.store.namespace, "prod");
        assert_eq!(cfg.store.username.as_deref(), Some("nacos"));
        assert_eq!(cfg.store.timeout_ms, 5000);
        assert_eq!(cfg.pool.resolved_threads(), 4);
    }

    #[test]
    fn defaults_applied() {
        let cfg: SyncConfig = serde_yaml::from_str("store:\n  server_addr: localhost:8848\n").unwrap();
        assert_eq!(cfg.store.namespace, "");
        assert!(cfg.store.password.is_none());
        assert_eq!(cfg.store.timeout_ms, 3000);
        assert_eq!(cfg.pool.worker_threads, 0);
        assert!(cfg.pool.resolved_threads() >= 1);
    }

    #[test]
    fn password_is_never_serialized() {
        let cfg = SyncConfig {
            store: StoreConfig {
                username: Some("nacos".into()),
                password: Some("secret".into()),
                ..StoreConfig::default()
            },
            ..SyncConfig::default()
        };
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v["store"]["username"], "nacos");
        assert!(v["store"].get("password").is_none());
    }
}
