//! Fetch and publish of rule sets, generic over the record type.
//!
//! Every category goes through [`RuleSyncClient::fetch_rules`] and
//! [`RuleSyncClient::publish_rules`]; the per-category methods in
//! `categories` only choose the result shape their callers expect.

mod categories;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rulesync_common::codec;
use rulesync_common::data_id::{build_key, MissPolicy};
use rulesync_common::{RuleEntity, SyncRule};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::pool::{Deferred, WorkerPool};
use crate::store::{ConfigStore, NacosStore, DEFAULT_TIMEOUT_MS};
use crate::target::MachineTarget;

type Lookup<R> = Option<Vec<RuleEntity<R>>>;

pub struct RuleSyncClient {
    store: Arc<dyn ConfigStore>,
    pool: WorkerPool,
    fetch_timeout_ms: u64,
}

impl RuleSyncClient {
    pub fn new(store: Arc<dyn ConfigStore>, pool: WorkerPool) -> Self {
        Self {
            store,
            pool,
            fetch_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout_ms: u64) -> Self {
        self.fetch_timeout_ms = timeout_ms;
        self
    }

    /// Connects to the Nacos store described by `cfg` on a pool of its own.
    pub fn from_config(cfg: &SyncConfig) -> Result<Self, SyncError> {
        let store = NacosStore::new(&cfg.store)?;
        let pool = WorkerPool::new(cfg.pool.resolved_threads())?;
        tracing::info!(
            store = store.base_url(),
            namespace = %cfg.store.namespace,
            "rule sync client ready"
        );
        Ok(Self::new(Arc::new(store), pool).with_fetch_timeout(cfg.store.timeout_ms))
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Reads the rules stored for `target.app`. `Ok(None)` means the store
    /// holds nothing under the key.
    pub fn fetch_rules<R: SyncRule>(&self, target: &MachineTarget) -> Deferred<Lookup<R>> {
        match self.prepare_fetch::<R>(target) {
            Ok(task) => self.pool.submit(task),
            Err(e) => Deferred::failed(e),
        }
    }

    /// Replaces the stored rules for `target.app` with `rules`, in order.
    /// `None` publishes nothing and succeeds.
    pub fn publish_rules<R: SyncRule>(
        &self,
        target: &MachineTarget,
        rules: Option<Vec<RuleEntity<R>>>,
    ) -> Deferred<()> {
        let Some(entities) = rules else {
            tracing::debug!(service = %target.app, category = %R::CATEGORY, "no rules to publish");
            return Deferred::ready(Ok(()));
        };
        match self.prepare_publish(target, entities) {
            Ok(task) => self.pool.submit(task),
            Err(e) => Deferred::failed(e),
        }
    }

    /// Like [`fetch_rules`](Self::fetch_rules), resolved against the
    /// category's miss policy.
    fn fetch_by_policy<R: SyncRule>(&self, target: &MachineTarget) -> Deferred<Lookup<R>> {
        match self.prepare_policy_fetch::<R>(target) {
            Ok(task) => self.pool.submit(task),
            Err(e) => Deferred::failed(e),
        }
    }

    pub fn shutdown(&self, timeout: Duration) {
        self.pool.shutdown(timeout);
    }

    fn prepare_fetch<R: SyncRule>(
        &self,
        target: &MachineTarget,
    ) -> Result<impl Future<Output = Result<Lookup<R>, SyncError>> + Send + 'static, SyncError> {
        let category = R::CATEGORY;
        if let Err(e) = target.validate() {
            tracing::warn!(service = %target.app, %category, error = %e, "rejected fetch");
            return Err(e);
        }

        let (data_id, group) = build_key(&target.app, category);
        let store = Arc::clone(&self.store);
        let target = target.clone();
        let timeout_ms = self.fetch_timeout_ms;

        Ok(async move {
            let result = load_rules::<R>(store.as_ref(), &data_id, group, timeout_ms, &target).await;
            match &result {
                Ok(found) => tracing::debug!(
                    service = %target.app,
                    %category,
                    %data_id,
                    rules = found.as_ref().map_or(0, Vec::len),
                    "fetched rules"
                ),
                Err(e) => tracing::warn!(
                    service = %target.app,
                    %category,
                    %data_id,
                    error = %e,
                    "failed to fetch rules"
                ),
            }
            result
        })
    }

    fn prepare_policy_fetch<R: SyncRule>(
        &self,
        target: &MachineTarget,
    ) -> Result<impl Future<Output = Result<Lookup<R>, SyncError>> + Send + 'static, SyncError> {
        let task = self.prepare_fetch::<R>(target)?;
        let policy = R::CATEGORY.miss_policy();
        Ok(async move {
            task.await.map(|found| match policy {
                MissPolicy::Absent => found,
                MissPolicy::Empty => Some(found.unwrap_or_default()),
            })
        })
    }

    fn prepare_publish<R: SyncRule>(
        &self,
        target: &MachineTarget,
        entities: Vec<RuleEntity<R>>,
    ) -> Result<impl Future<Output = Result<(), SyncError>> + Send + 'static, SyncError> {
        let category = R::CATEGORY;
        if let Err(e) = target.validate() {
            tracing::warn!(service = %target.app, %category, error = %e, "rejected publish");
            return Err(e);
        }

        let records: Vec<R> = entities.into_iter().map(RuleEntity::into_rule).collect();
        let count = records.len();
        let payload = codec::encode(&records).map_err(|e| {
            tracing::warn!(service = %target.app, %category, error = %e, "failed to encode rules");
            SyncError::Encode(e)
        })?;

        let (data_id, group) = build_key(&target.app, category);
        let store = Arc::clone(&self.store);
        let service = target.app.clone();

        Ok(async move {
            let result = match store.publish_config(&data_id, group, &payload).await {
                Ok(true) => Ok(()),
                Ok(false) => Err(SyncError::Rejected),
                Err(e) => Err(SyncError::Store(e)),
            };

            match &result {
                Ok(()) => tracing::info!(%service, %category, %data_id, rules = count, "published rules"),
                Err(e) => tracing::warn!(
                    %service,
                    %category,
                    %data_id,
                    error = %e,
                    "failed to publish rules"
                ),
            }
            result
        })
    }
}

async fn load_rules<R: SyncRule>(
    store: &dyn ConfigStore,
    data_id: &str,
    group: &str,
    timeout_ms: u64,
    target: &MachineTarget,
) -> Result<Lookup<R>, SyncError> {
    let payload = store.get_config(data_id, group, timeout_ms).await?;
    if codec::is_missing(payload.as_deref()) {
        return Ok(None);
    }
    let records: Vec<R> = codec::decode(payload.as_deref()).map_err(SyncError::Decode)?;
    Ok(Some(records.into_iter().map(|r| target.entity(r)).collect()))
}
