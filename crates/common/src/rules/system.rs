use serde::{Deserialize, Serialize};

use super::{default_limit_app, SyncRule};
use crate::data_id::RuleCategory;

/// Whole-process protection thresholds. A negative value leaves the
/// threshold disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub limit_app: String,
    pub highest_system_load: f64,
    pub highest_cpu_usage: f64,
    pub qps: f64,
    pub avg_rt: i64,
    pub max_thread: i64,
}

impl Default for SystemRule {
    fn default() -> Self {
        Self {
            resource: None,
            limit_app: default_limit_app(),
            highest_system_load: -1.0,
            highest_cpu_usage: -1.0,
            qps: -1.0,
            avg_rt: -1,
            max_thread: -1,
        }
    }
}

impl SyncRule for SystemRule {
    const CATEGORY: RuleCategory = RuleCategory::System;

    fn resource(&self) -> &str {
        self.resource.as_deref().unwrap_or("")
    }
}
