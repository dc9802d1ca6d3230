use serde::{Deserialize, Serialize};

use super::{default_limit_app, SyncRule};
use crate::data_id::RuleCategory;

/// Circuit-breaking rule. `grade` selects slow-call ratio (0), error
/// ratio (1) or error count (2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DegradeRule {
    pub resource: String,
    pub limit_app: String,
    pub grade: i32,
    pub count: f64,
    pub time_window: i32,
    pub min_request_amount: i32,
    pub slow_ratio_threshold: f64,
    pub stat_interval_ms: i32,
}

impl Default for DegradeRule {
    fn default() -> Self {
        Self {
            resource: String::new(),
            limit_app: default_limit_app(),
            grade: 0,
            count: 0.0,
            time_window: 0,
            min_request_amount: 5,
            slow_ratio_threshold: 1.0,
            stat_interval_ms: 1000,
        }
    }
}

impl SyncRule for DegradeRule {
    const CATEGORY: RuleCategory = RuleCategory::Degrade;

    fn resource(&self) -> &str {
        &self.resource
    }
}
