use serde::{Deserialize, Serialize};

use super::{default_limit_app, ClusterConfig, SyncRule};
use crate::data_id::RuleCategory;

/// Hotspot-parameter rule. Exception items are matched in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamFlowRule {
    pub resource: String,
    pub limit_app: String,
    pub grade: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_idx: Option<i32>,
    pub count: f64,
    pub control_behavior: i32,
    pub max_queueing_time_ms: i32,
    pub burst_count: i32,
    pub duration_in_sec: i64,
    pub param_flow_item_list: Vec<ParamFlowItem>,
    pub cluster_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_config: Option<ClusterConfig>,
}

impl Default for ParamFlowRule {
    fn default() -> Self {
        Self {
            resource: String::new(),
            limit_app: default_limit_app(),
            grade: 1,
            param_idx: None,
            count: 0.0,
            control_behavior: 0,
            max_queueing_time_ms: 0,
            burst_count: 0,
            duration_in_sec: 1,
            param_flow_item_list: Vec::new(),
            cluster_mode: false,
            cluster_config: None,
        }
    }
}

impl SyncRule for ParamFlowRule {
    const CATEGORY: RuleCategory = RuleCategory::HotspotParam;

    fn resource(&self) -> &str {
        &self.resource
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamFlowItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
}
