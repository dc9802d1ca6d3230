use serde::{Deserialize, Serialize};

use super::SyncRule;
use crate::data_id::RuleCategory;

pub const RESOURCE_MODE_ROUTE_ID: i32 = 0;
pub const RESOURCE_MODE_CUSTOM_API_NAME: i32 = 1;

/// A named group of request paths that gateway flow rules can target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiDefinition {
    pub api_name: String,
    pub predicate_items: Vec<ApiPathPredicateItem>,
}

impl SyncRule for ApiDefinition {
    const CATEGORY: RuleCategory = RuleCategory::GatewayApiGroup;

    fn resource(&self) -> &str {
        &self.api_name
    }
}

/// `match_strategy`: 0 exact, 1 prefix, 2 regex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPathPredicateItem {
    pub pattern: String,
    pub match_strategy: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayFlowRule {
    pub resource: String,
    pub resource_mode: i32,
    pub grade: i32,
    pub count: f64,
    pub interval_sec: i64,
    pub control_behavior: i32,
    pub burst: i32,
    pub max_queueing_timeout_ms: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_item: Option<GatewayParamFlowItem>,
}

impl Default for GatewayFlowRule {
    fn default() -> Self {
        Self {
            resource: String::new(),
            resource_mode: RESOURCE_MODE_ROUTE_ID,
            grade: 1,
            count: 0.0,
            interval_sec: 1,
            control_behavior: 0,
            burst: 0,
            max_queueing_timeout_ms: 500,
            param_item: None,
        }
    }
}

impl SyncRule for GatewayFlowRule {
    const CATEGORY: RuleCategory = RuleCategory::GatewayFlow;

    fn resource(&self) -> &str {
        &self.resource
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayParamFlowItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    pub parse_strategy: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub match_strategy: i32,
}
