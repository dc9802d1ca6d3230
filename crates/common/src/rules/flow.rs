use serde::{Deserialize, Serialize};

use super::{default_limit_app, SyncRule};
use crate::data_id::RuleCategory;

pub const GRADE_THREAD: i32 = 0;
pub const GRADE_QPS: i32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowRule {
    pub resource: String,
    pub limit_app: String,
    pub grade: i32,
    pub count: f64,
    pub strategy: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_resource: Option<String>,
    pub control_behavior: i32,
    pub warm_up_period_sec: i32,
    pub max_queueing_time_ms: i32,
    pub cluster_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_config: Option<ClusterConfig>,
}

impl Default for FlowRule {
    fn default() -> Self {
        Self {
            resource: String::new(),
            limit_app: default_limit_app(),
            grade: GRADE_QPS,
            count: 0.0,
            strategy: 0,
            ref_resource: None,
            control_behavior: 0,
            warm_up_period_sec: 10,
            max_queueing_time_ms: 500,
            cluster_mode: false,
            cluster_config: None,
        }
    }
}

impl SyncRule for FlowRule {
    const CATEGORY: RuleCategory = RuleCategory::Flow;

    fn resource(&self) -> &str {
        &self.resource
    }
}

/// Cluster-mode settings shared by flow and hotspot-parameter rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<i64>,
    pub threshold_type: i32,
    pub fallback_to_local_when_fail: bool,
    pub strategy: i32,
    pub sample_count: i32,
    pub window_interval_ms: i32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            flow_id: None,
            threshold_type: 0,
            fallback_to_local_when_fail: true,
            strategy: 0,
            sample_count: 10,
            window_interval_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_payload_takes_defaults() {
        let rule: FlowRule = serde_json::from_str(r#"{"resource":"getOrder","count":100}"#).unwrap();
        assert_eq!(rule.resource, "getOrder");
        assert_eq!(rule.count, 100.0);
        assert_eq!(rule.limit_app, "default");
        assert_eq!(rule.grade, GRADE_QPS);
        assert_eq!(rule.warm_up_period_sec, 10);
        assert!(rule.cluster_config.is_none());
    }

    #[test]
    fn serializes_camel_case_without_absent_options() {
        let rule = FlowRule {
            resource: "getOrder".into(),
            count: 5.0,
            ..Default::default()
        };
        let v = serde_json::to_value(&rule).unwrap();
        assert_eq!(v["limitApp"], "default");
        assert_eq!(v["maxQueueingTimeMs"], 500);
        assert!(v.get("refResource").is_none());
        assert!(v.get("clusterConfig").is_none());
    }

    #[test]
    fn cluster_config_decodes() {
        let rule: FlowRule = serde_json::from_str(
            r#"{"resource":"r","clusterMode":true,"clusterConfig":{"flowId":7,"thresholdType":1}}"#,
        )
        .unwrap();
        let cfg = rule.cluster_config.unwrap();
        assert_eq!(cfg.flow_id, Some(7));
        assert_eq!(cfg.threshold_type, 1);
        assert!(cfg.fallback_to_local_when_fail);
    }
}
