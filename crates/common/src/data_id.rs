use std::fmt;

pub const GROUP_ID: &str = "SENTINEL_GROUP";

pub const FLOW_DATA_ID_SUFFIX: &str = ".sentinel.rule.flow";
pub const DEGRADE_DATA_ID_SUFFIX: &str = ".sentinel.rule.degrade";
pub const PARAM_DATA_ID_SUFFIX: &str = ".sentinel.rule.param";
pub const SYSTEM_DATA_ID_SUFFIX: &str = ".sentinel.rule.system";
pub const AUTHORITY_DATA_ID_SUFFIX: &str = ".sentinel.rule.authority";
pub const GATEWAY_API_DATA_ID_SUFFIX: &str = ".sentinel.rule.gateway.api";
pub const GATEWAY_FLOW_DATA_ID_SUFFIX: &str = ".sentinel.rule.gateway.flow";

/// The kinds of rule sets kept in the configuration store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Flow,
    Degrade,
    HotspotParam,
    System,
    Authority,
    GatewayApiGroup,
    GatewayFlow,
}

/// What a fetch yields when the store holds nothing under the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPolicy {
    /// No value at all, distinct from a confirmed empty set.
    Absent,
    /// An empty list; list views never see a missing collection.
    Empty,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 7] = [
        Self::Flow,
        Self::Degrade,
        Self::HotspotParam,
        Self::System,
        Self::Authority,
        Self::GatewayApiGroup,
        Self::GatewayFlow,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Flow => FLOW_DATA_ID_SUFFIX,
            Self::Degrade => DEGRADE_DATA_ID_SUFFIX,
            Self::HotspotParam => PARAM_DATA_ID_SUFFIX,
            Self::System => SYSTEM_DATA_ID_SUFFIX,
            Self::Authority => AUTHORITY_DATA_ID_SUFFIX,
            Self::GatewayApiGroup => GATEWAY_API_DATA_ID_SUFFIX,
            Self::GatewayFlow => GATEWAY_FLOW_DATA_ID_SUFFIX,
        }
    }

    pub fn miss_policy(&self) -> MissPolicy {
        match self {
            Self::HotspotParam | Self::GatewayApiGroup | Self::GatewayFlow => MissPolicy::Empty,
            Self::Flow | Self::Degrade | Self::System | Self::Authority => MissPolicy::Absent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flow => "flow",
            Self::Degrade => "degrade",
            Self::HotspotParam => "param",
            Self::System => "system",
            Self::Authority => "authority",
            Self::GatewayApiGroup => "gateway-api",
            Self::GatewayFlow => "gateway-flow",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    pub service_name: String,
    pub category: RuleCategory,
}

impl StoreKey {
    pub fn new(service_name: impl Into<String>, category: RuleCategory) -> Self {
        Self {
            service_name: service_name.into(),
            category,
        }
    }

    pub fn data_id(&self) -> String {
        data_id_for(&self.service_name, self.category)
    }

    pub fn group_id(&self) -> &'static str {
        GROUP_ID
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", GROUP_ID, self.data_id())
    }
}

pub fn data_id_for(service_name: &str, category: RuleCategory) -> String {
    format!("{service_name}{}", category.suffix())
}

pub fn build_key(service_name: &str, category: RuleCategory) -> (String, &'static str) {
    (data_id_for(service_name, category), GROUP_ID)
}
