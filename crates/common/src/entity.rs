//! Rules as the dashboard sees them: a stored record plus the machine
//! (`app`, `ip`, `port`) whose view it belongs to.
//!
//! The decoration never reaches the store; [`RuleEntity::into_rule`] strips
//! it before encoding.

use serde::{Deserialize, Serialize};

use crate::rules::{
    ApiDefinition, AuthorityRule, DegradeRule, FlowRule, GatewayFlowRule, ParamFlowRule, SyncRule,
    SystemRule,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntity<R> {
    pub app: String,
    pub ip: String,
    pub port: u16,
    #[serde(flatten)]
    pub rule: R,
}

pub type FlowRuleEntity = RuleEntity<FlowRule>;
pub type DegradeRuleEntity = RuleEntity<DegradeRule>;
pub type ParamFlowRuleEntity = RuleEntity<ParamFlowRule>;
pub type SystemRuleEntity = RuleEntity<SystemRule>;
pub type AuthorityRuleEntity = RuleEntity<AuthorityRule>;
pub type ApiDefinitionEntity = RuleEntity<ApiDefinition>;
pub type GatewayFlowRuleEntity = RuleEntity<GatewayFlowRule>;

impl<R: SyncRule> RuleEntity<R> {
    pub fn from_rule(app: impl Into<String>, ip: impl Into<String>, port: u16, rule: R) -> Self {
        Self {
            app: app.into(),
            ip: ip.into(),
            port,
            rule,
        }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn into_rule(self) -> R {
        self.rule
    }
}
