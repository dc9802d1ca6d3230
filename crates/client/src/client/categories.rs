use rulesync_common::entity::{
    ApiDefinitionEntity, AuthorityRuleEntity, DegradeRuleEntity, FlowRuleEntity,
    GatewayFlowRuleEntity, ParamFlowRuleEntity, SystemRuleEntity,
};
use rulesync_common::rules::{
    ApiDefinition, AuthorityRule, DegradeRule, FlowRule, GatewayFlowRule, ParamFlowRule,
    SystemRule,
};
use rulesync_common::{RuleEntity, SyncRule};

use super::RuleSyncClient;
use crate::pool::{self, Deferred};
use crate::target::MachineTarget;

// Result shapes per category. Blocking fetches give `None` on a miss or any
// failure; list fetches resolve to an empty list on a miss. Blocking
// methods wait on the pool and must not be called from async code.
impl RuleSyncClient {
    pub fn fetch_flow_rules(&self, app: &str, ip: &str, port: u16) -> Option<Vec<FlowRuleEntity>> {
        self.fetch_blocking::<FlowRule>(app, ip, port)
    }

    pub fn set_flow_rules_async(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        rules: Option<Vec<FlowRuleEntity>>,
    ) -> Deferred<()> {
        self.publish_rules(&MachineTarget::new(app, ip, port), rules)
    }

    pub fn fetch_degrade_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
    ) -> Option<Vec<DegradeRuleEntity>> {
        self.fetch_blocking::<DegradeRule>(app, ip, port)
    }

    pub fn set_degrade_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        rules: Option<Vec<DegradeRuleEntity>>,
    ) -> bool {
        self.publish_blocking(app, ip, port, rules)
    }

    /// Never resolves to "absent": the hotspot view renders the list as-is.
    pub fn fetch_param_flow_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
    ) -> Deferred<Vec<ParamFlowRuleEntity>> {
        self.fetch_listing::<ParamFlowRule>(app, ip, port)
    }

    pub fn set_param_flow_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        rules: Option<Vec<ParamFlowRuleEntity>>,
    ) -> Deferred<()> {
        self.publish_rules(&MachineTarget::new(app, ip, port), rules)
    }

    pub fn fetch_system_rules(&self, app: &str, ip: &str, port: u16) -> Option<Vec<SystemRuleEntity>> {
        self.fetch_blocking::<SystemRule>(app, ip, port)
    }

    pub fn set_system_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        rules: Option<Vec<SystemRuleEntity>>,
    ) -> bool {
        self.publish_blocking(app, ip, port, rules)
    }

    pub fn fetch_authority_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
    ) -> Option<Vec<AuthorityRuleEntity>> {
        self.fetch_blocking::<AuthorityRule>(app, ip, port)
    }

    pub fn set_authority_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        rules: Option<Vec<AuthorityRuleEntity>>,
    ) -> bool {
        self.publish_blocking(app, ip, port, rules)
    }

    pub fn fetch_apis(&self, app: &str, ip: &str, port: u16) -> Deferred<Vec<ApiDefinitionEntity>> {
        self.fetch_listing::<ApiDefinition>(app, ip, port)
    }

    pub fn modify_apis(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        apis: Option<Vec<ApiDefinitionEntity>>,
    ) -> bool {
        self.publish_blocking(app, ip, port, apis)
    }

    pub fn fetch_gateway_flow_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
    ) -> Deferred<Vec<GatewayFlowRuleEntity>> {
        self.fetch_listing::<GatewayFlowRule>(app, ip, port)
    }

    pub fn modify_gateway_flow_rules(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        rules: Option<Vec<GatewayFlowRuleEntity>>,
    ) -> bool {
        self.publish_blocking(app, ip, port, rules)
    }

    fn fetch_blocking<R: SyncRule>(&self, app: &str, ip: &str, port: u16) -> Option<Vec<RuleEntity<R>>> {
        if !pool::can_block() {
            tracing::warn!(service = app, category = %R::CATEGORY, "blocking fetch on a current-thread runtime");
            return None;
        }
        self.fetch_by_policy::<R>(&MachineTarget::new(app, ip, port))
            .wait()
            .ok()
            .flatten()
    }

    fn fetch_listing<R: SyncRule>(&self, app: &str, ip: &str, port: u16) -> Deferred<Vec<RuleEntity<R>>> {
        let target = MachineTarget::new(app, ip, port);
        let task = match self.prepare_policy_fetch::<R>(&target) {
            Ok(task) => task,
            Err(e) => return Deferred::failed(e),
        };
        // `Empty` categories always resolve to `Some`; an `Absent` one read
        // through here collapses a miss into an empty list.
        self.pool
            .submit(async move { task.await.map(Option::unwrap_or_default) })
    }

    fn publish_blocking<R: SyncRule>(
        &self,
        app: &str,
        ip: &str,
        port: u16,
        rules: Option<Vec<RuleEntity<R>>>,
    ) -> bool {
        if !pool::can_block() {
            tracing::warn!(service = app, category = %R::CATEGORY, "blocking publish on a current-thread runtime");
            return false;
        }
        self.publish_rules(&MachineTarget::new(app, ip, port), rules)
            .wait()
            .is_ok()
    }
}
