use std::time::Duration;

use anyhow::{bail, Context, Result};
use rulesync_client::{MachineTarget, RuleSyncClient};
use rulesync_common::codec;
use rulesync_common::entity::{
    ApiDefinitionEntity, AuthorityRuleEntity, DegradeRuleEntity, FlowRuleEntity,
    GatewayFlowRuleEntity, ParamFlowRuleEntity, SystemRuleEntity,
};
use rulesync_common::{RuleCategory, RuleEntity, SyncRule};

use super::helpers::{self, CategoryArg, TargetArgs};
use crate::output::{confirm, print_json, spinner, theme, OutputMode};

#[derive(clap::Args)]
pub struct PublishArgs {
    #[arg(value_enum, help = "Rule category")]
    category: CategoryArg,
    #[command(flatten)]
    target: TargetArgs,
    #[arg(long, help = "JSON array of rules: file path or inline JSON")]
    data: String,
    #[arg(long, help = "Skip confirmation prompt")]
    yes: bool,
}

pub fn execute(
    args: PublishArgs,
    mode: OutputMode,
    server: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let category = RuleCategory::from(args.category);
    let raw = helpers::read_data(&args.data)?;
    let target = args.target.target();

    if mode.is_interactive() && !args.yes {
        let count = codec::decode::<serde_json::Value>(Some(&raw))
            .with_context(|| format!("parsing {category} rules"))?
            .len();
        if !confirm::confirm_replace(category, &target.app, count) {
            theme::print_dim("Cancelled.");
            return Ok(());
        }
    }

    let client = helpers::build_client(server.as_deref(), config_path.as_deref())?;

    let sp = mode
        .is_interactive()
        .then(|| spinner::create(&format!("Publishing {category} rules...")));

    let result = dispatch(&client, category, &target, &raw);
    client.shutdown(Duration::from_secs(1));

    match (&result, sp) {
        (Ok(count), Some(sp)) => spinner::finish_ok(
            &sp,
            &format!("Published {count} {category} rules for {}", target.app),
        ),
        (Err(_), Some(sp)) => spinner::finish_err(&sp, "Publish failed"),
        (Ok(count), None) => print_json(&serde_json::json!({
            "published": true,
            "category": category.as_str(),
            "app": target.app,
            "rules": count,
        }))?,
        (Err(_), None) => {}
    }
    result.map(|_| ())
}

fn dispatch(
    client: &RuleSyncClient,
    category: RuleCategory,
    target: &MachineTarget,
    raw: &str,
) -> Result<usize> {
    let (app, ip, port) = (target.app.as_str(), target.ip.as_str(), target.port);
    match category {
        RuleCategory::Flow => {
            let rules: Vec<FlowRuleEntity> = parse_rules(target, raw)?;
            let count = rules.len();
            client
                .set_flow_rules_async(app, ip, port, Some(rules))
                .wait()
                .context("publishing flow rules")?;
            Ok(count)
        }
        RuleCategory::HotspotParam => {
            let rules: Vec<ParamFlowRuleEntity> = parse_rules(target, raw)?;
            let count = rules.len();
            client
                .set_param_flow_rules(app, ip, port, Some(rules))
                .wait()
                .context("publishing param flow rules")?;
            Ok(count)
        }
        RuleCategory::Degrade => {
            let rules: Vec<DegradeRuleEntity> = parse_rules(target, raw)?;
            accepted(rules.len(), client.set_degrade_rules(app, ip, port, Some(rules)))
        }
        RuleCategory::System => {
            let rules: Vec<SystemRuleEntity> = parse_rules(target, raw)?;
            accepted(rules.len(), client.set_system_rules(app, ip, port, Some(rules)))
        }
        RuleCategory::Authority => {
            let rules: Vec<AuthorityRuleEntity> = parse_rules(target, raw)?;
            accepted(rules.len(), client.set_authority_rules(app, ip, port, Some(rules)))
        }
        RuleCategory::GatewayApiGroup => {
            let apis: Vec<ApiDefinitionEntity> = parse_rules(target, raw)?;
            accepted(apis.len(), client.modify_apis(app, ip, port, Some(apis)))
        }
        RuleCategory::GatewayFlow => {
            let rules: Vec<GatewayFlowRuleEntity> = parse_rules(target, raw)?;
            accepted(rules.len(), client.modify_gateway_flow_rules(app, ip, port, Some(rules)))
        }
    }
}

fn accepted(count: usize, ok: bool) -> Result<usize> {
    if !ok {
        bail!("the store did not accept the rules (see log for details)");
    }
    Ok(count)
}

/// Reads a JSON array of bare records, as they are stored, and binds each
/// one to `target`.
fn parse_rules<R: SyncRule>(target: &MachineTarget, raw: &str) -> Result<Vec<RuleEntity<R>>> {
    let records: Vec<R> = codec::decode(Some(raw))
        .with_context(|| format!("parsing {} rules", R::CATEGORY))?;
    Ok(records.into_iter().map(|r| target.entity(r)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesync_common::rules::{AuthorityRule, FlowRule};

    fn target() -> MachineTarget {
        MachineTarget::new("order-svc", "10.0.0.7", 8719)
    }

    #[test]
    fn parses_bare_records_and_binds_target() {
        let raw = r#"[{"resource":"/orders","count":20.0},{"resource":"/pay","count":5.0}]"#;
        let rules: Vec<RuleEntity<FlowRule>> = parse_rules(&target(), raw).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].rule.resource, "/orders");
        assert_eq!(rules[1].rule.count, 5.0);
        assert!(rules.iter().all(|r| r.app == "order-svc" && r.port == 8719));
    }

    #[test]
    fn blank_input_is_an_empty_set() {
        let rules: Vec<RuleEntity<AuthorityRule>> = parse_rules(&target(), "  ").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn malformed_input_is_an_error() {
        let err = parse_rules::<FlowRule>(&target(), "{not json").unwrap_err();
        assert!(format!("{err:#}").contains("parsing flow rules"));
    }

    #[test]
    fn rejected_publish_is_an_error() {
        assert!(accepted(3, false).is_err());
        assert_eq!(accepted(3, true).unwrap(), 3);
    }
}
