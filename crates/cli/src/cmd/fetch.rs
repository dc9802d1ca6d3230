use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rulesync_client::RuleSyncClient;
use rulesync_common::{RuleCategory, RuleEntity, SyncRule};

use super::helpers::{self, CategoryArg, TargetArgs};
use crate::output::{print_json, print_success, rule_table, spinner, theme, OutputMode};

#[derive(clap::Args)]
pub struct FetchArgs {
    #[arg(value_enum, help = "Rule category")]
    category: CategoryArg,
    #[command(flatten)]
    target: TargetArgs,
}

pub fn execute(
    args: FetchArgs,
    mode: OutputMode,
    server: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let client = helpers::build_client(server.as_deref(), config_path.as_deref())?;
    let category = RuleCategory::from(args.category);

    let sp = mode
        .is_interactive()
        .then(|| spinner::create(&format!("Fetching {category} rules...")));

    let result = dispatch(&client, category, &args.target, mode, sp.as_ref());
    client.shutdown(Duration::from_secs(1));

    if let (Err(_), Some(sp)) = (&result, &sp) {
        spinner::finish_err(sp, "Fetch failed");
    }
    result
}

fn dispatch(
    client: &RuleSyncClient,
    category: RuleCategory,
    t: &TargetArgs,
    mode: OutputMode,
    sp: Option<&ProgressBar>,
) -> Result<()> {
    let (app, ip, port) = (t.app.as_str(), t.ip.as_str(), t.port);
    let out = Out { app, mode, sp };
    match category {
        RuleCategory::Flow => render(client.fetch_flow_rules(app, ip, port), &out),
        RuleCategory::Degrade => render(client.fetch_degrade_rules(app, ip, port), &out),
        RuleCategory::System => render(client.fetch_system_rules(app, ip, port), &out),
        RuleCategory::Authority => render(client.fetch_authority_rules(app, ip, port), &out),
        RuleCategory::HotspotParam => {
            let rules = client.fetch_param_flow_rules(app, ip, port).wait();
            render(Some(rules.context("fetching param flow rules")?), &out)
        }
        RuleCategory::GatewayApiGroup => {
            let apis = client.fetch_apis(app, ip, port).wait();
            render(Some(apis.context("fetching gateway API groups")?), &out)
        }
        RuleCategory::GatewayFlow => {
            let rules = client.fetch_gateway_flow_rules(app, ip, port).wait();
            render(Some(rules.context("fetching gateway flow rules")?), &out)
        }
    }
}

struct Out<'a> {
    app: &'a str,
    mode: OutputMode,
    sp: Option<&'a ProgressBar>,
}

/// `None` is printed as JSON `null`: the store holds nothing for the key, or
/// the read failed (see the log).
fn render<R: SyncRule>(rules: Option<Vec<RuleEntity<R>>>, out: &Out<'_>) -> Result<()> {
    if let Some(sp) = out.sp {
        spinner::finish_clear(sp);
    }
    let app = out.app;
    match out.mode {
        OutputMode::Json => print_json(&rules)?,
        OutputMode::Human => {
            let Some(rules) = rules else {
                theme::print_dim(&format!("No {} rules stored for {app}", R::CATEGORY));
                return Ok(());
            };
            if rules.is_empty() {
                print_success(&format!("{} rule set for {app} is empty", R::CATEGORY));
                return Ok(());
            }
            theme::print_header(&format!("{} rules for {app}", R::CATEGORY));
            println!("{}", rule_table(&rules)?);
        }
    }
    Ok(())
}
