use anyhow::Result;
use rulesync_common::{build_key, RuleCategory};
use serde::Serialize;

use crate::output::{key_table, print_json, theme, OutputMode};

#[derive(clap::Args)]
pub struct KeysArgs {
    #[arg(long, help = "Service (app) name")]
    app: String,
}

#[derive(Serialize)]
struct KeyRow {
    category: &'static str,
    data_id: String,
    group: &'static str,
}

pub fn execute(args: KeysArgs, mode: OutputMode) -> Result<()> {
    let rows = key_rows(&args.app);

    match mode {
        OutputMode::Json => print_json(&rows)?,
        OutputMode::Human => {
            theme::print_header(&format!("Store keys for {}", args.app));
            let table = key_table(
                RuleCategory::ALL
                    .into_iter()
                    .zip(&rows)
                    .map(|(category, row)| (category, row.data_id.as_str(), row.group)),
            );
            println!("{table}");
        }
    }
    Ok(())
}

fn key_rows(app: &str) -> Vec<KeyRow> {
    RuleCategory::ALL
        .into_iter()
        .map(|category| {
            let (data_id, group) = build_key(app, category);
            KeyRow {
                category: category.as_str(),
                data_id,
                group,
            }
        })
        .collect()
}
