use anyhow::Result;
use clap::Subcommand;

use super::helpers;
use crate::output::{print_error, print_json, print_success, theme, OutputMode};

#[derive(Subcommand)]
pub enum ConfigCmd {
    Show,
    Validate,
    Path,
}

pub fn execute(
    cmd: ConfigCmd,
    mode: OutputMode,
    server: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    match cmd {
        ConfigCmd::Show => show(mode, server, config_path),
        ConfigCmd::Validate => validate(mode, config_path),
        ConfigCmd::Path => path(config_path),
    }
}

fn show(mode: OutputMode, server: Option<String>, config_path: Option<String>) -> Result<()> {
    let cfg = helpers::resolve_config(server.as_deref(), config_path.as_deref())?;

    match mode {
        OutputMode::Json => print_json(&cfg)?,
        OutputMode::Human => {
            theme::print_header("Rule Sync Configuration");

            theme::print_section("Store");
            theme::print_kv("Server", &cfg.store.server_addr);
            theme::print_kv_opt("Namespace", Some(cfg.store.namespace.as_str()), "<public>");
            theme::print_kv_opt("Username", cfg.store.username.as_deref(), "<not set>");
            theme::print_kv(
                "Password",
                if cfg.store.password.is_some() { "set" } else { "not set" },
            );
            theme::print_kv("Timeout", &format!("{} ms", cfg.store.timeout_ms));

            theme::print_section("Worker pool");
            theme::print_kv("Threads", &cfg.pool.resolved_threads().to_string());
            println!();
        }
    }

    Ok(())
}

fn validate(mode: OutputMode, config_path: Option<String>) -> Result<()> {
    match helpers::load_config(config_path.as_deref()) {
        Ok(_cfg) => match mode {
            OutputMode::Json => print_json(&serde_json::json!({"valid": true}))?,
            OutputMode::Human => print_success("Configuration is valid"),
        },
        Err(e) => match mode {
            OutputMode::Json => {
                print_json(&serde_json::json!({"valid": false, "error": format!("{e:#}")}))?;
            }
            OutputMode::Human => print_error(&format!("Invalid configuration: {e:#}")),
        },
    }

    Ok(())
}

fn path(config_path: Option<String>) -> Result<()> {
    let p = config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(helpers::default_config_path);

    println!("{}", p.display());
    Ok(())
}
