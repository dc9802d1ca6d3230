use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use rulesync_client::config::{load_from_file, SyncConfig};
use rulesync_client::{MachineTarget, RuleSyncClient};
use rulesync_common::RuleCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Flow,
    Degrade,
    Param,
    System,
    Authority,
    GatewayApi,
    GatewayFlow,
}

impl From<CategoryArg> for RuleCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Flow => RuleCategory::Flow,
            CategoryArg::Degrade => RuleCategory::Degrade,
            CategoryArg::Param => RuleCategory::HotspotParam,
            CategoryArg::System => RuleCategory::System,
            CategoryArg::Authority => RuleCategory::Authority,
            CategoryArg::GatewayApi => RuleCategory::GatewayApiGroup,
            CategoryArg::GatewayFlow => RuleCategory::GatewayFlow,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct TargetArgs {
    #[arg(long, help = "Service (app) name")]
    pub app: String,
    #[arg(long, default_value = "127.0.0.1", help = "Machine IP the rules are viewed for")]
    pub ip: String,
    #[arg(long, default_value_t = 8719, help = "Machine port")]
    pub port: u16,
}

impl TargetArgs {
    pub fn target(&self) -> MachineTarget {
        MachineTarget::new(self.app.clone(), self.ip.clone(), self.port)
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join("rulesync").join("rulesync.yml");
    }
    PathBuf::from("/etc/rulesync/rulesync.yml")
}

pub fn load_config(config_path: Option<&str>) -> Result<SyncConfig> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    load_from_file(&path).with_context(|| format!("loading config from {}", path.display()))
}

/// A `--server` flag works without any config file; the file, when present,
/// still supplies namespace and credentials.
pub fn resolve_config(server_flag: Option<&str>, config_path: Option<&str>) -> Result<SyncConfig> {
    let Some(server) = server_flag else {
        return load_config(config_path);
    };

    let explicit = config_path.is_some();
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let mut cfg = if explicit || path.exists() {
        load_from_file(&path).with_context(|| format!("loading config from {}", path.display()))?
    } else {
        SyncConfig::default()
    };
    cfg.store.server_addr = server.to_string();
    Ok(cfg)
}

pub fn build_client(server_flag: Option<&str>, config_path: Option<&str>) -> Result<RuleSyncClient> {
    let cfg = resolve_config(server_flag, config_path)?;
    tracing::debug!(server = %cfg.store.server_addr, namespace = %cfg.store.namespace, "resolved store");
    RuleSyncClient::from_config(&cfg).context("creating rule sync client")
}

/// Reads JSON either from a file path or inline.
pub fn read_data(data: &str) -> Result<String> {
    if Path::new(data).exists() {
        std::fs::read_to_string(data).with_context(|| format!("reading {data}"))
    } else {
        Ok(data.to_string())
    }
}
