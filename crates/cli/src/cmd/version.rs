use colored::Colorize;
use serde::Serialize;

use crate::output::{print_json, OutputMode};

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    arch: &'static str,
    os: &'static str,
}

pub fn execute(mode: OutputMode) {
    let info = VersionInfo {
        name: "rulesync",
        version: env!("CARGO_PKG_VERSION"),
        arch: std::env::consts::ARCH,
        os: std::env::consts::OS,
    };

    match mode {
        OutputMode::Json => {
            let _ = print_json(&info);
        }
        OutputMode::Human => {
            println!();
            println!("  {} {}", "rulesync".bright_cyan().bold(), info.version.bright_white());
            println!("  {} {}", "Arch".dimmed(), info.arch);
            println!("  {} {}", "  OS".dimmed(), info.os);
            println!();
        }
    }
}
