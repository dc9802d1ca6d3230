mod config;
mod fetch;
pub(crate) mod helpers;
mod keys;
mod publish;
mod version;

use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Show the store keys a service's rule sets live under
    Keys(keys::KeysArgs),
    /// Read one rule set from the store
    Fetch(fetch::FetchArgs),
    /// Replace one rule set in the store
    Publish(publish::PublishArgs),
    #[command(subcommand)]
    Config(config::ConfigCmd),
    /// Print version information
    Version,
}

pub fn run(opts: crate::Opts) -> Result<()> {
    let mode = opts.output_mode();
    match opts.cmd {
        Commands::Keys(args) => keys::execute(args, mode),
        Commands::Fetch(args) => fetch::execute(args, mode, opts.server, opts.config),
        Commands::Publish(args) => publish::execute(args, mode, opts.server, opts.config),
        Commands::Config(cmd) => config::execute(cmd, mode, opts.server, opts.config),
        Commands::Version => {
            version::execute(mode);
            Ok(())
        }
    }
}
