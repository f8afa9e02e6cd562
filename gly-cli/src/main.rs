//! gly-cli - Command line tool for glucose stability scoring.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gly-cli",
    version,
    about = "Glucose stability and chart toolkit"
)]
struct Cli {
    /// JSON settings file (display unit, chart defaults, UTC offset)
    #[arg(short = 's', long, global = true, default_value = "gly-settings.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: gly_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = gly_cmd::Settings::load(&cli.settings)?;
    log::debug!("settings: {:?}", settings);
    gly_cmd::run(cli.command, &settings)
}
