use anyhow::{Context, Result};
use clap::Parser;

use keysend::cli::CliArgs;
use keysend::scenario::{self, Scenario};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    keysend::tracing::init(!args.no_log_file);

    let config = args.load_config().context("loading config")?;
    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;

    let report = scenario::run(&scenario, &config).context("replaying scenario")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
