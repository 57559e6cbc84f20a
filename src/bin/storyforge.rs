//! Storyforge CLI Binary

use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use storyforge::logging::init_logging;
use storyforge::tooling::cli::{Cli, CliContext, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let context =
        CliContext::new(cli.config.clone(), cli.empty).context("Failed to load configuration")?;

    let mut logging = context.config().logging.clone();
    cli.apply_logging_overrides(&mut logging);
    logging.validate()?;
    init_logging(Some(&logging)).context("Failed to initialize logging")?;

    if cli.command == Commands::Shell {
        let stdin = std::io::stdin();
        let interactive = stdin.is_terminal();
        context.run_shell(stdin.lock(), std::io::stdout(), interactive)?;
        return Ok(());
    }

    let output = context.execute(&cli.command)?;
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}
