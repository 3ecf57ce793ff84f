mod commands;
mod non_interactive;
mod notify;
mod render;
mod repl;
mod setup;

use clap::Parser;
use std::io::IsTerminal;

use crate::args::CliArgs;
use crate::config::load_config;
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;
    log::info!(
        "starting agent-chat (config {}, found: {})",
        loaded.paths.config_file.display(),
        loaded.config_exists
    );

    let interactive = args.prompt.is_none() && std::io::stdin().is_terminal();
    let options = setup::SetupOptions::from_args(&args, interactive);
    let controller = setup::build_controller(&loaded.config, &loaded.paths, &options)?;

    if interactive {
        repl::run_repl(controller).await
    } else {
        non_interactive::run_non_interactive(&args, controller).await
    }
}
