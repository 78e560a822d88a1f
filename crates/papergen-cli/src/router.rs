//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::{commands, logging};
use papergen_core::config::{LoggingConfig, load_config};
use std::path::Path;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let config_path = Path::new(&cli.config_file);

    match cli.command {
        Commands::Generate(args) => {
            let config = load_config(config_path, args.overrides(cli.verbose))?;
            logging::init(&config.logging);
            commands::generate::run(args, config, cli.verbose).await
        }
        Commands::Styles => {
            logging::init(&quiet_logging(cli.verbose));
            commands::styles::show(config_path)
        }
        Commands::Config { action } => {
            logging::init(&quiet_logging(cli.verbose));
            match action {
                ConfigAction::Show => commands::config::show(config_path, cli.verbose),
                ConfigAction::Init { force } => commands::config::init(config_path, force),
            }
        }
    }
}

/// Logging for utility commands, which must work even with a broken config file
fn quiet_logging(verbose: bool) -> LoggingConfig {
    let mut logging = LoggingConfig::default();
    if verbose {
        logging.level = "debug".to_string();
    }
    logging
}
