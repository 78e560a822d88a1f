//! papergen CLI application
//!
//! Posts a prompt to the generation endpoint and renders the streamed
//! answer as it arrives, then splits it into the two labelled papers.
//!
//! ```bash
//! papergen generate --style diploma "Soil erosion in terraced farming"
//! ```

mod args;
mod commands;
mod console;
mod logging;
mod router;
mod terminal;

use args::Cli;
use clap::Parser;
use console::CliConsole;
use papergen_core::PaperError;

/// Conventional exit status for a run stopped by SIGINT
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // Pick up PAPERGEN_* variables from a local .env file, if any
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = router::route(cli).await {
        let code = exit_code(&e);
        if code != EXIT_INTERRUPTED {
            CliConsole::new(true).error(&format!("{:#}", e));
        }
        std::process::exit(code);
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<PaperError>() {
        Some(PaperError::Cancelled) => EXIT_INTERRUPTED,
        _ => 1,
    }
}
