//! CLI argument definitions using clap
//!
//! - papergen generate "text"        # Stream two papers for the text
//! - echo "text" | papergen generate # Read the text from stdin
//! - papergen styles                 # List styles
//! - papergen config show|init       # Configuration helpers

use clap::{Args, Parser, Subcommand};
use papergen_core::Style;
use papergen_core::config::{ConfigOverrides, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "papergen")]
#[command(about = "Generate two academic papers from a short description, streamed live")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (toml, yaml or json)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Enable verbose output and debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate papers and stream them to the terminal
    Generate(GenerateArgs),

    /// List the available styles
    Styles,

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// What the papers should be about (read from stdin when omitted)
    pub content: Vec<String>,

    /// Style of the papers
    #[arg(long, short, value_parser = parse_style)]
    pub style: Option<Style>,

    /// Generation endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Longest wait for the next chunk, in seconds
    #[arg(long)]
    pub idle_timeout: Option<u64>,

    /// Longest duration of the whole generation, in seconds
    #[arg(long)]
    pub stream_timeout: Option<u64>,

    /// Print only the streamed text, without splitting it into papers
    #[arg(long)]
    pub raw: bool,
}

impl GenerateArgs {
    /// Command line values that override the configuration
    pub fn overrides(&self, verbose: bool) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            style: self.style,
            idle_timeout_secs: self.idle_timeout,
            stream_timeout_secs: self.stream_timeout,
            log_level: verbose.then(|| "debug".to_string()),
        }
    }
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_style(value: &str) -> Result<Style, String> {
    value.parse().map_err(|e: papergen_core::PaperError| e.to_string())
}
