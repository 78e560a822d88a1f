//! Configuration management commands

use crate::console::CliConsole;
use anyhow::{Context, bail};
use colored::*;
use papergen_core::config::{Config, ConfigOverrides, load_config, user_config_path};
use std::path::Path;

/// Show the effective configuration
pub fn show(config_file: &Path, verbose: bool) -> anyhow::Result<()> {
    let console = CliConsole::new(verbose);
    console.print_header("Configuration");

    if config_file.exists() {
        console.success(&format!("Loaded configuration from: {}", config_file.display()));
    } else {
        match user_config_path().filter(|p| p.exists()) {
            Some(user) => {
                console.success(&format!("Loaded configuration from: {}", user.display()))
            }
            None => console.warn(&format!(
                "Configuration file not found: {}, using defaults",
                config_file.display()
            )),
        }
    }

    let config = load_config(config_file, ConfigOverrides::default())?;
    print!("{}", config.to_toml_string()?);

    if let Some(user) = user_config_path() {
        println!();
        println!(
            "{} {}",
            "Per-user configuration:".dimmed(),
            user.display().to_string().dimmed()
        );
    }
    Ok(())
}

/// Write a default configuration file
pub fn init(config_file: &Path, force: bool) -> anyhow::Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration Initialization");

    write_default(config_file, force)?;

    console.success(&format!("Created configuration file: {}", config_file.display()));
    console.info("Edit the endpoint to point at your generation server");
    Ok(())
}

fn write_default(config_file: &Path, force: bool) -> anyhow::Result<()> {
    if config_file.exists() && !force {
        bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            config_file.display()
        );
    }

    let contents = Config::default().to_toml_string()?;
    std::fs::write(config_file, contents)
        .with_context(|| format!("Failed to write configuration file: {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use papergen_core::config::load_from_file;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("papergen.toml");

        write_default(&path, false).unwrap();

        let loaded = load_from_file(&path).unwrap().unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("papergen.toml");
        std::fs::write(&path, "endpoint = \"http://example.test/gen\"\n").unwrap();

        let err = write_default(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("example.test"));

        write_default(&path, true).unwrap();
        assert_eq!(load_from_file(&path).unwrap().unwrap(), Config::default());
    }
}
