//! Style listing command

use crate::console::CliConsole;
use colored::*;
use papergen_core::Style;
use papergen_core::config::{ConfigOverrides, load_config};
use std::path::Path;

/// Print every style with its description, marking the configured default
pub fn show(config_file: &Path) -> anyhow::Result<()> {
    let console = CliConsole::new(true);
    let default = configured_default(config_file, &console);

    console.print_header("Styles");
    for style in Style::ALL {
        let marker = if style == default {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {}{}{}",
            format!("{:<14}", style.as_str()).cyan().bold(),
            style.description(),
            marker
        );
    }
    Ok(())
}

/// Style `generate` uses when `--style` is not given
fn configured_default(config_file: &Path, console: &CliConsole) -> Style {
    match load_config(config_file, ConfigOverrides::default()) {
        Ok(config) => config.default_style,
        Err(e) => {
            console.warn(&format!("Ignoring configuration: {}", e));
            Style::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_comes_from_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("papergen.toml");
        std::fs::write(&path, "default_style = \"Casual\"\n").unwrap();

        let style = configured_default(&path, &CliConsole::new(false));
        assert_eq!(style, Style::Casual);
    }

    #[test]
    fn test_broken_config_falls_back_to_builtin_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("papergen.toml");
        std::fs::write(&path, "default_style = [").unwrap();

        let style = configured_default(&path, &CliConsole::new(false));
        assert_eq!(style, Style::Professional);
    }
}
