//! Generate command: stream two papers for a description

use crate::args::GenerateArgs;
use crate::console::{CliConsole, spinner};
use crate::terminal::TerminalObserver;
use anyhow::{Context, bail};
use papergen_core::{
    Config, Dispatcher, GenerationSession, PaperError, Prompt, SessionOptions,
};
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Run one generation and render it
pub async fn run(args: GenerateArgs, config: Config, verbose: bool) -> anyhow::Result<()> {
    let console = CliConsole::new(verbose);

    let content = read_content(&args.content)?;
    let style = config.default_style;
    let prompt = Prompt::build(&content, style)?;
    console.info(&format!("Style: {}", style));
    console.info(&format!("Endpoint: {}", config.endpoint));
    tracing::debug!(prompt = %prompt, "built prompt");

    let dispatcher = Dispatcher::from_config(&config)?;
    let session = GenerationSession::new(
        Arc::new(dispatcher),
        SessionOptions::from(&config.timeouts),
    );

    let cancel = CancellationToken::new();
    let ctrl_c = cancel_on_ctrl_c(cancel.clone());

    let observer = TerminalObserver::new(spinner("Generating..."), std::io::stdout());
    let result = session.submit(&prompt, &observer, cancel).await;
    ctrl_c.abort();

    match result {
        Ok(outcome) => {
            if !args.raw {
                render_segments(&console, &outcome.segments);
            }
            if outcome.stats.frames_skipped > 0 {
                console.warn(&format!(
                    "{} malformed event(s) were skipped",
                    outcome.stats.frames_skipped
                ));
            }
            Ok(())
        }
        Err(PaperError::Cancelled) => {
            console.warn("Generation cancelled");
            Err(PaperError::Cancelled.into())
        }
        Err(e) => {
            if e.is_retryable() {
                console.warn("This looks temporary; running the command again may succeed");
            }
            Err(e).context("Generation failed")
        }
    }
}

/// Content from the arguments, or from stdin when it is piped in
fn read_content(words: &[String]) -> anyhow::Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("Nothing to generate: pass the description as an argument or pipe it on stdin");
    }

    let mut content = String::new();
    stdin
        .lock()
        .read_to_string(&mut content)
        .context("Failed to read description from stdin")?;
    Ok(content)
}

fn render_segments(console: &CliConsole, segments: &[String]) {
    let papers = displayable(segments);
    if papers.is_empty() {
        console.warn("The response contained no text");
        return;
    }

    console.print_header("Your generated papers");
    for (i, paper) in papers.iter().enumerate() {
        console.print_segment(i + 1, paper);
    }
}

/// Segments as shown on screen: trimmed, blank ones left out
fn displayable(segments: &[String]) -> Vec<&str> {
    segments
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn cancel_on_ctrl_c(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("interrupt received, cancelling generation");
                cancel.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "failed to listen for interrupt"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_joined_with_spaces() {
        let words = vec!["soil".to_string(), "erosion".to_string()];
        assert_eq!(read_content(&words).unwrap(), "soil erosion");
    }

    #[test]
    fn test_blank_segments_are_not_displayed() {
        let segments = papergen_core::segment("1. Alpha\n 2. ");
        assert_eq!(segments.len(), 2);
        assert_eq!(displayable(&segments), vec!["Alpha"]);
    }
}
