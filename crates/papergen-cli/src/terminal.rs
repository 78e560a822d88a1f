//! Live rendering of a generation in the terminal

use indicatif::ProgressBar;
use papergen_core::{GenerationObserver, GenerationState, RequestId};
use parking_lot::Mutex;
use std::io::Write;

/// Shows a spinner until text arrives, then streams fragments to `out`
pub struct TerminalObserver<W: Write + Send> {
    spinner: Mutex<Option<ProgressBar>>,
    out: Mutex<W>,
    streamed: Mutex<usize>,
}

impl<W: Write + Send> TerminalObserver<W> {
    pub fn new(spinner: ProgressBar, out: W) -> Self {
        Self {
            spinner: Mutex::new(Some(spinner)),
            out: Mutex::new(out),
            streamed: Mutex::new(0),
        }
    }

    /// Number of characters written so far
    pub fn streamed_chars(&self) -> usize {
        *self.streamed.lock()
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().take() {
            spinner.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> GenerationObserver for TerminalObserver<W> {
    fn on_state(&self, request_id: RequestId, state: GenerationState) {
        tracing::debug!(request = %request_id, %state, "generation state");

        if let Some(spinner) = self.spinner.lock().as_ref() {
            spinner.set_message(format!("Generating ({})...", state));
        }

        if state.is_terminal() {
            self.stop_spinner();
            if self.streamed_chars() > 0 {
                let mut out = self.out.lock();
                let _ = writeln!(out);
                let _ = out.flush();
            }
        }
    }

    fn on_fragment(&self, _request_id: RequestId, fragment: &str) {
        self.stop_spinner();

        let mut out = self.out.lock();
        if let Err(e) = out.write_all(fragment.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write fragment");
            return;
        }
        *self.streamed.lock() += fragment.chars().count();
    }
}
