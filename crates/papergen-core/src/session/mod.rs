//! Generation sessions
//!
//! A session drives one generation at a time: it dispatches the prompt,
//! pulls the event stream through a [`Reassembler`], publishes fragments to
//! an observer, and tracks the state the UI renders from.
//!
//! Every submission gets a fresh [`RequestId`]. Output is only written for
//! the current id, so a superseded stream can never leak into the output of
//! the request that replaced it.

mod state;

pub use state::{GenerationObserver, GenerationOutcome, GenerationState, NoopObserver, RequestId};

use crate::config::TimeoutConfig;
use crate::dispatcher::{ByteStream, ChunkSource};
use crate::error::{PaperError, PaperResult};
use crate::prompt::Prompt;
use crate::segment::segment;
use crate::stream::Reassembler;
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Time limits for one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Longest wait for the next chunk (or for the response head)
    pub idle_timeout: Duration,
    /// Longest duration of the whole generation
    pub stream_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&TimeoutConfig::default())
    }
}

impl From<&TimeoutConfig> for SessionOptions {
    fn from(timeouts: &TimeoutConfig) -> Self {
        Self {
            idle_timeout: timeouts.idle(),
            stream_timeout: timeouts.stream(),
        }
    }
}

/// Shared, lock-protected part of the session
#[derive(Debug, Default)]
struct Shared {
    current: Option<RequestId>,
    state: GenerationState,
    output: String,
}

/// Single-flight generation driver
pub struct GenerationSession {
    source: Arc<dyn ChunkSource>,
    options: SessionOptions,
    next_id: AtomicU64,
    shared: Mutex<Shared>,
}

impl GenerationSession {
    /// Create a session reading from `source`
    pub fn new(source: Arc<dyn ChunkSource>, options: SessionOptions) -> Self {
        Self {
            source,
            options,
            next_id: AtomicU64::new(1),
            shared: Mutex::new(Shared::default()),
        }
    }

    /// Current state
    pub fn state(&self) -> GenerationState {
        self.shared.lock().state
    }

    /// Snapshot of the accumulated output of the current request
    pub fn output(&self) -> String {
        self.shared.lock().output.clone()
    }

    /// Identity of the most recent submission
    pub fn current_request(&self) -> Option<RequestId> {
        self.shared.lock().current
    }

    /// Whether a generation is in flight
    pub fn is_busy(&self) -> bool {
        self.state().is_in_flight()
    }

    /// Submit a prompt unless a generation is already in flight.
    ///
    /// Fails with [`PaperError::Busy`] while another submission is
    /// requesting or streaming.
    pub async fn submit(
        &self,
        prompt: &Prompt,
        observer: &dyn GenerationObserver,
        cancel: CancellationToken,
    ) -> PaperResult<GenerationOutcome> {
        let id = {
            let mut shared = self.shared.lock();
            if shared.state.is_in_flight() {
                if let Some(current) = shared.current {
                    return Err(PaperError::Busy {
                        request_id: current.as_u64(),
                    });
                }
            }
            self.begin(&mut shared)
        };
        observer.on_state(id, GenerationState::Requesting);

        self.run(id, prompt, observer, cancel).await
    }

    /// Submit a prompt, superseding any generation in flight.
    ///
    /// The superseded call stops at its next chunk and returns
    /// [`PaperError::Superseded`]; nothing it reads reaches the output.
    pub async fn resubmit(
        &self,
        prompt: &Prompt,
        observer: &dyn GenerationObserver,
        cancel: CancellationToken,
    ) -> PaperResult<GenerationOutcome> {
        let id = {
            let mut shared = self.shared.lock();
            if let Some(previous) = shared.current.filter(|_| shared.state.is_in_flight()) {
                tracing::info!(%previous, "superseding in-flight generation");
            }
            self.begin(&mut shared)
        };
        observer.on_state(id, GenerationState::Requesting);

        self.run(id, prompt, observer, cancel).await
    }

    /// Allocate a new id and reset the accumulator
    fn begin(&self, shared: &mut Shared) -> RequestId {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        shared.current = Some(id);
        shared.state = GenerationState::Requesting;
        shared.output.clear();
        tracing::debug!(request = %id, "generation requested");
        id
    }

    async fn run(
        &self,
        id: RequestId,
        prompt: &Prompt,
        observer: &dyn GenerationObserver,
        cancel: CancellationToken,
    ) -> PaperResult<GenerationOutcome> {
        let deadline = deadline_after(self.options.stream_timeout);

        let opened = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PaperError::Cancelled),
            opened = tokio::time::timeout_at(
                deadline.min(deadline_after(self.options.idle_timeout)),
                self.source.open(prompt),
            ) => opened.unwrap_or(Err(PaperError::Timeout(self.options.idle_timeout))),
        };

        let stream = match opened {
            Ok(Some(stream)) => stream,
            Ok(None) => {
                tracing::debug!(request = %id, "empty response body");
                return self.complete(id, Reassembler::new(), observer);
            }
            Err(e) => return self.fail(id, e, observer),
        };

        if !self.transition(id, GenerationState::Streaming) {
            return Err(PaperError::Superseded {
                request_id: id.as_u64(),
            });
        }
        observer.on_state(id, GenerationState::Streaming);

        match self.consume(id, stream, deadline, observer, &cancel).await {
            Ok(reassembler) => self.complete(id, reassembler, observer),
            Err(e) => self.fail(id, e, observer),
        }
    }

    /// Pull chunks until the stream ends, publishing fragments as they land
    async fn consume(
        &self,
        id: RequestId,
        mut stream: ByteStream,
        deadline: Instant,
        observer: &dyn GenerationObserver,
        cancel: &CancellationToken,
    ) -> PaperResult<Reassembler> {
        let mut reassembler = Reassembler::new();
        let idle = self.options.idle_timeout;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PaperError::Cancelled),
                _ = tokio::time::sleep_until(deadline) => {
                    return Err(PaperError::Timeout(self.options.stream_timeout));
                }
                next = tokio::time::timeout(idle, stream.next()) => next,
            };

            let chunk = match next {
                Err(_) => return Err(PaperError::Timeout(idle)),
                Ok(None) => break,
                Ok(Some(chunk)) => chunk?,
            };

            if !self.is_current(id) {
                tracing::debug!(request = %id, "discarding chunk of superseded request");
                return Err(PaperError::Superseded {
                    request_id: id.as_u64(),
                });
            }

            let fragments = reassembler.feed(&chunk);
            self.publish(id, &fragments, observer)?;
        }

        let fragments = reassembler.finish();
        self.publish(id, &fragments, observer)?;

        Ok(reassembler)
    }

    /// Append fragments to the shared output and tell the observer
    fn publish(
        &self,
        id: RequestId,
        fragments: &[String],
        observer: &dyn GenerationObserver,
    ) -> PaperResult<()> {
        if fragments.is_empty() {
            return Ok(());
        }

        {
            let mut shared = self.shared.lock();
            if shared.current != Some(id) {
                return Err(PaperError::Superseded {
                    request_id: id.as_u64(),
                });
            }
            for fragment in fragments {
                shared.output.push_str(fragment);
            }
        }

        for fragment in fragments {
            observer.on_fragment(id, fragment);
        }
        Ok(())
    }

    fn complete(
        &self,
        id: RequestId,
        reassembler: Reassembler,
        observer: &dyn GenerationObserver,
    ) -> PaperResult<GenerationOutcome> {
        if !self.transition(id, GenerationState::Done) {
            return Err(PaperError::Superseded {
                request_id: id.as_u64(),
            });
        }

        let stats = reassembler.stats();
        let text = reassembler.into_output();
        let segments = segment(&text);
        tracing::info!(
            request = %id,
            chars = text.chars().count(),
            segments = segments.len(),
            frames = stats.frames_applied,
            skipped = stats.frames_skipped,
            "generation finished"
        );
        observer.on_state(id, GenerationState::Done);

        Ok(GenerationOutcome {
            request_id: id,
            text,
            segments,
            stats,
        })
    }

    fn fail(
        &self,
        id: RequestId,
        error: PaperError,
        observer: &dyn GenerationObserver,
    ) -> PaperResult<GenerationOutcome> {
        if matches!(error, PaperError::Superseded { .. }) {
            return Err(error);
        }

        if !self.transition(id, GenerationState::Failed) {
            tracing::debug!(request = %id, error = %error, "superseded request failed");
            return Err(PaperError::Superseded {
                request_id: id.as_u64(),
            });
        }

        tracing::warn!(request = %id, error = %error, "generation failed");
        observer.on_state(id, GenerationState::Failed);
        Err(error)
    }

    fn is_current(&self, id: RequestId) -> bool {
        self.shared.lock().current == Some(id)
    }

    /// Move to `state` if `id` is still current
    fn transition(&self, id: RequestId, state: GenerationState) -> bool {
        let mut shared = self.shared.lock();
        if shared.current != Some(id) {
            return false;
        }
        tracing::debug!(request = %id, from = %shared.state, to = %state, "state transition");
        shared.state = state;
        true
    }
}

/// Roughly 30 years; stands in for "no deadline"
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `now + after`, clamped so that huge configured timeouts cannot overflow
fn deadline_after(after: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(after).unwrap_or(now + FAR_FUTURE)
}
