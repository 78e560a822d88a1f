//! Session state, request identity and observer hooks

use crate::stream::ReassemblyStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one submission; strictly increasing within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub(crate) u64);

impl RequestId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the current generation
///
/// ```text
/// Idle -> Requesting -> Streaming -> Done
///              |            |
///              +-> Failed <-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request sent, waiting for the response head
    Requesting,
    /// Reading the event stream and accumulating text
    Streaming,
    /// Stream ended; output is final
    Done,
    /// Request rejected, stream broken, timed out or cancelled
    Failed,
}

impl GenerationState {
    /// Whether a generation is in flight (the "loading" state)
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Requesting | Self::Streaming)
    }

    /// Whether this state ends a generation
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Streaming => "streaming",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Receives progress of the current generation.
///
/// Only the current request is reported; superseded requests go quiet.
pub trait GenerationObserver: Send + Sync {
    /// The session entered `state`
    fn on_state(&self, _request_id: RequestId, _state: GenerationState) {}

    /// `fragment` was appended to the output
    fn on_fragment(&self, _request_id: RequestId, _fragment: &str) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

/// Result of a completed generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub request_id: RequestId,
    /// Full accumulated text
    pub text: String,
    /// Text split into labelled papers
    pub segments: Vec<String>,
    pub stats: ReassemblyStats,
}
