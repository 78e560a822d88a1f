//! Incremental consumption of the generation event stream
//!
//! Bytes go through [`Utf8Decoder`], the decoded text through
//! [`EventParser`], and each frame's `text` field lands in the
//! [`Reassembler`] output.

pub mod reassembler;
pub mod sse;
pub mod utf8;

pub use reassembler::{ReassemblyStats, Reassembler, extract_text, reassemble};
pub use sse::{EventParser, SseEvent, SseItem};
pub use utf8::Utf8Decoder;
