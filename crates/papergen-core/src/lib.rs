//! papergen core library
//!
//! Builds prompts, posts them to a streaming generation endpoint, and
//! reassembles the server-sent-event response into text as it arrives.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod prompt;
pub mod segment;
pub mod session;
pub mod stream;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, ConfigOverrides};
pub use dispatcher::{ByteStream, ChunkSource, Dispatcher};
pub use error::{PaperError, PaperResult};
pub use prompt::{Prompt, Style};
pub use segment::segment;
pub use session::{
    GenerationObserver, GenerationOutcome, GenerationSession, GenerationState, NoopObserver,
    RequestId, SessionOptions,
};
pub use stream::{Reassembler, ReassemblyStats};
