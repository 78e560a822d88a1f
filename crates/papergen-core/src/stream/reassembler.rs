//! Turns a raw SSE byte stream into accumulated display text

use crate::error::PaperResult;
use crate::stream::sse::{EventParser, SseItem};
use crate::stream::utf8::Utf8Decoder;
use futures::{Stream, StreamExt};
use serde::Deserialize;

/// Payload carried by each data frame
#[derive(Debug, Deserialize)]
struct TextPayload {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the `text` fragment from one frame's JSON data.
///
/// A payload without `text` (or with `"text": null`) yields an empty string.
/// Anything that is not a JSON object is an error.
pub fn extract_text(data: &str) -> Result<String, serde_json::Error> {
    let payload: TextPayload = serde_json::from_str(data)?;
    Ok(payload.text.unwrap_or_default())
}

/// Frame counters for one reassembly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReassemblyStats {
    /// Frames whose payload parsed and whose text was appended
    pub frames_applied: usize,
    /// Frames dropped because their payload was malformed
    pub frames_skipped: usize,
}

/// Incremental stream reassembler.
///
/// Owns the two accumulators a chunked stream needs: the UTF-8 decoder holds
/// partial characters and the event parser holds partial lines and frames.
/// Each chunk flows through both, in that order, and the extracted fragments
/// are appended to the output in arrival order.
#[derive(Debug, Default)]
pub struct Reassembler {
    decoder: Utf8Decoder,
    parser: EventParser,
    output: String,
    stats: ReassemblyStats,
}

impl Reassembler {
    /// Create an empty reassembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes.
    ///
    /// Returns the fragments appended by this chunk, in order. Empty
    /// fragments are counted but not returned.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decoder.decode(chunk);
        let items = self.parser.feed(&text);
        self.apply(items)
    }

    /// Flush both accumulators at end of stream
    pub fn finish(&mut self) -> Vec<String> {
        let tail = self.decoder.finish();
        let items = self.parser.feed(&tail);
        let fragments = self.apply(items);
        self.parser.finish();
        fragments
    }

    /// Text accumulated so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the reassembler and return the accumulated text
    pub fn into_output(self) -> String {
        self.output
    }

    /// Frame counters so far
    pub fn stats(&self) -> ReassemblyStats {
        self.stats
    }

    fn apply(&mut self, items: Vec<SseItem>) -> Vec<String> {
        let mut fragments = Vec::new();

        for item in items {
            let event = match item {
                SseItem::Event(event) => event,
                SseItem::ReconnectInterval(interval) => {
                    tracing::debug!(?interval, "ignoring reconnect interval");
                    continue;
                }
            };

            match extract_text(&event.data) {
                Ok(text) => {
                    self.stats.frames_applied += 1;
                    if !text.is_empty() {
                        self.output.push_str(&text);
                        fragments.push(text);
                    }
                }
                Err(e) => {
                    self.stats.frames_skipped += 1;
                    tracing::warn!(
                        error = %e,
                        event_type = event.event_type.as_deref().unwrap_or("message"),
                        data = %event.data,
                        "skipping frame with malformed payload"
                    );
                }
            }
        }

        fragments
    }
}

/// Drain a byte stream to completion and return the reassembled text.
///
/// Stops at the first stream error.
pub async fn reassemble<S, B>(stream: S) -> PaperResult<String>
where
    S: Stream<Item = PaperResult<B>>,
    B: AsRef<[u8]>,
{
    let mut stream = std::pin::pin!(stream);
    let mut reassembler = Reassembler::new();

    while let Some(chunk) = stream.next().await {
        reassembler.feed(chunk?.as_ref());
    }
    reassembler.finish();

    Ok(reassembler.into_output())
}
