//! Server-Sent Events (SSE) parser
//!
//! The parser works on already-decoded text and keeps its own line and frame
//! state, so it can be fed arbitrarily cut pieces of a stream:
//! - `\n`, `\r\n` and lone `\r` line endings, even when `\r\n` is split
//! - multi-line `data:` fields
//! - `event:`, `id:` and `retry:` fields, `:` comments
//! - a leading byte order mark

mod event;

pub use event::{SseEvent, SseItem};

use std::time::Duration;

/// Line-oriented SSE frame parser
///
/// SSE format:
/// ```text
/// event: event_type\n
/// id: optional_id\n
/// data: json_payload\n
/// data: continued_data\n
/// \n
/// ```
///
/// A blank line dispatches the frame. Frames without any `data:` line are
/// dropped.
#[derive(Debug, Default)]
pub struct EventParser {
    /// Current, not yet terminated line
    line: String,
    /// The previous piece ended with `\r`; a leading `\n` belongs to it
    after_cr: bool,
    /// The first character of the stream has been seen
    started: bool,
    /// `event:` value of the frame being built
    event_type: Option<String>,
    /// Joined `data:` values of the frame being built
    data: String,
    /// Whether the frame being built has any `data:` line
    has_data: bool,
    /// Last event ID; persists across frames
    last_id: Option<String>,
}

impl EventParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed decoded text and collect every item it completes
    pub fn feed(&mut self, text: &str) -> Vec<SseItem> {
        let mut items = Vec::new();
        let mut text = text;

        if !self.started {
            if text.is_empty() {
                return items;
            }
            self.started = true;
            text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        }

        for ch in text.chars() {
            if self.after_cr {
                self.after_cr = false;
                if ch == '\n' {
                    continue;
                }
            }

            match ch {
                '\n' => self.end_line(&mut items),
                '\r' => {
                    self.end_line(&mut items);
                    self.after_cr = true;
                }
                _ => self.line.push(ch),
            }
        }

        items
    }

    /// Signal end of stream.
    ///
    /// A frame that was never terminated by a blank line is discarded; the
    /// return value tells whether anything was thrown away.
    pub fn finish(&mut self) -> bool {
        let discarded = !self.line.is_empty() || self.has_data;
        if discarded {
            tracing::debug!(
                partial_line = %self.line,
                "discarding unterminated SSE frame at end of stream"
            );
        }
        self.line.clear();
        self.after_cr = false;
        self.reset_frame();
        discarded
    }

    /// Clear all buffered state, including the last event ID
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if a partial line or frame is buffered
    pub fn has_remaining(&self) -> bool {
        !self.line.is_empty() || self.has_data || self.event_type.is_some()
    }

    fn end_line(&mut self, items: &mut Vec<SseItem>) {
        let line = std::mem::take(&mut self.line);
        self.process_line(&line, items);
    }

    fn process_line(&mut self, line: &str, items: &mut Vec<SseItem>) {
        if line.is_empty() {
            self.dispatch(items);
            return;
        }

        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event_type = Some(value.to_string()),
            "data" => {
                if self.has_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.has_data = true;
            }
            "id" => {
                if !value.contains('\0') {
                    self.last_id = Some(value.to_string());
                }
            }
            "retry" => {
                if let Ok(millis) = value.parse::<u64>() {
                    items.push(SseItem::ReconnectInterval(Duration::from_millis(millis)));
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, items: &mut Vec<SseItem>) {
        if self.has_data {
            items.push(SseItem::Event(SseEvent {
                event_type: self.event_type.take().filter(|t| !t.is_empty()),
                data: std::mem::take(&mut self.data),
                id: self.last_id.clone(),
            }));
        }
        self.reset_frame();
    }

    fn reset_frame(&mut self) {
        self.event_type = None;
        self.data.clear();
        self.has_data = false;
    }
}
