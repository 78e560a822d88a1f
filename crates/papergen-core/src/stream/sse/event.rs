//! SSE event types

use std::time::Duration;

/// A dispatched SSE event frame
#[derive(Debug, Clone, PartialEq)]
pub struct SseEvent {
    /// Event type from the `event:` field, if the frame named one
    pub event_type: Option<String>,
    /// Event data; multiple `data:` lines are joined with `\n`
    pub data: String,
    /// Last event ID seen on the stream
    pub id: Option<String>,
}

/// Something the parser recognised in the stream
#[derive(Debug, Clone, PartialEq)]
pub enum SseItem {
    /// A complete data-carrying frame
    Event(SseEvent),
    /// A `retry:` field asking the client to change its reconnect delay
    ReconnectInterval(Duration),
}

impl SseItem {
    /// The event, if this item is a data frame
    pub fn into_event(self) -> Option<SseEvent> {
        match self {
            Self::Event(event) => Some(event),
            Self::ReconnectInterval(_) => None,
        }
    }
}
