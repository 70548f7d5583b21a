#![doc = r#"
The events found inside a track chunk.

Every [`TrackEvent`] pairs a delta time with one of three kinds of payload:

```text
                  |------------|
                  | TrackEvent |
                  |------------|
                 /      |       \
|-----------|  |--------------|  |-------------|
| MetaEvent |  | ControlEvent |  | SysExEvent  |
|-----------|  |--------------|  |-------------|
```
"#]

mod sysex;
pub use sysex::*;

mod ticked;
pub use ticked::*;

use crate::{file::MetaEvent, message::ControlEvent};

/// A single event in a track, timed relative to the event before it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    delta_ticks: u32,
    kind: EventKind,
}

impl TrackEvent {
    /// Create an event from a delta time and payload
    pub const fn new(delta_ticks: u32, kind: EventKind) -> Self {
        Self { delta_ticks, kind }
    }

    /// Ticks elapsed since the previous event in the same track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The payload of the event
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Consume the event, returning its payload
    pub fn into_kind(self) -> EventKind {
        self.kind
    }

    /// Returns the meta event, if this is one
    pub const fn meta(&self) -> Option<&MetaEvent> {
        match &self.kind {
            EventKind::Meta(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the channel event, if this is one
    pub const fn control(&self) -> Option<&ControlEvent> {
        match &self.kind {
            EventKind::Control(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the system exclusive block, if this is one
    pub const fn sysex(&self) -> Option<&SysExEvent> {
        match &self.kind {
            EventKind::SysEx(s) => Some(s),
            _ => None,
        }
    }

    /// True if this event terminates its track
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self.kind, EventKind::Meta(MetaEvent::EndOfTrack))
    }
}

/// The three categories of track event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Non-performance annotations, status `0xFF`
    Meta(MetaEvent),
    /// Performance events addressed to one of 16 channels, status `0x80`-`0xEF`
    Control(ControlEvent),
    /// System exclusive blocks, status `0xF0` or `0xF7`
    SysEx(SysExEvent),
}

impl From<MetaEvent> for EventKind {
    fn from(value: MetaEvent) -> Self {
        Self::Meta(value)
    }
}

impl From<ControlEvent> for EventKind {
    fn from(value: ControlEvent) -> Self {
        Self::Control(value)
    }
}

impl From<SysExEvent> for EventKind {
    fn from(value: SysExEvent) -> Self {
        Self::SysEx(value)
    }
}
