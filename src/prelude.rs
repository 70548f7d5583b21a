//! Everything needed to decode a file and walk its events.

pub use crate::{
    ControlError, HeaderError, MetaError, ParseError, SmpteError, TrackError,
    events::{EventKind, SysExEvent, SysExKind, Ticked, TickedEvents, TrackEvent},
    file::{
        FormatType, Header, KeySignature, MetaEvent, MetaType, Midi, SmpteFps, SmpteHeader,
        SmpteOffset, Tempo, TicksPerQuarterNote, TimeSignature, Timing, Track,
    },
    message::{Channel, ControlEvent, ControlEventType, VoiceEvent},
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};

#[cfg(feature = "std")]
pub use crate::file::LoadError;
