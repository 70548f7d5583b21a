#![doc = r#"
Track chunks and the event state machine that decodes them.

```text
"MTrk" <length: u32> ( <delta: vlq> <status?> <payload> )*
```

Each event is a delta time followed by a status byte that selects one of three
paths:

| status        | event                      | running status afterwards |
|---------------|----------------------------|---------------------------|
| `0xFF`        | [`MetaEvent`]              | cleared                   |
| `0xF0`/`0xF7` | [`SysExEvent`]             | cleared                   |
| `0x80`-`0xEF` | [`ControlEvent`]           | set to this status        |
| `0x00`-`0x7F` | [`ControlEvent`], implied  | unchanged                 |

An end of track meta event stops decoding, even if the declared length says
there is more.
"#]

use alloc::{string::String, vec::Vec};

use crate::{
    TrackError,
    events::{EventKind, SysExEvent, SysExKind, TickedEvents, TrackEvent},
    prelude::*,
    reader::{ReaderError, inv_data, latin1_string},
};

/// The four bytes every track chunk starts with
pub const TRACK_SIGNATURE: &[u8; 4] = b"MTrk";

#[doc = r#"
A decoded `MTrk` chunk.

The events are kept in file order, never re-sorted, and a track decoded by
[`Track::read`] is never empty.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    signature: String,
    length: u32,
    events: Vec<TrackEvent>,
}

impl Track {
    #[doc = r#"
Read a track chunk starting at the reader's position.

On success the reader sits directly after the end of track event, or at the
declared end of the chunk if the track has no end of track event.

# Errors
- [`TrackError::InvalidSignature`] if the chunk is not tagged `MTrk`
- [`TrackError::MissingRunningStatus`] for a data byte with no status to reuse
- [`TrackError::UnknownStatusByte`] for system common or realtime status bytes
- [`TrackError::Empty`] if the chunk holds no events
- any meta or control event error, or an out of bounds read
"#]
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let signature: [u8; 4] = reader.read_exact_size()?;
        if &signature != TRACK_SIGNATURE {
            return Err(ReaderError::parse_error(
                start,
                TrackError::InvalidSignature(signature).into(),
            ));
        }
        let length = reader.read_u32()?;
        let end = reader.buffer_position().saturating_add(length as usize);

        let mut events = Vec::new();
        let mut running_status = None;
        let mut ended = false;

        while reader.buffer_position() < end {
            let event = read_event(reader, &mut running_status)?;
            ended = event.is_end_of_track();
            events.push(event);
            if ended {
                break;
            }
        }

        if events.is_empty() {
            return Err(ReaderError::parse_error(start, TrackError::Empty.into()));
        }

        if !ended {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Track at position {start} reached its declared end without an end of track event"
            );
        }

        #[cfg(feature = "tracing")]
        tracing::trace!("Track at position {start}: {} event(s)", events.len());

        Ok(Self {
            signature: latin1_string(&signature),
            length,
            events,
        })
    }

    /// Always `MTrk` for a decoded track
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The declared length of the event stream in bytes
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// The events, in file order
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Consume the track, returning its events
    pub fn into_events(self) -> Vec<TrackEvent> {
        self.events
    }

    /// The track name, if the track has exactly one name event.
    ///
    /// Returns an empty string when there is no name or more than one.
    pub fn name(&self) -> &str {
        let mut names = self.events.iter().filter_map(|e| match e.meta() {
            Some(MetaEvent::TrackName(name)) => Some(name.as_str()),
            _ => None,
        });
        match (names.next(), names.next()) {
            (Some(name), None) => name,
            _ => "",
        }
    }

    /// Iterate the events paired with their absolute tick position.
    pub fn ticked_events(&self) -> TickedEvents<'_> {
        TickedEvents::new(&self.events)
    }
}

/// Decode one event, updating `running_status` along the way.
fn read_event(reader: &mut Reader<'_>, running_status: &mut Option<u8>) -> ReadResult<TrackEvent> {
    let delta_ticks = reader.read_vlq()?;
    let byte = reader.read_u8()?;

    let status = if byte < 0x80 {
        // first data byte of an event reusing the previous status, put it back
        reader.set_buffer_position(reader.buffer_position() - 1);
        running_status.ok_or_else(|| inv_data(reader, TrackError::MissingRunningStatus(byte)))?
    } else {
        byte
    };

    let kind = match status {
        0xFF => {
            *running_status = None;
            let code = reader.read_u8()?;
            EventKind::Meta(MetaEvent::read(reader, code)?)
        }
        0xF0 | 0xF7 => {
            *running_status = None;
            let kind = if status == 0xF0 {
                SysExKind::Normal
            } else {
                SysExKind::Escape
            };
            let sysex = SysExEvent::read(reader, kind)?;
            #[cfg(feature = "tracing")]
            tracing::debug!("SysEx ({status:#04X}) of {} byte(s)", sysex.data().len());
            EventKind::SysEx(sysex)
        }
        0x80..=0xEF => {
            *running_status = Some(status);
            EventKind::Control(ControlEvent::read(reader, status)?)
        }
        _ => {
            reader.set_buffer_position(reader.buffer_position() - 1);
            return Err(inv_data(reader, TrackError::UnknownStatusByte(status)));
        }
    };

    Ok(TrackEvent::new(delta_ticks, kind))
}

#[cfg(test)]
fn track_bytes(events: &[u8]) -> alloc::vec::Vec<u8> {
    let mut bytes = TRACK_SIGNATURE.to_vec();
    bytes.extend_from_slice(&(events.len() as u32).to_be_bytes());
    bytes.extend_from_slice(events);
    bytes
}

#[test]
fn running_status_reuses_previous_status() {
    use pretty_assertions::assert_eq;
    let bytes = track_bytes(&[
        0x00, 0x92, 0x30, 0x60, //
        0x00, 0x3C, 0x60, //
        0x10, 0x43, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);
    let track = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    let notes: Vec<_> = track
        .events()
        .iter()
        .filter_map(|e| e.control())
        .map(|c| (c.channel(), *c.event()))
        .collect();
    assert_eq!(
        notes,
        [
            (Channel::Three, VoiceEvent::NoteOn { note: 0x30, velocity: 0x60 }),
            (Channel::Three, VoiceEvent::NoteOn { note: 0x3C, velocity: 0x60 }),
            (Channel::Three, VoiceEvent::NoteOn { note: 0x43, velocity: 0x00 }),
        ]
    );
    assert_eq!(track.events()[2].delta_ticks(), 0x10);
}

#[test]
fn data_byte_without_status_fails() {
    let bytes = track_bytes(&[0x00, 0x3C, 0x60, 0x00, 0xFF, 0x2F, 0x00]);
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Track(TrackError::MissingRunningStatus(0x3C)))
    );
    assert_eq!(err.position(), 9);
}

#[test]
fn meta_event_clears_running_status() {
    let bytes = track_bytes(&[
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
        0x00, 0x3C, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Track(TrackError::MissingRunningStatus(0x3C)))
    );
}

#[test]
fn sysex_clears_running_status() {
    let bytes = track_bytes(&[
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0xF0, 0x02, 0x7E, 0xF7, //
        0x00, 0x3C, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Track(TrackError::MissingRunningStatus(0x3C)))
    );
}

#[test]
fn end_of_track_stops_before_declared_length() {
    let mut bytes = TRACK_SIGNATURE.to_vec();
    bytes.extend_from_slice(&100u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0xC0, 0x05, 0x00, 0xFF, 0x2F, 0x00]);
    let mut reader = Reader::from_byte_slice(&bytes);
    let track = Track::read(&mut reader).unwrap();
    assert_eq!(track.length(), 100);
    assert_eq!(track.events().len(), 2);
    assert!(track.events()[1].is_end_of_track());
    assert!(reader.is_at_end());
}

#[test]
fn missing_end_of_track_is_tolerated() {
    let bytes = track_bytes(&[0x00, 0xC0, 0x05, 0x60, 0xC0, 0x06]);
    let mut reader = Reader::from_byte_slice(&bytes);
    let track = Track::read(&mut reader).unwrap();
    assert_eq!(track.events().len(), 2);
    assert!(!track.events()[1].is_end_of_track());
    assert!(reader.is_at_end());
}

#[test]
fn empty_track_fails() {
    let bytes = track_bytes(&[]);
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Track(TrackError::Empty))
    );
}

#[test]
fn wrong_signature_fails() {
    let mut bytes = track_bytes(&[0x00, 0xFF, 0x2F, 0x00]);
    bytes[..4].copy_from_slice(b"MThd");
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Track(TrackError::InvalidSignature(*b"MThd")))
    );
    assert_eq!(err.position(), 0);
}

#[test]
fn system_common_status_fails() {
    let bytes = track_bytes(&[0x00, 0xF2, 0x00, 0x00, 0x00, 0xFF, 0x2F, 0x00]);
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Track(TrackError::UnknownStatusByte(0xF2)))
    );
    assert_eq!(err.position(), 9);
}

#[test]
fn sysex_kinds() {
    use pretty_assertions::assert_eq;
    let bytes = track_bytes(&[
        0x00, 0xF0, 0x03, 0x43, 0x12, 0x00, //
        0x10, 0xF7, 0x02, 0x07, 0xF7, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);
    let track = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    let sysex: Vec<_> = track
        .events()
        .iter()
        .filter_map(|e| e.sysex())
        .map(|s| (s.kind(), s.data().to_vec()))
        .collect();
    assert_eq!(
        sysex,
        [
            (SysExKind::Normal, alloc::vec![0x43, 0x12, 0x00]),
            (SysExKind::Escape, alloc::vec![0x07, 0xF7]),
        ]
    );
}

#[test]
fn track_name_and_ticks() {
    use pretty_assertions::assert_eq;
    let bytes = track_bytes(&[
        0x00, 0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd', //
        0x60, 0x90, 0x3C, 0x40, //
        0x81, 0x00, 0x3C, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);
    let track = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(track.name(), "Lead");
    let ticks: Vec<u64> = track
        .ticked_events()
        .map(|t| t.accumulated_ticks())
        .collect();
    assert_eq!(ticks, [0, 0x60, 0x60 + 0x80, 0x60 + 0x80]);
}

#[test]
fn track_without_name() {
    let bytes = track_bytes(&[0x00, 0xFF, 0x2F, 0x00]);
    let track = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(track.name(), "");
    assert_eq!(track.signature(), "MTrk");
}

#[test]
fn unknown_meta_does_not_stop_the_track() {
    use pretty_assertions::assert_eq;
    let bytes = track_bytes(&[
        0x00, 0xFF, 0x10, 0x03, 0x01, 0x02, 0x03, //
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);
    let track = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(track.events().len(), 3);
    assert_eq!(
        track.events()[0].meta(),
        Some(&MetaEvent::Unknown {
            meta_type: 0x10,
            data: alloc::vec![0x01, 0x02, 0x03]
        })
    );
    assert!(track.events()[1].control().is_some());
}

#[test]
fn multi_byte_payload_lengths() {
    use pretty_assertions::assert_eq;
    let mut events = alloc::vec![0x00, 0xFF, 0x7F, 0x81, 0x00];
    events.extend(core::iter::repeat_n(0x11, 128));
    events.extend_from_slice(&[0x00, 0xF0, 0x81, 0x01]);
    events.extend(core::iter::repeat_n(0x22, 129));
    events.extend_from_slice(&[0x00, 0xC3, 0x07, 0x00, 0xFF, 0x2F, 0x00]);

    let bytes = track_bytes(&events);
    let mut reader = Reader::from_byte_slice(&bytes);
    let track = Track::read(&mut reader).unwrap();
    assert!(reader.is_at_end());

    let events = track.events();
    assert_eq!(events.len(), 4);
    let Some(MetaEvent::SequencerSpecific(data)) = events[0].meta() else {
        panic!("expected sequencer specific data, got {:?}", events[0]);
    };
    assert_eq!(data.len(), 128);
    assert!(data.iter().all(|b| *b == 0x11));

    let sysex = events[1].sysex().unwrap();
    assert_eq!(sysex.data().len(), 129);
    assert!(sysex.data().iter().all(|b| *b == 0x22));

    let program = events[2].control().unwrap();
    assert_eq!(program.channel(), Channel::Four);
    assert_eq!(program.event(), &VoiceEvent::ProgramChange { program: 7 });
    assert!(events[3].is_end_of_track());
}
