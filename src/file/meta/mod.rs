#![doc = r#"
Meta events: the non-performance annotations of a track.

Every meta event is encoded as

```text
FF <type> <length: vlq> <payload: length bytes>
```

The decoder always consumes exactly `length` payload bytes, whatever the type,
so an unrecognised type can be kept as raw data without losing the position
of the events that follow it.
"#]

mod key_signature;
pub use key_signature::*;

mod smpte_offset;
pub use smpte_offset::*;

mod tempo;
pub use tempo::*;

mod time_signature;
pub use time_signature::*;

use alloc::{string::String, vec::Vec};
use num_enum::FromPrimitive;

use crate::{
    MetaError,
    reader::{ReadResult, Reader, ReaderError, inv_data, latin1_string},
};

/// The type byte that follows `0xFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaType {
    /// `0x00`
    SequenceNumber = 0x00,
    /// `0x01`
    Text = 0x01,
    /// `0x02`
    CopyrightNotice = 0x02,
    /// `0x03`, sequence name in the first track of format 0/1 files
    TrackName = 0x03,
    /// `0x04`
    InstrumentName = 0x04,
    /// `0x05`
    Lyric = 0x05,
    /// `0x06`
    Marker = 0x06,
    /// `0x07`
    CuePoint = 0x07,
    /// `0x20`
    MidiChannelPrefix = 0x20,
    /// `0x2F`
    EndOfTrack = 0x2F,
    /// `0x51`
    SetTempo = 0x51,
    /// `0x54`
    SmpteOffset = 0x54,
    /// `0x58`
    TimeSignature = 0x58,
    /// `0x59`
    KeySignature = 0x59,
    /// `0x7F`
    SequencerSpecific = 0x7F,
    /// Any other type byte
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaType {
    /// The type byte on the wire
    pub const fn code(&self) -> u8 {
        match self {
            Self::SequenceNumber => 0x00,
            Self::Text => 0x01,
            Self::CopyrightNotice => 0x02,
            Self::TrackName => 0x03,
            Self::InstrumentName => 0x04,
            Self::Lyric => 0x05,
            Self::Marker => 0x06,
            Self::CuePoint => 0x07,
            Self::MidiChannelPrefix => 0x20,
            Self::EndOfTrack => 0x2F,
            Self::SetTempo => 0x51,
            Self::SmpteOffset => 0x54,
            Self::TimeSignature => 0x58,
            Self::KeySignature => 0x59,
            Self::SequencerSpecific => 0x7F,
            Self::Unknown(code) => *code,
        }
    }
}

#[doc = r#"
A decoded meta event, one variant per payload layout.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaEvent {
    /// Pattern number of a format 2 sequence.
    ///
    /// `None` for the zero-length form, where the number is implied by the
    /// track's position in the file.
    SequenceNumber(Option<u16>),
    /// Free text
    Text(String),
    /// Copyright notice
    CopyrightNotice(String),
    /// Name of the sequence or track
    TrackName(String),
    /// Instrument description
    InstrumentName(String),
    /// A lyric, usually one syllable
    Lyric(String),
    /// Rehearsal letter or section name
    Marker(String),
    /// Description of something happening on stage or screen
    CuePoint(String),
    /// Channel that following meta and sysex events relate to
    MidiChannelPrefix(u8),
    /// New tempo
    SetTempo(Tempo),
    /// SMPTE start time of the track
    SmpteOffset(SmpteOffset),
    /// New time signature
    TimeSignature(TimeSignature),
    /// New key signature
    KeySignature(KeySignature),
    /// Raw sequencer specific data
    SequencerSpecific(Vec<u8>),
    /// The mandatory last event of every track
    EndOfTrack,
    /// A meta type this crate does not know, payload kept verbatim
    Unknown {
        /// The type byte
        meta_type: u8,
        /// The payload
        data: Vec<u8>,
    },
}

impl MetaEvent {
    #[doc = r#"
Decode the length and payload of a meta event whose type byte (`code`) has
already been read.

# Errors
- [`MetaError::InvalidEndOfTrack`] if an end of track declares a payload
- [`MetaError::PayloadTooShort`] if a fixed-layout payload is truncated
- [`MetaError::TimeSignatureDenominator`] for an unrepresentable denominator
- out of bounds if the payload runs past the buffer
"#]
    pub fn read(reader: &mut Reader<'_>, code: u8) -> ReadResult<Self> {
        let meta_type = MetaType::from_primitive(code);
        let len = reader.read_vlq()?;

        if meta_type == MetaType::EndOfTrack {
            if len != 0 {
                return Err(inv_data(reader, MetaError::InvalidEndOfTrack(len)));
            }
            return Ok(Self::EndOfTrack);
        }

        let payload = Payload {
            code,
            start: reader.buffer_position(),
            data: reader.read_slice(len as usize)?,
        };

        let event = match meta_type {
            MetaType::SequenceNumber if payload.data.is_empty() => Self::SequenceNumber(None),
            MetaType::SequenceNumber => {
                Self::SequenceNumber(Some(u16::from_be_bytes(payload.fixed()?)))
            }
            MetaType::Text => Self::Text(payload.text()),
            MetaType::CopyrightNotice => Self::CopyrightNotice(payload.text()),
            MetaType::TrackName => Self::TrackName(payload.text()),
            MetaType::InstrumentName => Self::InstrumentName(payload.text()),
            MetaType::Lyric => Self::Lyric(payload.text()),
            MetaType::Marker => Self::Marker(payload.text()),
            MetaType::CuePoint => Self::CuePoint(payload.text()),
            MetaType::MidiChannelPrefix => {
                let [channel] = payload.fixed()?;
                Self::MidiChannelPrefix(channel)
            }
            MetaType::SetTempo => Self::SetTempo(Tempo::from_bytes(payload.fixed()?)),
            MetaType::SmpteOffset => Self::SmpteOffset(SmpteOffset::from_bytes(payload.fixed()?)),
            MetaType::TimeSignature => Self::TimeSignature(
                TimeSignature::from_bytes(payload.fixed()?)
                    .map_err(|e| ReaderError::parse_error(payload.start, e.into()))?,
            ),
            MetaType::KeySignature => Self::KeySignature(KeySignature::from_bytes(payload.fixed()?)),
            MetaType::SequencerSpecific => Self::SequencerSpecific(payload.data.to_vec()),
            MetaType::EndOfTrack => Self::EndOfTrack,
            MetaType::Unknown(meta_type) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Unknown meta event type {meta_type:#04X} at position {}, keeping {len} byte(s) verbatim",
                    payload.start
                );
                Self::Unknown {
                    meta_type,
                    data: payload.data.to_vec(),
                }
            }
        };
        Ok(event)
    }

    /// The type of this event
    pub const fn meta_type(&self) -> MetaType {
        match self {
            Self::SequenceNumber(_) => MetaType::SequenceNumber,
            Self::Text(_) => MetaType::Text,
            Self::CopyrightNotice(_) => MetaType::CopyrightNotice,
            Self::TrackName(_) => MetaType::TrackName,
            Self::InstrumentName(_) => MetaType::InstrumentName,
            Self::Lyric(_) => MetaType::Lyric,
            Self::Marker(_) => MetaType::Marker,
            Self::CuePoint(_) => MetaType::CuePoint,
            Self::MidiChannelPrefix(_) => MetaType::MidiChannelPrefix,
            Self::SetTempo(_) => MetaType::SetTempo,
            Self::SmpteOffset(_) => MetaType::SmpteOffset,
            Self::TimeSignature(_) => MetaType::TimeSignature,
            Self::KeySignature(_) => MetaType::KeySignature,
            Self::SequencerSpecific(_) => MetaType::SequencerSpecific,
            Self::EndOfTrack => MetaType::EndOfTrack,
            Self::Unknown { meta_type, .. } => MetaType::Unknown(*meta_type),
        }
    }

    /// The text of the seven text-like events
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s)
            | Self::CopyrightNotice(s)
            | Self::TrackName(s)
            | Self::InstrumentName(s)
            | Self::Lyric(s)
            | Self::Marker(s)
            | Self::CuePoint(s) => Some(s),
            _ => None,
        }
    }
}

/// The payload bytes of one meta event and where they started.
struct Payload<'slc> {
    code: u8,
    start: usize,
    data: &'slc [u8],
}

impl Payload<'_> {
    /// The leading `N` bytes of a fixed layout. Surplus bytes are ignored.
    fn fixed<const N: usize>(&self) -> ReadResult<[u8; N]> {
        let Some(bytes) = self.data.get(..N) else {
            return Err(ReaderError::parse_error(
                self.start,
                MetaError::PayloadTooShort {
                    meta_type: self.code,
                    expected: N,
                    found: self.data.len(),
                }
                .into(),
            ));
        };
        let mut out = [0; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn text(&self) -> String {
        latin1_string(self.data)
    }
}

#[cfg(test)]
fn read_meta(bytes: &[u8]) -> ReadResult<MetaEvent> {
    let mut reader = Reader::from_byte_slice(bytes);
    let code = reader.read_u8()?;
    let event = MetaEvent::read(&mut reader, code)?;
    assert!(reader.is_at_end(), "payload was not fully consumed");
    Ok(event)
}

#[test]
fn read_text_events() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        read_meta(b"\x03\x05Piano").unwrap(),
        MetaEvent::TrackName("Piano".into())
    );
    assert_eq!(
        read_meta(b"\x02\x04(c) ").unwrap(),
        MetaEvent::CopyrightNotice("(c) ".into())
    );
    assert_eq!(read_meta(b"\x05\x00").unwrap(), MetaEvent::Lyric("".into()));
    let marker = read_meta(&[0x06, 0x02, b'A', 0xE9]).unwrap();
    assert_eq!(marker.text(), Some("A\u{e9}"));
}

#[test]
fn read_fixed_layouts() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        read_meta(&[0x00, 0x02, 0x01, 0x02]).unwrap(),
        MetaEvent::SequenceNumber(Some(0x0102))
    );
    assert_eq!(
        read_meta(&[0x20, 0x01, 0x09]).unwrap(),
        MetaEvent::MidiChannelPrefix(9)
    );
    assert_eq!(
        read_meta(&[0x51, 0x03, 0x07, 0xA1, 0x20]).unwrap(),
        MetaEvent::SetTempo(Tempo::new(500_000))
    );
    assert_eq!(
        read_meta(&[0x59, 0x02, 0x02, 0x00]).unwrap(),
        MetaEvent::KeySignature(KeySignature { key: 2, scale: 0 })
    );
    assert_eq!(
        read_meta(&[0x54, 0x05, 0x60, 0x00, 0x00, 0x00, 0x00]).unwrap(),
        MetaEvent::SmpteOffset(SmpteOffset::from_bytes([0x60, 0, 0, 0, 0]))
    );
    assert_eq!(
        read_meta(&[0x7F, 0x03, 0x00, 0x00, 0x41]).unwrap(),
        MetaEvent::SequencerSpecific(alloc::vec![0x00, 0x00, 0x41])
    );
}

#[test]
fn sequence_number_may_be_omitted() {
    assert_eq!(
        read_meta(&[0x00, 0x00]).unwrap(),
        MetaEvent::SequenceNumber(None)
    );
    let err = read_meta(&[0x00, 0x01, 0x07]).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&crate::ParseError::Meta(MetaError::PayloadTooShort {
            meta_type: 0x00,
            expected: 2,
            found: 1
        }))
    );
}

#[test]
fn time_signature_denominator_is_power_of_two() {
    let event = read_meta(&[0x58, 0x04, 0x06, 0x03, 0x24, 0x08]).unwrap();
    let MetaEvent::TimeSignature(signature) = event else {
        panic!("expected time signature, got {event:?}");
    };
    assert_eq!(signature.numerator, 6);
    assert_eq!(signature.denominator, 8);
}

#[test]
fn surplus_payload_is_consumed() {
    assert_eq!(
        read_meta(&[0x51, 0x04, 0x07, 0xA1, 0x20, 0xFF]).unwrap(),
        MetaEvent::SetTempo(Tempo::new(500_000))
    );
}

#[test]
fn short_payload_fails() {
    let err = read_meta(&[0x51, 0x02, 0x07, 0xA1]).unwrap_err();
    assert_eq!(err.position(), 2);
    assert_eq!(
        err.parse_error_kind(),
        Some(&crate::ParseError::Meta(MetaError::PayloadTooShort {
            meta_type: 0x51,
            expected: 3,
            found: 2
        }))
    );
}

#[test]
fn end_of_track_must_be_empty() {
    assert_eq!(read_meta(&[0x2F, 0x00]).unwrap(), MetaEvent::EndOfTrack);
    let err = read_meta(&[0x2F, 0x01, 0x00]).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&crate::ParseError::Meta(MetaError::InvalidEndOfTrack(1)))
    );
}

#[test]
fn unknown_meta_type_keeps_payload() {
    use pretty_assertions::assert_eq;
    let event = read_meta(&[0x10, 0x03, 0xAA, 0xBB, 0xCC]).unwrap();
    assert_eq!(
        event,
        MetaEvent::Unknown {
            meta_type: 0x10,
            data: alloc::vec![0xAA, 0xBB, 0xCC]
        }
    );
    assert_eq!(event.meta_type(), MetaType::Unknown(0x10));
    assert_eq!(event.meta_type().code(), 0x10);
}

#[test]
fn meta_type_codes_round_trip() {
    for code in 0..=u8::MAX {
        assert_eq!(MetaType::from_primitive(code).code(), code);
    }
}
