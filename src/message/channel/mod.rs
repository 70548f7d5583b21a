#![doc = r#"
Contains all Channel Message types

A channel message is identified by its status byte. The high nibble picks the
message family and the low nibble addresses one of sixteen channels:

```text
 status byte
 1 0 0 1 | 0 0 1 0
 --------+--------
 family  | channel
 NoteOn  | Three
```

Each family is followed by a fixed number of data bytes, see
[`ControlEventType::data_len`].
"#]

mod number;
pub use number::*;

mod voice;
pub use voice::*;

use crate::{
    ControlError,
    reader::{ReadResult, Reader, inv_data},
};

#[doc = r#"
A channel event: one [`VoiceEvent`] addressed to a [`Channel`].
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlEvent {
    channel: Channel,
    event: VoiceEvent,
}

impl ControlEvent {
    /// Create a new channel event
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    #[doc = r#"
Decode the data bytes that follow `status`.

The status byte itself must already have been consumed (or, under running
status, be implied). Note numbers and velocities of note on/off events are
masked to seven bits.

# Errors
Fails with [`ControlError::UnknownControlEvent`] when the high nibble of
`status` is outside `0x8`-`0xE`, or with an out of bounds error if the data
bytes are missing.
"#]
    pub fn read(reader: &mut Reader<'_>, status: u8) -> ReadResult<Self> {
        let family = ControlEventType::try_from(status >> 4)
            .map_err(|e| inv_data(reader, ControlError::UnknownControlEvent(e.number)))?;
        let channel = Channel::from_status(status);

        let data = reader.read_slice(family.data_len())?;
        let byte = |i: usize| data.get(i).copied().unwrap_or_default();

        let event = match family {
            ControlEventType::NoteOff => VoiceEvent::NoteOff {
                note: byte(0) & 0x7F,
                velocity: byte(1) & 0x7F,
            },
            ControlEventType::NoteOn => VoiceEvent::NoteOn {
                note: byte(0) & 0x7F,
                velocity: byte(1) & 0x7F,
            },
            ControlEventType::PolyphonicKeyPressure => VoiceEvent::PolyphonicKeyPressure {
                note: byte(0),
                pressure: byte(1),
            },
            ControlEventType::ControlChange => VoiceEvent::ControlChange {
                controller: byte(0),
                value: byte(1),
            },
            ControlEventType::ProgramChange => VoiceEvent::ProgramChange { program: byte(0) },
            ControlEventType::ChannelPressure => VoiceEvent::ChannelPressure { pressure: byte(0) },
            ControlEventType::PitchBend => VoiceEvent::PitchBend {
                bend: (u16::from(byte(1) & 0x7F) << 7) | u16::from(byte(0) & 0x7F),
            },
        };

        Ok(Self { channel, event })
    }

    /// The channel this event is addressed to
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The message carried by this event
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// Rebuild the status byte from the event family and channel
    pub fn status_byte(&self) -> u8 {
        (u8::from(self.event.event_type()) << 4) | self.channel.index()
    }
}

#[test]
fn read_note_on_masks_high_bits() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0xBC, 0xE0]);
    let event = ControlEvent::read(&mut reader, 0x92).unwrap();
    assert_eq!(event.channel(), Channel::Three);
    assert_eq!(
        event.event(),
        &VoiceEvent::NoteOn {
            note: 0x3C,
            velocity: 0x60
        }
    );
    assert_eq!(event.status_byte(), 0x92);
}

#[test]
fn read_one_data_byte_families() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x05, 0x40]);
    let program = ControlEvent::read(&mut reader, 0xC0).unwrap();
    assert_eq!(program.event(), &VoiceEvent::ProgramChange { program: 5 });
    assert_eq!(reader.buffer_position(), 1);

    let pressure = ControlEvent::read(&mut reader, 0xDF).unwrap();
    assert_eq!(pressure.channel(), Channel::Sixteen);
    assert_eq!(pressure.event(), &VoiceEvent::ChannelPressure { pressure: 0x40 });
    assert_eq!(reader.buffer_position(), 2);
}

#[test]
fn read_pitch_bend() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x00, 0x40, 0x7F, 0x7F, 0x01, 0x00]);

    let center = ControlEvent::read(&mut reader, 0xE0).unwrap();
    assert_eq!(center.event(), &VoiceEvent::PitchBend { bend: 0x2000 });
    assert_eq!(center.event().pitch_bend_offset(), Some(0));

    let max = ControlEvent::read(&mut reader, 0xE1).unwrap();
    assert_eq!(max.event(), &VoiceEvent::PitchBend { bend: 0x3FFF });

    let low = ControlEvent::read(&mut reader, 0xE1).unwrap();
    assert_eq!(low.event(), &VoiceEvent::PitchBend { bend: 1 });
    assert_eq!(low.event().pitch_bend_offset(), Some(1 - 0x2000));
}

#[test]
fn read_unknown_family() {
    let mut reader = Reader::from_byte_slice(&[0x00, 0x00]);
    let err = ControlEvent::read(&mut reader, 0xF3).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&crate::ParseError::Control(
            ControlError::UnknownControlEvent(0xF)
        ))
    );
    assert_eq!(reader.buffer_position(), 0);
}

#[test]
fn read_missing_data_byte() {
    let mut reader = Reader::from_byte_slice(&[0x07]);
    let err = ControlEvent::read(&mut reader, 0xB0).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn each_family_consumes_its_data_len() {
    let bytes = [0x01, 0x02, 0x03];
    for nibble in 0x8..=0xEu8 {
        let family = ControlEventType::try_from(nibble).unwrap();
        let mut reader = Reader::from_byte_slice(&bytes);
        let event = ControlEvent::read(&mut reader, nibble << 4).unwrap();
        assert_eq!(event.event().event_type(), family);
        assert_eq!(reader.buffer_position(), family.data_len());
    }
}
