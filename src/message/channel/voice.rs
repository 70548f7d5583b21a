use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The centre position of the pitch bend wheel
pub const PITCH_BEND_CENTER: u16 = 0x2000;

/// The family of a channel event, taken from the high nibble of its status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ControlEventType {
    /// `0x8n`
    NoteOff = 0x8,
    /// `0x9n`
    NoteOn = 0x9,
    /// `0xAn`, also known as polyphonic aftertouch
    PolyphonicKeyPressure = 0xA,
    /// `0xBn`, includes the channel mode messages
    ControlChange = 0xB,
    /// `0xCn`, selects an instrument
    ProgramChange = 0xC,
    /// `0xDn`, also known as channel aftertouch
    ChannelPressure = 0xD,
    /// `0xEn`
    PitchBend = 0xE,
}

impl ControlEventType {
    /// Number of data bytes following the status byte
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

#[doc = r#"
The payload of a [`ControlEvent`](super::ControlEvent).

All values are 7-bit except for the 14-bit pitch bend.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Release a note
    NoteOff {
        /// Note number, 60 is middle C
        note: u8,
        /// Release velocity
        velocity: u8,
    },
    /// Press a note. A velocity of 0 is commonly used as a note off.
    NoteOn {
        /// Note number, 60 is middle C
        note: u8,
        /// Attack velocity
        velocity: u8,
    },
    /// Pressure applied to a single held key
    PolyphonicKeyPressure {
        /// Note number
        note: u8,
        /// Pressure amount
        pressure: u8,
    },
    /// Set a controller (modulation, volume, pedals...) to a value
    ControlChange {
        /// Controller number
        controller: u8,
        /// New value
        value: u8,
    },
    /// Select an instrument
    ProgramChange {
        /// Program number
        program: u8,
    },
    /// Pressure applied to the channel as a whole
    ChannelPressure {
        /// Pressure amount
        pressure: u8,
    },
    /// Bend the pitch of the channel
    PitchBend {
        /// `msb << 7 | lsb`, [`PITCH_BEND_CENTER`] is no bend
        bend: u16,
    },
}

impl VoiceEvent {
    /// Returns the family of this event
    pub const fn event_type(&self) -> ControlEventType {
        match self {
            Self::NoteOff { .. } => ControlEventType::NoteOff,
            Self::NoteOn { .. } => ControlEventType::NoteOn,
            Self::PolyphonicKeyPressure { .. } => ControlEventType::PolyphonicKeyPressure,
            Self::ControlChange { .. } => ControlEventType::ControlChange,
            Self::ProgramChange { .. } => ControlEventType::ProgramChange,
            Self::ChannelPressure { .. } => ControlEventType::ChannelPressure,
            Self::PitchBend { .. } => ControlEventType::PitchBend,
        }
    }

    /// Returns the note number for note and key pressure events
    pub const fn note(&self) -> Option<u8> {
        match self {
            Self::NoteOff { note, .. }
            | Self::NoteOn { note, .. }
            | Self::PolyphonicKeyPressure { note, .. } => Some(*note),
            _ => None,
        }
    }

    /// True for note offs, and for note ons with a velocity of 0
    pub const fn is_note_off(&self) -> bool {
        matches!(
            self,
            Self::NoteOff { .. } | Self::NoteOn { velocity: 0, .. }
        )
    }

    /// Signed distance of a pitch bend from the centre, `-8192..=8191`
    pub const fn pitch_bend_offset(&self) -> Option<i16> {
        match self {
            Self::PitchBend { bend } => {
                Some(((*bend & 0x3FFF) as i32 - PITCH_BEND_CENTER as i32) as i16)
            }
            _ => None,
        }
    }
}

#[test]
fn pitch_bend_offset_ignores_bits_above_14() {
    let bend = VoiceEvent::PitchBend { bend: 0xFFFF };
    assert_eq!(bend.pitch_bend_offset(), Some(0x1FFF));
    let bend = VoiceEvent::PitchBend { bend: 0x8000 };
    assert_eq!(bend.pitch_bend_offset(), Some(-0x2000));
    assert_eq!(VoiceEvent::ProgramChange { program: 0 }.pitch_bend_offset(), None);
}

#[test]
fn data_len_per_family() {
    for nibble in 0x8..=0xEu8 {
        let family = ControlEventType::try_from(nibble).unwrap();
        let expected = if matches!(nibble, 0xC | 0xD) { 1 } else { 2 };
        assert_eq!(family.data_len(), expected);
        assert_eq!(u8::from(family), nibble);
    }
    assert!(ControlEventType::try_from(0x7).is_err());
    assert!(ControlEventType::try_from(0xF).is_err());
}

#[test]
fn note_on_zero_velocity_is_note_off() {
    let silent = VoiceEvent::NoteOn {
        note: 60,
        velocity: 0,
    };
    assert!(silent.is_note_off());
    assert_eq!(silent.note(), Some(60));
    assert!(!VoiceEvent::ProgramChange { program: 1 }.is_note_off());
}
