#![doc = r#"
Decoding of the header's `division` word.

```text
 bit 15 = 0:  0 t t t t t t t  t t t t t t t t   ticks per quarter note
 bit 15 = 1:  1 f f f f f f f  r r r r r r r r   -fps (i8), ticks per frame
```

Musical timing counts ticks per quarter note, so the length of a tick follows
the tempo. SMPTE timing fixes the tick length to a fraction of a video frame,
independent of tempo.
"#]

use crate::{HeaderError, SmpteError};

/// The header timing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta times count fractions of a quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// Delta times count fractions of an SMPTE frame
    Smpte(SmpteHeader),
}

impl Timing {
    /// Timing with `tpqn` ticks per quarter note.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote {
            inner: (tpqn & 0x7FFF).to_be_bytes(),
        })
    }

    /// Timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Interpret the raw `division` field of a header chunk.
    pub fn from_division(division: u16) -> Result<Self, HeaderError> {
        let bytes = division.to_be_bytes();
        if bytes[0] >> 7 == 0 {
            return Ok(Self::TicksPerQuarterNote(TicksPerQuarterNote { inner: bytes }));
        }
        let fps = SmpteFps::from_header_byte(bytes[0] as i8)
            .map_err(|_| HeaderError::InvalidTiming(division))?;
        Ok(Self::new_smpte(fps, bytes[1]))
    }

    /// Returns Some if the timing is defined as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            Self::Smpte(_) => None,
        }
    }

    /// Microseconds per tick. Musical timing needs the tempo in effect.
    pub fn micros_per_tick(&self, micros_per_quarter_note: u32) -> f64 {
        match self {
            Self::TicksPerQuarterNote(t) => {
                f64::from(micros_per_quarter_note) / f64::from(t.ticks_per_quarter_note().max(1))
            }
            Self::Smpte(s) => {
                let ticks_per_second =
                    u32::from(s.fps.as_division()) * u32::from(s.ticks_per_frame.max(1));
                1_000_000. / f64::from(ticks_per_second)
            }
        }
    }
}

/// A representation of the `tpqn` timing
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote {
    inner: [u8; 2],
}

impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        u16::from_be_bytes(self.inner) & 0x7FFF
    }
}

/// A representation of the `smpte` timing
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    fps: SmpteFps,
    ticks_per_frame: u8,
}

impl SmpteHeader {
    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

/// The four frame rates SMPTE time code allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 fps, film
    TwentyFour,
    /// 25 fps, PAL/SECAM
    TwentyFive,
    /// 29.97 fps drop-frame, NTSC colour
    TwentyNine,
    /// 30 fps
    Thirty,
}

impl SmpteFps {
    /// Decode the negative frame rate stored in the high byte of a header division.
    pub const fn from_header_byte(byte: i8) -> Result<Self, SmpteError> {
        match byte {
            -24 => Ok(Self::TwentyFour),
            -25 => Ok(Self::TwentyFive),
            -29 => Ok(Self::TwentyNine),
            -30 => Ok(Self::Thirty),
            v => Err(SmpteError::HeaderFrameTime(v)),
        }
    }

    /// Decode the two-bit `rr` rate code of an SMPTE offset meta event.
    pub const fn from_offset_code(code: u8) -> Result<Self, SmpteError> {
        match code {
            0 => Ok(Self::TwentyFour),
            1 => Ok(Self::TwentyFive),
            2 => Ok(Self::TwentyNine),
            3 => Ok(Self::Thirty),
            v => Err(SmpteError::TrackFrame(v)),
        }
    }

    /// The nominal integer rate. Drop-frame counts as 30.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine | Self::Thirty => 30,
        }
    }

    /// The exact rate, 30000/1001 for drop-frame.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => 30_000. / 1001.,
            Self::Thirty => 30.,
        }
    }
}

#[test]
fn division_ticks_per_quarter_note() {
    let timing = Timing::from_division(0x0060).unwrap();
    assert_eq!(timing.ticks_per_quarter_note(), Some(96));
    assert_eq!(timing, Timing::new_ticks_per_quarter_note(96));
    assert_eq!(timing.micros_per_tick(480_000), 5_000.);
}

#[test]
fn division_smpte() {
    // -25 fps, 40 ticks per frame
    let timing = Timing::from_division(0xE728).unwrap();
    let Timing::Smpte(smpte) = timing else {
        panic!("expected smpte timing, got {timing:?}");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
    assert_eq!(smpte.ticks_per_frame(), 40);
    assert_eq!(timing.micros_per_tick(500_000), 1_000.);
}

#[test]
fn division_invalid_smpte_rate() {
    assert_eq!(
        Timing::from_division(0xE028),
        Err(HeaderError::InvalidTiming(0xE028))
    );
}
