#![doc = r#"
The SMPTE offset meta event (`FF 54 05 hr mn se fr ff`).

It gives the absolute SMPTE time at which a track is meant to start, for
lining MIDI up against video. The first byte packs the frame rate together
with the hour:

```text
 0 r r h h h h h
   | |  ` hours 0-23
   ` rate: 00 = 24, 01 = 25, 10 = 29.97, 11 = 30
```
"#]

use crate::{SmpteError, file::SmpteFps};

/// An SMPTE start time, kept exactly as stored in the file.
///
/// Decoding never range-checks the fields, call [`SmpteOffset::validate`] for
/// that.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The raw `0rrhhhhh` byte. See [`SmpteOffset::fps`] and [`SmpteOffset::hours`].
    pub hour: u8,
    /// Minutes, 0-59
    pub minute: u8,
    /// Seconds, 0-59
    pub second: u8,
    /// Frame within the second, bounded by the frame rate
    pub frame: u8,
    /// Hundredths of a frame, 0-99
    pub subframe: u8,
}

impl SmpteOffset {
    /// Build an offset from the five payload bytes.
    pub const fn from_bytes(data: [u8; 5]) -> Self {
        let [hour, minute, second, frame, subframe] = data;
        Self {
            hour,
            minute,
            second,
            frame,
            subframe,
        }
    }

    /// Parse and validate an offset from a payload slice.
    ///
    /// # Errors
    /// - `SmpteError::Length` if data is not exactly 5 bytes
    /// - any error from [`SmpteOffset::validate`]
    pub fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let data: [u8; 5] = data
            .try_into()
            .map_err(|_| SmpteError::Length(data.len()))?;
        let offset = Self::from_bytes(data);
        offset.validate()?;
        Ok(offset)
    }

    /// The frame rate stored in bits 5-6 of the hour byte.
    ///
    /// # Errors
    /// `SmpteError::TrackFrame` if the reserved top bit is set.
    pub const fn fps(&self) -> Result<SmpteFps, SmpteError> {
        SmpteFps::from_offset_code(self.hour >> 5)
    }

    /// The hour with the frame rate bits masked off
    pub const fn hours(&self) -> u8 {
        self.hour & 0b0001_1111
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), SmpteError> {
        self.fps()?;
        if self.hours() > 23 {
            return Err(SmpteError::HourOffset(self.hours()));
        }
        if self.minute > 59 {
            return Err(SmpteError::MinuteOffset(self.minute));
        }
        if self.second > 59 {
            return Err(SmpteError::SecondOffset(self.second));
        }
        if self.subframe > 99 {
            return Err(SmpteError::Subframe(self.subframe));
        }
        Ok(())
    }

    /// The offset in microseconds, counting frames at `fps`.
    ///
    /// Useful when the header's SMPTE rate should win over the offset's own.
    pub fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        let whole_seconds = u64::from(self.hours()) * 3600
            + u64::from(self.minute) * 60
            + u64::from(self.second);
        let frames = f64::from(self.frame) + f64::from(self.subframe) / 100.;
        (whole_seconds * 1_000_000) as f64 + frames * 1_000_000. / fps.as_f64()
    }

    /// The offset in microseconds at its own frame rate.
    pub fn as_micros(&self) -> Result<f64, SmpteError> {
        Ok(self.as_micros_with_override(self.fps()?))
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // the bytes after 00 FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps(), Ok(SmpteFps::TwentyNine));
    assert_eq!(offset.hour, 0x41);
    assert_eq!(offset.hours(), 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
}

#[test]
fn offset_in_micros() {
    // 25 fps, 00:00:01 frame 5, subframe 50
    let offset = SmpteOffset::from_bytes([0x20, 0x00, 0x01, 0x05, 0x32]);
    assert_eq!(offset.as_micros(), Ok(1_220_000.));
    assert_eq!(
        offset.as_micros_with_override(SmpteFps::TwentyFour),
        1_000_000. + 5.5 * 1_000_000. / 24.
    );
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let bytes = [0x1F, 0x17, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let bytes = [0x41, 0x50, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));

    let bytes = [0x81, 0x17, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::TrackFrame(4));
}
