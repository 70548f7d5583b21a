use thiserror::Error;

#[doc = r#"
Everything that can be wrong with the *contents* of a MIDI file.

Out-of-bounds reads are not parse errors; see
[`ReaderErrorKind`](crate::reader::ReaderErrorKind).
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The header chunk is malformed
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// A track chunk is malformed
    #[error("Track: {0}")]
    Track(#[from] TrackError),
    /// A meta event is malformed
    #[error("Meta event: {0}")]
    Meta(#[from] MetaError),
    /// A channel event is malformed
    #[error("Control event: {0}")]
    Control(#[from] ControlError),
    /// SMPTE data is out of range
    #[error("SMPTE: {0}")]
    Smpte(#[from] SmpteError),
}

/// Ways the `MThd` chunk can be malformed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// The chunk did not start with `MThd`
    #[error("Expected signature \"MThd\", found {0:02X?}")]
    InvalidSignature([u8; 4]),
    /// Only formats 0, 1 and 2 exist
    #[error("Unknown file format {0}")]
    InvalidFormat(u16),
    /// The declared number of tracks does not fit the format
    #[error("Format {format} cannot hold {num_tracks} track(s)")]
    TrackCount {
        /// Raw format value
        format: u16,
        /// Declared track count
        num_tracks: u16,
    },
    /// The leading division bit was set but the frame rate is unknown
    #[error("Invalid timing division {0:#06X}")]
    InvalidTiming(u16),
}

/// Ways an `MTrk` chunk can be malformed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// The chunk did not start with `MTrk`
    #[error("Expected signature \"MTrk\", found {0:02X?}")]
    InvalidSignature([u8; 4]),
    /// A data byte appeared where a status byte was required
    #[error("Data byte {0:#04X} found with no running status in effect")]
    MissingRunningStatus(u8),
    /// `0xF1`-`0xF6` and `0xF8`-`0xFE` are not valid in a file
    #[error("Unknown status byte {0:#04X}")]
    UnknownStatusByte(u8),
    /// The track ended without producing a single event
    #[error("Track contains no events")]
    Empty,
}

/// Ways a meta event can be malformed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// End of track must have a zero length payload
    #[error("End of track declared a length of {0}, expected 0")]
    InvalidEndOfTrack(u32),
    /// The payload is too short for the event's fixed layout
    #[error("Meta type {meta_type:#04X} needs {expected} byte(s), found {found}")]
    PayloadTooShort {
        /// The meta type code
        meta_type: u8,
        /// Bytes required by the layout
        expected: usize,
        /// Bytes declared by the event
        found: usize,
    },
    /// `2^exponent` does not fit a `u32`
    #[error("Time signature denominator exponent {0} is out of range")]
    TimeSignatureDenominator(u8),
}

/// Ways a channel event can be malformed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// The high nibble of the status byte is not a channel event family
    #[error("Unknown control event family {0:#03X}")]
    UnknownControlEvent(u8),
}

/// SMPTE values that fall outside their allowed ranges
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmpteError {
    /// Header division used an unknown negative frame rate
    #[error("Invalid header frame rate {0}")]
    HeaderFrameTime(i8),
    /// SMPTE offset used an unknown frame rate code
    #[error("Invalid track frame rate code {0}")]
    TrackFrame(u8),
    /// SMPTE offset payload must be exactly five bytes
    #[error("SMPTE offset has length {0}, expected 5")]
    Length(usize),
    /// Hours go from 0 to 23
    #[error("Invalid hour offset {0}")]
    HourOffset(u8),
    /// Minutes go from 0 to 59
    #[error("Invalid minute offset {0}")]
    MinuteOffset(u8),
    /// Seconds go from 0 to 59
    #[error("Invalid second offset {0}")]
    SecondOffset(u8),
    /// Subframes go from 0 to 99
    #[error("Invalid subframe {0}")]
    Subframe(u8),
}
