use alloc::string::String;

use crate::{
    HeaderError,
    prelude::*,
    reader::{ReaderError, latin1_string},
};

/// The four bytes every MIDI file starts with
pub const HEADER_SIGNATURE: &[u8; 4] = b"MThd";

/// The header length of a standard `MThd` chunk
pub const HEADER_LENGTH: u32 = 6;

#[doc = r#"
The decoded `MThd` chunk.

Construction through [`Header::read`] guarantees the signature is `MThd` and
that the track count fits the format.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    signature: String,
    length: u32,
    format: FormatType,
    num_tracks: u16,
    division: u16,
}

impl Header {
    #[doc = r#"
Read and validate a header chunk.

A declared length larger than 6 is tolerated; the surplus bytes are skipped.

# Errors
- [`HeaderError::InvalidSignature`] if the chunk is not tagged `MThd`
- [`HeaderError::InvalidFormat`] if the format is not 0, 1 or 2
- [`HeaderError::TrackCount`] if a format 0 file does not declare exactly one
  track, or a format 1/2 file declares none
"#]
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let signature: [u8; 4] = reader.read_exact_size()?;
        if &signature != HEADER_SIGNATURE {
            return Err(ReaderError::parse_error(
                start,
                HeaderError::InvalidSignature(signature).into(),
            ));
        }
        let length = reader.read_u32()?;

        let fields = reader.buffer_position();
        let raw_format = reader.read_u16()?;
        let num_tracks = reader.read_u16()?;
        let division = reader.read_u16()?;

        let format = FormatType::try_from(raw_format).map_err(|_| {
            ReaderError::parse_error(fields, HeaderError::InvalidFormat(raw_format).into())
        })?;
        if !format.allows_track_count(num_tracks) {
            return Err(ReaderError::parse_error(
                fields,
                HeaderError::TrackCount {
                    format: raw_format,
                    num_tracks,
                }
                .into(),
            ));
        }

        if length != HEADER_LENGTH {
            #[cfg(feature = "tracing")]
            tracing::debug!("Header declares length {length}, expected {HEADER_LENGTH}");
            if let Some(surplus) = length.checked_sub(HEADER_LENGTH) {
                reader.read_slice(surplus as usize)?;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Header: format {raw_format}, {num_tracks} track(s), division {division:#06X}"
        );

        Ok(Self {
            signature: latin1_string(&signature),
            length,
            format,
            num_tracks,
            division,
        })
    }

    /// Always `MThd` for a decoded header
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The declared chunk length
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// The file format
    pub const fn format(&self) -> FormatType {
        self.format
    }

    /// Number of track chunks following the header
    pub const fn num_tracks(&self) -> u16 {
        self.num_tracks
    }

    /// The raw division word, see [`Header::timing`]
    pub const fn division(&self) -> u16 {
        self.division
    }

    /// Decode the division into musical or SMPTE timing.
    pub fn timing(&self) -> Result<Timing, HeaderError> {
        Timing::from_division(self.division)
    }
}

#[cfg(test)]
fn header_bytes(format: u16, num_tracks: u16) -> [u8; 14] {
    let mut bytes = [0; 14];
    bytes[..4].copy_from_slice(HEADER_SIGNATURE);
    bytes[4..8].copy_from_slice(&HEADER_LENGTH.to_be_bytes());
    bytes[8..10].copy_from_slice(&format.to_be_bytes());
    bytes[10..12].copy_from_slice(&num_tracks.to_be_bytes());
    bytes[12..14].copy_from_slice(&96u16.to_be_bytes());
    bytes
}

#[test]
fn read_format_1_header() {
    use pretty_assertions::assert_eq;
    let bytes = header_bytes(1, 4);
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = Header::read(&mut reader).unwrap();
    assert_eq!(header.signature(), "MThd");
    assert_eq!(header.length(), 6);
    assert_eq!(header.format(), FormatType::Simultaneous);
    assert_eq!(header.num_tracks(), 4);
    assert_eq!(header.division(), 96);
    assert_eq!(header.timing().unwrap().ticks_per_quarter_note(), Some(96));
    assert_eq!(reader.buffer_position(), 14);
}

#[test]
fn reject_bad_track_counts() {
    for (format, num_tracks) in [(0, 0), (0, 2), (1, 0), (2, 0)] {
        let bytes = header_bytes(format, num_tracks);
        let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert_eq!(
            err.parse_error_kind(),
            Some(&ParseError::Header(HeaderError::TrackCount { format, num_tracks }))
        );
        assert_eq!(err.position(), 8);
    }
}

#[test]
fn reject_unknown_format() {
    let bytes = header_bytes(3, 1);
    let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Header(HeaderError::InvalidFormat(3)))
    );
}

#[test]
fn reject_bad_signature() {
    let mut bytes = header_bytes(0, 1);
    bytes[..4].copy_from_slice(b"MTrk");
    let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::Header(HeaderError::InvalidSignature(*b"MTrk")))
    );
    assert_eq!(err.position(), 0);
}

#[test]
fn skip_oversized_header() {
    let mut bytes = [0u8; 16];
    bytes[..14].copy_from_slice(&header_bytes(0, 1));
    bytes[4..8].copy_from_slice(&8u32.to_be_bytes());
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = Header::read(&mut reader).unwrap();
    assert_eq!(header.length(), 8);
    assert_eq!(reader.buffer_position(), 16);
}

#[test]
fn truncated_header() {
    let bytes = header_bytes(0, 1);
    let err = Header::read(&mut Reader::from_byte_slice(&bytes[..10])).unwrap_err();
    assert!(err.is_out_of_bounds());
}
