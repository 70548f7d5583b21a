#![doc = r#"
Rusty representation of a Standard MIDI File.

A file is a header chunk followed by the number of track chunks the header
declares:

```text
MThd <6> <format> <num_tracks> <division>
MTrk <length> <events...>
MTrk <length> <events...>
...
```
"#]

mod format;
pub use format::*;

mod header;
pub use header::*;

mod meta;
pub use meta::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

#[cfg(feature = "std")]
mod load;
#[cfg(feature = "std")]
pub use load::*;

use alloc::vec::Vec;

use crate::reader::{ReadResult, Reader};

#[doc = r#"
A fully decoded MIDI file: one [`Header`] and its [`Track`]s in file order.

Decoding is all or nothing. Either every declared track decodes, or an error
describing the first problem is returned.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Midi {
    header: Header,
    tracks: Vec<Track>,
}

impl Midi {
    /// Parse a set of bytes into a file struct
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        Self::read(&mut reader)
    }

    #[doc = r#"
Read a header and then every track it declares.

Bytes after the last declared track are left unread.
"#]
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let header = Header::read(reader)?;

        let tracks = (0..header.num_tracks())
            .map(|_| Track::read(reader))
            .collect::<ReadResult<Vec<_>>>()?;

        #[cfg(feature = "tracing")]
        if !reader.is_at_end() {
            tracing::debug!(
                "Ignoring {} byte(s) after the last track",
                reader.remaining()
            );
        }

        Ok(Self { header, tracks })
    }

    /// Returns header info
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the track list
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Consume the file, returning its tracks
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// Returns the format type for the file.
    pub const fn format_type(&self) -> FormatType {
        self.header.format()
    }
}

#[test]
fn tracks_follow_header_count() {
    let mut bytes = alloc::vec::Vec::new();
    bytes.extend_from_slice(b"MThd\x00\x00\x00\x06\x00\x02\x00\x02\x00\x60");
    for program in [0x05, 0x06] {
        bytes.extend_from_slice(b"MTrk\x00\x00\x00\x07");
        bytes.extend_from_slice(&[0x00, 0xC0, program, 0x00, 0xFF, 0x2F, 0x00]);
    }
    // trailing garbage is never looked at
    bytes.extend_from_slice(b"junk");

    let midi = Midi::parse(&bytes).unwrap();
    assert_eq!(midi.format_type(), FormatType::SequentiallyIndependent);
    assert_eq!(midi.tracks().len(), 2);
    assert_eq!(midi.into_tracks()[1].events().len(), 2);
}

#[test]
fn missing_track_is_out_of_bounds() {
    let bytes = b"MThd\x00\x00\x00\x06\x00\x01\x00\x02\x00\x60MTrk\x00\x00\x00\x04\x00\xFF\x2F\x00";
    let err = Midi::parse(bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 26);
}
