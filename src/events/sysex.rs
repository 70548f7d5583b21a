use alloc::vec::Vec;

use crate::reader::{ReadResult, Reader};

/// Which status byte introduced a system exclusive block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SysExKind {
    /// `0xF0`, a complete message or the first packet of one
    Normal,
    /// `0xF7`, a continuation packet or an arbitrary escaped byte run
    Escape,
}

impl SysExKind {
    /// Returns the status byte for this kind
    pub const fn status_byte(&self) -> u8 {
        match self {
            Self::Normal => 0xF0,
            Self::Escape => 0xF7,
        }
    }
}

/// An opaque system exclusive payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysExEvent {
    kind: SysExKind,
    data: Vec<u8>,
}

impl SysExEvent {
    /// Create a new sysex event
    pub fn new(kind: SysExKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Read the length-prefixed payload following a `0xF0`/`0xF7` status.
    pub fn read(reader: &mut Reader<'_>, kind: SysExKind) -> ReadResult<Self> {
        let len = reader.read_vlq()?;
        let data = reader.read_slice(len as usize)?.to_vec();
        Ok(Self { kind, data })
    }

    /// The status byte that introduced the block
    pub const fn kind(&self) -> SysExKind {
        self.kind
    }

    /// The raw bytes, excluding the status byte and length prefix
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[test]
fn read_sysex_payload() {
    use pretty_assertions::assert_eq;
    let bytes = [0x05, 0x7E, 0x7F, 0x09, 0x01, 0xF7, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    let sysex = SysExEvent::read(&mut reader, SysExKind::Normal).unwrap();
    assert_eq!(sysex.data(), &[0x7E, 0x7F, 0x09, 0x01, 0xF7]);
    assert_eq!(sysex.kind().status_byte(), 0xF0);
    assert_eq!(reader.buffer_position(), 6);
}

#[test]
fn read_truncated_sysex() {
    let bytes = [0x05, 0x7E, 0x7F];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = SysExEvent::read(&mut reader, SysExKind::Escape).unwrap_err();
    assert!(err.is_out_of_bounds());
}
