#![doc = r#"
A cursor over the raw bytes of a MIDI file.

All multi-byte integers in a Standard MIDI File are big-endian. The cursor's
position can be read and moved, which the track decoder relies on to push a
data byte back when running status is in effect.
"#]

mod error;
pub use error::*;

use alloc::string::String;

/// Sequential, position-addressable reader over a byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the start of `data`.
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The offset of the next byte to be read.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Move the cursor. Reads from beyond the end of the buffer fail.
    pub fn set_buffer_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Number of bytes left before the end of the buffer.
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// True if every byte has been consumed.
    pub const fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ReaderError::oob(self.position))?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian 24-bit integer.
    pub fn read_u24(&mut self) -> ReadResult<u32> {
        let [a, b, c] = self.read_exact_size()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Read `len` bytes as a fixed-length ASCII string.
    ///
    /// Each byte maps to the character with the same code point, so bytes
    /// outside the ASCII range survive as Latin-1 rather than being replaced.
    pub fn read_ascii(&mut self, len: usize) -> ReadResult<String> {
        self.read_slice(len).map(latin1_string)
    }

    #[doc = r#"
Decode one variable-length quantity.

Each byte contributes its low seven bits, most significant group first. The
quantity ends at the first byte whose high bit is clear.

Standard MIDI Files never use more than four bytes (`0x0FFFFFFF`). Longer
sequences are still consumed in full; bits shifted past the top of the `u32`
are dropped.

# Example
```rust
# use smfdecode::reader::Reader;
let mut reader = Reader::from_byte_slice(&[0x81, 0x00]);
assert_eq!(reader.read_vlq().unwrap(), 128);
assert_eq!(reader.buffer_position(), 2);
```
"#]
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let mut value: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
    }
}

pub(crate) fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

#[test]
fn read_vlq_values() {
    use pretty_assertions::assert_eq;
    let cases: &[(u32, &[u8])] = &[
        (0x00, &[0x00]),
        (0x3A, &[0x3A]),
        (0x40, &[0x40]),
        (0x7F, &[0x7F]),
        (0x80, &[0x81, 0x00]),
        (0xAE, &[0x81, 0x2E]),
        (0xF0, &[0x81, 0x70]),
        (0x12C, &[0x82, 0x2C]),
        (0x2000, &[0xC0, 0x00]),
        (0x3FFF, &[0xFF, 0x7F]),
        (0x4000, &[0x81, 0x80, 0x00]),
        (0x10_0000, &[0xC0, 0x80, 0x00]),
        (0x0FFF_FFFF, &[0xFF, 0xFF, 0xFF, 0x7F]),
    ];

    for (expected, bytes) in cases {
        let mut reader = Reader::from_byte_slice(bytes);
        assert_eq!(reader.read_vlq().unwrap(), *expected, "decoding {bytes:02X?}");
        assert_eq!(reader.buffer_position(), bytes.len());
    }
}

#[test]
fn read_vlq_stops_at_clear_high_bit() {
    let mut reader = Reader::from_byte_slice(&[0x83, 0x00, 0x90, 0x3C]);
    assert_eq!(reader.read_vlq().unwrap(), 384);
    assert_eq!(reader.read_u8().unwrap(), 0x90);
}

#[test]
fn read_vlq_out_of_bounds() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x80]);
    let err = reader.read_vlq().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 2);
}

#[test]
fn read_big_endian_integers() {
    use pretty_assertions::assert_eq;
    let bytes = [0x12, 0x34, 0x07, 0xA1, 0x20, 0x00, 0x00, 0x00, 0x3B, 0x4D, 0x54];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u16().unwrap(), 0x1234);
    assert_eq!(reader.read_u24().unwrap(), 500_000);
    assert_eq!(reader.read_u32().unwrap(), 59);
    assert_eq!(reader.read_ascii(2).unwrap(), "MT");
    assert!(reader.is_at_end());
    assert!(reader.read_u8().unwrap_err().is_out_of_bounds());
}

#[test]
fn set_position_rewinds() {
    let mut reader = Reader::from_byte_slice(&[0x3C, 0x40]);
    assert_eq!(reader.read_u8().unwrap(), 0x3C);
    reader.set_buffer_position(reader.buffer_position() - 1);
    assert_eq!(reader.read_u8().unwrap(), 0x3C);
    assert_eq!(reader.remaining(), 1);
}
