/// A key signature (`FF 59 02 sf mi`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative, `-7..=7`
    pub key: i8,
    /// 0 for a major key, 1 for minor
    pub scale: u8,
}

impl KeySignature {
    /// Decode the two payload bytes
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            key: bytes[0] as i8,
            scale: bytes[1],
        }
    }

    /// True for a minor key
    pub const fn is_minor(&self) -> bool {
        self.scale == 1
    }
}

#[test]
fn flats_are_negative() {
    // E flat minor, six flats
    let key = KeySignature::from_bytes([0xFA, 0x01]);
    assert_eq!(key.key, -6);
    assert!(key.is_minor());
}
