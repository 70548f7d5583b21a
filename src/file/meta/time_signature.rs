use crate::MetaError;

#[doc = r#"
A time signature (`FF 58 04 nn dd cc bb`).

The denominator is stored in the file as a power of two; it is decoded here,
so a raw `dd` of `2` yields a `denominator` of `4`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// Beat unit, `2^dd`
    pub denominator: u32,
    /// MIDI clocks per metronome click
    pub clocks_per_tick: u8,
    /// Notated 32nd notes per 24 MIDI clocks (one quarter note)
    pub notes_per_24_clocks: u8,
}

impl TimeSignature {
    /// Decode the four payload bytes.
    ///
    /// # Errors
    /// [`MetaError::TimeSignatureDenominator`] if `2^dd` overflows a `u32`.
    pub const fn from_bytes(bytes: [u8; 4]) -> Result<Self, MetaError> {
        let [numerator, exponent, clocks_per_tick, notes_per_24_clocks] = bytes;
        let Some(denominator) = 1u32.checked_shl(exponent as u32) else {
            return Err(MetaError::TimeSignatureDenominator(exponent));
        };
        Ok(Self {
            numerator,
            denominator,
            clocks_per_tick,
            notes_per_24_clocks,
        })
    }
}

#[test]
fn common_time() {
    let signature = TimeSignature::from_bytes([0x04, 0x02, 0x18, 0x08]).unwrap();
    assert_eq!(signature.numerator, 4);
    assert_eq!(signature.denominator, 4);
    assert_eq!(signature.clocks_per_tick, 24);
    assert_eq!(signature.notes_per_24_clocks, 8);
}

#[test]
fn denominator_exponent_bounds() {
    assert_eq!(
        TimeSignature::from_bytes([6, 3, 36, 8]).unwrap().denominator,
        8
    );
    assert_eq!(
        TimeSignature::from_bytes([1, 31, 24, 8]).unwrap().denominator,
        1 << 31
    );
    assert_eq!(
        TimeSignature::from_bytes([1, 32, 24, 8]),
        Err(MetaError::TimeSignatureDenominator(32))
    );
}
