/// The tempo assumed until a track sets one: 120 beats per minute
pub const DEFAULT_MICROS_PER_QUARTER_NOTE: u32 = 500_000;

/// A tempo in microseconds per quarter note (`FF 51 03 tt tt tt`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo {
    micros_per_quarter_note: u32,
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(DEFAULT_MICROS_PER_QUARTER_NOTE)
    }
}

impl Tempo {
    /// Create a tempo. Only the low 24 bits are representable in a file.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self {
            micros_per_quarter_note: micros_per_quarter_note & 0x00FF_FFFF,
        }
    }

    /// Decode the three big-endian payload bytes
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        let [a, b, c] = bytes;
        Self::new(u32::from_be_bytes([0, a, b, c]))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.micros_per_quarter_note
    }

    /// Quarter notes per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / f64::from(self.micros_per_quarter_note.max(1))
    }
}

#[test]
fn tempo_from_bytes() {
    let tempo = Tempo::from_bytes([0x07, 0xA1, 0x20]);
    assert_eq!(tempo.micros_per_quarter_note(), 500_000);
    assert_eq!(tempo.bpm(), 120.);
    assert_eq!(tempo, Tempo::default());
}
