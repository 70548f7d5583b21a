use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The format word of a header chunk.

- Format 0 holds exactly one track carrying every channel.
- Format 1 holds one or more tracks played at the same time.
- Format 2 holds one or more independent single-track patterns.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl FormatType {
    /// True if `num_tracks` is a legal track count for this format.
    pub const fn allows_track_count(&self, num_tracks: u16) -> bool {
        match self {
            Self::SingleMultiChannel => num_tracks == 1,
            Self::Simultaneous | Self::SequentiallyIndependent => num_tracks >= 1,
        }
    }
}

#[test]
fn track_count_per_format() {
    assert!(FormatType::SingleMultiChannel.allows_track_count(1));
    assert!(!FormatType::SingleMultiChannel.allows_track_count(0));
    assert!(!FormatType::SingleMultiChannel.allows_track_count(2));
    assert!(FormatType::Simultaneous.allows_track_count(4));
    assert!(!FormatType::Simultaneous.allows_track_count(0));
    assert!(FormatType::SequentiallyIndependent.allows_track_count(1));
    assert_eq!(u16::from(FormatType::SequentiallyIndependent), 2);
    assert!(FormatType::try_from(3).is_err());
}
