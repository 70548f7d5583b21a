use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
One of the sixteen MIDI channels.

Channels are numbered 1-16 when talking to musicians and 0-15 on the wire.
[`Channel::index`] returns the wire value.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Channel {
    /// 0b0000
    One = 0,
    /// 0b0001
    Two,
    /// 0b0010
    Three,
    /// 0b0011
    Four,
    /// 0b0100
    Five,
    /// 0b0101
    Six,
    /// 0b0110
    Seven,
    /// 0b0111
    Eight,
    /// 0b1000
    Nine,
    /// 0b1001
    Ten,
    /// 0b1010
    Eleven,
    /// 0b1011
    Twelve,
    /// 0b1100
    Thirteen,
    /// 0b1101
    Fourteen,
    /// 0b1110
    Fifteen,
    /// 0b1111
    Sixteen,
}

impl Channel {
    /// Extract the channel from the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        match status & 0x0F {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Three,
            3 => Self::Four,
            4 => Self::Five,
            5 => Self::Six,
            6 => Self::Seven,
            7 => Self::Eight,
            8 => Self::Nine,
            9 => Self::Ten,
            10 => Self::Eleven,
            11 => Self::Twelve,
            12 => Self::Thirteen,
            13 => Self::Fourteen,
            14 => Self::Fifteen,
            _ => Self::Sixteen,
        }
    }

    /// The zero-based channel number, 0-15
    pub fn index(&self) -> u8 {
        u8::from(*self)
    }
}

#[test]
fn channel_from_status_nibble() {
    for status in 0x80..=0xEFu8 {
        let channel = Channel::from_status(status);
        assert_eq!(channel.index(), status & 0x0F);
        assert_eq!(Channel::try_from(status & 0x0F).ok(), Some(channel));
    }
    assert!(Channel::try_from(16).is_err());
}
