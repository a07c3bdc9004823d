use crate::error::TxfmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    Eight = 8,
    Ten = 10,
    Twelve = 12,
}

impl BitDepth {
    pub const ALL: [BitDepth; 3] = [BitDepth::Eight, BitDepth::Ten, BitDepth::Twelve];

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            8 => Some(Self::Eight),
            10 => Some(Self::Ten),
            12 => Some(Self::Twelve),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn max_value(self) -> u16 {
        (1u16 << self.bits()) - 1
    }

    /// Largest residual magnitude: the difference of two samples at this depth.
    pub fn max_residual(self) -> i16 {
        self.max_value() as i16
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = TxfmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(TxfmError::UnsupportedBitDepth(value))
    }
}
