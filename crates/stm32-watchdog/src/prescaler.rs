//! IWDG clock prescaler.

/// Divisor applied to the IWDG input clock before the 12-bit down-counter.
///
/// The discriminant is the value written to the `PR` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Prescaler {
    /// Divide by 4 (reset value).
    #[default]
    Div4 = 0b000,
    /// Divide by 8.
    Div8 = 0b001,
    /// Divide by 16.
    Div16 = 0b010,
    /// Divide by 32.
    Div32 = 0b011,
    /// Divide by 64.
    Div64 = 0b100,
    /// Divide by 128.
    Div128 = 0b101,
    /// Divide by 256.
    Div256 = 0b110,
}

impl Prescaler {
    /// All prescalers, finest first.
    pub const ALL: [Self; 7] = [
        Self::Div4,
        Self::Div8,
        Self::Div16,
        Self::Div32,
        Self::Div64,
        Self::Div128,
        Self::Div256,
    ];

    /// The coarsest divisor, giving the longest period.
    pub const MAX: Self = Self::Div256;

    /// Decode a `PR` register value.
    ///
    /// Returns `None` for encodings outside `0..=6`. The hardware treats `7`
    /// as divide-by-256 but this driver never writes it.
    #[must_use]
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Div4),
            0b001 => Some(Self::Div8),
            0b010 => Some(Self::Div16),
            0b011 => Some(Self::Div32),
            0b100 => Some(Self::Div64),
            0b101 => Some(Self::Div128),
            0b110 => Some(Self::Div256),
            _ => None,
        }
    }

    /// The `PR` register encoding.
    #[must_use]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// The clock divisor.
    #[must_use]
    pub fn divisor(self) -> u32 {
        4u32 << self.bits()
    }
}

impl core::fmt::Display for Prescaler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "/{}", self.divisor())
    }
}
