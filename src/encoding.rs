//! Payload values and their on-air symbol patterns.
//!
//! Every semantic unit of a command (state, group, device and each slice of the
//! remote identity) is a two-bit [`PayloadValue`]. Before modulation each value is
//! expanded into a fixed bit pattern taken from a lookup table, and each bit is then
//! sent as a [`BitSymbol`] by the [`PulseEncoder`](crate::pulse::PulseEncoder).
//!
//! ## Symbol Tables
//!
//! | Value | Long protocol | Short protocol |
//! |-------|---------------|----------------|
//! | 0     | `0 1 0 1`     | `0 0`          |
//! | 1     | `0 1 1 0`     | `0 1`          |
//! | 2     | `1 0 0 1`     | `1 0`          |
//! | 3     | `1 0 1 0`     | `1 1`          |
//!
//! Every long pattern carries exactly two ones.
//!
//! ## Functions
//!
//! - [`long_pattern`] / [`short_pattern`]: value to pattern
//! - [`decode_pattern`]: reverse lookup, `None` for bit sequences outside the table

use crate::consts::{LONG_PATTERN_LEN, SHORT_PATTERN_LEN};
use crate::error::InvalidPayload;

/// One on-air symbol: a short high pulse followed by a low hold of symbol-specific length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BitSymbol {
    /// Logical `0`.
    Zero,
    /// Logical `1`.
    One,
    /// Frame start marker.
    Init,
}

/// A two-bit value (0–3). Its meaning is assigned by its position in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PayloadValue(u8);

impl PayloadValue {
    /// Smallest value.
    pub const MIN: Self = Self(0);
    /// Largest value.
    pub const MAX: Self = Self(3);

    /// Builds a value from the two least significant bits of `bits`, ignoring the rest.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// The raw value, always in `0..=3`.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Index into a symbol table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for PayloadValue {
    type Error = InvalidPayload;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            return Err(InvalidPayload(value));
        }
        Ok(Self(value))
    }
}

impl From<PayloadValue> for u8 {
    fn from(value: PayloadValue) -> Self {
        value.0
    }
}

use BitSymbol::{One as I, Zero as O};

/// Long protocol symbol table, indexed by [`PayloadValue::index`].
pub static LONG_SYMBOLS: [[BitSymbol; LONG_PATTERN_LEN]; 4] =
    [[O, I, O, I], [O, I, I, O], [I, O, O, I], [I, O, I, O]];

/// Short protocol symbol table, indexed by [`PayloadValue::index`].
pub static SHORT_SYMBOLS: [[BitSymbol; SHORT_PATTERN_LEN]; 4] = [[O, O], [O, I], [I, O], [I, I]];

/// Expands a value into its four long protocol bits.
pub fn long_pattern(value: PayloadValue) -> &'static [BitSymbol; LONG_PATTERN_LEN] {
    &LONG_SYMBOLS[value.index()]
}

/// Expands a value into its two short protocol bits.
pub fn short_pattern(value: PayloadValue) -> &'static [BitSymbol; SHORT_PATTERN_LEN] {
    &SHORT_SYMBOLS[value.index()]
}

/// Recovers the value a bit pattern was expanded from.
///
/// Returns `None` if `pattern` is not an entry of `table`.
pub fn decode_pattern<const L: usize>(
    table: &[[BitSymbol; L]; 4],
    pattern: &[BitSymbol],
) -> Option<PayloadValue> {
    table
        .iter()
        .position(|entry| entry.as_slice() == pattern)
        .map(|index| PayloadValue::from_bits(index as u8))
}
