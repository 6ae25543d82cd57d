//! Long and short on-air protocols.
//!
//! Both protocols carry the same logical frame (`Init`, identity, state, group, device,
//! end marker) but disagree on how a payload value becomes pulses. A
//! [`FrameTransmitter`](crate::transmitter::FrameTransmitter) is parameterised by one
//! [`Protocol`] at compile time, so the two are never mixed at runtime.
//!
//! ## Long protocol
//!
//! - Preamble: the 13 identity values.
//! - Each value becomes four bits ([`LONG_SYMBOLS`](crate::encoding::LONG_SYMBOLS)).
//! - Each bit is one pulse: `0` = high 1, low 1; `1` = high 1, low 5.
//!
//! ## Short protocol
//!
//! - Preamble: 26 values, a fixed `[2, 3]` lead-in, identity values 0–10 (22 bits),
//!   then a fixed trailer.
//! - Each value becomes two bits ([`SHORT_SYMBOLS`](crate::encoding::SHORT_SYMBOLS)).
//! - Each bit is two pulses. The position of the long gap tells the bits apart:
//!   `0` = high 1, low 1, high 1, low 5; `1` = high 1, low 5, high 1, low 1.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::consts::{
    IDENTITY_LEN, INIT_HOLD_UNITS, LONG_SHORT_US, ONE_HOLD_UNITS, SHORT_IDENTITY_LEN,
    SHORT_SHORT_US, ZERO_HOLD_UNITS,
};
use crate::encoding::{BitSymbol, PayloadValue, long_pattern, short_pattern};
use crate::profile::RemoteId;
use crate::pulse::PulseEncoder;

/// A pulse-level encoding of the logical frame.
pub trait Protocol {
    /// Default short unit, in microseconds.
    const SHORT_US: u32;

    /// The values sent between the `Init` pulse and the payload.
    type Preamble: AsRef<[PayloadValue]>;

    /// Builds the preamble that carries `identity`.
    fn preamble(identity: &RemoteId) -> Self::Preamble;

    /// The bit pattern of one payload value.
    fn pattern(value: PayloadValue) -> &'static [BitSymbol];

    /// Sends a single bit (or the `Init` marker) as pulses.
    fn write_symbol<TX: OutputPin, D: DelayNs>(
        pulses: &mut PulseEncoder<TX, D>,
        symbol: BitSymbol,
    ) -> Result<(), TX::Error>;
}

/// Four bits per value, one pulse per bit, 13 identity values.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongProtocol;

impl Protocol for LongProtocol {
    const SHORT_US: u32 = LONG_SHORT_US;

    type Preamble = RemoteId;

    fn preamble(identity: &RemoteId) -> RemoteId {
        *identity
    }

    fn pattern(value: PayloadValue) -> &'static [BitSymbol] {
        long_pattern(value)
    }

    fn write_symbol<TX: OutputPin, D: DelayNs>(
        pulses: &mut PulseEncoder<TX, D>,
        symbol: BitSymbol,
    ) -> Result<(), TX::Error> {
        pulses.emit(symbol)
    }
}

/// Length of the short protocol preamble, in values.
pub const SHORT_PREAMBLE_LEN: usize = SHORT_LEAD_IN.len() + SHORT_IDENTITY_LEN + SHORT_TRAILER.len();

const SHORT_LEAD_IN: [u8; 2] = [2, 3];
const SHORT_TRAILER: [u8; 13] = [0, 0, 0, 0, 0, 2, 3, 2, 3, 2, 3, 2, 3];

/// Two bits per value, two pulses per bit, 11 identity values inside a fixed preamble.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortProtocol;

impl Protocol for ShortProtocol {
    const SHORT_US: u32 = SHORT_SHORT_US;

    type Preamble = [PayloadValue; SHORT_PREAMBLE_LEN];

    fn preamble(identity: &RemoteId) -> Self::Preamble {
        let mut preamble = [PayloadValue::MIN; SHORT_PREAMBLE_LEN];
        let (lead_in, rest) = preamble.split_at_mut(SHORT_LEAD_IN.len());
        let (id, trailer) = rest.split_at_mut(SHORT_IDENTITY_LEN);
        for (slot, &bits) in lead_in.iter_mut().zip(SHORT_LEAD_IN.iter()) {
            *slot = PayloadValue::from_bits(bits);
        }
        id.copy_from_slice(&identity[..SHORT_IDENTITY_LEN]);
        for (slot, &bits) in trailer.iter_mut().zip(SHORT_TRAILER.iter()) {
            *slot = PayloadValue::from_bits(bits);
        }
        preamble
    }

    fn pattern(value: PayloadValue) -> &'static [BitSymbol] {
        short_pattern(value)
    }

    fn write_symbol<TX: OutputPin, D: DelayNs>(
        pulses: &mut PulseEncoder<TX, D>,
        symbol: BitSymbol,
    ) -> Result<(), TX::Error> {
        match symbol {
            BitSymbol::Zero => {
                pulses.pulse(ZERO_HOLD_UNITS)?;
                pulses.pulse(ONE_HOLD_UNITS)
            }
            BitSymbol::One => {
                pulses.pulse(ONE_HOLD_UNITS)?;
                pulses.pulse(ZERO_HOLD_UNITS)
            }
            BitSymbol::Init => pulses.pulse(INIT_HOLD_UNITS),
        }
    }
}

const _: () = assert!(SHORT_IDENTITY_LEN <= IDENTITY_LEN);
