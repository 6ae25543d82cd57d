//! Pulse-level modulation of the antenna pin.
//!
//! Every symbol on air is built from the same primitive: the carrier is switched on for
//! one short unit, then held off for a whole number of short units.
//!
//! | Symbol | High    | Low hold |
//! |--------|---------|----------|
//! | `Zero` | 1 unit  | 1 unit   |
//! | `One`  | 1 unit  | 5 units  |
//! | `Init` | 1 unit  | 10 units |
//!
//! Timing is delegated to an injected [`DelayNs`], so the encoder runs against a real
//! hardware delay on target and against a fake clock in tests. The delay must be a
//! monotonic busy-wait or timer delay; no delay may be skipped.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::consts::{INIT_HOLD_UNITS, ONE_HOLD_UNITS, ZERO_HOLD_UNITS};
use crate::encoding::BitSymbol;

impl BitSymbol {
    /// How many short units the line stays low after this symbol's pulse.
    pub const fn hold_units(self) -> u32 {
        match self {
            BitSymbol::Zero => ZERO_HOLD_UNITS,
            BitSymbol::One => ONE_HOLD_UNITS,
            BitSymbol::Init => INIT_HOLD_UNITS,
        }
    }
}

/// Drives the antenna pin with timed pulses.
///
/// ## Type Parameters
///
/// - `TX`: A type implementing [`OutputPin`] wired to the transmitter's data input
/// - `D`: A type implementing [`DelayNs`] used for all pulse and gap timing
#[derive(Debug)]
pub struct PulseEncoder<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    /// Antenna pin
    pub tx: TX,
    /// Delay provider
    pub delay: D,
    short_us: u32,
}

impl<TX, D> PulseEncoder<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    /// Creates a new encoder.
    ///
    /// # Arguments
    /// - `tx`: The output pin driving the 433 MHz transmitter (carrier on/off).
    /// - `delay`: The delay provider.
    /// - `short_us`: Length of one short unit in microseconds.
    ///
    /// # Notes
    /// TX is driven `LOW` initially (carrier off).
    pub fn new(tx: TX, delay: D, short_us: u32) -> Self {
        let mut tx = tx;
        let _ = tx.set_low(); // Ensure idle
        Self {
            tx,
            delay,
            short_us,
        }
    }

    /// Length of one short unit in microseconds.
    pub fn short_us(&self) -> u32 {
        self.short_us
    }

    /// Changes the length of one short unit.
    pub fn set_short_us(&mut self, short_us: u32) {
        self.short_us = short_us;
    }

    /// One short high pulse, then low. No hold afterwards.
    ///
    /// On its own this is the end-of-frame marker.
    pub fn mark(&mut self) -> Result<(), TX::Error> {
        self.tx.set_high()?;
        self.delay.delay_us(self.short_us);
        self.tx.set_low()
    }

    /// Keeps the line in its current state for `units` short units.
    pub fn hold(&mut self, units: u32) {
        self.delay.delay_us(self.short_us * units);
    }

    /// A [`mark`](Self::mark) followed by a low hold of `units`.
    pub fn pulse(&mut self, units: u32) -> Result<(), TX::Error> {
        self.mark()?;
        self.hold(units);
        Ok(())
    }

    /// Sends one symbol: a short high pulse, then the symbol's low hold.
    pub fn emit(&mut self, symbol: BitSymbol) -> Result<(), TX::Error> {
        self.pulse(symbol.hold_units())
    }

    /// Gives the pin and the delay provider back.
    pub fn release(self) -> (TX, D) {
        (self.tx, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, Trace};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_encoder_initialization_idles_low() {
        let tx = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let encoder = PulseEncoder::new(tx, NoopDelay::new(), 250);
        assert_eq!(encoder.short_us(), 250);
        let (mut tx, _) = encoder.release();
        tx.done();
    }

    #[test]
    fn test_emit_toggles_pin_once() {
        let tx = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut encoder = PulseEncoder::new(tx, NoopDelay::new(), 250);
        encoder.emit(BitSymbol::One).unwrap();
        encoder.tx.done();
    }

    #[test]
    fn test_symbol_hold_lengths() {
        for (symbol, hold) in [
            (BitSymbol::Zero, 250),
            (BitSymbol::One, 1250),
            (BitSymbol::Init, 2500),
        ] {
            let trace = Trace::default();
            let mut encoder = PulseEncoder::new(trace.pin(), trace.clock(), 250);
            trace.clear();
            encoder.emit(symbol).unwrap();
            assert_eq!(
                trace.events(),
                [Event::High, Event::Wait(250), Event::Low, Event::Wait(hold)]
            );
        }
    }

    #[test]
    fn test_mark_has_no_trailing_hold() {
        let trace = Trace::default();
        let mut encoder = PulseEncoder::new(trace.pin(), trace.clock(), 200);
        trace.clear();
        encoder.mark().unwrap();
        assert_eq!(trace.events(), [Event::High, Event::Wait(200), Event::Low]);
    }

    #[test]
    fn test_short_unit_is_configurable() {
        let trace = Trace::default();
        let mut encoder = PulseEncoder::new(trace.pin(), trace.clock(), 250);
        encoder.set_short_us(100);
        trace.clear();
        encoder.pulse(3).unwrap();
        assert_eq!(
            trace.events(),
            [Event::High, Event::Wait(100), Event::Low, Event::Wait(300)]
        );
    }
}
