//! Frame transmission.
//!
//! [`FrameTransmitter`] turns a [`Command`] into a full on-air frame and repeats it:
//!
//! ```text
//! repeat n times:
//!     Init
//!     preamble values      (identity, protocol specific)
//!     state, group, device (in that order)
//!     end marker           (short high pulse, no hold)
//!     idle gap             (40 short units)
//! ```
//!
//! The call blocks for the whole transmission. With the long protocol one repeat is
//! 66 pulses and roughly 60 ms.
//!
//! A command whose remote selector does not name a profile is dropped without touching
//! the pin.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::command::Command;
use crate::consts::REPEAT_GAP_UNITS;
use crate::encoding::{BitSymbol, PayloadValue};
use crate::error::Error;
use crate::profile::RemoteProfileStore;
use crate::protocol::Protocol;
use crate::pulse::PulseEncoder;

/// Sends commands as repeated pulse-train frames.
///
/// ## Type Parameters
///
/// - `P`: The on-air [`Protocol`]
/// - `TX`: A type implementing [`OutputPin`] used for RF transmission
/// - `D`: A type implementing [`DelayNs`] used for pulse timing
///
/// ## Example
///
/// ```rust,ignore
/// use kaku433::command::Command;
/// use kaku433::profile::RemoteProfileStore;
/// use kaku433::protocol::LongProtocol;
/// use kaku433::transmitter::FrameTransmitter;
///
/// let store = RemoteProfileStore::default();
/// let mut transmitter: FrameTransmitter<LongProtocol, _, _> = FrameTransmitter::new(tx_pin, delay);
/// transmitter.send(&Command::new(1, 0, 2, 1), &store, 6)?;
/// ```
#[derive(Debug)]
pub struct FrameTransmitter<P, TX, D>
where
    P: Protocol,
    TX: OutputPin,
    D: DelayNs,
{
    /// Pulse-level encoder
    pub pulses: PulseEncoder<TX, D>,

    /// Counter of completed transmissions.
    pub tx_good: u16,

    /// Counter of commands dropped for an unknown remote selector.
    pub tx_dropped: u16,

    _protocol: PhantomData<P>,
}

impl<P, TX, D> FrameTransmitter<P, TX, D>
where
    P: Protocol,
    TX: OutputPin,
    D: DelayNs,
{
    /// Creates a transmitter with the protocol's default short unit.
    ///
    /// TX is driven `LOW` initially (carrier off).
    pub fn new(tx: TX, delay: D) -> Self {
        Self {
            pulses: PulseEncoder::new(tx, delay, P::SHORT_US),
            tx_good: 0,
            tx_dropped: 0,
            _protocol: PhantomData,
        }
    }

    /// Overrides the short unit, in microseconds.
    pub fn with_short_us(mut self, short_us: u32) -> Self {
        self.pulses.set_short_us(short_us);
        self
    }

    /// Sends `command` `repeat` times under the identity it selects from `store`.
    ///
    /// # Returns
    /// - `Ok(true)`: the frame was sent
    /// - `Ok(false)`: the remote selector is out of range; nothing was sent
    /// - `Err(Error::Pin)`: the antenna pin failed mid-frame
    pub fn send(
        &mut self,
        command: &Command,
        store: &RemoteProfileStore,
        repeat: u8,
    ) -> Result<bool, Error<TX::Error>> {
        let Some(identity) = store.get(command.remote) else {
            self.tx_dropped = self.tx_dropped.wrapping_add(1);
            warn!(
                "remote {} out of range ({} profiles), dropping command",
                command.remote,
                store.len()
            );
            return Ok(false);
        };
        let preamble = P::preamble(identity);

        for _ in 0..repeat {
            P::write_symbol(&mut self.pulses, BitSymbol::Init)?;
            for &value in preamble.as_ref() {
                self.write_value(value)?;
            }
            // Order matters; the receiver expects state, group, device
            self.write_value(command.state)?;
            self.write_value(command.group)?;
            self.write_value(command.device)?;
            self.pulses.mark()?;
            self.pulses.hold(REPEAT_GAP_UNITS);
        }

        self.tx_good = self.tx_good.wrapping_add(1);
        trace!("sent remote {} x{}", command.remote, repeat);
        Ok(true)
    }

    fn write_value(&mut self, value: PayloadValue) -> Result<(), TX::Error> {
        for &bit in P::pattern(value) {
            P::write_symbol(&mut self.pulses, bit)?;
        }
        Ok(())
    }

    /// Gives the pin and the delay provider back.
    pub fn release(self) -> (TX, D) {
        self.pulses.release()
    }
}
