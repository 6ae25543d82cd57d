//! Event entry points tying reception to transmission.
//!
//! Two hardware events drive the codec:
//!
//! - **byte received** ([`Receiver::on_byte_received`]): buffer the byte and restart
//!   the idle timer. Runs in the serial interrupt and never blocks.
//! - **idle timer tick** ([`Receiver::on_idle_timer_tick`]): advance the timer; when
//!   the burst is complete, hand it over for decoding and transmission.
//!
//! ## Ordering
//!
//! [`Receiver`] is the only state touched by both interrupts. When the timer fires,
//! [`Receiver::take_burst`] moves the completed burst out and leaves an empty buffer
//! behind, so decoding and the blocking transmission run on an owned copy. Bytes
//! arriving during a transmission land in the fresh buffer, re-arm the timer and make
//! up the next burst; they are never drained half-way.
//!
//! [`Dispatcher`] owns the decoder, the profile store and the transmitter. It belongs
//! to the timer context alone, which makes it the single writer of the custom identity.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::buffer::ReceiveBuffer;
use crate::command::{Command, CommandDecoder};
use crate::consts::{DEFAULT_REPEAT, IDLE_THRESHOLD_TICKS, RX_BUFFER_LEN};
use crate::error::Error;
use crate::profile::RemoteProfileStore;
use crate::protocol::Protocol;
use crate::timer::{BurstState, BurstTimer};
use crate::transmitter::FrameTransmitter;

/// Receive-side state shared between the serial and timer interrupts.
#[derive(Debug, Clone)]
pub struct Receiver<const N: usize = RX_BUFFER_LEN> {
    buffer: ReceiveBuffer<N>,
    timer: BurstTimer,
    /// Bytes dropped because the buffer was full.
    pub dropped: u16,
}

impl<const N: usize> Receiver<N> {
    /// Creates an idle receiver completing bursts after `idle_threshold` quiet ticks.
    pub const fn new(idle_threshold: u8) -> Self {
        Self {
            buffer: ReceiveBuffer::new(),
            timer: BurstTimer::new(idle_threshold),
            dropped: 0,
        }
    }

    /// Whether a burst is being received.
    pub fn state(&self) -> BurstState {
        self.timer.state()
    }

    /// Bytes buffered for the current burst.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Handles one byte from the host.
    ///
    /// The byte is dropped if the buffer is full, but the timer is restarted either way:
    /// the host is still talking.
    pub fn on_byte_received(&mut self, byte: u8) {
        if !self.buffer.push(byte) {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("receive buffer full, dropped {}", byte);
        }
        self.timer.reset();
    }

    /// Handles one idle timer tick.
    ///
    /// Returns the completed burst on the tick the idle period elapses.
    pub fn on_idle_timer_tick(&mut self) -> Option<ReceiveBuffer<N>> {
        if self.timer.tick() {
            return Some(self.take_burst());
        }
        None
    }

    /// Polling form of [`on_idle_timer_tick`](Self::on_idle_timer_tick).
    ///
    /// Returns `WouldBlock` until a burst completes.
    pub fn poll_burst(&mut self) -> nb::Result<ReceiveBuffer<N>, core::convert::Infallible> {
        self.on_idle_timer_tick().ok_or(nb::Error::WouldBlock)
    }

    /// Moves the buffered bytes out, leaving the receiver empty and idle.
    pub fn take_burst(&mut self) -> ReceiveBuffer<N> {
        self.timer.cancel();
        core::mem::take(&mut self.buffer)
    }
}

impl<const N: usize> Default for Receiver<N> {
    fn default() -> Self {
        Self::new(IDLE_THRESHOLD_TICKS)
    }
}

/// Decodes completed bursts and transmits the resulting commands.
///
/// ## Type Parameters
///
/// - `P`: The on-air [`Protocol`]
/// - `TX`: A type implementing [`OutputPin`] wired to the transmitter
/// - `D`: A type implementing [`DelayNs`] used for pulse timing
#[derive(Debug)]
pub struct Dispatcher<P, TX, D>
where
    P: Protocol,
    TX: OutputPin,
    D: DelayNs,
{
    /// Burst decoder
    pub decoder: CommandDecoder,
    /// Remote identities, including the custom slot
    pub store: RemoteProfileStore,
    /// Frame transmitter
    pub transmitter: FrameTransmitter<P, TX, D>,
    repeat: u8,
}

impl<P, TX, D> Dispatcher<P, TX, D>
where
    P: Protocol,
    TX: OutputPin,
    D: DelayNs,
{
    /// Creates a dispatcher sending every frame [`DEFAULT_REPEAT`] times.
    pub fn new(transmitter: FrameTransmitter<P, TX, D>, store: RemoteProfileStore) -> Self {
        Self {
            decoder: CommandDecoder::new(),
            store,
            transmitter,
            repeat: DEFAULT_REPEAT,
        }
    }

    /// Overrides how many times each frame is sent.
    pub fn with_repeat(mut self, repeat: u8) -> Self {
        self.repeat = repeat;
        self
    }

    /// How many times each frame is sent.
    pub fn repeat(&self) -> u8 {
        self.repeat
    }

    /// Decodes `burst` and transmits the command. Blocks until the transmission ends.
    ///
    /// Returns the decoded command, whether or not its remote selector was in range.
    pub fn dispatch<const N: usize>(
        &mut self,
        mut burst: ReceiveBuffer<N>,
    ) -> Result<Command, Error<TX::Error>> {
        debug!("burst complete, {} bytes", burst.len());
        let command = self.decoder.decode(&mut burst, &mut self.store);
        let _sent = self.transmitter.send(&command, &self.store, self.repeat)?;
        Ok(command)
    }

    /// Timer entry point for a receiver owned by the same context.
    ///
    /// Returns `Ok(None)` on ticks that do not complete a burst.
    pub fn on_idle_timer_tick<const N: usize>(
        &mut self,
        receiver: &mut Receiver<N>,
    ) -> Result<Option<Command>, Error<TX::Error>> {
        match receiver.on_idle_timer_tick() {
            Some(burst) => self.dispatch(burst).map(Some),
            None => Ok(None),
        }
    }
}
