use crate::dispatcher::{Dispatcher, Receiver};
use crate::protocol::Protocol;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Runs one iteration of the polling loop: drains every byte `read` has ready, advances
/// the idle timer once, and dispatches the burst if it completed.
///
/// Pin errors are logged and swallowed; there is no one to report them to.
///
/// # Returns
/// `true` if a burst was dispatched on this step.
pub fn idle_loop_step<P, TX, D, E, F, const N: usize>(
    receiver: &mut Receiver<N>,
    dispatcher: &mut Dispatcher<P, TX, D>,
    read: &mut F,
) -> bool
where
    P: Protocol,
    TX: OutputPin,
    D: DelayNs,
    F: FnMut() -> nb::Result<u8, E>,
{
    loop {
        match read() {
            Ok(byte) => receiver.on_byte_received(byte),
            Err(nb::Error::WouldBlock) => break,
            Err(nb::Error::Other(_)) => {
                warn!("serial read error, skipping");
                break;
            }
        }
    }

    match receiver.poll_burst() {
        Ok(burst) => {
            if dispatcher.dispatch(burst).is_err() {
                warn!("antenna pin error, frame aborted");
            }
            true
        }
        Err(_) => false,
    }
}

/// Runs a blocking loop that polls the serial source and ticks the idle timer.
///
/// This is a simple timing loop for use in environments where interrupts are unavailable
/// or undesired. The serial peripheral is polled through `read`, typically
/// `|| serial.read()` from an `embedded-hal-nb` implementation.
///
/// # Arguments
/// - `receiver`: The receive-side state
/// - `dispatcher`: Decoder and transmitter
/// - `read`: Non-blocking byte source
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `tick_us`: The idle tick interval in microseconds (e.g. 4000).
///
/// # Notes
/// - This loop will never return; it is intended for single-purpose polling firmware.
/// - Bytes are not read while a frame is being transmitted. They wait in the serial
///   peripheral, so a host should not send faster than one command per transmission.
pub fn run_idle_tick_loop<P, TX, D, E, F, T, const N: usize>(
    receiver: &mut Receiver<N>,
    dispatcher: &mut Dispatcher<P, TX, D>,
    mut read: F,
    delay: &mut T,
    tick_us: u32,
) -> !
where
    P: Protocol,
    TX: OutputPin,
    D: DelayNs,
    F: FnMut() -> nb::Result<u8, E>,
    T: DelayNs,
{
    loop {
        let _ = idle_loop_step(receiver, dispatcher, &mut read);
        delay.delay_us(tick_us);
    }
}
