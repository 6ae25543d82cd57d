use crate::command::Command;
use crate::consts::IDLE_THRESHOLD_TICKS;
use crate::dispatcher::{Dispatcher, Receiver};
use crate::error::Error;
use crate::protocol::Protocol;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Used to initialize the global static [`Receiver`] for use with
/// `critical_section`.
///
/// # Returns
/// * An idle receiver inside a mutex-guarded ref-cell
///
/// # Example
/// ```rust,ignore
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use kaku433::dispatcher::Receiver;
/// use kaku433::timer::global_receiver_init;
///
/// static RECEIVER: Mutex<RefCell<Receiver>> = global_receiver_init();
/// ```
pub const fn global_receiver_init<const N: usize>() -> Mutex<RefCell<Receiver<N>>> {
    Mutex::new(RefCell::new(Receiver::new(IDLE_THRESHOLD_TICKS)))
}

/// Buffers a byte at each serial receive interrupt
///
/// # Arguments
/// * The global static [`Receiver`]
/// * The byte read from the serial data register
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn SPI1() {
///     global_byte_received(&RECEIVER, spi.read_data());
/// }
/// ```
pub fn global_byte_received<const N: usize>(
    global_receiver: &'static Mutex<RefCell<Receiver<N>>>,
    byte: u8,
) {
    critical_section::with(|cs| {
        global_receiver.borrow(cs).borrow_mut().on_byte_received(byte);
    });
}

/// Advances the idle timer at each timer interrupt, and dispatches the burst once it
/// completes.
///
/// Only taking the burst out of the receiver happens inside the critical section. The
/// decode and the blocking transmission run with interrupts enabled, so the serial
/// interrupt keeps filling the (now empty) receiver for the next burst.
///
/// # Arguments
/// * The global static [`Receiver`]
/// * The [`Dispatcher`], owned by the timer context
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let _ = global_idle_tick(&RECEIVER, &mut DISPATCHER);
/// }
/// ```
pub fn global_idle_tick<P, TX, D, const N: usize>(
    global_receiver: &'static Mutex<RefCell<Receiver<N>>>,
    dispatcher: &mut Dispatcher<P, TX, D>,
) -> Result<Option<Command>, Error<TX::Error>>
where
    P: Protocol,
    TX: OutputPin,
    D: DelayNs,
{
    let burst =
        critical_section::with(|cs| global_receiver.borrow(cs).borrow_mut().on_idle_timer_tick());
    match burst {
        Some(burst) => dispatcher.dispatch(burst).map(Some),
        None => Ok(None),
    }
}
