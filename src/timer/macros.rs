/// Declares a static global `RECEIVER` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `RECEIVER` shared by the serial receive
/// interrupt and the idle timer interrupt.
///
/// # Arguments
/// - `$len` (optional): ring buffer capacity, [`RX_BUFFER_LEN`](crate::consts::RX_BUFFER_LEN) by default
///
/// # Example
/// ```rust,ignore
/// init_receiver!();
/// ```
#[macro_export]
macro_rules! init_receiver {
    () => {
        $crate::init_receiver!($crate::consts::RX_BUFFER_LEN);
    };
    ( $len:expr ) => {
        pub static RECEIVER: $crate::critical_section::Mutex<
            core::cell::RefCell<$crate::dispatcher::Receiver<{ $len }>>,
        > = $crate::timer::global_receiver_init();
    };
}

/// Pushes a byte into the global `RECEIVER` and restarts its idle timer.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn SPI1() {
///     byte_received!(spi.read_data());
/// }
/// ```
///
/// # Notes
/// - This macro assumes `RECEIVER` was declared with `init_receiver!`.
#[macro_export]
macro_rules! byte_received {
    ( $byte:expr ) => {
        $crate::timer::global_byte_received(&RECEIVER, $byte)
    };
}

/// Advances the idle timer of the global `RECEIVER`, decoding and transmitting the burst
/// with `$dispatcher` once it completes.
///
/// Evaluates to `Result<Option<Command>, Error<_>>`.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let _ = idle_tick!(DISPATCHER);
/// }
/// ```
///
/// # Notes
/// - This macro assumes `RECEIVER` was declared with `init_receiver!`.
/// - `$dispatcher` must only be reachable from the timer interrupt.
#[macro_export]
macro_rules! idle_tick {
    ( $dispatcher:expr ) => {
        $crate::timer::global_idle_tick(&RECEIVER, &mut $dispatcher)
    };
}
