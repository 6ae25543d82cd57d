//! # kaku433
//!
//! A portable, no_std Rust command codec for fixed-code 433 MHz wireless power plugs
//! (the "KaKu"-style self-learning and dip-switch receivers), driven through a cheap
//! ASK/OOK transmitter such as the FS1000A.
//!
//! A host pushes short command bursts to the microcontroller over a synchronous serial
//! link. This crate:
//! - buffers the bytes in an interrupt-fed ring buffer
//! - declares a burst complete after a quiet period on a periodic idle timer
//! - decodes the burst into `{remote, group, device, state}`
//! - transmits the command as a precisely timed pulse train on one `embedded-hal` output pin
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support |
//! | `delay-loop`          | Polling idle-tick loop driven by `embedded_hal::delay::DelayNs` |
//! | `timer-isr` (default) | Interrupt glue built on `critical_section::with` |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Wire formats
//!
//! | Form  | Bytes | Layout |
//! |-------|-------|--------|
//! | short | 2     | `[remote:8] [00 gg dd ss]` |
//! | long  | 5     | `[00000000] [rr rr rr rr] x3 [rr gg dd ss]` |
//!
//! There is no length field or terminator: a burst ends when the idle timer elapses.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kaku433::{init_receiver, byte_received, idle_tick};
//! use kaku433::dispatcher::Dispatcher;
//! use kaku433::profile::RemoteProfileStore;
//! use kaku433::protocol::LongProtocol;
//! use kaku433::transmitter::FrameTransmitter;
//!
//! init_receiver!();
//!
//! #[interrupt]
//! fn SPI1() {
//!     byte_received!(read_spi_data_register());
//! }
//!
//! #[interrupt]
//! fn TIM2() {
//!     // `DISPATCHER` is owned by this handler only
//!     let _ = idle_tick!(DISPATCHER);
//! }
//! ```
//!
//! ## Integration Notes
//!
//! - Transmissions block for their whole duration (roughly 60 ms per repeat)
//! - The idle tick should be a few milliseconds; four quiet ticks complete a burst
//! - Only the timer context may own the [`dispatcher::Dispatcher`]
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

// must stay first so the logging macros are in textual scope below
#[macro_use]
mod fmt;

pub mod buffer;
pub mod command;
pub mod consts;
pub mod dispatcher;
pub mod encoding;
pub mod error;
pub mod profile;
pub mod protocol;
pub mod pulse;
pub mod timer;
pub mod transmitter;

#[cfg(test)]
pub(crate) mod testing;
