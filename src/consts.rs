//! Constants used across the plug remote protocol implementation.
//!
//! This module defines the protocol-wide timing multiples, buffer sizing,
//! wire-format lengths, and the hardcoded remote identities.
//!
//! ## Key Concepts
//!
//! - **Short unit**: every pulse and gap is a multiple of one short unit.
//! - **Hold multiples**: how many short units the line stays low after each pulse.
//! - **Bursts**: host commands are 2 or 5 bytes and carry no delimiter; an idle period
//!   of [`IDLE_THRESHOLD_TICKS`] timer ticks ends a burst.
//! - **Remote identities**: 13 two-bit values. Selector `0` is the custom, runtime
//!   learned identity; selectors `1..` index [`DEFAULT_REMOTES`].

use crate::profile::{RemoteId, remote_id};

/// Length of one short unit for the long protocol, in microseconds.
pub const LONG_SHORT_US: u32 = 250;

/// Length of one short unit for the short protocol, in microseconds.
pub const SHORT_SHORT_US: u32 = 200;

/// Low hold after a `Zero` pulse, in short units.
pub const ZERO_HOLD_UNITS: u32 = 1;

/// Low hold after a `One` pulse, in short units.
pub const ONE_HOLD_UNITS: u32 = 5;

/// Low hold after the `Init` pulse that opens every frame, in short units.
pub const INIT_HOLD_UNITS: u32 = 10;

/// Idle gap between two repeats of the same frame, in short units.
pub const REPEAT_GAP_UNITS: u32 = 40;

/// How many times a frame is repeated per command.
pub const DEFAULT_REPEAT: u8 = 6;

/// Capacity of the receive ring buffer, sized to the longest wire format.
pub const RX_BUFFER_LEN: usize = LONG_FORM_LEN;

/// Number of quiet timer ticks after which a burst is complete.
pub const IDLE_THRESHOLD_TICKS: u8 = 4;

/// Number of two-bit values in a remote identity.
pub const IDENTITY_LEN: usize = 13;

/// Number of identity values the short protocol carries (22 bits).
pub const SHORT_IDENTITY_LEN: usize = 11;

/// Bits per payload value in the long protocol.
pub const LONG_PATTERN_LEN: usize = 4;

/// Bits per payload value in the short protocol.
pub const SHORT_PATTERN_LEN: usize = 2;

/// Length of the short (hardcoded remote) wire form.
pub const SHORT_FORM_LEN: usize = 2;

/// Length of the long (custom remote) wire form.
pub const LONG_FORM_LEN: usize = 5;

/// Remote selector addressing the custom identity slot.
pub const CUSTOM_REMOTE: u8 = 0;

/// Value substituted for every byte missing from a short burst.
///
/// Known gap: a truncated burst still decodes, with the missing fields read as zero.
pub const UNDERFLOW_SENTINEL: u8 = 0;

/// Hardcoded remote identities, addressed by selectors `1..=DEFAULT_REMOTES.len()`.
pub static DEFAULT_REMOTES: [RemoteId; 3] = [
    remote_id([0, 0, 0, 1, 2, 3, 2, 3, 0, 0, 0, 0, 0]),
    remote_id([2, 1, 3, 0, 1, 1, 2, 0, 3, 2, 1, 0, 2]),
    remote_id([3, 3, 0, 2, 1, 0, 0, 1, 2, 2, 3, 1, 1]),
];
