//! Error types.
//!
//! The receive path never fails: overflow, underflow and unknown remotes all degrade
//! silently (see [`crate::buffer`], [`crate::command`] and [`crate::transmitter`]).
//! The only hard failures left are the antenna pin refusing a level change and a
//! caller handing in a value that does not fit in two bits.

use core::fmt::Debug;
use thiserror::Error;

/// Failure while driving the antenna pin.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Error<E: Debug> {
    /// The output pin returned an error on `set_high` / `set_low`.
    #[error("antenna pin error: {0:?}")]
    Pin(E),
}

impl<E: Debug> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Pin(err)
    }
}

/// A byte that does not fit in a two-bit payload value.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("payload value {0} does not fit in two bits")]
pub struct InvalidPayload(pub u8);
