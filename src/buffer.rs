//! Fixed-capacity receive ring buffer.
//!
//! Bytes arriving from the host are pushed from the serial interrupt and popped by the
//! command decoder once the burst is complete. The buffer never blocks and never fails
//! loudly:
//!
//! - pushing into a full buffer drops the byte (`push` returns `false`)
//! - popping from an empty buffer returns `None`
//!
//! It is a single-producer/single-consumer queue. Exclusive access is expressed through
//! `&mut self`; across interrupt contexts the buffer lives inside
//! [`Receiver`](crate::dispatcher::Receiver), which is shared through a
//! `critical_section::Mutex` (see [`crate::timer`]).

use heapless::Deque;

use crate::consts::RX_BUFFER_LEN;

/// A FIFO of raw host bytes with lossy-on-overflow semantics.
#[derive(Debug, Clone)]
pub struct ReceiveBuffer<const N: usize = RX_BUFFER_LEN> {
    bytes: Deque<u8, N>,
}

impl<const N: usize> ReceiveBuffer<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self {
            bytes: Deque::new(),
        }
    }

    /// Appends a byte. Returns `false` if the buffer was full and the byte was dropped.
    pub fn push(&mut self, byte: u8) -> bool {
        self.bytes.push_back(byte).is_ok()
    }

    /// Removes the oldest byte, or returns `None` if the buffer is empty.
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the next push will be dropped.
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// Maximum number of buffered bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discards every buffered byte.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl<const N: usize> Default for ReceiveBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_fifo_order() {
        let mut buf: ReceiveBuffer = ReceiveBuffer::new();
        for byte in [0x10, 0x20, 0x30] {
            assert!(buf.push(byte));
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.pop(), Some(0x10));
        assert_eq!(buf.pop(), Some(0x20));
        assert_eq!(buf.pop(), Some(0x30));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_overflow_drops_excess_without_corruption() {
        let mut buf: ReceiveBuffer = ReceiveBuffer::new();
        for byte in 1..=5 {
            assert!(buf.push(byte));
        }
        assert!(buf.is_full());
        assert!(!buf.push(6));
        assert!(!buf.push(7));
        assert_eq!(buf.len(), 5);
        for byte in 1..=5 {
            assert_eq!(buf.pop(), Some(byte));
        }
        assert_eq!(buf.pop(), None);
    }

    #[test]
    fn test_pop_on_empty_returns_none() {
        let mut buf: ReceiveBuffer<2> = ReceiveBuffer::new();
        assert_eq!(buf.pop(), None);
        assert!(buf.push(9));
        assert_eq!(buf.pop(), Some(9));
        assert_eq!(buf.pop(), None);
    }

    #[test]
    fn test_indices_wrap_around() {
        let mut buf: ReceiveBuffer<3> = ReceiveBuffer::new();
        for round in 0..10u8 {
            assert!(buf.push(round));
            assert!(buf.push(round.wrapping_add(100)));
            assert_eq!(buf.pop(), Some(round));
            assert_eq!(buf.pop(), Some(round.wrapping_add(100)));
        }
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 3);
    }

    #[test]
    fn test_clear_empties_buffer() {
        let mut buf: ReceiveBuffer = ReceiveBuffer::default();
        assert!(buf.push(1));
        assert!(buf.push(2));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.pop(), None);
    }
}
