//! Host commands and the burst decoder.
//!
//! A burst carries no length field, so the first byte decides the format:
//!
//! - **Short form** (`remote != 0`, 2 bytes): `[remote:8] [00 gg dd ss]`. The command is
//!   sent under hardcoded identity `remote`.
//! - **Long form** (`remote == 0`, 5 bytes): `[00000000] [rr rr rr rr] x3 [rr gg dd ss]`.
//!   The thirteen `rr` values are written into the custom identity slot first, then the
//!   command is sent under it.
//!
//! All fields are two bits, most significant first.
//!
//! ## Truncated bursts
//!
//! If the burst is shorter than its format (bytes dropped on overflow, or the host
//! paused past the idle threshold), each missing byte reads as
//! [`UNDERFLOW_SENTINEL`]. The decoder never fails; it counts the burst in
//! [`CommandDecoder::underflows`] and still produces a well-formed, possibly wrong,
//! command. This keeps the wire behaviour of existing hosts unchanged.

use crate::buffer::ReceiveBuffer;
use crate::consts::{CUSTOM_REMOTE, IDENTITY_LEN, UNDERFLOW_SENTINEL};
use crate::encoding::PayloadValue;
use crate::profile::{RemoteId, RemoteProfileStore};

/// A decoded plug command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Command {
    /// Requested plug state.
    pub state: PayloadValue,
    /// Device within the group.
    pub device: PayloadValue,
    /// Device group.
    pub group: PayloadValue,
    /// Remote selector; `0` is the custom identity.
    pub remote: u8,
}

/// Splits a byte into four two-bit values, most significant first.
pub fn unpack_values(byte: u8) -> [PayloadValue; 4] {
    [
        PayloadValue::from_bits(byte >> 6),
        PayloadValue::from_bits(byte >> 4),
        PayloadValue::from_bits(byte >> 2),
        PayloadValue::from_bits(byte),
    ]
}

/// Packs four two-bit values into a byte, most significant first.
pub fn pack_values(values: [PayloadValue; 4]) -> u8 {
    values
        .iter()
        .fold(0, |byte, value| (byte << 2) | value.get())
}

impl Command {
    /// Builds a command from its raw fields, masking each payload field to two bits.
    pub const fn new(remote: u8, group: u8, device: u8, state: u8) -> Self {
        Self {
            state: PayloadValue::from_bits(state),
            device: PayloadValue::from_bits(device),
            group: PayloadValue::from_bits(group),
            remote,
        }
    }

    /// Whether the command is sent under the custom identity.
    pub fn uses_custom_remote(&self) -> bool {
        self.remote == CUSTOM_REMOTE
    }

    /// Host-side encoding of the 2-byte form.
    ///
    /// Returns `None` for the custom remote, which only exists in the long form.
    pub fn to_short_form(&self) -> Option<[u8; 2]> {
        if self.uses_custom_remote() {
            return None;
        }
        Some([
            self.remote,
            pack_values([PayloadValue::MIN, self.group, self.device, self.state]),
        ])
    }

    /// Host-side encoding of the 5-byte form, teaching `identity` to the custom slot.
    pub fn to_long_form(&self, identity: &RemoteId) -> [u8; 5] {
        let mut bytes = [CUSTOM_REMOTE; 5];
        for (byte, chunk) in bytes[1..4].iter_mut().zip(identity.chunks_exact(4)) {
            *byte = pack_values([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        bytes[4] = pack_values([identity[IDENTITY_LEN - 1], self.group, self.device, self.state]);
        bytes
    }
}

/// Turns completed bursts into [`Command`]s.
#[derive(Debug, Default)]
pub struct CommandDecoder {
    /// Number of bursts that ran dry before their format was complete.
    pub underflows: u16,
    /// Number of bursts decoded.
    pub decoded: u16,
    short: bool,
}

impl CommandDecoder {
    /// Creates a decoder with zeroed counters.
    pub const fn new() -> Self {
        Self {
            underflows: 0,
            decoded: 0,
            short: false,
        }
    }

    /// Drains `burst` and decodes it, updating the custom identity of `store` for the
    /// long form.
    ///
    /// Bytes left over after the format is complete are discarded.
    pub fn decode<const N: usize>(
        &mut self,
        burst: &mut ReceiveBuffer<N>,
        store: &mut RemoteProfileStore,
    ) -> Command {
        self.short = false;
        let remote = self.next(burst);

        let [group, device, state] = if remote == CUSTOM_REMOTE {
            for slot in (0..IDENTITY_LEN - 1).step_by(4) {
                for (offset, value) in unpack_values(self.next(burst)).into_iter().enumerate() {
                    store.set_custom_value(slot + offset, value);
                }
            }
            let [last_id, group, device, state] = unpack_values(self.next(burst));
            store.set_custom_value(IDENTITY_LEN - 1, last_id);
            [group, device, state]
        } else {
            // top two bits are reserved
            let [_, group, device, state] = unpack_values(self.next(burst));
            [group, device, state]
        };

        if !burst.is_empty() {
            trace!("discarding {} trailing bytes", burst.len());
            burst.clear();
        }
        if self.short {
            self.underflows = self.underflows.wrapping_add(1);
            warn!("burst ended early, missing fields read as {}", UNDERFLOW_SENTINEL);
        }
        self.decoded = self.decoded.wrapping_add(1);

        let command = Command {
            state,
            device,
            group,
            remote,
        };
        debug!(
            "decoded remote {} group {} device {} state {}",
            remote,
            group.get(),
            device.get(),
            state.get()
        );
        command
    }

    fn next<const N: usize>(&mut self, burst: &mut ReceiveBuffer<N>) -> u8 {
        match burst.pop() {
            Some(byte) => byte,
            None => {
                self.short = true;
                UNDERFLOW_SENTINEL
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_REMOTES;
    use crate::profile::remote_id;

    fn burst(bytes: &[u8]) -> ReceiveBuffer {
        let mut buf = ReceiveBuffer::new();
        for &byte in bytes {
            assert!(buf.push(byte));
        }
        buf
    }

    #[test]
    fn test_decodes_short_form() {
        let mut decoder = CommandDecoder::new();
        let mut store = RemoteProfileStore::default();
        let mut buf = burst(&[0x01, 0b00_10_01_11]);

        let command = decoder.decode(&mut buf, &mut store);

        assert_eq!(command, Command::new(1, 2, 1, 3));
        assert!(buf.is_empty());
        assert_eq!(decoder.underflows, 0);
        assert_eq!(decoder.decoded, 1);
        // the custom slot is untouched by the short form
        assert_eq!(store.custom(), &remote_id([0; IDENTITY_LEN]));
    }

    #[test]
    fn test_short_form_ignores_reserved_bits() {
        let mut decoder = CommandDecoder::new();
        let mut store = RemoteProfileStore::default();
        let mut buf = burst(&[0x02, 0b11_00_11_01]);
        assert_eq!(decoder.decode(&mut buf, &mut store), Command::new(2, 0, 3, 1));
    }

    #[test]
    fn test_decodes_long_form_into_custom_slot() {
        let mut decoder = CommandDecoder::new();
        let mut store = RemoteProfileStore::default();
        let mut buf = burst(&[
            0x00,
            0b10_01_00_11,
            0b01_10_10_01,
            0b11_00_01_10,
            0b01_10_01_11,
        ]);

        let command = decoder.decode(&mut buf, &mut store);

        assert_eq!(command, Command::new(0, 2, 1, 3));
        assert!(command.uses_custom_remote());
        assert_eq!(
            store.custom(),
            &remote_id([2, 1, 0, 3, 1, 2, 2, 1, 3, 0, 1, 2, 1])
        );
        assert_eq!(decoder.underflows, 0);
    }

    #[test]
    fn test_truncated_short_form_reads_sentinel() {
        let mut decoder = CommandDecoder::new();
        let mut store = RemoteProfileStore::default();
        let mut buf = burst(&[0x03]);

        let command = decoder.decode(&mut buf, &mut store);

        assert_eq!(command, Command::new(3, 0, 0, 0));
        assert_eq!(decoder.underflows, 1);
    }

    #[test]
    fn test_empty_burst_decodes_as_custom_remote() {
        let mut decoder = CommandDecoder::new();
        let mut store = RemoteProfileStore::default();
        store.set_custom(DEFAULT_REMOTES[2]);
        let mut buf = burst(&[]);

        let command = decoder.decode(&mut buf, &mut store);

        assert_eq!(command, Command::new(0, 0, 0, 0));
        assert_eq!(store.custom(), &remote_id([0; IDENTITY_LEN]));
        assert_eq!(decoder.underflows, 1);
    }

    #[test]
    fn test_trailing_bytes_are_discarded() {
        let mut decoder = CommandDecoder::new();
        let mut store = RemoteProfileStore::default();
        let mut buf = burst(&[0x01, 0b00_01_01_01, 0xff, 0xee]);

        let command = decoder.decode(&mut buf, &mut store);

        assert_eq!(command, Command::new(1, 1, 1, 1));
        assert!(buf.is_empty());
        assert_eq!(decoder.underflows, 0);
    }

    #[test]
    fn test_host_encoding_matches_decoder() {
        let command = Command::new(1, 2, 1, 3);
        assert_eq!(command.to_short_form(), Some([0x01, 0b00_10_01_11]));
        assert_eq!(Command::new(0, 1, 1, 1).to_short_form(), None);

        let id = remote_id([2, 1, 0, 3, 1, 2, 2, 1, 3, 0, 1, 2, 1]);
        assert_eq!(
            Command::new(0, 2, 1, 3).to_long_form(&id),
            [
                0x00,
                0b10_01_00_11,
                0b01_10_10_01,
                0b11_00_01_10,
                0b01_10_01_11
            ]
        );
    }

    #[test]
    fn test_pack_and_unpack_values() {
        let values = unpack_values(0b11_01_10_00);
        assert_eq!(values.map(PayloadValue::get), [3, 1, 2, 0]);
        assert_eq!(pack_values(values), 0b11_01_10_00);
    }
}
