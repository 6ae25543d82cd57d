//! Remote identities.
//!
//! A plug learns the identity of the remote that paired with it, so the same command
//! only switches a plug when it is sent under that identity. The store keeps one
//! custom identity, writable at runtime from the long wire form, plus a set of
//! compile-time identities addressed by non-zero selectors.
//!
//! | Selector | Identity |
//! |----------|----------|
//! | `0`      | custom slot |
//! | `1..=n`  | `fixed[selector - 1]` |

use crate::consts::{CUSTOM_REMOTE, DEFAULT_REMOTES, IDENTITY_LEN};
use crate::encoding::PayloadValue;

/// Thirteen two-bit values identifying a remote.
pub type RemoteId = [PayloadValue; IDENTITY_LEN];

/// Builds a [`RemoteId`] from raw values, keeping only the two low bits of each.
pub const fn remote_id(values: [u8; IDENTITY_LEN]) -> RemoteId {
    let mut id = [PayloadValue::MIN; IDENTITY_LEN];
    let mut i = 0;
    while i < IDENTITY_LEN {
        id[i] = PayloadValue::from_bits(values[i]);
        i += 1;
    }
    id
}

/// Holds the custom identity and the hardcoded ones.
#[derive(Debug, Clone)]
pub struct RemoteProfileStore {
    custom: RemoteId,
    fixed: &'static [RemoteId],
}

impl RemoteProfileStore {
    /// Creates a store over `fixed`, with an all-zero custom identity.
    pub const fn new(fixed: &'static [RemoteId]) -> Self {
        Self {
            custom: [PayloadValue::MIN; IDENTITY_LEN],
            fixed,
        }
    }

    /// Number of addressable identities, custom slot included.
    pub fn len(&self) -> usize {
        self.fixed.len() + 1
    }

    /// Always `false`: the custom slot exists.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Looks up the identity for `selector`, or `None` if it is out of range.
    pub fn get(&self, selector: u8) -> Option<&RemoteId> {
        if selector == CUSTOM_REMOTE {
            return Some(&self.custom);
        }
        self.fixed.get(selector as usize - 1)
    }

    /// The custom identity.
    pub fn custom(&self) -> &RemoteId {
        &self.custom
    }

    /// Overwrites one slot of the custom identity. Out-of-range slots are ignored.
    pub fn set_custom_value(&mut self, slot: usize, value: PayloadValue) {
        if let Some(entry) = self.custom.get_mut(slot) {
            *entry = value;
        }
    }

    /// Replaces the whole custom identity.
    pub fn set_custom(&mut self, id: RemoteId) {
        self.custom = id;
    }
}

impl Default for RemoteProfileStore {
    fn default() -> Self {
        Self::new(&DEFAULT_REMOTES)
    }
}
