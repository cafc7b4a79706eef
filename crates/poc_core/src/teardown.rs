//! Registry of disposable handles
//!
//! Each long-lived resource (timer, gesture, element) registers a handle
//! when it is opened. A resource that finishes on its own releases its
//! handle; whatever is still registered when the owner is torn down is
//! drained and disposed by the owner. Releasing is idempotent, so a
//! gesture ending after teardown is harmless.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a registered handle
    pub struct TeardownKey;
}

/// Ordered set of handles awaiting disposal
pub struct TeardownList<H> {
    entries: SlotMap<TeardownKey, (u64, H)>,
    seq: u64,
}

impl<H> Default for TeardownList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> TeardownList<H> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            seq: 0,
        }
    }

    /// Register a handle
    pub fn register(&mut self, handle: H) -> TeardownKey {
        self.seq += 1;
        self.entries.insert((self.seq, handle))
    }

    /// Release a handle whose resource finished on its own
    ///
    /// Returns `None` if it was already released or drained.
    pub fn release(&mut self, key: TeardownKey) -> Option<H> {
        self.entries.remove(key).map(|(_, handle)| handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every handle, oldest registration first
    pub fn drain(&mut self) -> Vec<H> {
        let mut entries: Vec<(u64, H)> = self.entries.drain().map(|(_, entry)| entry).collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, handle)| handle).collect()
    }
}
