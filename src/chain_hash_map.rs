//! ChainHashMap: structural layer with separately chained buckets and a
//! prime-table resize policy.

use core::mem;
use std::collections::TryReserveError;

use log::{debug, warn};
use slotmap::{DefaultKey, SlotMap};
use thiserror::Error;

/// Bucket counts the table steps through, one class per resize. All prime.
pub(crate) const BUCKET_SIZES: [usize; 23] = [
    53, 101, 211, 503, 1553, 3407, 6803, 12503, 25013, 50261, 104729, 250007, 500009, 1000003,
    2000029, 4000037, 10000019, 25000009, 50000047, 104395301, 217645177, 512927357, 1000000007,
];

/// Returned when the bucket array for a resize target cannot be reserved.
///
/// The map is left exactly as it was before the failing operation; see
/// [`ChainHashMap::insert`] for the ordering that guarantees this.
#[derive(Debug, Error)]
#[error("failed to reserve a bucket array of {requested} slots")]
pub struct AllocError {
    requested: usize,
    #[source]
    source: TryReserveError,
}

#[derive(Debug)]
struct Entry<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

/// A hash map from text keys to values of type `V`.
///
/// Collisions are resolved by chaining: each bucket holds the head of a
/// singly linked list of entries, threaded through a generational arena so
/// that resizing relinks entries without moving their storage. New entries
/// are prepended, so chain order carries no meaning.
///
/// The bucket array grows one size class once the entry count exceeds half
/// the bucket count, and shrinks one class once it falls below an eighth,
/// clamped at both ends of the size table. Bucket indices are computed
/// against the current bucket count, so every resize redistributes the
/// entries.
#[derive(Debug)]
pub struct ChainHashMap<V> {
    size_index: usize,
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<V>>,
}

fn next_size_index(size_index: usize) -> usize {
    (size_index + 1).min(BUCKET_SIZES.len() - 1)
}

fn previous_size_index(size_index: usize) -> usize {
    size_index.saturating_sub(1)
}

impl<V> ChainHashMap<V> {
    /// Create an empty map at the smallest size class.
    pub fn new() -> Self {
        Self {
            size_index: 0,
            buckets: vec![None; BUCKET_SIZES[0]],
            slots: SlotMap::with_key(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current length of the bucket array.
    pub fn bucket_count(&self) -> usize {
        BUCKET_SIZES[self.size_index]
    }

    // Polynomial rolling hash reduced modulo the (prime) bucket count at
    // every step. The empty key hashes to bucket 0.
    fn bucket_index(key: &str, bucket_count: usize) -> usize {
        let m = bucket_count as u64;
        let mut h: u64 = 0;
        for b in key.bytes() {
            h = (17 * h + u64::from(b)) % m;
        }
        h as usize
    }

    fn find_slot(&self, key: &str) -> Option<DefaultKey> {
        let bucket = Self::bucket_index(key, self.bucket_count());
        let mut cur = self.buckets[bucket];
        while let Some(slot) = cur {
            let entry = &self.slots[slot];
            if entry.key == key {
                return Some(slot);
            }
            cur = entry.next;
        }
        None
    }

    /// Insert `key -> value`, returning the previous value if the key was
    /// already present. Updates happen in place and never trigger a resize.
    ///
    /// When the insertion of a new key would push the entry count past half
    /// the bucket count, the table grows first; a failed growth allocation
    /// therefore aborts the insert with the map unchanged.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, AllocError> {
        if let Some(slot) = self.find_slot(key) {
            return Ok(Some(mem::replace(&mut self.slots[slot].value, value)));
        }

        if self.slots.len() + 1 > self.bucket_count() / 2 {
            self.rehash(next_size_index(self.size_index))?;
        }

        let bucket = Self::bucket_index(key, self.bucket_count());
        let slot = self.slots.insert(Entry {
            key: key.to_owned(),
            value,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(slot);
        Ok(None)
    }

    /// Look up `key`. Absence is an ordinary outcome, not an error.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find_slot(key).map(|slot| &self.slots[slot].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let slot = self.find_slot(key)?;
        Some(&mut self.slots[slot].value)
    }

    /// True while `key` holds any value, including a null-like one such as
    /// `None` for `V = Option<T>`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_slot(key).is_some()
    }

    /// Remove `key` and return its value, or `None` if it was absent.
    ///
    /// A removal that leaves fewer entries than an eighth of the bucket
    /// count shrinks the table one class. Shrinking is an optimization: if
    /// the smaller bucket array cannot be reserved the current one is kept
    /// and the condition is logged.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let bucket = Self::bucket_index(key, self.bucket_count());
        let head = self.buckets[bucket]?;

        let slot = if self.slots[head].key == key {
            self.buckets[bucket] = self.slots[head].next;
            head
        } else {
            let mut prev = head;
            loop {
                let next = self.slots[prev].next?;
                if self.slots[next].key == key {
                    self.slots[prev].next = self.slots[next].next;
                    break next;
                }
                prev = next;
            }
        };

        let entry = self
            .slots
            .remove(slot)
            .expect("unlinked slot must be live in the arena");

        if self.slots.len() < self.bucket_count() / 8 {
            let target = previous_size_index(self.size_index);
            if let Err(err) = self.rehash(target) {
                warn!(
                    "deferring shrink to {} buckets: {err}",
                    BUCKET_SIZES[target]
                );
            }
        }

        Some(entry.value)
    }

    /// Iterate over live entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots.values().map(|e| (e.key.as_str(), &e.value))
    }

    // Move every entry into a bucket array of the target class. Entries and
    // their key storage stay where they are in the arena; only the chain
    // links and the bucket array change. Chain order afterwards is
    // unspecified.
    fn rehash(&mut self, target_index: usize) -> Result<(), AllocError> {
        if target_index == self.size_index {
            return Ok(());
        }

        let new_count = BUCKET_SIZES[target_index];
        let mut new_buckets: Vec<Option<DefaultKey>> = Vec::new();
        new_buckets
            .try_reserve_exact(new_count)
            .map_err(|source| AllocError {
                requested: new_count,
                source,
            })?;
        new_buckets.resize(new_count, None);

        debug!(
            "rehashing {} entries from {} to {} buckets",
            self.slots.len(),
            self.bucket_count(),
            new_count
        );

        for head in mem::take(&mut self.buckets) {
            let mut cur = head;
            while let Some(slot) = cur {
                let bucket = Self::bucket_index(&self.slots[slot].key, new_count);
                let entry = &mut self.slots[slot];
                cur = entry.next.take();
                entry.next = new_buckets[bucket];
                new_buckets[bucket] = Some(slot);
            }
        }

        self.buckets = new_buckets;
        self.size_index = target_index;
        Ok(())
    }
}

impl<V> Default for ChainHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
