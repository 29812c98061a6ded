//! seqmap: a separately chained hash map with prime-table growth, and an
//! insertion-order map with bidirectional cursors built on top of it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build the ordered map in safe, verifiable layers so each piece
//!   can be reasoned about independently.
//! - Layers:
//!   - ChainHashMap<V>: structural map from text keys to values; buckets of
//!     chained entries threaded through a generational arena, resized
//!     through a fixed table of prime bucket counts.
//!   - OrderedMap<V>: wraps ChainHashMap with the node handles of a doubly
//!     linked order list as its values; preserves first-insertion order
//!     across updates and removals.
//!   - Cursor<'_, V>: a four-state position over the order list that can
//!     step off either end and return without losing its place.
//!
//! Constraints
//! - Single-threaded, synchronous, call/return; no internal locking.
//! - Keys are text; the map owns its key storage (both the hash entry's
//!   copy and the order node's copy) and never aliases caller memory.
//! - Values are owned by the map as `V` and handed back on removal; the
//!   map never interprets them.
//! - Mutation requires `&mut self` and cursors hold `&self`, so mutating
//!   the map while a cursor is alive is a compile error rather than a
//!   documented hazard.
//!
//! Why this split?
//! - Localize invariants: the chain/resize algebra, the list linkage, and
//!   the cursor state machine each have a small, precise contract.
//! - No unsafe: linked structure is expressed as arena handles, never raw
//!   pointers; stale handles cannot alias (generational keys).
//!
//! Failure boundaries
//! - Absence is an ordinary `None`, never an error.
//! - Reserving a bucket array is fallible and surfaces as [`AllocError`]
//!   with the map untouched (growth runs before any structural change;
//!   a failed shrink keeps the old table and is logged).

mod chain_hash_map;
mod chain_hash_map_proptest;
mod cursor;
mod ordered_map;

// Public surface
pub use chain_hash_map::{AllocError, ChainHashMap};
pub use cursor::Cursor;
pub use ordered_map::{Iter, OrderedMap};
