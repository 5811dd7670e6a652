//! chained-collections: a growable sequence and a chained hash map with
//! explicit, inspectable growth and collision semantics.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: reproduce the classic amortized-growth array and chained hash
//!   map contracts from first principles, with every policy that standard
//!   containers keep private (growth factor, load threshold, chain order,
//!   secondary hashing) made observable and tested.
//! - Components (independent; neither depends on the other):
//!   - GrowVec<T>: contiguous index-addressable sequence over a
//!     fixed-capacity slot buffer, grown by a 1.5x schedule the module
//!     controls itself rather than delegating to `Vec`.
//!   - ChainedHashMap<K, V, S>: bucket array of head-inserted singly
//!     linked collision chains; power-of-two bucket count, secondary
//!     hash mixing, resize-and-relink at a 0.75 load threshold, and a
//!     single permitted null key modeled as `None` in bucket 0.
//!
//! Constraints
//! - Single-threaded: the map is `!Send`/`!Sync` by design (no atomics).
//!   Callers needing concurrency wrap a structure in their own lock.
//! - Capacity never shrinks; resize has no upper bound beyond memory.
//! - Each entry stores its mixed hash at insertion; lookups and resizes
//!   reuse it, so `K: Hash` never runs after insert.
//! - Bounds violations on the sequence are a distinct `OutOfRange` error,
//!   never clamped. Missing map keys are ordinary `None` outcomes.
//!
//! Reentrancy policy
//! - ChainedHashMap runs user code only via `K`/`Q` `Hash` and `Eq` while
//!   probing chains. A debug-only check panics if that user code re-enters
//!   the same map; release builds compile the check away. Structural
//!   phases (head insertion, unlink splicing, resize relinking) run no
//!   user code at all.
//!
//! Notes and non-goals
//! - No persistence, no generic serialization, no iteration-order
//!   guarantees beyond bucket-then-chain order for the map and positional
//!   order for the sequence.
//! - Not a performance replacement for std or hashbrown containers; the
//!   point is a correct, fully specified growth and collision model.
//! - Hash/Eq consistency (equal keys hash equally) is a precondition the
//!   map relies on but does not verify, as with std's `HashMap`.

mod chained_hash_map;
mod grow_vec;
mod reentrancy;

// Public surface
pub use chained_hash_map::{ChainedHashMap, Iter, INITIAL_BUCKETS};
pub use grow_vec::{GrowVec, OutOfRange, INITIAL_CAPACITY};
