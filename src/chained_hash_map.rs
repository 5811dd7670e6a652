//! ChainedHashMap: a bucket array of head-inserted singly linked collision
//! chains, with a secondary hash-mixing step and an explicit load-factor
//! threshold.
//!
//! Every entry stores the mixed hash computed at insertion time; lookups and
//! resizes reuse it, so `K: Hash` is never invoked after insertion. The
//! bucket array length is always a power of two, which makes
//! `hash & (len - 1)` a valid bucket index. A single null key is permitted,
//! modeled as `None`, stored with hash 0 and routed to bucket 0
//! unconditionally.

use crate::reentrancy::ReentryCheck;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use std::collections::hash_map::RandomState;

/// Bucket count of a freshly created map. Always a power of two.
pub const INITIAL_BUCKETS: usize = 16;

type Link<K, V> = Option<Box<Entry<K, V>>>;

struct Entry<K, V> {
    hash: u64,
    key: Option<K>,
    value: V,
    next: Link<K, V>,
}

/// Secondary hash: a fixed shift/XOR/add scramble applied to the key's
/// native hash code, so low-entropy hash codes still spread across bucket
/// indices. Deterministic and order-independent.
fn mix(mut h: u64) -> u64 {
    h = h.wrapping_add((h << 15) ^ 0xffff_cd7d);
    h ^= h >> 10;
    h = h.wrapping_add(h << 3);
    h ^= h >> 6;
    h = h.wrapping_add((h << 2).wrapping_add(h << 14));
    h ^ (h >> 16)
}

// Valid only because bucket counts are powers of two.
fn bucket_index(hash: u64, buckets: usize) -> usize {
    (hash as usize) & (buckets - 1)
}

/// Entry count at which the next insertion into an occupied bucket resizes:
/// three quarters of the bucket count. Written as a subtraction on purpose;
/// the tempting `cap >> 1 + cap >> 2` shorthand parses as
/// `cap >> (1 + cap) >> 2` and does not mean 0.75x.
fn threshold_for(capacity: usize) -> usize {
    capacity - (capacity >> 2)
}

fn empty_buckets<K, V>(capacity: usize) -> Box<[Link<K, V>]> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

fn keys_match<K, Q>(stored: Option<&K>, query: Option<&Q>) -> bool
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    match (stored, query) {
        // The null key is matched by variant, not by `Eq`.
        (None, None) => true,
        (Some(k), Some(q)) => k.borrow() == q,
        _ => false,
    }
}

/// An associative map from `Option<K>` to `V` with chained collision
/// resolution.
///
/// Invariants, restored after every operation:
/// - each entry sits in bucket `hash & (buckets.len() - 1)` for the current
///   bucket count;
/// - at most one entry per key across all chains;
/// - `len` equals the number of entries reachable from all bucket heads.
///
/// Missing keys are ordinary `None` outcomes, never errors. Resizing doubles
/// the bucket count without an upper bound; repeated growth is limited only
/// by memory.
pub struct ChainedHashMap<K, V, S = RandomState> {
    buckets: Box<[Link<K, V>]>,
    len: usize,
    threshold: usize,
    hasher: S,
    reentrancy: ReentryCheck,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current length of the bucket array. Always a power of two.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate over `(key, value)` pairs in bucket order, then chain order
    /// within a bucket. No further ordering is implied.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
        }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: empty_buckets(INITIAL_BUCKETS),
            len: 0,
            threshold: threshold_for(INITIAL_BUCKETS),
            hasher,
            reentrancy: ReentryCheck::new(),
        }
    }

    fn mixed_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        mix(self.hasher.hash_one(q))
    }

    /// Stored hash and current bucket index for a query key. The null key
    /// bypasses mixing entirely: hash 0, bucket 0.
    fn locate<Q>(&self, key: Option<&Q>) -> (u64, usize)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        match key {
            None => (0, 0),
            Some(q) => {
                let hash = self.mixed_hash(q);
                (hash, bucket_index(hash, self.buckets.len()))
            }
        }
    }

    /// Insert or replace. Returns the previous value for the key, or `None`
    /// if the key was newly inserted.
    pub fn put(&mut self, key: Option<K>, value: V) -> Option<V> {
        let Some(key) = key else {
            return self.put_null(value);
        };
        let hash;
        let index;
        {
            // Probing runs user Hash/Eq code; guard until the scan is done.
            let _t = self.reentrancy.enter();
            hash = self.mixed_hash(&key);
            index = bucket_index(hash, self.buckets.len());
            let mut cursor = self.buckets[index].as_deref_mut();
            while let Some(entry) = cursor {
                if entry.hash == hash && entry.key.as_ref() == Some(&key) {
                    return Some(mem::replace(&mut entry.value, value));
                }
                cursor = entry.next.as_deref_mut();
            }
        }
        self.add_entry(hash, Some(key), value, index);
        None
    }

    // The null key never goes through Hash or Eq; it is matched by variant
    // alone, so this path runs no user code and needs no guard.
    fn put_null(&mut self, value: V) -> Option<V> {
        let mut cursor = self.buckets[0].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key.is_none() {
                return Some(mem::replace(&mut entry.value, value));
            }
            cursor = entry.next.as_deref_mut();
        }
        self.add_entry(0, None, value, 0);
        None
    }

    /// Insert a fresh entry at the head of its chain, resizing first when
    /// the map is at threshold and the target bucket is already occupied.
    /// The resize must happen before the slot is chosen, since doubling
    /// changes which bucket the entry belongs in.
    fn add_entry(&mut self, hash: u64, key: Option<K>, value: V, mut index: usize) {
        if self.len >= self.threshold && self.buckets[index].is_some() {
            self.resize(self.buckets.len() * 2);
            index = bucket_index(hash, self.buckets.len());
        }
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry {
            hash,
            key,
            value,
            next,
        }));
        self.len += 1;
    }

    /// Relink every entry into a bucket array of `new_capacity` slots.
    /// Entries move by pointer; stored hashes are reused, never recomputed,
    /// so no user code runs during a resize.
    fn resize(&mut self, new_capacity: usize) {
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for mut head in old.into_vec() {
            while let Some(mut entry) = head {
                head = entry.next.take();
                let index = bucket_index(entry.hash, new_capacity);
                entry.next = self.buckets[index].take();
                self.buckets[index] = Some(entry);
            }
        }
        self.threshold = threshold_for(new_capacity);
    }

    /// Borrow the value for `key`, or `None` if absent.
    ///
    /// Querying the null key with a bare `None` leaves `Q` unconstrained;
    /// annotate it at the call site, e.g. `map.get(None::<&K>)`.
    pub fn get<Q>(&self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _t = self.reentrancy.enter();
        let (hash, index) = self.locate(key);
        let mut cursor = self.buckets[index].as_deref();
        while let Some(entry) = cursor {
            if entry.hash == hash && keys_match(entry.key.as_ref(), key) {
                return Some(&entry.value);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Mutably borrow the value for `key`, or `None` if absent.
    pub fn get_mut<Q>(&mut self, key: Option<&Q>) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _t = self.reentrancy.enter();
        let (hash, index) = self.locate(key);
        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.hash == hash && keys_match(entry.key.as_ref(), key) {
                return Some(&mut entry.value);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    pub fn contains_key<Q>(&self, key: Option<&Q>) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Unlink and return the value for `key`, or `None` if absent. Handles
    /// head-of-chain and mid-chain entries alike: the matched entry's tail
    /// is spliced into the link that held it.
    pub fn remove<Q>(&mut self, key: Option<&Q>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _t = self.reentrancy.enter();
        if self.len == 0 {
            return None;
        }
        let (hash, index) = self.locate(key);
        let mut cursor = &mut self.buckets[index];
        loop {
            let matched = match cursor.as_deref() {
                None => return None,
                Some(entry) => entry.hash == hash && keys_match(entry.key.as_ref(), key),
            };
            if matched {
                let mut removed = cursor.take()?;
                *cursor = removed.next.take();
                self.len -= 1;
                return Some(removed.value);
            }
            cursor = &mut cursor.as_mut()?.next;
        }
    }
}

// Chains drop iteratively; the derived drop would recurse once per entry
// and could overflow the stack on a pathologically long chain.
impl<K, V, S> Drop for ChainedHashMap<K, V, S> {
    fn drop(&mut self) {
        for bucket in self.buckets.iter_mut() {
            let mut head = bucket.take();
            while let Some(mut entry) = head {
                head = entry.next.take();
            }
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over immutable entries in [`ChainedHashMap`]. The key side is
/// `Option<&K>`; the null key, if present, yields `None`.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Link<K, V>>,
    chain: Option<&'a Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Option<&'a K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                return Some((entry.key.as_ref(), &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }
}
