//! GrowVec: a contiguous sequence with an explicit, inspectable growth policy.
//!
//! Unlike `Vec`, the backing buffer is grown by this module's own schedule
//! (new capacity = old + old/2, minimum growth of one slot), never by the
//! standard library's reallocation policy. The growth factor is part of the
//! observable contract and is exercised directly by tests.

use core::fmt;
use core::mem;

/// Capacity of a freshly created [`GrowVec`].
pub const INITIAL_CAPACITY: usize = 10;

/// Error returned by index-based accessors when `index >= len`.
///
/// Indices are `usize`, so the lower bound is enforced by the type; only the
/// upper bound can be violated. Never clamped or recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for length {}",
            self.index, self.len
        )
    }
}

impl std::error::Error for OutOfRange {}

/// A growable random-access sequence.
///
/// Occupancy invariant: slots `[0, len)` are always `Some`, in positional
/// order; slots `[len, capacity)` are always `None`. Capacity never shrinks.
pub struct GrowVec<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> GrowVec<T> {
    /// Create an empty sequence with capacity [`INITIAL_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty sequence with the given starting capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn check_index(&self, index: usize) -> Result<(), OutOfRange> {
        if index >= self.len {
            return Err(OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Append `value` at the end, growing the backing buffer first when it
    /// is full. Amortized O(1).
    pub fn push(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Replace the buffer with one of `old + old/2` slots (at least one slot
    /// larger), moving all elements across in order.
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = (old_capacity + (old_capacity >> 1)).max(old_capacity + 1);
        let mut slots = mem::take(&mut self.slots).into_vec();
        slots.resize_with(new_capacity, || None);
        self.slots = slots.into_boxed_slice();
    }

    /// Borrow the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        self.check_index(index)?;
        // Occupancy invariant: checked slots are always Some.
        Ok(self.slots[index].as_ref().unwrap())
    }

    /// Mutably borrow the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        self.check_index(index)?;
        Ok(self.slots[index].as_mut().unwrap())
    }

    /// Replace the element at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, OutOfRange> {
        self.check_index(index)?;
        Ok(self.slots[index].replace(value).unwrap())
    }

    /// Remove and return the element at `index`, shifting every later
    /// element one slot toward the front to close the gap.
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.check_index(index)?;
        let value = self.slots[index].take().unwrap();
        for i in index..self.len - 1 {
            self.slots[i] = self.slots[i + 1].take();
        }
        self.len -= 1;
        Ok(value)
    }

    /// Linear scan for `value` over the live range `[0, len)`. Trailing
    /// unused slots are never examined; they cannot hold a live element.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Iterate over live elements in positional order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[..self.len]
            .iter()
            .map(|slot| slot.as_ref().unwrap())
    }

    /// Iterate mutably over live elements in positional order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots[..self.len]
            .iter_mut()
            .map(|slot| slot.as_mut().unwrap())
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: `get(i)` returns the i-th pushed element and `len` tracks
    /// the number of pushes.
    #[test]
    fn push_then_get_in_order() {
        let mut v = GrowVec::new();
        for i in 0..7 {
            v.push(i * 10);
        }
        assert_eq!(v.len(), 7);
        for i in 0..7 {
            assert_eq!(v.get(i), Ok(&(i * 10)));
        }
    }

    /// Invariant: the growth schedule is old + old/2, observable through
    /// `capacity()`. 10 slots stay 10 through the 10th push; the 11th grows
    /// to 15, then 22, 33, ...
    #[test]
    fn growth_schedule_from_default_capacity() {
        let mut v = GrowVec::new();
        assert_eq!(v.capacity(), 10);
        for i in 0..10 {
            v.push(i);
        }
        assert_eq!(v.capacity(), 10);
        v.push(10);
        assert_eq!(v.capacity(), 15);
        for i in 11..15 {
            v.push(i);
        }
        assert_eq!(v.capacity(), 15);
        v.push(15);
        assert_eq!(v.capacity(), 22);
        // Everything pushed so far is still retrievable in order.
        for i in 0..16 {
            assert_eq!(v.get(i), Ok(&i));
        }
    }

    /// Invariant: degenerate capacities still grow by at least one slot.
    #[test]
    fn minimum_growth_from_tiny_capacities() {
        let mut v = GrowVec::with_capacity(0);
        v.push('a');
        assert_eq!(v.capacity(), 1);
        v.push('b');
        assert_eq!(v.capacity(), 2);
        v.push('c');
        assert_eq!(v.capacity(), 3);
        assert_eq!(v.get(0), Ok(&'a'));
        assert_eq!(v.get(2), Ok(&'c'));
    }

    /// Invariant: out-of-range indices fail with `OutOfRange` carrying the
    /// offending index and the current length, and never mutate the sequence.
    #[test]
    fn bounds_errors_carry_index_and_len() {
        let mut v = GrowVec::new();
        v.push(1);
        v.push(2);
        let err = OutOfRange { index: 2, len: 2 };
        assert_eq!(v.get(2), Err(err));
        assert_eq!(v.set(2, 9), Err(err));
        assert_eq!(v.remove(2), Err(err));
        assert_eq!(v.get_mut(5), Err(OutOfRange { index: 5, len: 2 }));
        assert_eq!(v.len(), 2);
        assert_eq!(
            err.to_string(),
            "index 2 out of range for length 2"
        );
    }

    /// Invariant: `remove(i)` returns the removed element and shifts every
    /// later element down one position; removing the last shifts nothing.
    #[test]
    fn remove_shifts_tail_toward_front() {
        let mut v = GrowVec::new();
        for i in 0..5 {
            v.push(i);
        }
        assert_eq!(v.remove(1), Ok(1));
        assert_eq!(v.len(), 4);
        assert_eq!(v.get(0), Ok(&0));
        assert_eq!(v.get(1), Ok(&2));
        assert_eq!(v.get(2), Ok(&3));
        assert_eq!(v.get(3), Ok(&4));

        // Remove the (new) last element: no shifting involved.
        assert_eq!(v.remove(3), Ok(4));
        assert_eq!(v.len(), 3);
        assert_eq!(v.get(2), Ok(&3));
    }

    /// Invariant: `set` replaces in place and returns the previous value.
    #[test]
    fn set_returns_previous_value() {
        let mut v = GrowVec::new();
        v.push("old");
        assert_eq!(v.set(0, "new"), Ok("old"));
        assert_eq!(v.get(0), Ok(&"new"));
        assert_eq!(v.len(), 1);
    }

    /// Invariant: `contains` only inspects the live range. With `Option`
    /// elements, trailing empty slots must not answer for a `None` query.
    #[test]
    fn contains_ignores_unused_slots() {
        let mut v: GrowVec<Option<i32>> = GrowVec::new();
        v.push(Some(1));
        v.push(Some(2));
        assert!(v.contains(&Some(1)));
        assert!(!v.contains(&Some(3)));
        // Capacity 10 leaves 8 empty slots; they are not live Nones.
        assert!(!v.contains(&None));
        v.push(None);
        assert!(v.contains(&None));
    }

    /// Invariant: elements survive growth events at their original indices.
    #[test]
    fn elements_survive_growth() {
        let mut v = GrowVec::with_capacity(2);
        let mut expected = Vec::new();
        for i in 0..50 {
            v.push(format!("s{i}"));
            expected.push(format!("s{i}"));
            assert!(v.capacity() >= v.len());
        }
        let collected: Vec<_> = v.iter().cloned().collect();
        assert_eq!(collected, expected);
    }

    /// Invariant: `iter_mut` writes through to storage.
    #[test]
    fn iter_mut_updates_elements() {
        let mut v = GrowVec::new();
        for i in 0..4 {
            v.push(i);
        }
        for x in v.iter_mut() {
            *x *= 2;
        }
        assert_eq!(v.get(3), Ok(&6));
        assert_eq!(format!("{v:?}"), "[0, 2, 4, 6]");
    }
}
