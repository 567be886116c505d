use std::ops::{Index, IndexMut, Range};

/// Fixed capacity ring of slots addressed by logical index.
///
/// Logical index `i` lives at physical index `(start + i) % capacity`.
/// The backing storage is reserved once in [`CircularArray::new`] and never grows past it:
/// a physical slot is written the first time it is reached by [`CircularArray::put`],
/// after that it is only overwritten or swapped.
#[derive(Debug)]
pub struct CircularArray<T> {
    slots: Vec<T>,
    capacity: usize,
    start: usize,
}

impl<T> CircularArray<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "CircularArray needs a capacity of at least 1");
        CircularArray {
            slots: Vec::with_capacity(capacity),
            capacity,
            start: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Any value is accepted, it wraps around the capacity.
    #[inline]
    pub fn set_start(&mut self, start: usize) {
        self.start = start % self.capacity;
    }

    /// Number of physical slots that hold a value. Reaches `capacity` and stays there.
    #[inline]
    pub fn filled(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn physical_index(&self, logical: usize) -> usize {
        (self.start + logical) % self.capacity
    }

    /// Writes `value` into the slot at logical index `i`, dropping what was there before.
    pub fn put(&mut self, i: usize, value: T) {
        let p = self.physical_index(i);
        if p < self.slots.len() {
            self.slots[p] = value;
        } else {
            // slots are always reached in order before the first wrap, so there are no holes.
            assert_eq!(
                p,
                self.slots.len(),
                "CircularArray slot {p} written before slot {}",
                self.slots.len()
            );
            debug_assert!(self.slots.len() < self.capacity);
            self.slots.push(value);
        }
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        let a = self.physical_index(a);
        let b = self.physical_index(b);
        self.slots.swap(a, b);
    }

    /// The logical range `0..len` as the two physical runs it occupies, in logical order.
    /// The second run is empty unless the range wraps around the end of the storage.
    pub fn as_slices(&self, len: usize) -> (&[T], &[T]) {
        let (head, tail) = self.runs(len);
        (&self.slots[head], &self.slots[tail])
    }

    pub fn as_mut_slices(&mut self, len: usize) -> (&mut [T], &mut [T]) {
        let (head, tail) = self.runs(len);
        // tail always ends at or before start, so the split keeps both runs intact.
        let (before, after) = self.slots.split_at_mut(self.start);
        let head_len = head.end - head.start;
        (&mut after[..head_len], &mut before[tail])
    }

    fn runs(&self, len: usize) -> (Range<usize>, Range<usize>) {
        debug_assert!(len <= self.capacity);
        let end = self.start + len;
        let head = self.start..end.min(self.capacity);
        let tail = 0..end.saturating_sub(self.capacity);
        (head, tail)
    }

    /// Stable in-place removal over the logical range `0..len`.
    ///
    /// Elements for which `keep` returns false are skipped over, later survivors are swapped
    /// down into the gap. Returns the new length. Survivors keep their relative order and
    /// nothing is moved before the first removal.
    pub fn compact(&mut self, len: usize, mut keep: impl FnMut(&mut T) -> bool) -> usize {
        debug_assert!(len <= self.capacity);
        let mut removal_count = 0;
        for i in 0..len {
            if !keep(&mut self[i]) {
                removal_count += 1;
            } else if removal_count != 0 {
                self.swap(i - removal_count, i);
            }
        }
        len - removal_count
    }
}

impl<T> Index<usize> for CircularArray<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, logical: usize) -> &Self::Output {
        &self.slots[self.physical_index(logical)]
    }
}

impl<T> IndexMut<usize> for CircularArray<T> {
    #[inline(always)]
    fn index_mut(&mut self, logical: usize) -> &mut Self::Output {
        let p = self.physical_index(logical);
        &mut self.slots[p]
    }
}
