use {super::HistoryError, std::iter};

/// a fixed-capacity store of the last `capacity` samples pushed into it.
///
/// once the buffer is full, each push overwrites the oldest live sample in place.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    /// the backing slots. the number of slots is the capacity, and never changes.
    slots: Box<[T]>,
    /// the slot the next push will write to.
    cursor: usize,
    /// the number of live samples.
    count: usize,
}

// === impl RingBuffer ===

impl<T: Default> RingBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }

        Ok(Self {
            slots: iter::repeat_with(T::default).take(capacity).collect(),
            cursor: 0,
            count: 0,
        })
    }

    /// forgets every sample.
    ///
    /// slots are zeroed rather than released, the capacity is unchanged.
    pub fn reset(&mut self) {
        let Self {
            slots,
            cursor,
            count,
        } = self;

        slots.iter_mut().for_each(|slot| *slot = T::default());
        *cursor = 0;
        *count = 0;
    }
}

impl<T> RingBuffer<T> {
    /// appends a sample, overwriting the oldest one if the buffer is full.
    pub fn push(&mut self, sample: T) {
        let capacity = self.capacity();
        let Self {
            slots,
            cursor,
            count,
        } = self;

        slots[*cursor] = sample;
        *cursor = (*cursor + 1) % capacity;
        *count = (*count + 1).min(capacity);
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// the number of live samples, never more than the capacity.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// the slot the next push will write to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// the slot holding the oldest live sample.
    ///
    /// until the buffer fills up this is the first slot. afterwards it is the slot about to be
    /// overwritten.
    pub fn oldest_index(&self) -> usize {
        if self.count < self.capacity() {
            0
        } else {
            self.cursor
        }
    }

    /// returns the sample `offset` places after the oldest one.
    pub fn get(&self, offset: usize) -> Option<&T> {
        (offset < self.count).then(|| self.slot(self.oldest_index() + offset))
    }

    pub fn latest(&self) -> Option<&T> {
        self.count.checked_sub(1).and_then(|offset| self.get(offset))
    }

    /// iterates over the live samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.count).filter_map(|offset| self.get(offset))
    }

    /// reads a physical slot, wrapping past the end.
    pub(super) fn slot(&self, index: usize) -> &T {
        &self.slots[index % self.capacity()]
    }
}
