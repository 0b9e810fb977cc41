use super::{Percentage, RingBuffer};

/// the newest samples of a [`RingBuffer`], oldest first.
///
/// a window borrows the buffer, so it cannot outlive the tick that extracted it.
#[derive(Debug)]
pub struct Window<'a, T> {
    buffer: &'a RingBuffer<T>,
    /// the physical slot of the window's first sample.
    first: usize,
    len: usize,
}

/// selects the newest `min(count, desired_width)` samples of `buffer`, in chronological order.
///
/// when the buffer holds more than fits, the oldest extras are skipped. an empty buffer or a zero
/// width yields an empty window.
pub fn extract<T>(buffer: &RingBuffer<T>, desired_width: usize) -> Window<'_, T> {
    let count = buffer.count();
    let len = count.min(desired_width);
    let first = (buffer.oldest_index() + (count - len)) % buffer.capacity();

    Window { buffer, first, len }
}

// === impl Window ===

impl<'a, T> Window<'a, T> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, i: usize) -> Option<&'a T> {
        let Self { buffer, first, len } = *self;
        (i < len).then(|| buffer.slot(first + i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        (0..self.len).filter_map(|i| self.get(i))
    }
}

impl<T: Percentage> Window<'_, T> {
    /// linearizes the window into the plain percentages renderers consume.
    pub fn percentages(&self) -> Vec<f64> {
        self.iter().map(T::percentage).collect()
    }
}

impl<T> Clone for Window<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Window<'_, T> {}
