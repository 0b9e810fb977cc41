//! rolling sample history.
//!
//! a [`RingBuffer`] retains the last few samples of one kind without growing, and [`extract()`]
//! linearizes its most recent samples into a [`Window`] for rendering. all of the wraparound
//! arithmetic lives here, renderers only ever see samples in chronological order.

pub use self::{
    ring::RingBuffer,
    window::{Window, extract},
};

mod ring;
mod window;


/// a sample that can be plotted on a 0-100 scale.
pub trait Percentage {
    fn percentage(&self) -> f64;
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum HistoryError {
    #[error("a history must hold at least one sample")]
    ZeroCapacity,
}

impl Percentage for f64 {
    fn percentage(&self) -> f64 {
        *self
    }
}
