//! a compact memory and cpu dashboard for the terminal.
//!
//! samples are kept in fixed-size [`history::RingBuffer`]s, and redrawn every tick as an
//! equalizer, a histogram and a heatmap, alongside meters for instantaneous gauges.

use std::io;

pub mod band;
pub mod collect;
pub mod config;
pub mod dashboard;
pub mod history;
pub mod meminfo;
pub mod meter;
pub mod net;
pub mod render;
pub mod sentinel;
pub mod source;
pub mod terminal;
pub mod throttle;

/// kernel statistics facilities.
///
/// this file provides tools to interact with `/proc/stat`.
pub mod stat;

/// an error that stops the dashboard.
///
/// collector failures never show up here, they are recovered from within a tick.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to draw: {0}")]
    Render(#[from] io::Error),
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
    #[error(transparent)]
    History(#[from] history::HistoryError),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
