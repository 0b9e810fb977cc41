//! throttled lookups.

use {
    std::{
        fmt::Display,
        time::{Duration, Instant},
    },
    tracing::debug,
};

/// caches the result of an expensive lookup, refreshing it at most once per `interval`.
///
/// a failed refresh keeps the last good value, but still counts as an attempt: retries are
/// throttled too.
#[derive(Clone, Debug)]
pub struct Throttled<T> {
    cached: Option<T>,
    last_checked: Option<Instant>,
    interval: Duration,
}

// === impl Throttled ===

impl<T: Clone> Throttled<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            cached: None,
            last_checked: None,
            interval,
        }
    }

    /// returns the cached value, performing `lookup` first if it is due.
    ///
    /// a lookup is due if none has been attempted, if none has ever succeeded, or if more than the
    /// interval has passed since the last attempt.
    pub fn get<E, F>(&mut self, now: Instant, lookup: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Display,
    {
        if self.is_due(now) {
            let Self {
                cached,
                last_checked,
                ..
            } = self;

            match lookup() {
                Ok(value) => *cached = Some(value),
                Err(error) => debug!(%error, "throttled lookup failed, keeping the last value"),
            }
            *last_checked = Some(now);
        }

        self.cached.clone()
    }

    fn is_due(&self, now: Instant) -> bool {
        let Self {
            cached,
            last_checked,
            interval,
        } = self;

        match (cached, last_checked) {
            (None, _) | (_, None) => true,
            (Some(_), Some(last)) => now.saturating_duration_since(*last) > *interval,
        }
    }

    pub fn cached(&self) -> Option<&T> {
        self.cached.as_ref()
    }

    pub fn last_checked(&self) -> Option<Instant> {
        self.last_checked
    }
}
