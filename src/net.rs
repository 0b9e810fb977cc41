//! network throughput.

use {crate::collect::NetCounters, std::time::Instant};

/// turns cumulative byte counters into rates, in megabits per second.
///
/// the first update only records a baseline. the maxima start at 1 and never shrink, they are the
/// scale the network meters are drawn against.
#[derive(Clone, Debug)]
pub struct NetRate {
    last: Option<(NetCounters, Instant)>,
    down: f64,
    up: f64,
    down_max: f64,
    up_max: f64,
}

// === impl NetRate ===

impl NetRate {
    const BITS_PER_MEGABIT: f64 = 1024.0 * 1024.0;

    pub fn new() -> Self {
        Self {
            last: None,
            down: 0.0,
            up: 0.0,
            down_max: 1.0,
            up_max: 1.0,
        }
    }

    /// records a reading of the counters.
    pub fn update(&mut self, counters: NetCounters, now: Instant) {
        let Self {
            last,
            down,
            up,
            down_max,
            up_max,
        } = self;

        let Some((prev, then)) = last.replace((counters, now)) else {
            return;
        };

        let elapsed = now.saturating_duration_since(then).as_secs_f64();
        if elapsed <= 0.0 {
            return;
        }

        // counters that went backwards were reset, that tick moved nothing we can measure.
        let rate = |new: u64, old: u64| {
            new.saturating_sub(old) as f64 * 8.0 / (elapsed * Self::BITS_PER_MEGABIT)
        };
        *down = rate(counters.rx_bytes, prev.rx_bytes);
        *up = rate(counters.tx_bytes, prev.tx_bytes);
        *down_max = down_max.max(*down);
        *up_max = up_max.max(*up);
    }

    /// the download rate, in Mb/s.
    pub fn down(&self) -> f64 {
        self.down
    }

    /// the upload rate, in Mb/s.
    pub fn up(&self) -> f64 {
        self.up
    }

    pub fn down_max(&self) -> f64 {
        self.down_max
    }

    pub fn up_max(&self) -> f64 {
        self.up_max
    }
}

impl Default for NetRate {
    fn default() -> Self {
        Self::new()
    }
}
