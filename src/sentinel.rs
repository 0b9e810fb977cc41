use {
    crate::{
        history::Percentage,
        source::{Clock, ProcFile, StatsSource, SystemClock},
        stat::{Measurement, Snapshot, StatReadError},
    },
    std::time::Duration,
    tracing::debug,
};

/// observes kernel statistics.
pub struct Sentinel<C = SystemClock, S = ProcFile> {
    /// the clock being used to measure time.
    clock: C,
    /// the underlying source of kernel statistics.
    source: S,
    /// the last observed snapshot, once one has been taken.
    last: Option<Snapshot>,
}

/// the system's aggregate cpu load over one sampling interval.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CpuSample {
    /// the share of time the cpus spent busy, in `[0, 100]`.
    pub percentage: f64,
    /// the number of cpus the kernel reported.
    pub cpus: usize,
    /// the length of the interval this sample covers.
    pub elapsed: Duration,
}

// === impl Sentinel ===

impl Sentinel {
    /// creates a [`Sentinel`] reading `/proc/stat`.
    pub fn new() -> Self {
        Self::with(SystemClock, ProcFile::stat())
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> Sentinel<C, S>
where
    C: Clock,
    S: StatsSource,
{
    pub fn with(clock: C, source: S) -> Self {
        Self {
            clock,
            source,
            last: None,
        }
    }

    /// returns a [`CpuSample`] of cpu time since this was last called.
    ///
    /// NB: by virtue of this being a comparison to the previous reading, this will return
    /// `Ok(None)` the first time it succeeds. a failed read leaves the previous baseline in place.
    pub fn observe(&mut self) -> Result<Option<CpuSample>, StatReadError> {
        let Self {
            clock,
            source,
            last,
        } = self;

        let new = Snapshot::read(&*source, &*clock)?;
        let Some(prev) = last.replace(new.clone()) else {
            debug!(cpus = new.cpus, "primed cpu baseline");
            return Ok(None);
        };

        let measurement = Measurement::new(&prev.system, &new.system);
        Ok(Some(CpuSample {
            percentage: measurement.percentage(),
            cpus: new.cpus,
            elapsed: new.time.saturating_duration_since(prev.time),
        }))
    }
}

// === impl CpuSample ===

impl Percentage for CpuSample {
    fn percentage(&self) -> f64 {
        self.percentage
    }
}
