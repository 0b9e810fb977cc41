//! where samples come from.
//!
//! the dashboard only ever talks to a [`Collector`]. the host implementation reads memory and cpu
//! accounting straight out of `/proc`, and asks `sysinfo` about everything else.

use {
    crate::{
        meminfo::{MemInfoError, MemorySample},
        sentinel::{CpuSample, Sentinel},
        source::ProcFile,
        stat::StatReadError,
    },
    std::{path::Path, time::Duration},
    sysinfo::{
        Components, Disks, Networks, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate,
        System, UpdateKind,
    },
    tracing::trace,
};

/// a source of samples, called once per tick.
///
/// every call may fail independently. failures are transient, the next tick simply asks again.
pub trait Collector {
    /// the memory sample that drives the dashboard's history.
    fn memory(&mut self) -> Result<MemorySample, CollectError>;

    /// the cpu load since the previous call, or `None` while there is no previous call to compare
    /// against.
    fn cpu(&mut self) -> Result<Option<CpuSample>, CollectError>;

    fn disk(&mut self) -> Result<DiskSample, CollectError>;

    fn network(&mut self) -> Result<NetCounters, CollectError>;

    fn processes(&mut self) -> Result<ProcessCounts, CollectError>;

    /// the cpu temperature, in degrees celsius.
    ///
    /// this can be slow, callers should throttle it.
    fn temperature(&mut self) -> Result<f64, CollectError>;

    fn system(&mut self) -> Result<SystemInfo, CollectError>;
}

/// a metric that is temporarily unavailable.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("cpu statistics unavailable: {0}")]
    Stat(#[from] StatReadError),
    #[error("memory statistics unavailable: {0}")]
    MemInfo(#[from] MemInfoError),
    #[error("{0} not available")]
    Unavailable(&'static str),
}

/// space on the root filesystem, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiskSample {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent_used: f64,
}

/// bytes moved through every interface but loopback, since boot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NetCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// live processes, by category.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProcessCounts {
    /// awake processes owned by root.
    pub system: usize,
    /// awake processes owned by anyone else.
    pub user: usize,
    /// sleeping and idle processes.
    pub background: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SystemInfo {
    pub cpus: usize,
    pub uptime: Duration,
}

/// collects samples from the running host.
pub struct HostCollector {
    sentinel: Sentinel,
    meminfo: ProcFile,
    system: System,
    networks: Networks,
}

// === impl HostCollector ===

impl HostCollector {
    pub fn new() -> Self {
        Self {
            sentinel: Sentinel::new(),
            meminfo: ProcFile::meminfo(),
            system: System::new(),
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for HostCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for HostCollector {
    fn memory(&mut self) -> Result<MemorySample, CollectError> {
        trace!(path = %self.meminfo.path().display(), "reading memory statistics");
        MemorySample::read(&self.meminfo).map_err(Into::into)
    }

    fn cpu(&mut self) -> Result<Option<CpuSample>, CollectError> {
        self.sentinel.observe().map_err(Into::into)
    }

    fn disk(&mut self) -> Result<DiskSample, CollectError> {
        let disks = Disks::new_with_refreshed_list();
        let root = disks
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .ok_or(CollectError::Unavailable("root filesystem"))?;

        let (total, free) = (root.total_space(), root.available_space());
        Ok(DiskSample::new(total, free))
    }

    fn network(&mut self) -> Result<NetCounters, CollectError> {
        let Self { networks, .. } = self;

        networks.refresh(true);
        let counters = networks
            .iter()
            .filter(|(name, _)| !is_loopback(name))
            .fold(NetCounters::default(), |acc, (_, data)| NetCounters {
                rx_bytes: acc.rx_bytes + data.total_received(),
                tx_bytes: acc.tx_bytes + data.total_transmitted(),
            });

        Ok(counters)
    }

    fn processes(&mut self) -> Result<ProcessCounts, CollectError> {
        let Self { system, .. } = self;

        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_user(UpdateKind::OnlyIfNotSet),
        );
        if system.processes().is_empty() {
            return Err(CollectError::Unavailable("process list"));
        }

        let counts = system
            .processes()
            .values()
            .fold(ProcessCounts::default(), |counts, process| {
                let root = process.user_id().is_some_and(|uid| **uid == 0);
                counts.with(ProcessCategory::of(process.status(), root))
            });

        Ok(counts)
    }

    fn temperature(&mut self) -> Result<f64, CollectError> {
        let components = Components::new_with_refreshed_list();
        let readings = components
            .iter()
            .filter_map(|c| c.temperature().map(|t| (c.label().to_lowercase(), t)))
            .filter(|(_, celsius)| *celsius > 0.0)
            .collect::<Vec<_>>();

        readings
            .iter()
            .find(|(label, _)| is_cpu_sensor(label))
            .or_else(|| readings.first())
            .map(|(_, celsius)| f64::from(*celsius))
            .ok_or(CollectError::Unavailable("temperature sensor"))
    }

    fn system(&mut self) -> Result<SystemInfo, CollectError> {
        let cpus = std::thread::available_parallelism()
            .map(usize::from)
            .map_err(|_| CollectError::Unavailable("cpu count"))?;

        Ok(SystemInfo {
            cpus,
            uptime: Duration::from_secs(System::uptime()),
        })
    }
}

fn is_loopback(interface: &str) -> bool {
    interface == "lo" || interface.starts_with("lo:")
}

fn is_cpu_sensor(label: &str) -> bool {
    ["cpu", "package", "tctl", "tdie", "coretemp", "k10temp"]
        .iter()
        .any(|name| label.contains(name))
}

// === impl DiskSample ===

impl DiskSample {
    pub fn new(total: u64, free: u64) -> Self {
        let free = free.min(total);
        let used = total - free;
        let percent_used = if total == 0 {
            0.0
        } else {
            used as f64 / total as f64 * 100.0
        };

        Self {
            total,
            used,
            free,
            percent_used,
        }
    }
}

// === impl ProcessCounts ===

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ProcessCategory {
    System,
    User,
    Background,
}

impl ProcessCategory {
    fn of(status: ProcessStatus, root: bool) -> Self {
        match status {
            ProcessStatus::Sleep | ProcessStatus::Idle => Self::Background,
            _ if root => Self::System,
            _ => Self::User,
        }
    }
}

impl ProcessCounts {
    fn with(mut self, category: ProcessCategory) -> Self {
        match category {
            ProcessCategory::System => self.system += 1,
            ProcessCategory::User => self.user += 1,
            ProcessCategory::Background => self.background += 1,
        }
        self.total += 1;
        self
    }

    /// the largest of the three categories, the scale their bars are drawn against.
    pub fn busiest(&self) -> usize {
        self.system.max(self.user).max(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_usage() {
        let disk = DiskSample::new(1000, 250);
        assert_eq!(disk.used, 750);
        assert_eq!(disk.percent_used, 75.0);
        assert_eq!(DiskSample::new(0, 0).percent_used, 0.0);
    }

    #[test]
    fn disk_free_beyond_total() {
        let disk = DiskSample::new(100, 400);
        assert_eq!(disk.used, 0);
        assert_eq!(disk.free, 100);
    }

    #[test]
    fn process_categories() {
        use ProcessCategory::*;

        assert_eq!(ProcessCategory::of(ProcessStatus::Sleep, true), Background);
        assert_eq!(ProcessCategory::of(ProcessStatus::Idle, false), Background);
        assert_eq!(ProcessCategory::of(ProcessStatus::Run, true), System);
        assert_eq!(ProcessCategory::of(ProcessStatus::Run, false), User);
        assert_eq!(ProcessCategory::of(ProcessStatus::Zombie, false), User);
    }

    #[test]
    fn process_counts() {
        let counts = [
            ProcessCategory::System,
            ProcessCategory::User,
            ProcessCategory::User,
            ProcessCategory::Background,
            ProcessCategory::Background,
            ProcessCategory::Background,
        ]
        .into_iter()
        .fold(ProcessCounts::default(), ProcessCounts::with);

        assert_eq!(
            counts,
            ProcessCounts {
                system: 1,
                user: 2,
                background: 3,
                total: 6,
            }
        );
        assert_eq!(counts.busiest(), 3);
    }

    #[test]
    fn loopback() {
        assert!(is_loopback("lo"));
        assert!(!is_loopback("eth0"));
        assert!(!is_loopback("wlo1"));
    }

    #[test]
    fn cpu_sensors() {
        assert!(is_cpu_sensor("coretemp package id 0"));
        assert!(is_cpu_sensor("k10temp tctl"));
        assert!(!is_cpu_sensor("nvme composite"));
    }
}
