use {
    crate::source::{Clock, StatsSource},
    std::{
        io::{self, BufRead, BufReader},
        num::ParseIntError,
        str::FromStr,
        time::Instant,
    },
    tracing::trace,
};

pub use self::{
    cpu_time::{CpuTime, Measurement},
    user_hz::UserHz,
};

mod cpu_time;
mod user_hz;


/// a snapshot of the cpus' statistics at a moment in time.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// how the system cpus have spent their time since boot, in aggregate.
    pub system: CpuTime,
    /// the number of individual cpus listed.
    pub cpus: usize,
    pub time: Instant,
}

/// an entry in the `/proc/stat` kernel statistics table.
///
/// see `proc_stat(5)` for more information. only the cpu lines are interpreted.
#[derive(Debug, Eq, PartialEq)]
pub enum Entry {
    /// the amount of time that the system ("cpu" line) spent in various states.
    AllCpu { time: CpuTime },
    /// the amount of time that a specific cpu ("cpuN" line) spent in various states.
    Cpu { id: CpuId, time: CpuTime },
    /// any other line, e.g. `ctxt` or `procs_running`.
    Other { kind: String },
}

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct CpuId(u16);

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum EntryParseError {
    #[error("empty entry")]
    Empty,
    #[error("invalid cpu id: {0}")]
    CpuIdParse(#[source] ParseIntError),
    #[error("invalid time value: {0}")]
    UserHzParse(#[source] ParseIntError),
    #[error("expected between {min} and {max} time values, found {found}", min = CpuTime::MIN_FIELDS, max = CpuTime::FIELDS)]
    CpuTime { found: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum StatReadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Entry(#[from] EntryParseError),
    #[error("no aggregate cpu entry was found")]
    MissingSystem,
}

// === impl Snapshot ===

impl Snapshot {
    /// uses the given source to parse a snapshot of the cpu statistics.
    ///
    /// blank lines and entries other than cpu times are skipped.
    pub(crate) fn read(
        stats: &impl StatsSource,
        clock: &impl Clock,
    ) -> Result<Snapshot, StatReadError> {
        let time = clock.now();
        let reader = stats.open().map(BufReader::new)?;

        let (mut system, mut cpus) = (None, 0);
        for line in reader.lines() {
            let line = line?;
            match line.parse::<Entry>() {
                Ok(Entry::AllCpu { time }) => system = Some(time),
                Ok(Entry::Cpu { .. }) => cpus += 1,
                Ok(Entry::Other { kind }) => trace!(%kind, "skipping /proc/stat entry"),
                Err(EntryParseError::Empty) => {}
                Err(error) => return Err(error.into()),
            }
        }

        let system = system.ok_or(StatReadError::MissingSystem)?;

        Ok(Snapshot { system, cpus, time })
    }
}

// === impl Entry ===

impl FromStr for Entry {
    type Err = EntryParseError;
    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let tokens = entry.split_whitespace().collect::<Vec<_>>();
        let [kind, tokens @ ..] = tokens.as_slice() else {
            return Err(EntryParseError::Empty);
        };

        let Some(suffix) = kind.strip_prefix("cpu") else {
            return Ok(Self::Other {
                kind: (*kind).to_owned(),
            });
        };
        let id = Self::parse_cpu_id(suffix)?;

        let time = tokens
            .iter()
            .map(|token| token.parse::<UserHz>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(EntryParseError::UserHzParse)
            .and_then(CpuTime::try_from)?;

        Ok(if let Some(id) = id {
            Self::Cpu { id, time }
        } else {
            Self::AllCpu { time }
        })
    }
}

impl Entry {
    /// parses what follows the "cpu" prefix: nothing for the aggregate line, or a cpu's index.
    fn parse_cpu_id(suffix: &str) -> Result<Option<CpuId>, EntryParseError> {
        if suffix.is_empty() {
            return Ok(None);
        }

        suffix
            .parse::<u16>()
            .map(CpuId)
            .map(Some)
            .map_err(EntryParseError::CpuIdParse)
    }
}
