use super::*;

/// how long a cpu has spent in each state since boot, in the order `/proc/stat` lists them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CpuTime {
    user: UserHz,
    nice: UserHz,
    system: UserHz,
    idle: UserHz,
    /// not reliable, and may even decrease. it is still time the cpu was not idle.
    iowait: UserHz,
    irq: UserHz,
    softirq: UserHz,
    /// time taken by other guests, when running under a hypervisor.
    steal: UserHz,
    #[allow(dead_code, reason = "already counted in `user`")]
    guest: UserHz,
    #[allow(dead_code, reason = "already counted in `nice`")]
    guest_nice: UserHz,
}

/// the difference between two [`CpuTime`]s, reduced to busy and total time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Measurement {
    active: UserHz,
    total: UserHz,
}

// == impl Measurement ===

impl Measurement {
    pub fn new(a: &CpuTime, b: &CpuTime) -> Self {
        Self {
            active: b.active() - a.active(),
            total: b.total() - a.total(),
        }
    }

    /// returns the percentage of active cpu time, in `[0, 100]`.
    ///
    /// an interval with no recorded ticks at all counts as idle.
    pub fn percentage(&self) -> f64 {
        let Self { active, total } = *self;

        if total == UserHz::ZERO {
            return 0.0;
        }

        ((active / total) * 100.0).clamp(0.0, 100.0)
    }
}

// === impl CpuTime ===

impl CpuTime {
    /// the number of fields in a modern cpu line.
    pub const FIELDS: usize = 10;
    /// kernels before 2.6 only report user, nice, system and idle.
    pub const MIN_FIELDS: usize = 4;

    pub fn active(&self) -> UserHz {
        let Self {
            user,
            nice,
            system,
            iowait,
            irq,
            softirq,
            steal,
            // guest time is already included in user and nice.
            guest: _,
            guest_nice: _,
            idle: _, // do not count idle time...
        } = *self;

        user + nice + system + iowait + irq + softirq + steal
    }

    pub fn total(&self) -> UserHz {
        self.active() + self.idle
    }
}

impl TryFrom<Vec<UserHz>> for CpuTime {
    type Error = EntryParseError;
    fn try_from(mut times: Vec<UserHz>) -> Result<Self, Self::Error> {
        let found = times.len();
        if !(Self::MIN_FIELDS..=Self::FIELDS).contains(&found) {
            return Err(EntryParseError::CpuTime { found });
        }

        // older kernels omit the trailing fields.
        times.resize(Self::FIELDS, UserHz::ZERO);
        <[UserHz; 10]>::try_from(times)
            .map(Self::from)
            .map_err(|_| EntryParseError::CpuTime { found })
    }
}

impl From<[UserHz; 10]> for CpuTime {
    fn from(
        [
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        ]: [UserHz; 10],
    ) -> Self {
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        }
    }
}
