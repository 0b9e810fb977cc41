//! memory accounting.
//!
//! this file provides tools to interact with `/proc/meminfo`.

use {
    crate::{history::Percentage, source::StatsSource},
    std::{
        io::{self, Read},
        num::ParseIntError,
        str::FromStr,
    },
};

#[cfg(test)]
mod tests;

/// the host's memory usage at a moment in time. all sizes are in bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemorySample {
    pub total: u64,
    pub free: u64,
    /// memory that could be handed to new work without swapping.
    pub available: u64,
    pub buffers: u64,
    /// the page cache, including reclaimable slab.
    pub cached: u64,
    /// `total - available`.
    pub used: u64,
    pub ram_percentage: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    /// `0.0` when the host has no swap.
    pub swap_percentage: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum MemInfoError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("missing {0} entry")]
    Missing(&'static str),
    #[error("invalid value for {key}: {source}")]
    Value {
        key: String,
        #[source]
        source: ParseIntError,
    },
    #[error("MemTotal is zero")]
    ZeroTotal,
}

/// the raw fields of interest, in kibibytes.
#[derive(Default)]
struct Fields {
    mem_total: Option<u64>,
    mem_free: Option<u64>,
    mem_available: Option<u64>,
    buffers: Option<u64>,
    cached: Option<u64>,
    s_reclaimable: Option<u64>,
    swap_total: Option<u64>,
    swap_free: Option<u64>,
}

// === impl MemorySample ===

impl MemorySample {
    /// uses the given source to parse the current memory usage.
    pub fn read(source: &impl StatsSource) -> Result<Self, MemInfoError> {
        let mut text = String::new();
        source.open()?.read_to_string(&mut text)?;
        text.parse()
    }
}

impl FromStr for MemorySample {
    type Err = MemInfoError;
    fn from_str(meminfo: &str) -> Result<Self, Self::Err> {
        let mut fields = Fields::default();

        for line in meminfo.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let slot = match key.trim() {
                "MemTotal" => &mut fields.mem_total,
                "MemFree" => &mut fields.mem_free,
                "MemAvailable" => &mut fields.mem_available,
                "Buffers" => &mut fields.buffers,
                "Cached" => &mut fields.cached,
                "SReclaimable" => &mut fields.s_reclaimable,
                "SwapTotal" => &mut fields.swap_total,
                "SwapFree" => &mut fields.swap_free,
                _ => continue,
            };
            *slot = Some(parse_kib(key, rest)?);
        }

        Self::try_from(fields)
    }
}

impl TryFrom<Fields> for MemorySample {
    type Error = MemInfoError;
    fn try_from(fields: Fields) -> Result<Self, Self::Error> {
        const KIB: u64 = 1024;

        let Fields {
            mem_total,
            mem_free,
            mem_available,
            buffers,
            cached,
            s_reclaimable,
            swap_total,
            swap_free,
        } = fields;

        let total = mem_total.ok_or(MemInfoError::Missing("MemTotal"))?;
        if total == 0 {
            return Err(MemInfoError::ZeroTotal);
        }
        let free = mem_free.ok_or(MemInfoError::Missing("MemFree"))?;
        let buffers = buffers.unwrap_or_default();
        let cached = cached.unwrap_or_default() + s_reclaimable.unwrap_or_default();
        // kernels before 3.14 do not estimate this for us.
        let available = mem_available
            .unwrap_or(free + buffers + cached)
            .min(total);
        let used = total - available;

        let swap_total = swap_total.unwrap_or_default();
        let swap_used = swap_total.saturating_sub(swap_free.unwrap_or(swap_total));

        Ok(Self {
            total: total * KIB,
            free: free * KIB,
            available: available * KIB,
            buffers: buffers * KIB,
            cached: cached * KIB,
            used: used * KIB,
            ram_percentage: ratio(used, total),
            swap_total: swap_total * KIB,
            swap_used: swap_used * KIB,
            swap_percentage: ratio(swap_used, swap_total),
        })
    }
}

impl Percentage for MemorySample {
    fn percentage(&self) -> f64 {
        self.ram_percentage
    }
}

/// parses the value of a `Key:   1234 kB` line.
fn parse_kib(key: &str, rest: &str) -> Result<u64, MemInfoError> {
    let value = rest.split_whitespace().next().unwrap_or_default();
    value.parse().map_err(|source| MemInfoError::Value {
        key: key.trim().to_owned(),
        source,
    })
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
