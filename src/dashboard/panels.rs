//! the sections of the dashboard.
//!
//! every section is drawn at a fixed position. the last row each one occupies is exported, so
//! that sections which do not fit can be skipped.

use {
    crate::{
        band::Band,
        collect::{CollectError, DiskSample, ProcessCounts, SystemInfo},
        meminfo::MemorySample,
        meter::Meter,
        net::NetRate,
        render::{equalizer as eq, format_bytes, heatmap as heat, histogram as hist, paint, tint},
        sentinel::CpuSample,
        terminal::Target,
    },
    std::io,
};

pub(super) const HEADER_LAST: usize = 1;
pub(super) const SUMMARY_LAST: usize = 9;
pub(super) const NETWORK_LAST: usize = 13;
pub(super) const DISK_LAST: usize = 16;
pub(super) const SWAP_LAST: usize = 21;

const TEMPERATURE_COL: usize = 40;
const PROCESSES_COL: usize = 70;

/// the columns taken up by the histogram's axis labels, e.g. `100% `.
const LABEL_WIDTH: usize = 5;

pub(super) const NOT_AVAILABLE: &str = "N/A";

pub(super) fn error(target: &mut impl Target, error: &CollectError) -> io::Result<()> {
    let band = tint(target, Some(Band::Critical));
    target.write_text(0, 0, &format!("failed to read memory statistics: {error}"), band)
}

pub(super) fn header(target: &mut impl Target) -> io::Result<()> {
    let updated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    target.write_text(0, 0, "=== RINGMON ===", None)?;
    target.write_text(1, 0, &format!("updated: {updated}"), None)
}

pub(super) fn ram(target: &mut impl Target, sample: &MemorySample) -> io::Result<()> {
    let MemorySample {
        total,
        free,
        available,
        buffers,
        cached,
        used,
        ram_percentage,
        ..
    } = sample;

    target.write_text(3, 0, "RAM:", None)?;
    let lines = [
        ("total:    ", format_bytes(*total)),
        ("used:     ", format!("{} ({ram_percentage:.1}%)", format_bytes(*used))),
        ("free:     ", format_bytes(*free)),
        ("available:", format_bytes(*available)),
        ("buffers:  ", format_bytes(*buffers)),
        ("cached:   ", format_bytes(*cached)),
    ];
    for (row, (name, value)) in (4..).zip(lines) {
        target.write_text(row, 2, &format!("{name} {value}"), None)?;
    }

    let band = tint(target, Some(Band::classify(*ram_percentage)));
    target.write_text(5, 13, &format_bytes(*used), band)
}

pub(super) fn temperature(target: &mut impl Target, celsius: Option<f64>) -> io::Result<()> {
    target.write_text(3, TEMPERATURE_COL, "CPU temperature:", None)?;
    match celsius {
        Some(celsius) => {
            let band = tint(target, Some(Band::classify(celsius)));
            target.write_text(4, TEMPERATURE_COL + 2, &format!("{celsius:.1}°C"), band)
        }
        None => target.write_text(4, TEMPERATURE_COL + 2, NOT_AVAILABLE, None),
    }
}

pub(super) fn cpu(target: &mut impl Target, sample: Option<&CpuSample>) -> io::Result<()> {
    target.write_text(6, TEMPERATURE_COL, "CPU usage:", None)?;
    let Some(CpuSample {
        percentage, cpus, ..
    }) = sample
    else {
        return target.write_text(7, TEMPERATURE_COL + 2, NOT_AVAILABLE, None);
    };

    let band = tint(target, Some(Band::classify(*percentage)));
    target.write_text(
        7,
        TEMPERATURE_COL + 2,
        &format!("{percentage:.1}% of {cpus} cpus"),
        band,
    )
}

pub(super) fn processes(
    target: &mut impl Target,
    counts: Option<&ProcessCounts>,
    width: usize,
) -> io::Result<()> {
    let col = PROCESSES_COL;
    target.write_text(3, col, "processes:", None)?;
    let Some(counts) = counts else {
        return target.write_text(4, col + 2, NOT_AVAILABLE, None);
    };

    let ProcessCounts {
        system,
        user,
        background,
        total,
    } = *counts;
    let busiest = counts.busiest() as f64;
    for (row, name, count) in [
        (4, "system    ", system),
        (5, "user      ", user),
        (6, "background", background),
    ] {
        let meter = Meter::proportional(name, count as f64, busiest, width);
        let end = meter.draw(target, row, col + 2)?;
        target.write_text(row, end, &format!(" {count}"), None)?;
    }
    target.write_text(7, col + 2, &format!("total:       {total}"), None)
}

pub(super) fn network(
    target: &mut impl Target,
    rate: Option<&NetRate>,
    width: usize,
) -> io::Result<()> {
    target.write_text(11, 0, "network:", None)?;
    let Some(rate) = rate else {
        return target.write_text(12, 2, NOT_AVAILABLE, None);
    };

    for (row, name, mbps, max) in [
        (12, "+ download", rate.down(), rate.down_max()),
        (13, "- upload  ", rate.up(), rate.up_max()),
    ] {
        let end = Meter::proportional(name, mbps, max, width).draw(target, row, 2)?;
        target.write_text(row, end, &format!(" {mbps:.2} Mb/s"), None)?;
    }

    Ok(())
}

pub(super) fn disk(
    target: &mut impl Target,
    disk: Option<&DiskSample>,
    width: usize,
) -> io::Result<()> {
    target.write_text(15, 0, "disk /:", None)?;
    let Some(DiskSample {
        total,
        used,
        percent_used,
        ..
    }) = disk
    else {
        return target.write_text(16, 2, NOT_AVAILABLE, None);
    };

    let end = Meter::percentage("used", *percent_used, width).draw(target, 16, 2)?;
    let detail = format!(
        " {percent_used:.0}% ({} of {})",
        format_bytes(*used),
        format_bytes(*total)
    );
    target.write_text(16, end, &detail, None)
}

pub(super) fn swap(target: &mut impl Target, sample: &MemorySample, width: usize) -> io::Result<()> {
    let MemorySample {
        swap_total,
        swap_used,
        swap_percentage,
        ..
    } = sample;

    target.write_text(18, 0, "swap:", None)?;
    target.write_text(19, 2, &format!("total: {}", format_bytes(*swap_total)), None)?;
    target.write_text(20, 2, &format!("used:  {}", format_bytes(*swap_used)), None)?;
    let end = Meter::percentage("swap", *swap_percentage, width).draw(target, 21, 2)?;
    target.write_text(21, end, &format!(" {swap_percentage:.1}%"), None)
}

/// the first column and width of the equalizer: the left half of the target, past its axis.
pub(super) fn equalizer_area(cols: usize) -> (usize, usize) {
    (1, (cols / 2).saturating_sub(3))
}

/// the first column and width of the histogram: the right half of the target, past its labels.
pub(super) fn histogram_area(cols: usize) -> (usize, usize) {
    let left = cols / 2 + LABEL_WIDTH + 1;
    (left, cols.saturating_sub(left + 1))
}

/// draws the equalizer, with axes along its left and bottom edges.
pub(super) fn equalizer(
    target: &mut impl Target,
    values: &[f64],
    top: usize,
    left: usize,
    height: usize,
) -> io::Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let title = format!("RAM history (equalizer, {} samples):", values.len());
    target.write_text(top - 1, left, &title, None)?;

    let grid = eq::render(values, height, values.len());
    paint(target, &grid, top, left)?;

    let axis = left.saturating_sub(1);
    for row in top..top + height {
        target.write_cell(row, axis, '│', None)?;
    }
    target.write_cell(top + height, axis, '└', None)?;
    for col in left..left + grid.width() {
        target.write_cell(top + height, col, '─', None)?;
    }

    Ok(())
}

/// draws the histogram, with its percentage labels to the left.
pub(super) fn histogram(
    target: &mut impl Target,
    values: &[f64],
    top: usize,
    left: usize,
    height: usize,
) -> io::Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    target.write_text(top - 1, left, "RAM histogram (%):", None)?;
    let grid = hist::render(values, height, values.len());
    paint(target, &grid, top, left)
}

pub(super) fn heatmap(target: &mut impl Target, values: &[f64], top: usize) -> io::Result<()> {
    let title = format!("CPU heatmap (last {} samples):", values.len());
    target.write_text(top - 1, 2, &title, None)?;
    if values.is_empty() {
        return target.write_text(top, 2, NOT_AVAILABLE, None);
    }

    paint(target, &heat::render(values), top, 2)
}

pub(super) fn system(
    target: &mut impl Target,
    info: Option<&SystemInfo>,
    top: usize,
) -> io::Result<()> {
    target.write_text(top, 0, "=== SYSTEM ===", None)?;
    let (cpus, uptime) = match info {
        Some(SystemInfo { cpus, uptime }) => (
            cpus.to_string(),
            format!("{:.2} hours", uptime.as_secs_f64() / 3600.0),
        ),
        None => (NOT_AVAILABLE.to_owned(), NOT_AVAILABLE.to_owned()),
    };
    target.write_text(top + 1, 0, &format!("cpus: {cpus}"), None)?;
    target.write_text(top + 2, 0, &format!("uptime: {uptime}"), None)
}

pub(super) fn help(target: &mut impl Target, row: usize) -> io::Result<()> {
    target.write_text(row, 0, "press 'q' to quit, 'r' to reset the history", None)
}
