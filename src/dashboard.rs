//! the sampling loop.
//!
//! each tick asks the [`Collector`] for fresh samples, appends them to the memory and cpu
//! histories, and redraws every section of the dashboard onto a [`Target`]. between ticks, the
//! loop checks for a [`Command`] and then sleeps.

use {
    crate::{
        Error,
        collect::{CollectError, Collector, DiskSample, ProcessCounts, SystemInfo},
        config::Config,
        history::{HistoryError, RingBuffer, extract},
        meminfo::MemorySample,
        net::NetRate,
        sentinel::CpuSample,
        source::Clock,
        terminal::{Controls, Size, Target},
        throttle::Throttled,
    },
    std::time::Instant,
    tracing::{debug, info, warn},
};

mod panels;

#[cfg(test)]
mod tests;

/// the row the ram graphs start on. their titles sit on the row above.
pub const GRAPH_TOP: usize = 24;

/// the rows reserved at the bottom of the target for system information and help.
pub const FOOTER_ROWS: usize = 5;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    Running,
    /// the loop has stopped. nothing leaves this state.
    Terminated,
}

/// a request from the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Quit,
    /// forget both histories.
    Reset,
}

/// the dashboard, and the rolling histories it draws.
pub struct Dashboard<C> {
    collector: C,
    config: Config,
    memory: RingBuffer<MemorySample>,
    cpu: RingBuffer<CpuSample>,
    temperature: Throttled<f64>,
    network: NetRate,
    state: State,
}

/// everything collected in one tick, besides the memory sample.
///
/// a `None` is a metric that is not available this tick.
struct Readings {
    cpu: Option<CpuSample>,
    temperature: Option<f64>,
    processes: Option<ProcessCounts>,
    network: bool,
    disk: Option<DiskSample>,
    system: Option<SystemInfo>,
}

// === impl Dashboard ===

impl<C: Collector> Dashboard<C> {
    pub fn new(collector: C, config: Config) -> Result<Self, HistoryError> {
        Ok(Self {
            memory: RingBuffer::new(config.memory_capacity)?,
            cpu: RingBuffer::new(config.cpu_capacity)?,
            temperature: Throttled::new(config.temperature_interval()),
            network: NetRate::new(),
            state: State::Running,
            collector,
            config,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn collector(&self) -> &C {
        &self.collector
    }

    pub fn memory(&self) -> &RingBuffer<MemorySample> {
        &self.memory
    }

    pub fn cpu(&self) -> &RingBuffer<CpuSample> {
        &self.cpu
    }

    pub fn handle(&mut self, command: Command) {
        let Self {
            memory, cpu, state, ..
        } = self;

        match (*state, command) {
            (State::Terminated, _) => {}
            (State::Running, Command::Quit) => {
                info!("quitting");
                *state = State::Terminated;
            }
            (State::Running, Command::Reset) => {
                info!("resetting history");
                memory.reset();
                cpu.reset();
            }
        }
    }

    /// samples every metric, and redraws the dashboard.
    ///
    /// collector failures are recovered from here: the affected section shows `N/A` instead. if
    /// memory cannot be read, nothing is appended or drawn besides an error line. only a failure to
    /// draw is returned.
    pub fn tick(&mut self, now: Instant, target: &mut impl Target) -> Result<(), Error> {
        target.clear()?;

        let sample = match self.collector.memory() {
            Ok(sample) => sample,
            Err(error) => {
                warn!(%error, "skipping tick, memory statistics unavailable");
                panels::error(target, &error)?;
                target.flush()?;
                return Ok(());
            }
        };
        self.memory.push(sample.clone());

        let readings = self.collect(now);
        if let Some(cpu) = readings.cpu {
            self.cpu.push(cpu);
        }
        debug!(
            ram = sample.ram_percentage,
            cpu = readings.cpu.map(|cpu| cpu.percentage),
            history = self.memory.count(),
            "sampled"
        );

        self.draw(target, &sample, &readings)?;
        target.flush()?;

        Ok(())
    }

    fn collect(&mut self, now: Instant) -> Readings {
        let Self {
            collector,
            temperature,
            network,
            ..
        } = self;

        let cpu = collector
            .cpu()
            .unwrap_or_else(|error| not_available("cpu", error));
        let temperature = temperature.get(now, || collector.temperature());
        let processes = collector
            .processes()
            .map(Some)
            .unwrap_or_else(|error| not_available("processes", error));
        let network = match collector.network() {
            Ok(counters) => {
                network.update(counters, now);
                true
            }
            Err(error) => {
                not_available::<()>("network", error);
                false
            }
        };
        let disk = collector
            .disk()
            .map(Some)
            .unwrap_or_else(|error| not_available("disk", error));
        let system = collector
            .system()
            .map(Some)
            .unwrap_or_else(|error| not_available("system", error));

        Readings {
            cpu,
            temperature,
            processes,
            network,
            disk,
            system,
        }
    }

    fn draw(
        &self,
        target: &mut impl Target,
        sample: &MemorySample,
        readings: &Readings,
    ) -> Result<(), Error> {
        let Self {
            config,
            memory,
            cpu,
            network,
            ..
        } = self;
        let Readings {
            cpu: cpu_now,
            temperature,
            processes,
            network: network_ok,
            disk,
            system,
        } = readings;

        let Size { rows, cols } = target.size();
        let footer = rows.checked_sub(FOOTER_ROWS);
        let fits = |last_row: usize| last_row < footer.unwrap_or(rows);

        if fits(panels::HEADER_LAST) {
            panels::header(target)?;
        }
        if fits(panels::SUMMARY_LAST) {
            panels::ram(target, sample)?;
            panels::temperature(target, *temperature)?;
            panels::cpu(target, cpu_now.as_ref())?;
            panels::processes(target, processes.as_ref(), config.process_width)?;
        }
        if fits(panels::NETWORK_LAST) {
            let network = network_ok.then_some(network);
            panels::network(target, network, config.network_width)?;
        }
        if fits(panels::DISK_LAST) {
            panels::disk(target, disk.as_ref(), config.disk_width)?;
        }
        if fits(panels::SWAP_LAST) {
            panels::swap(target, sample, config.swap_width)?;
        }

        let height = config.graph_height;
        if fits(GRAPH_TOP + height) {
            let (left, width) = panels::equalizer_area(cols);
            let values = extract(memory, width).percentages();
            panels::equalizer(target, &values, GRAPH_TOP, left, height)?;

            let (left, width) = panels::histogram_area(cols);
            let values = extract(memory, width).percentages();
            panels::histogram(target, &values, GRAPH_TOP, left, height)?;
        }

        let heatmap_top = GRAPH_TOP + height + 3;
        if fits(heatmap_top) {
            let values = extract(cpu, config.heatmap_width).percentages();
            panels::heatmap(target, &values, heatmap_top)?;
        }

        if let Some(top) = footer {
            panels::system(target, system.as_ref(), top)?;
            panels::help(target, rows - 1)?;
        }

        Ok(())
    }
}

/// logs a collector failure, standing in for the missing reading.
fn not_available<T>(metric: &'static str, error: CollectError) -> Option<T> {
    warn!(metric, %error, "metric not available");
    None
}

/// runs the dashboard until it is told to quit.
///
/// the loop only ends early if the target or the controls fail.
pub fn run<C: Collector>(
    dashboard: &mut Dashboard<C>,
    target: &mut impl Target,
    controls: &mut impl Controls,
    clock: &impl Clock,
) -> Result<(), Error> {
    info!(
        interval = ?dashboard.config.tick_interval(),
        capacity = dashboard.memory.capacity(),
        "starting dashboard"
    );

    while dashboard.state() == State::Running {
        dashboard.tick(clock.now(), target)?;

        if let Some(command) = controls.poll().map_err(Error::Input)? {
            dashboard.handle(command);
        }
        if dashboard.state() == State::Terminated {
            break;
        }

        clock.sleep(dashboard.config.tick_interval());
    }

    Ok(())
}
