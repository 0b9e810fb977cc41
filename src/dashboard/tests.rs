use {
    super::*,
    crate::{
        band::Band,
        collect::NetCounters,
        source::MockClock,
        terminal::Canvas,
    },
    std::{collections::VecDeque, io, time::Duration},
};

/// a collector that plays back canned readings.
///
/// memory readings are consumed one per tick, and fail once they run out. the other metrics
/// return the same reading every tick, or fail if there is none.
#[derive(Default)]
struct Scripted {
    memory: VecDeque<Result<MemorySample, CollectError>>,
    cpu: VecDeque<CpuSample>,
    temperature: Option<f64>,
    temperature_calls: usize,
    processes: Option<ProcessCounts>,
    network: Option<NetCounters>,
    disk: Option<DiskSample>,
    system: Option<SystemInfo>,
}

impl Scripted {
    /// a collector yielding one memory sample per percentage, and nothing else.
    fn ram(percentages: impl IntoIterator<Item = f64>) -> Self {
        Self {
            memory: percentages.into_iter().map(|p| Ok(ram(p))).collect(),
            ..Self::default()
        }
    }

    /// a collector where every metric is available.
    fn healthy(ticks: usize) -> Self {
        Self {
            memory: (0..ticks).map(|_| Ok(ram(50.0))).collect(),
            cpu: (0..ticks).map(|_| cpu(25.0)).collect(),
            temperature: Some(41.5),
            processes: Some(ProcessCounts {
                system: 10,
                user: 40,
                background: 200,
                total: 250,
            }),
            network: Some(NetCounters::default()),
            disk: Some(DiskSample::new(1000, 250)),
            system: Some(SystemInfo {
                cpus: 8,
                uptime: Duration::from_secs(5400),
            }),
            ..Self::default()
        }
    }
}

impl Collector for Scripted {
    fn memory(&mut self) -> Result<MemorySample, CollectError> {
        self.memory
            .pop_front()
            .unwrap_or(Err(CollectError::Unavailable("memory")))
    }

    fn cpu(&mut self) -> Result<Option<CpuSample>, CollectError> {
        Ok(self.cpu.pop_front())
    }

    fn disk(&mut self) -> Result<DiskSample, CollectError> {
        self.disk.ok_or(CollectError::Unavailable("disk"))
    }

    fn network(&mut self) -> Result<NetCounters, CollectError> {
        self.network.ok_or(CollectError::Unavailable("network"))
    }

    fn processes(&mut self) -> Result<ProcessCounts, CollectError> {
        self.processes.ok_or(CollectError::Unavailable("processes"))
    }

    fn temperature(&mut self) -> Result<f64, CollectError> {
        self.temperature_calls += 1;
        self.temperature.ok_or(CollectError::Unavailable("temperature"))
    }

    fn system(&mut self) -> Result<SystemInfo, CollectError> {
        self.system.ok_or(CollectError::Unavailable("system"))
    }
}

/// controls that issue one scripted command (or none) per tick.
struct ScriptedControls(VecDeque<Option<Command>>);

impl Controls for ScriptedControls {
    fn poll(&mut self) -> io::Result<Option<Command>> {
        Ok(self.0.pop_front().flatten())
    }
}

/// a target whose writes all fail.
struct Broken(Canvas);

impl Target for Broken {
    fn size(&self) -> Size {
        self.0.size()
    }

    fn supports_color(&self) -> bool {
        true
    }

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write_text(&mut self, _: usize, _: usize, _: &str, _: Option<Band>) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away"))
    }

    fn write_cell(&mut self, _: usize, _: usize, _: char, _: Option<Band>) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn ram(ram_percentage: f64) -> MemorySample {
    MemorySample {
        total: 1 << 30,
        ram_percentage,
        ..MemorySample::default()
    }
}

fn cpu(percentage: f64) -> CpuSample {
    CpuSample {
        percentage,
        cpus: 8,
        elapsed: Duration::from_secs(1),
    }
}

fn dashboard(collector: Scripted) -> Dashboard<Scripted> {
    Dashboard::new(collector, Config::default()).unwrap()
}

/// a target large enough for every section.
fn canvas() -> Canvas {
    Canvas::new(50, 120)
}

fn percentages(memory: &RingBuffer<MemorySample>, width: usize) -> Vec<f64> {
    extract(memory, width).percentages()
}

#[test]
fn oldest_samples_are_evicted() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::ram((0..65).map(f64::from)));
    let mut canvas = canvas();

    for _ in 0..65 {
        dashboard.tick(clock.now(), &mut canvas).unwrap();
    }

    let expected = (5..65).map(f64::from).collect::<Vec<_>>();
    assert_eq!(dashboard.memory().count(), 60);
    assert_eq!(percentages(dashboard.memory(), 60), expected);
}

#[test]
fn equalizer_shows_the_newest_samples() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::ram([100.0, 0.0, 100.0]));
    let mut canvas = canvas();

    for _ in 0..3 {
        dashboard.tick(clock.now(), &mut canvas).unwrap();
    }

    let bottom = GRAPH_TOP + dashboard.config().graph_height - 1;
    let (left, _) = panels::equalizer_area(120);
    assert_eq!(canvas.glyph(bottom, left), Some('█'));
    assert_eq!(canvas.glyph(bottom, left + 1), Some(' '));
    assert_eq!(canvas.glyph(bottom, left + 2), Some('█'));
    assert_eq!(canvas.band(bottom, left), Some(Band::Critical));
    assert!(canvas.contains("RAM history (equalizer, 3 samples):"));
    assert!(canvas.contains("RAM histogram (%):"));
}

#[test]
fn monochrome_targets_get_plain_glyphs() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::ram([100.0]));
    let mut canvas = Canvas::monochrome(50, 120);

    dashboard.tick(clock.now(), &mut canvas).unwrap();

    let bottom = GRAPH_TOP + dashboard.config().graph_height - 1;
    let (left, _) = panels::equalizer_area(120);
    assert_eq!(canvas.glyph(bottom, left), Some('█'));
    assert_eq!(canvas.band(bottom, left), None);
}

#[test]
fn reset_clears_both_histories() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::healthy(4));
    let mut canvas = canvas();

    for _ in 0..3 {
        dashboard.tick(clock.now(), &mut canvas).unwrap();
    }
    assert_eq!(dashboard.memory().count(), 3);
    assert_eq!(dashboard.cpu().count(), 3);

    dashboard.handle(Command::Reset);
    assert_eq!(dashboard.state(), State::Running);
    assert!(dashboard.memory().is_empty());
    assert!(dashboard.cpu().is_empty());
    assert!(extract(dashboard.memory(), 60).is_empty());

    dashboard.tick(clock.now(), &mut canvas).unwrap();
    assert_eq!(dashboard.memory().count(), 1);
    assert_eq!(dashboard.cpu().count(), 1);
}

#[test]
fn quit_is_absorbing() {
    let mut dashboard = dashboard(Scripted::ram([10.0]));
    dashboard.handle(Command::Quit);
    assert_eq!(dashboard.state(), State::Terminated);
    dashboard.handle(Command::Reset);
    assert_eq!(dashboard.state(), State::Terminated);
}

#[test]
fn memory_failure_skips_the_tick() {
    let clock = MockClock::default();
    let mut collector = Scripted::ram([10.0, 30.0]);
    collector
        .memory
        .insert(1, Err(CollectError::Unavailable("memory")));
    let mut dashboard = dashboard(collector);
    let mut canvas = canvas();

    dashboard.tick(clock.now(), &mut canvas).unwrap();
    dashboard.tick(clock.now(), &mut canvas).unwrap();
    assert_eq!(dashboard.memory().count(), 1);
    assert!(canvas.contains("failed to read memory statistics"));
    assert!(!canvas.contains("RAM:"));
    assert_eq!(canvas.flushes(), 2);

    dashboard.tick(clock.now(), &mut canvas).unwrap();
    assert_eq!(percentages(dashboard.memory(), 60), [10.0, 30.0]);
    assert!(!canvas.contains("failed to read memory statistics"));
}

#[test]
fn missing_metrics_are_not_available() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::ram([10.0]));
    let mut canvas = canvas();

    dashboard.tick(clock.now(), &mut canvas).unwrap();

    // temperature, cpu usage, and processes.
    assert!(canvas.line(4).contains(panels::NOT_AVAILABLE));
    assert!(canvas.line(7).contains(panels::NOT_AVAILABLE));
    // network and disk.
    assert_eq!(canvas.line(12), "  N/A");
    assert_eq!(canvas.line(16), "  N/A");
    // the heatmap and system information.
    assert!(canvas.contains("CPU heatmap (last 0 samples):"));
    assert!(canvas.contains("cpus: N/A"));
    assert!(canvas.contains("uptime: N/A"));
}

#[test]
fn available_metrics_are_drawn() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::healthy(1));
    let mut canvas = canvas();

    dashboard.tick(clock.now(), &mut canvas).unwrap();

    assert!(canvas.contains("41.5°C"));
    assert!(canvas.contains("25.0% of 8 cpus"));
    assert!(canvas.contains("total:       250"));
    assert!(canvas.contains(" 75% ("));
    assert!(canvas.contains("0.00 Mb/s"));
    assert!(canvas.contains("cpus: 8"));
    assert!(canvas.contains("uptime: 1.50 hours"));
    assert!(canvas.contains("CPU heatmap (last 1 samples):"));
    assert!(canvas.contains("[ ]"));
    assert!(canvas.contains("press 'q' to quit"));
}

#[test]
fn temperature_is_throttled() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::healthy(40));
    let mut canvas = canvas();

    for _ in 0..40 {
        dashboard.tick(clock.now(), &mut canvas).unwrap();
        clock.advance(Duration::from_secs(1));
    }

    // at 0s, and again once more than 30s have passed.
    assert_eq!(dashboard.collector().temperature_calls, 2);
    assert!(canvas.contains("41.5°C"));
}

#[test]
fn small_targets_skip_what_does_not_fit() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::ram([10.0, 20.0]));

    let mut small = Canvas::new(30, 120);
    dashboard.tick(clock.now(), &mut small).unwrap();
    assert!(small.contains("swap:"));
    assert!(!small.contains("RAM histogram"));
    assert!(!small.contains("CPU heatmap"));
    assert!(small.contains("press 'q' to quit"));

    let mut tiny = Canvas::new(3, 120);
    dashboard.tick(clock.now(), &mut tiny).unwrap();
    assert!(tiny.contains("=== RINGMON ==="));
    assert!(!tiny.contains("press 'q' to quit"));
    assert_eq!(dashboard.memory().count(), 2);
}

#[test]
fn render_failure_is_fatal() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::ram([10.0]));
    let mut target = Broken(canvas());

    let error = dashboard.tick(clock.now(), &mut target).unwrap_err();
    assert!(matches!(error, Error::Render(_)), "{error}");
}

#[test]
fn run_until_quit() {
    let clock = MockClock::default();
    let start = clock.now();
    let mut dashboard = dashboard(Scripted::ram([10.0, 20.0, 30.0, 40.0]));
    let mut canvas = canvas();
    let mut controls =
        ScriptedControls([None, Some(Command::Reset), None, Some(Command::Quit)].into());

    run(&mut dashboard, &mut canvas, &mut controls, &clock).unwrap();

    assert_eq!(dashboard.state(), State::Terminated);
    assert_eq!(canvas.flushes(), 4);
    assert_eq!(percentages(dashboard.memory(), 60), [30.0, 40.0]);
    assert_eq!(clock.now() - start, Duration::from_secs(3));
}

#[test]
fn run_stops_on_render_failure() {
    let clock = MockClock::default();
    let mut dashboard = dashboard(Scripted::ram([10.0, 20.0]));
    let mut target = Broken(canvas());
    let mut controls = ScriptedControls(VecDeque::new());

    let result = run(&mut dashboard, &mut target, &mut controls, &clock);
    assert!(matches!(result, Err(Error::Render(_))));
    assert_eq!(dashboard.state(), State::Running);
}

#[test]
fn zero_capacity_is_rejected() {
    let config = Config {
        memory_capacity: 0,
        ..Config::default()
    };
    assert_eq!(
        Dashboard::new(Scripted::default(), config).err(),
        Some(HistoryError::ZeroCapacity)
    );
}
