//! a compact memory and cpu dashboard for the terminal.
//!
//! run with: `RINGMON_LOG=debug ringmon`, logs are written to the cache directory.

use {
    anyhow::{Context, Result},
    ringmon::{
        collect::HostCollector,
        config::Config,
        dashboard::{self, Dashboard},
        source::SystemClock,
        terminal::{Keyboard, Terminal},
    },
    std::{fs, path::PathBuf, sync::Mutex},
    tracing::info,
    tracing_subscriber::EnvFilter,
};

/// the environment variable controlling log verbosity.
const LOG_ENV: &str = "RINGMON_LOG";

fn main() -> Result<()> {
    let log = init_logging()?;
    info!(log = ?log, "ringmon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load().context("failed to load configuration")?;
    let mut dashboard = Dashboard::new(HostCollector::new(), config)?;

    // the terminal is restored as soon as it is dropped, before any error is printed.
    let result = {
        let mut terminal = Terminal::enter().context("failed to set up the terminal")?;
        dashboard::run(&mut dashboard, &mut terminal, &mut Keyboard, &SystemClock)
    };
    result?;

    info!("ringmon finished");
    Ok(())
}

/// logs to a file in the cache directory, since the dashboard owns the screen.
///
/// returns the log file's path, if logging could be set up.
fn init_logging() -> Result<Option<PathBuf>> {
    let Some(dir) = dirs::cache_dir().map(|dir| dir.join("ringmon")) else {
        return Ok(None);
    };
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join("ringmon.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(Some(path))
}
