//! dashboard configuration.
//!
//! configuration is read once at startup from a toml file. every field is optional, anything left
//! out keeps its default.

use {
    serde::{Deserialize, Serialize},
    std::{
        env, fs, io,
        path::{Path, PathBuf},
        time::Duration,
    },
    tracing::{debug, info},
};

/// the environment variable naming a configuration file to use instead of the default one.
pub const CONFIG_ENV: &str = "RINGMON_CONFIG";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// how many memory samples the history holds.
    pub memory_capacity: usize,
    /// how many cpu samples the history holds.
    pub cpu_capacity: usize,
    /// how many cpu samples the heatmap shows.
    pub heatmap_width: usize,
    /// the number of rows in the ram graphs.
    pub graph_height: usize,
    pub tick_interval_ms: u64,
    /// how often the temperature sensor is consulted.
    pub temperature_interval_secs: u64,
    pub swap_width: usize,
    pub disk_width: usize,
    pub network_width: usize,
    pub process_width: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

// === impl Config ===

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_capacity: 60,
            cpu_capacity: 60,
            heatmap_width: 12,
            graph_height: 10,
            tick_interval_ms: 1000,
            temperature_interval_secs: 30,
            swap_width: 40,
            disk_width: 32,
            network_width: 30,
            process_width: 18,
        }
    }
}

impl Config {
    /// loads the configuration from `$RINGMON_CONFIG`, or the user's configuration directory.
    ///
    /// a missing file is not an error, the defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let Some(path) = explicit.clone().or_else(Self::default_path) else {
            info!("no configuration directory, using defaults");
            return Ok(Self::default());
        };

        match Self::load_from(&path) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == io::ErrorKind::NotFound && explicit.is_none() =>
            {
                info!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            loaded => loaded,
        }
    }

    /// loads and validates the configuration file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = toml::from_str::<Self>(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// `<config dir>/ringmon/config.toml`, if there is a configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ringmon").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            memory_capacity,
            cpu_capacity,
            graph_height,
            tick_interval_ms,
            ..
        } = self;

        if *memory_capacity == 0 || *cpu_capacity == 0 {
            return Err(ConfigError::Invalid("history capacities must be at least 1"));
        }
        if *tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("the tick interval must be at least 1ms"));
        }
        if *graph_height == 0 {
            return Err(ConfigError::Invalid("graphs must be at least 1 row tall"));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn temperature_interval(&self) -> Duration {
        Duration::from_secs(self.temperature_interval_secs)
    }
}
