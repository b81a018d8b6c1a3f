use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use people_engine::{
    EngineError, FetchSettings, HttpPeopleSource, PeopleSource, SimulatedPeopleSource,
    SimulatedSettings,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "people_list.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub log_destination: LogDestination,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceConfig {
    Simulated {
        page_size: usize,
        total_people: usize,
        overlap: usize,
        latency_ms: u64,
        fail_every: Option<u32>,
    },
    Http {
        base_url: String,
        request_timeout_ms: u64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        let settings = SimulatedSettings::default();
        SourceConfig::Simulated {
            page_size: settings.page_size,
            total_people: settings.total_people,
            overlap: settings.overlap,
            latency_ms: u64::try_from(settings.latency.as_millis()).unwrap_or(u64::MAX),
            fail_every: Some(5),
        }
    }
}

impl AppConfig {
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }
}

impl SourceConfig {
    pub fn build(&self) -> Result<Arc<dyn PeopleSource>, EngineError> {
        match self {
            SourceConfig::Simulated {
                page_size,
                total_people,
                overlap,
                latency_ms,
                fail_every,
            } => Ok(Arc::new(SimulatedPeopleSource::new(SimulatedSettings {
                total_people: *total_people,
                page_size: *page_size,
                overlap: *overlap,
                latency: Duration::from_millis(*latency_ms),
                fail_every: *fail_every,
            }))),
            SourceConfig::Http {
                base_url,
                request_timeout_ms,
            } => Ok(Arc::new(HttpPeopleSource::new(FetchSettings {
                base_url: base_url.clone(),
                request_timeout: Duration::from_millis(*request_timeout_ms),
                ..FetchSettings::default()
            })?)),
        }
    }
}

/// Loads the app config. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
