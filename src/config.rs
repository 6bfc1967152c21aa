//! Startup configuration.
//!
//! Read once from `<config dir>/EggTimer/config.json`, or from the path in
//! `EGG_TIMER_CONFIG`. A missing file means defaults.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::DIR_NAME;

const FILE_NAME: &str = "config.json";
const PATH_VAR: &str = "EGG_TIMER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("tick_rate must be at least 1")]
    InvalidTickRate,
    #[error("egg shape needs a > 0 and b > d >= 0, got a={a} b={b} d={d}")]
    InvalidShape { a: f64, b: f64, d: f64 },
}

/// Parameters of the egg curve.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EggShape {
    pub a: f64,
    pub b: f64,
    pub d: f64,
}

impl Default for EggShape {
    fn default() -> Self {
        Self {
            a: 110.0,
            b: 150.0,
            d: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Pre-filled into the input box at startup.
    pub default_seconds: Option<f32>,
    /// Ring the terminal bell when the egg is done.
    pub bell: bool,
    pub egg: EggShape,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: 25,
            default_seconds: None,
            bell: true,
            egg: EggShape::default(),
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        let dirs = BaseDirs::new()?;
        Some(dirs.config_dir().join(DIR_NAME).join(FILE_NAME))
    }

    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };

        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidTickRate);
        }

        let EggShape { a, b, d } = self.egg;
        let finite = a.is_finite() && b.is_finite() && d.is_finite();
        if !finite || a <= 0.0 || d < 0.0 || b <= d {
            return Err(ConfigError::InvalidShape { a, b, d });
        }
        Ok(())
    }

    /// Text the input box starts with.
    pub fn initial_input(&self) -> String {
        self.default_seconds
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| (secs + 0.0).to_string())
            .unwrap_or_default()
    }
}
