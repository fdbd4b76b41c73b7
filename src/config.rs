use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::path::PathBuf;

use crate::error::DurationField;
use crate::platform::{self, DEFAULT_UPTIME_PATH};
use crate::release;
use crate::scan::{self, parse_duration};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub host: HostConfig,
}

/// Log-scan window flags. Empty strings mean "not set".
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScanConfig {
    /// How far into the past to start scanning, e.g. "10m"
    #[serde(default)]
    pub lookback: String,
    /// Grace period after boot before logs are considered, e.g. "30s"
    #[serde(default)]
    pub delay: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HostConfig {
    /// Optional release file override (e.g. a host mount inside a container)
    pub os_release_path: Option<PathBuf>,
    /// Optional uptime file override
    pub uptime_path: Option<PathBuf>,
}

impl ScanConfig {
    /// Validate that both duration flags parse
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            (DurationField::Lookback, &self.lookback),
            (DurationField::Delay, &self.delay),
        ] {
            if value.is_empty() {
                continue;
            }
            parse_duration(value)
                .with_context(|| format!("Invalid scan.{} '{}'", field, value))?;
        }
        Ok(())
    }
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()?;
        Ok(())
    }

    pub fn os_release_path(&self) -> PathBuf {
        platform::os_release_path(self.host.os_release_path.as_deref())
    }

    pub fn uptime_path(&self) -> PathBuf {
        self.host
            .uptime_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPTIME_PATH))
    }

    /// Start time for a log watcher using the configured lookback and delay.
    pub fn scan_start_time(
        &self,
        now: DateTime<Utc>,
        uptime: TimeDelta,
    ) -> crate::Result<DateTime<Utc>> {
        scan::start_time(now, uptime, &self.scan.lookback, &self.scan.delay)
    }

    pub fn os_version(&self) -> crate::Result<String> {
        release::os_version(self.os_release_path())
    }

    pub fn uptime(&self) -> crate::Result<TimeDelta> {
        platform::uptime(self.uptime_path())
    }
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;

    config.validate()?;
    Ok(config)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
