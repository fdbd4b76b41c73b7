//! Host probes: uptime and release-file resolution.
//!
//! Paths are always passed in so agents running in a container can point
//! at a mounted host filesystem.

use chrono::TimeDelta;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::release::{DEFAULT_OS_RELEASE_PATH, FALLBACK_OS_RELEASE_PATH};

/// Kernel uptime file; the first field is seconds since boot.
pub const DEFAULT_UPTIME_PATH: &str = "/proc/uptime";

fn parse_uptime(path: &Path, contents: &str) -> Result<TimeDelta> {
    let malformed = || Error::MalformedUptime {
        path: path.to_path_buf(),
        contents: contents.to_string(),
    };

    let secs: f64 = contents
        .split_whitespace()
        .next()
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(malformed());
    }

    let whole = secs.trunc() as i64;
    let nanos = ((secs - secs.trunc()) * 1e9).round() as i64;
    let whole = TimeDelta::try_seconds(whole).ok_or_else(malformed)?;
    Ok(whole + TimeDelta::nanoseconds(nanos))
}

/// Time elapsed since the host booted, read from a `/proc/uptime` style file.
pub fn uptime<P: AsRef<Path>>(path: P) -> Result<TimeDelta> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    parse_uptime(path, &contents)
}

/// Resolve the release file to read.
///
/// Priority order:
/// 1. Explicit override
/// 2. `/etc/os-release` if present
/// 3. `/usr/lib/os-release` if present
/// 4. `/etc/os-release` (so the read error names the conventional path)
pub fn os_release_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }

    let primary = Path::new(DEFAULT_OS_RELEASE_PATH);
    if primary.exists() {
        return primary.to_path_buf();
    }

    let fallback = Path::new(FALLBACK_OS_RELEASE_PATH);
    if fallback.exists() {
        debug!(path = %fallback.display(), "Using fallback release file");
        return fallback.to_path_buf();
    }

    primary.to_path_buf()
}
