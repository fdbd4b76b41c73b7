//! Operating-system version lookup from `os-release` style files.

pub mod parser;
pub mod version;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
pub use parser::{ReleaseRecord, parse_release};

/// Conventional location of the release-metadata file.
pub const DEFAULT_OS_RELEASE_PATH: &str = "/etc/os-release";

/// Vendor location used when `/etc/os-release` is absent.
pub const FALLBACK_OS_RELEASE_PATH: &str = "/usr/lib/os-release";

/// Read the release file at `path` and return e.g. `"ubuntu 16.04.6 LTS (Xenial Xerus)"`.
pub fn os_version<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let record = parse_release(&contents);
    let version = version::compose(&record).map_err(|reason| Error::UnrecognizedFormat {
        path: path.to_path_buf(),
        reason,
    })?;

    debug!(path = %path.display(), %version, "Read OS version");
    Ok(version)
}
