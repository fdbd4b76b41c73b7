//! Diagnostic helpers for a node-health monitoring agent: where to start
//! scanning logs after boot, and which operating system the node runs.

pub mod config;
pub mod error;
pub mod platform;
pub mod release;
pub mod scan;

pub use error::{DurationField, Error, Result};
pub use release::os_version;
pub use scan::start_time;
