//! Log-scan window helpers.

pub mod duration;
pub mod start_time;

pub use duration::{ParseDurationError, format_duration, parse_duration};
pub use start_time::start_time;
