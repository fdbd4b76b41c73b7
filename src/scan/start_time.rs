use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use super::duration::{format_duration, parse_duration};
use crate::error::{DurationField, Error, Result};

fn parse_field(field: DurationField, value: &str) -> Result<Option<TimeDelta>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_duration(value)
        .map(Some)
        .map_err(|source| Error::InvalidDurationFormat {
            field,
            value: value.to_string(),
            source,
        })
}

fn shift(at: DateTime<Utc>, by: TimeDelta) -> Result<DateTime<Utc>> {
    at.checked_add_signed(by).ok_or(Error::TimestampOutOfRange)
}

/// Compute where a log watcher should start scanning.
///
/// The boot time (`now - uptime`) is pushed forward by `delay` so logs from
/// the first moments after boot are skipped. The result is then kept no
/// earlier than `now - lookback`, or `now` itself when no lookback is given.
/// A delay longer than the uptime yields a start after `now`.
///
/// Empty strings mean "not set". Malformed values fail with
/// [`Error::InvalidDurationFormat`] naming the offending field.
pub fn start_time(
    now: DateTime<Utc>,
    uptime: TimeDelta,
    lookback: &str,
    delay: &str,
) -> Result<DateTime<Utc>> {
    let mut start = shift(now, -uptime)?;

    let delay = parse_field(DurationField::Delay, delay)?;
    if let Some(delay) = delay {
        start = shift(start, delay)?;
    }

    let lookback = parse_field(DurationField::Lookback, lookback)?;
    let lookback_start = match lookback {
        Some(lookback) => shift(now, -lookback)?,
        None => now,
    };

    let start = start.max(lookback_start);
    debug!(
        uptime = %format_duration(uptime),
        lookback = ?lookback.map(format_duration),
        delay = ?delay.map(format_duration),
        %start,
        "Resolved log scan start time"
    );
    Ok(start)
}
