//! Duration flag parsing and log-friendly formatting.
//!
//! Accepts the `<number><unit>` syntax agents use for lookback and delay
//! flags: `7s`, `1h30m`, `1.5h`, `300ms`, `-2m`.

use chrono::TimeDelta;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("empty duration")]
    Empty,
    #[error("expected a number")]
    InvalidNumber,
    #[error("missing unit")]
    MissingUnit,
    #[error("unknown unit {0:?}")]
    UnknownUnit(String),
    #[error("duration out of range")]
    Overflow,
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

// Largest magnitude representable as signed 64-bit nanoseconds (the negative end).
const MAX_MAGNITUDE: u128 = 1 << 63;

// Fraction digits past this scale are dropped.
const MAX_FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

struct Number {
    whole: u128,
    fraction: u128,
    scale: u128,
}

fn take_number(s: &str) -> Result<(Number, &str), ParseDurationError> {
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut whole: u128 = 0;
    for b in s[..int_len].bytes() {
        whole = whole * 10 + u128::from(b - b'0');
        if whole > MAX_MAGNITUDE {
            return Err(ParseDurationError::Overflow);
        }
    }

    let mut rest = &s[int_len..];
    let mut fraction: u128 = 0;
    let mut scale: u128 = 1;
    let mut frac_len = 0;
    if let Some(after_dot) = rest.strip_prefix('.') {
        frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
        for b in after_dot[..frac_len].bytes() {
            if scale < MAX_FRACTION_SCALE {
                fraction = fraction * 10 + u128::from(b - b'0');
                scale *= 10;
            }
        }
        rest = &after_dot[frac_len..];
    }

    if int_len == 0 && frac_len == 0 {
        return Err(ParseDurationError::InvalidNumber);
    }

    Ok((
        Number {
            whole,
            fraction,
            scale,
        },
        rest,
    ))
}

/// Parse a duration flag such as `"7s"` or `"1h30m"`.
///
/// A bare `"0"` is zero; every other term needs a unit.
pub fn parse_duration(s: &str) -> Result<TimeDelta, ParseDurationError> {
    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (number, after_number) = take_number(rest)?;

        let unit_len = after_number
            .bytes()
            .take_while(|b| *b != b'.' && !b.is_ascii_digit())
            .count();
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit);
        }
        let unit = &after_number[..unit_len];
        let nanos = unit_nanos(unit)
            .ok_or_else(|| ParseDurationError::UnknownUnit(unit.to_string()))?;

        total += number.whole * nanos + number.fraction * nanos / number.scale;
        if total > MAX_MAGNITUDE {
            return Err(ParseDurationError::Overflow);
        }
        rest = &after_number[unit_len..];
    }

    if total == MAX_MAGNITUDE && !negative {
        return Err(ParseDurationError::Overflow);
    }

    let signed = if negative {
        -(total as i128)
    } else {
        total as i128
    };
    Ok(TimeDelta::nanoseconds(signed as i64))
}

fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let width = unit.to_string().len() - 1;
    let digits = format!("{:0width$}", rem, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Render a delta for log output, e.g. `1h2m3s`, `1.5s`, `300ms`.
pub fn format_duration(d: TimeDelta) -> String {
    let nanos =
        i128::from(d.num_seconds()) * NANOS_PER_SEC as i128 + i128::from(d.subsec_nanos());
    if nanos == 0 {
        return "0s".to_string();
    }

    let sign = if nanos < 0 { "-" } else { "" };
    let u = nanos.unsigned_abs();

    let body = if u < 1_000 {
        format!("{}ns", u)
    } else if u < 1_000_000 {
        format!("{}µs", decimal(u, 1_000))
    } else if u < NANOS_PER_SEC {
        format!("{}ms", decimal(u, 1_000_000))
    } else {
        let hours = u / (3_600 * NANOS_PER_SEC);
        let mins = (u / (60 * NANOS_PER_SEC)) % 60;
        let secs = format!("{}s", decimal(u % (60 * NANOS_PER_SEC), NANOS_PER_SEC));
        if hours > 0 {
            format!("{}h{}m{}", hours, mins, secs)
        } else if mins > 0 {
            format!("{}m{}", mins, secs)
        } else {
            secs
        }
    };

    format!("{}{}", sign, body)
}
