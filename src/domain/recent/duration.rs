//! Lookback duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::InvalidDurationError;

/// Default lookback window for recent files (5 minutes)
pub const DEFAULT_LOOKBACK_MINUTES: u64 = 5;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;

/// Fraction digits beyond this are ignored; keeps the scale inside a u128.
const MAX_FRACTION_DIGITS: u32 = 18;

/// Value object representing how far back to look for recent files.
/// Immutable, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    nanos: u64,
}

impl Duration {
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            nanos: secs * NANOS_PER_SEC,
        }
    }

    /// Create a Duration from minutes
    pub const fn from_mins(mins: u64) -> Self {
        Self {
            nanos: mins * NANOS_PER_MIN,
        }
    }

    /// Default lookback (5 minutes)
    pub const fn default_lookback() -> Self {
        Self::from_mins(DEFAULT_LOOKBACK_MINUTES)
    }

    /// Get duration in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.nanos / NANOS_PER_SEC
    }

    /// Get duration in whole minutes
    pub const fn as_mins(&self) -> u64 {
        self.nanos / NANOS_PER_MIN
    }

    /// Get duration in nanoseconds
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_nanos(self.nanos)
    }

    /// Parse a lookback expression.
    ///
    /// - `""` yields the default (5 minutes)
    /// - a bare integer is a number of minutes and must not be negative
    /// - anything else is a compound expression such as `30s`, `2h30m`, `1.5h`
    pub fn parse_lookback(input: &str) -> Result<Self, InvalidDurationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default_lookback());
        }

        if let Ok(minutes) = trimmed.parse::<i64>() {
            if minutes < 0 {
                return Err(InvalidDurationError::new(input, "negative duration"));
            }
            let nanos = (minutes as u64)
                .checked_mul(NANOS_PER_MIN)
                .ok_or_else(|| InvalidDurationError::new(input, "duration too large"))?;
            return Ok(Self { nanos });
        }

        parse_compound(input, trimmed)
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse `[+-]<number><unit>[<number><unit>...]`
fn parse_compound(raw: &str, s: &str) -> Result<Duration, InvalidDurationError> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(InvalidDurationError::new(raw, "missing value"));
    }

    let mut total: u128 = 0;
    let mut rest = body;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let int_part = &rest[..int_len];
        rest = &rest[int_len..];

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            frac_part = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(InvalidDurationError::new(raw, "expected a number"));
        }

        let unit_len = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.')
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        if unit.is_empty() {
            return Err(InvalidDurationError::new(raw, "missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| {
            InvalidDurationError::new(raw, format!("unknown unit \"{}\"", unit))
        })? as u128;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| InvalidDurationError::new(raw, "duration too large"))?
        };

        let too_large = || InvalidDurationError::new(raw, "duration too large");

        let mut component = whole.checked_mul(scale).ok_or_else(too_large)?;

        if !frac_part.is_empty() {
            let digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS as usize)];
            let numerator: u128 = digits
                .parse()
                .map_err(|_| InvalidDurationError::new(raw, "invalid fraction"))?;
            let denominator = 10u128.pow(digits.len() as u32);
            let fraction = numerator.checked_mul(scale).ok_or_else(too_large)? / denominator;
            component = component.checked_add(fraction).ok_or_else(too_large)?;
        }

        total = total.checked_add(component).ok_or_else(too_large)?;
        if total > u64::MAX as u128 {
            return Err(too_large());
        }
    }

    if negative && total > 0 {
        return Err(InvalidDurationError::new(raw, "negative duration"));
    }

    Ok(Duration {
        nanos: total as u64,
    })
}

impl FromStr for Duration {
    type Err = InvalidDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lookback(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return write!(f, "0s");
        }

        let hours = self.nanos / NANOS_PER_HOUR;
        let minutes = (self.nanos % NANOS_PER_HOUR) / NANOS_PER_MIN;
        let seconds = (self.nanos % NANOS_PER_MIN) / NANOS_PER_SEC;
        let millis = (self.nanos % NANOS_PER_SEC) / NANOS_PER_MILLI;

        let mut out = String::new();
        if hours > 0 {
            out.push_str(&format!("{}h", hours));
        }
        if minutes > 0 {
            out.push_str(&format!("{}m", minutes));
        }
        if seconds > 0 {
            out.push_str(&format!("{}s", seconds));
        }
        if millis > 0 {
            out.push_str(&format!("{}ms", millis));
        }
        if out.is_empty() {
            out.push_str(&format!("{}ns", self.nanos));
        }
        write!(f, "{}", out)
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_lookback()
    }
}
