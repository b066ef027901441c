//! Parsers for the textual timestamp and step forms used in plans.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a timestamp in RFC 3339, `%Y-%m-%dT%H:%M:%S`, `%Y-%m-%d %H:%M:%S`
/// or date-only `%Y-%m-%d` form (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::default()))
        })
}

/// Parse a signed step like `"1w"`, `"-3d"`, `"+90m"` or `"3600"`.
///
/// Supported suffixes: `s`, `m`, `h`, `d`, `w`. No suffix means seconds.
/// Returns `None` for malformed input or values outside chrono's range;
/// a zero step parses successfully and is rejected later by validation.
pub fn parse_step(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => (-1_i64, rest),
        None => (1_i64, value.strip_prefix('+').unwrap_or(value)),
    };

    let (digits, unit) = match rest.chars().last() {
        Some(last) if last.is_ascii_alphabetic() => {
            (&rest[..rest.len() - last.len_utf8()], unit_seconds(last)?)
        }
        Some(_) => (rest, 1),
        None => return None,
    };

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let amount: i64 = digits.parse().ok()?;
    let seconds = amount.checked_mul(unit)?.checked_mul(sign)?;
    Duration::try_seconds(seconds)
}

fn unit_seconds(unit: char) -> Option<i64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        'w' => Some(604_800),
        _ => None,
    }
}
