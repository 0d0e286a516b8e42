//! Parsing of "since" date expressions.
//!
//! Accepts absolute dates (`2024-01-15`, RFC 3339 timestamps) and a small
//! set of natural-language forms relative to a reference time:
//! `today`, `yesterday`, `last week`, `3 days ago`, `an hour ago`,
//! `past 2 weeks`.

use chrono::{DateTime, Months, NaiveDate, TimeDelta, Utc};
use lazy_regex::regex_captures;
use thiserror::Error;

/// Default look-back window when no expression is configured.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unrecognized date expression: {0:?}")]
pub struct SinceError(pub String);

/// Resolve `expr` to a point in time, relative to `now` where needed.
pub fn parse_since(expr: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, SinceError> {
    let normalized = expr.trim().to_ascii_lowercase();
    let text = normalized.as_str();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(expr.trim()) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    match text {
        "now" => return Ok(now),
        "today" => return Ok(start_of_day(now.date_naive())),
        "yesterday" => return Ok(start_of_day(now.date_naive()) - TimeDelta::days(1)),
        _ => {}
    }

    let relative = regex_captures!(r"^(?:(\d+|an?)\s+([a-z]+?)s?\s+ago)$", text)
        .map(|(_, amount, unit)| (amount, unit))
        .or_else(|| {
            regex_captures!(r"^(?:last|past)\s+(?:(\d+)\s+)?([a-z]+?)s?$", text)
                .map(|(_, amount, unit)| (amount, unit))
        });

    let Some((amount, unit)) = relative else {
        return Err(SinceError(expr.to_string()));
    };
    let amount = match amount {
        "" | "a" | "an" => 1,
        digits => digits
            .parse::<u32>()
            .map_err(|_| SinceError(expr.to_string()))?,
    };

    subtract(now, amount, unit).ok_or_else(|| SinceError(expr.to_string()))
}

/// Default "since": exactly seven days before `now`.
pub fn default_since(now: DateTime<Utc>) -> DateTime<Utc> {
    now - TimeDelta::days(DEFAULT_LOOKBACK_DAYS)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn subtract(now: DateTime<Utc>, amount: u32, unit: &str) -> Option<DateTime<Utc>> {
    let amount_i64 = i64::from(amount);
    match unit {
        "minute" | "min" => now.checked_sub_signed(TimeDelta::try_minutes(amount_i64)?),
        "hour" => now.checked_sub_signed(TimeDelta::try_hours(amount_i64)?),
        "day" => now.checked_sub_signed(TimeDelta::try_days(amount_i64)?),
        "week" => now.checked_sub_signed(TimeDelta::try_weeks(amount_i64)?),
        "month" => now.checked_sub_months(Months::new(amount)),
        "year" => now.checked_sub_months(Months::new(amount.checked_mul(12)?)),
        _ => None,
    }
}
