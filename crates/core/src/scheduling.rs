//! Recurring session date computation.
//!
//! This module lives in `core` (zero internal deps) so the same algorithm
//! serves both the single-track generator and each track of a combined plan.
//! The output is pure calendar math; persistence happens in the `db` crate.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::CoreError;

/// Smallest number of sessions a plan may generate.
pub const MIN_SESSION_COUNT: u32 = 1;

/// Hard ceiling on sessions per track to prevent runaway plans.
pub const MAX_SESSION_COUNT: u32 = 50;

/// One weekly-recurrence stream: a start date, an ordered weekday rotation,
/// a time of day, and a session count.
///
/// `weekdays` is an ordered sequence, not a set. The rotation index cycles
/// through it in insertion order, and that order is part of the output
/// contract: `[Mon, Wed]` and `[Wed, Mon]` produce different calendars.
#[derive(Debug, Clone)]
pub struct RecurrenceSpec {
    pub start_date: NaiveDate,
    pub weekdays: Vec<Weekday>,
    pub time: NaiveTime,
    pub count: u32,
}

impl RecurrenceSpec {
    /// Plain weekly recurrence pinned to the start date's own weekday.
    ///
    /// Used by combined-plan tracks, which advance by exactly 7 days per
    /// session rather than rotating through a weekday list.
    pub fn weekly(start_date: NaiveDate, time: NaiveTime, count: u32) -> Self {
        Self {
            start_date,
            weekdays: vec![start_date.weekday()],
            time,
            count,
        }
    }
}

/// Compute the scheduled timestamps for one recurrence stream.
///
/// Maintains a cursor date (initially `start_date`) and a rotating index
/// into `weekdays`. Each iteration advances the cursor to the next
/// occurrence of the weekday at the rotation index:
///
/// - `days_ahead = (target - cursor.weekday()) mod 7`
/// - on the first iteration `days_ahead == 0` keeps the cursor where it is,
///   so the start date itself is eligible;
/// - on every later iteration a zero is forced to 7, so no two sessions can
///   land on the same calendar day.
///
/// Returns exactly `count` timestamps with strictly increasing dates, each
/// on a weekday present in `weekdays`, each at `time`.
pub fn plan_occurrences(spec: &RecurrenceSpec) -> Result<Vec<NaiveDateTime>, CoreError> {
    if spec.weekdays.is_empty() {
        return Err(CoreError::Validation(
            "At least one preferred weekday is required".to_string(),
        ));
    }
    if spec.count < MIN_SESSION_COUNT || spec.count > MAX_SESSION_COUNT {
        return Err(CoreError::Validation(format!(
            "Session count must be between {MIN_SESSION_COUNT} and {MAX_SESSION_COUNT}, got {}",
            spec.count
        )));
    }

    let mut occurrences = Vec::with_capacity(spec.count as usize);
    let mut cursor = spec.start_date;

    for i in 0..spec.count {
        let target = spec.weekdays[i as usize % spec.weekdays.len()];
        let mut days_ahead =
            (7 + target.num_days_from_monday() as i64 - cursor.weekday().num_days_from_monday() as i64) % 7;

        // The start date itself is eligible; afterwards a same-day hit must
        // roll a full week forward.
        if i > 0 && days_ahead == 0 {
            days_ahead = 7;
        }

        let next_date = cursor
            .checked_add_days(chrono::Days::new(days_ahead as u64))
            .ok_or_else(|| {
                CoreError::Internal(format!("Date overflow advancing from {cursor}"))
            })?;

        occurrences.push(next_date.and_time(spec.time));
        cursor = next_date;
    }

    Ok(occurrences)
}

/// Parse weekday tokens (`"monday"`, `"Wed"`, ...) preserving input order.
///
/// Rejects empty input, unknown tokens, and duplicates — a duplicate would
/// silently skew the rotation instead of surfacing the client's mistake.
pub fn parse_weekdays(tokens: &[String]) -> Result<Vec<Weekday>, CoreError> {
    if tokens.is_empty() {
        return Err(CoreError::Validation(
            "At least one preferred weekday is required".to_string(),
        ));
    }

    let mut weekdays = Vec::with_capacity(tokens.len());
    for token in tokens {
        let weekday: Weekday = token.trim().parse().map_err(|_| {
            CoreError::Validation(format!("Unknown weekday: '{token}'"))
        })?;
        if weekdays.contains(&weekday) {
            return Err(CoreError::Validation(format!(
                "Duplicate weekday: '{token}'"
            )));
        }
        weekdays.push(weekday);
    }
    Ok(weekdays)
}

/// Parse an `HH:MM` time-of-day string.
pub fn parse_time(value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| CoreError::Validation(format!("Invalid time (expected HH:MM): '{value}'")))
}

/// Parse an ISO `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("Invalid date (expected YYYY-MM-DD): '{value}'")))
}

/// English weekday name for API payloads ("Monday", ...).
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
