//! Completion-progress math for client dashboards and audits.
//!
//! Progress is computed across a client's entire session history, not per
//! assignment: a client with tutoring and therapy running in parallel sees
//! one combined figure.

/// Completion percentage in [0.0, 100.0]. Zero total yields 0.0.
pub fn percent(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Display rounding: one decimal place.
pub fn round_display(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// API rounding: nearest whole percent.
pub fn round_whole(value: f64) -> i64 {
    value.round() as i64
}
