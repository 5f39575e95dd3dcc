//! Booking constants and parameter checks shared by intake and generation.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Session length written by the generator unless overridden.
pub const DEFAULT_SESSION_DURATION_MINUTES: i32 = 60;

/// Shortest session an administrator may book.
pub const MIN_SESSION_DURATION_MINUTES: i32 = 15;

/// Longest session an administrator may book.
pub const MAX_SESSION_DURATION_MINUTES: i32 = 480;

/// Validate an administratively supplied session duration.
pub fn validate_duration(minutes: i32) -> Result<(), CoreError> {
    if !(MIN_SESSION_DURATION_MINUTES..=MAX_SESSION_DURATION_MINUTES).contains(&minutes) {
        return Err(CoreError::Validation(format!(
            "Session duration must be between {MIN_SESSION_DURATION_MINUTES} and \
             {MAX_SESSION_DURATION_MINUTES} minutes, got {minutes}"
        )));
    }
    Ok(())
}

/// Longest accepted customer name.
pub const MAX_CUSTOMER_NAME_LENGTH: usize = 200;

/// Validate a customer display name: non-empty, within length limit.
pub fn validate_customer_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Customer name must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_CUSTOMER_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Customer name exceeds maximum length of {MAX_CUSTOMER_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Structural email check: one `@` with non-empty local part and a dotted
/// domain. Deliverability is the mail system's problem, not ours.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let trimmed = email.trim();
    let invalid = || CoreError::Validation(format!("Invalid email address: '{email}'"));

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}

/// Reject start dates already in the past relative to `today`.
///
/// `today` is passed in rather than read from the clock so validation stays
/// deterministic under test.
pub fn validate_start_date(start_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if start_date < today {
        return Err(CoreError::Validation(format!(
            "Start date {start_date} is in the past"
        )));
    }
    Ok(())
}
