//! Session and order status value sets.
//!
//! Statuses are stored as lowercase text columns, so each enum carries its
//! database string form. Session transitions are deliberately permissive:
//! the only default check is membership in the known value set, matching the
//! system's historical behavior. A strict transition graph is available
//! behind an opt-in configuration flag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of one scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Scheduled,
        SessionStatus::Confirmed,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
        SessionStatus::NoShow,
    ];

    /// Database string form.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no_show",
        }
    }

    /// Statuses reachable from `self` under the strict transition graph.
    ///
    /// Completed, cancelled, and no-show are terminal in strict mode.
    pub fn strict_transitions(self) -> &'static [SessionStatus] {
        match self {
            SessionStatus::Scheduled => &[
                SessionStatus::Confirmed,
                SessionStatus::Cancelled,
                SessionStatus::NoShow,
            ],
            SessionStatus::Confirmed => &[
                SessionStatus::Completed,
                SessionStatus::Cancelled,
                SessionStatus::NoShow,
            ],
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::NoShow => &[],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "confirmed" => Ok(SessionStatus::Confirmed),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            "no_show" => Ok(SessionStatus::NoShow),
            other => Err(CoreError::Validation(format!(
                "Unknown session status: '{other}'"
            ))),
        }
    }
}

/// Validate a session status write.
///
/// In permissive mode (the default) any known status may replace any other;
/// strict mode additionally enforces [`SessionStatus::strict_transitions`].
pub fn validate_session_transition(
    from: SessionStatus,
    to: SessionStatus,
    strict: bool,
) -> Result<(), CoreError> {
    if strict && !from.strict_transitions().contains(&to) {
        return Err(CoreError::Conflict(format!(
            "Invalid session transition: {from} -> {to}"
        )));
    }
    Ok(())
}

/// Lifecycle status of a service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Database string form.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown order status: '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -----------------------------------------------------------------------
    // Round-tripping
    // -----------------------------------------------------------------------

    #[test]
    fn session_status_round_trips() {
        for status in SessionStatus::ALL {
            assert_eq!(status.as_str().parse::<SessionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_session_status_rejected() {
        assert_matches!(
            "postponed".parse::<SessionStatus>(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unknown_order_status_rejected() {
        assert_matches!(
            "archived".parse::<OrderStatus>(),
            Err(CoreError::Validation(_))
        );
    }

    // -----------------------------------------------------------------------
    // Permissive mode: anything goes between known statuses
    // -----------------------------------------------------------------------

    #[test]
    fn permissive_allows_completed_back_to_scheduled() {
        assert!(validate_session_transition(
            SessionStatus::Completed,
            SessionStatus::Scheduled,
            false
        )
        .is_ok());
    }

    #[test]
    fn permissive_allows_any_pair() {
        for from in SessionStatus::ALL {
            for to in SessionStatus::ALL {
                assert!(validate_session_transition(from, to, false).is_ok());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Strict mode
    // -----------------------------------------------------------------------

    #[test]
    fn strict_scheduled_to_confirmed() {
        assert!(validate_session_transition(
            SessionStatus::Scheduled,
            SessionStatus::Confirmed,
            true
        )
        .is_ok());
    }

    #[test]
    fn strict_confirmed_to_completed() {
        assert!(validate_session_transition(
            SessionStatus::Confirmed,
            SessionStatus::Completed,
            true
        )
        .is_ok());
    }

    #[test]
    fn strict_scheduled_to_completed_rejected() {
        assert_matches!(
            validate_session_transition(SessionStatus::Scheduled, SessionStatus::Completed, true),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn strict_completed_is_terminal() {
        assert!(SessionStatus::Completed.strict_transitions().is_empty());
    }

    #[test]
    fn strict_cancelled_is_terminal() {
        assert!(SessionStatus::Cancelled.strict_transitions().is_empty());
    }

    #[test]
    fn strict_no_show_is_terminal() {
        assert!(SessionStatus::NoShow.strict_transitions().is_empty());
    }
}
