//! Transactional commit for one-shot session generation.
//!
//! The idempotency discipline is "check flag, create sessions, set flag" as
//! a single unit: the order row is locked with `SELECT ... FOR UPDATE`, the
//! `sessions_generated` flag is re-checked under the lock, and every write
//! (assignments, sessions, the flag itself) happens in the same transaction.
//! Two concurrent generation calls for one order cannot both commit.

use sqlx::PgPool;

use impulsa_core::booking::DEFAULT_SESSION_DURATION_MINUTES;
use impulsa_core::status::SessionStatus;
use impulsa_core::types::{DbId, Timestamp};

use crate::models::assignment::Assignment;
use crate::models::session::Session;
use crate::repositories::AssignmentRepo;

/// One validated recurrence stream ready to be persisted.
#[derive(Debug, Clone)]
pub struct PlannedTrack {
    /// Payload label, e.g. `tutoring` or `therapy`.
    pub label: String,
    pub service_id: DbId,
    pub employee_id: DbId,
    /// Computed timestamps in strictly increasing date order.
    pub occurrences: Vec<Timestamp>,
}

/// A persisted track: its assignment plus the created sessions.
#[derive(Debug)]
pub struct CommittedTrack {
    pub label: String,
    pub assignment: Assignment,
    pub sessions: Vec<Session>,
}

/// Outcome of a commit attempt.
#[derive(Debug)]
pub enum CommitResult {
    /// All tracks written, flag set.
    Committed(Vec<CommittedTrack>),
    /// The flag was already set when the row lock was taken — nothing
    /// written. The caller reports this as a conflict.
    AlreadyGenerated,
}

const SESSION_COLUMNS: &str = "\
    id, assignment_id, scheduled_at, duration_minutes, status, \
    notes, employee_notes, created_at, updated_at";

pub struct GenerationRepo;

impl GenerationRepo {
    /// Atomically persist every planned track for an order and flip the
    /// order to generated/confirmed.
    ///
    /// Returns `RowNotFound` if the order vanished between validation and
    /// commit.
    pub async fn commit(
        pool: &PgPool,
        order_id: DbId,
        customer_id: DbId,
        tracks: &[PlannedTrack],
    ) -> Result<CommitResult, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let already_generated: bool =
            sqlx::query_scalar("SELECT sessions_generated FROM orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;

        if already_generated {
            tx.rollback().await?;
            return Ok(CommitResult::AlreadyGenerated);
        }

        let mut committed = Vec::with_capacity(tracks.len());
        for track in tracks {
            let assignment = AssignmentRepo::find_or_create_in_tx(
                &mut tx,
                customer_id,
                track.employee_id,
                track.service_id,
                Some(&format!("Created by session generation for order #{order_id}")),
            )
            .await?;

            let total = track.occurrences.len();
            let mut sessions = Vec::with_capacity(total);
            let insert = format!(
                "INSERT INTO sessions (assignment_id, scheduled_at, duration_minutes, status, notes) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING {SESSION_COLUMNS}"
            );
            for (index, scheduled_at) in track.occurrences.iter().enumerate() {
                let session = sqlx::query_as::<_, Session>(&insert)
                    .bind(assignment.id)
                    .bind(scheduled_at)
                    .bind(DEFAULT_SESSION_DURATION_MINUTES)
                    .bind(SessionStatus::Scheduled.as_str())
                    .bind(format!("Session {} of {}", index + 1, total))
                    .fetch_one(&mut *tx)
                    .await?;
                sessions.push(session);
            }

            committed.push(CommittedTrack {
                label: track.label.clone(),
                assignment,
                sessions,
            });
        }

        sqlx::query(
            "UPDATE orders \
             SET sessions_generated = TRUE, status = 'confirmed', updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            order_id,
            tracks = committed.len(),
            sessions = committed.iter().map(|t| t.sessions.len()).sum::<usize>(),
            "Sessions generated",
        );

        Ok(CommitResult::Committed(committed))
    }
}
