//! Course bookings and the per-user booking summary projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CourseId, UserId};

/// Sentinel coach name used when a course has no coach assigned.
pub const UNKNOWN_COACH_NAME: &str = "N/A";

/// Lifecycle status of a booking.
///
/// A booking is `Booked` while active; cancellation hard-deletes the record,
/// so no cancelled status is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Booked,
}

impl BookingStatus {
    /// Canonical storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = BookingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(Self::Booked),
            other => Err(BookingValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Validation errors for booking records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("unknown booking status: {0}")]
    UnknownStatus(String),
}

/// An active booking linking exactly one user to one course.
///
/// ## Invariants
/// - At most one active booking exists per `(user_id, course_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseBooking {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: BookingStatus,
    pub booking_at: DateTime<Utc>,
}

/// One row of the per-user booking summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub course_id: CourseId,
    pub course_name: String,
    pub coach_name: String,
    pub status: BookingStatus,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<String>,
}

/// Credit totals plus the caller's active bookings.
///
/// `credit_remain` is derived, never stored:
/// `sum(purchased_credits) - count(active bookings)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub credit_remain: i64,
    pub credit_usage: i64,
    pub bookings: Vec<BookingView>,
}
