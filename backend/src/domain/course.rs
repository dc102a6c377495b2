//! Course listings and their capacity semantics.

use chrono::{DateTime, Utc};

use crate::domain::{CourseId, UserId};

/// Validation errors returned by [`Course::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    #[error("course name must not be empty")]
    EmptyName,
    #[error("end_at must be after start_at")]
    InvertedSchedule,
    #[error("remaining capacity must not be negative")]
    NegativeCapacity,
}

/// Input payload for [`Course::new`].
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub id: CourseId,
    pub coach_id: Option<UserId>,
    pub name: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<String>,
    pub remaining_capacity: i32,
}

/// A bookable course with remaining-seats capacity.
///
/// `remaining_capacity` counts open seats: it is decremented when a booking
/// is created and incremented when one is cancelled, never mutated anywhere
/// else.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: CourseId,
    coach_id: Option<UserId>,
    name: String,
    description: Option<String>,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    meeting_url: Option<String>,
    remaining_capacity: i32,
}

impl Course {
    /// Creates a validated course.
    pub fn new(draft: CourseDraft) -> Result<Self, CourseValidationError> {
        if draft.name.trim().is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        if draft.end_at <= draft.start_at {
            return Err(CourseValidationError::InvertedSchedule);
        }
        if draft.remaining_capacity < 0 {
            return Err(CourseValidationError::NegativeCapacity);
        }
        Ok(Self {
            id: draft.id,
            coach_id: draft.coach_id,
            name: draft.name,
            description: draft.description,
            start_at: draft.start_at,
            end_at: draft.end_at,
            meeting_url: draft.meeting_url,
            remaining_capacity: draft.remaining_capacity,
        })
    }

    /// Returns the course id.
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Returns the assigned coach, if any.
    pub fn coach_id(&self) -> Option<&UserId> {
        self.coach_id.as_ref()
    }

    /// Returns the course name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the course description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the schedule start.
    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    /// Returns the schedule end.
    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }

    /// Returns the meeting location URL.
    pub fn meeting_url(&self) -> Option<&str> {
        self.meeting_url.as_deref()
    }

    /// Returns the number of open seats.
    pub fn remaining_capacity(&self) -> i32 {
        self.remaining_capacity
    }

    /// Whether at least one seat is open.
    pub fn has_open_seats(&self) -> bool {
        self.remaining_capacity > 0
    }
}
