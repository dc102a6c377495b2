//! Driven port for the credit ledger and booking persistence.
//!
//! The engine performs its ordered precondition reads through this port and
//! then commits through `book`/`cancel`, which adapters must execute as one
//! transaction. Races that slip past the precondition reads (a last seat
//! taken concurrently, a duplicate booking inserted concurrently) surface as
//! the typed variants below so the service can report the same error kinds
//! the precondition checks would have produced.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BookingView, Course, CourseId, UserId};

/// Errors raised by booking repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRepositoryError {
    /// Repository connection could not be established.
    #[error("booking repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("booking repository query failed: {message}")]
    Query { message: String },
    /// The course row vanished between the precondition read and the commit.
    #[error("course does not exist")]
    CourseMissing,
    /// An active booking already exists for this user and course.
    #[error("an active booking already exists for this user and course")]
    AlreadyBooked,
    /// The guarded capacity decrement matched no row with open seats.
    #[error("course has no remaining seats")]
    CapacityExhausted,
    /// No purchase record with a positive balance exists for the user.
    #[error("no purchase record with usable credit")]
    NoUsableCredit,
    /// No active booking exists for this user and course.
    #[error("no active booking for this user and course")]
    NotBooked,
}

impl BookingRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for booking reads and transactional ledger mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a course by id.
    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<Course>, BookingRepositoryError>;

    /// Whether an active booking exists for the pair.
    async fn has_active_booking(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, BookingRepositoryError>;

    /// Sum of `purchased_credits` across all of the user's purchases.
    async fn total_credit(&self, user_id: UserId) -> Result<i64, BookingRepositoryError>;

    /// Atomically debit one credit, insert the booking, and take one seat.
    ///
    /// The debit targets the oldest purchase record with a positive balance
    /// (created-at ascending). Implementations must roll back all three
    /// effects when any step fails.
    async fn book(
        &self,
        user_id: UserId,
        course_id: CourseId,
        booking_at: DateTime<Utc>,
    ) -> Result<(), BookingRepositoryError>;

    /// Atomically credit the oldest purchase record, delete the booking,
    /// and release one seat.
    ///
    /// Restoration targets the oldest purchase unconditionally, regardless
    /// of which record the original debit hit.
    async fn cancel(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<(), BookingRepositoryError>;

    /// The user's active bookings joined with course and coach details.
    async fn list_booking_views(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookingView>, BookingRepositoryError>;
}

/// Fixture implementation for tests that do not exercise booking persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingRepository;

#[async_trait]
impl BookingRepository for FixtureBookingRepository {
    async fn find_course(
        &self,
        _course_id: CourseId,
    ) -> Result<Option<Course>, BookingRepositoryError> {
        Ok(None)
    }

    async fn has_active_booking(
        &self,
        _user_id: UserId,
        _course_id: CourseId,
    ) -> Result<bool, BookingRepositoryError> {
        Ok(false)
    }

    async fn total_credit(&self, _user_id: UserId) -> Result<i64, BookingRepositoryError> {
        Ok(0)
    }

    async fn book(
        &self,
        _user_id: UserId,
        _course_id: CourseId,
        _booking_at: DateTime<Utc>,
    ) -> Result<(), BookingRepositoryError> {
        Err(BookingRepositoryError::CourseMissing)
    }

    async fn cancel(
        &self,
        _user_id: UserId,
        _course_id: CourseId,
    ) -> Result<(), BookingRepositoryError> {
        Err(BookingRepositoryError::NotBooked)
    }

    async fn list_booking_views(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<BookingView>, BookingRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_empty_state() {
        let repo = FixtureBookingRepository;
        let user = UserId::random();
        assert_eq!(repo.find_course(CourseId::random()).await, Ok(None));
        assert_eq!(repo.total_credit(user).await, Ok(0));
        assert!(
            repo.list_booking_views(user)
                .await
                .expect("fixture list succeeds")
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_mutations_fail_with_typed_errors() {
        let repo = FixtureBookingRepository;
        let user = UserId::random();
        let course = CourseId::random();
        assert_eq!(
            repo.book(user, course, chrono::Utc::now()).await,
            Err(BookingRepositoryError::CourseMissing)
        );
        assert_eq!(
            repo.cancel(user, course).await,
            Err(BookingRepositoryError::NotBooked)
        );
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = BookingRepositoryError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
