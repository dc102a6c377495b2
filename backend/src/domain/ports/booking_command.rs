//! Driving port for booking mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CourseId, Error, UserId};

/// Request to book a course for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// Request to cancel an active booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// Driving port for booking write operations.
///
/// Both operations succeed with no payload; failures carry one of the
/// booking error kinds (`NotFound`, `Conflict`, `CapacityExceeded`,
/// `InsufficientCredit`) or a storage failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Book a seat on a course, consuming one credit.
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<(), Error>;

    /// Cancel an active booking, restoring one credit and one seat.
    async fn cancel_booking(&self, request: CancelBookingRequest) -> Result<(), Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingCommand;

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn create_booking(&self, _request: CreateBookingRequest) -> Result<(), Error> {
        Ok(())
    }

    async fn cancel_booking(&self, _request: CancelBookingRequest) -> Result<(), Error> {
        Ok(())
    }
}
