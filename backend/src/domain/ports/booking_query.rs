//! Driving port for booking summary reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookingStatus, BookingSummary, BookingView, CourseId, Error, UserId};

/// Request for a user's booking summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBookingSummaryRequest {
    pub user_id: UserId,
}

/// Serializable projection of one active booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingViewPayload {
    pub course_id: CourseId,
    pub course_name: String,
    pub coach_name: String,
    pub status: BookingStatus,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<String>,
}

impl From<BookingView> for BookingViewPayload {
    fn from(value: BookingView) -> Self {
        Self {
            course_id: value.course_id,
            course_name: value.course_name,
            coach_name: value.coach_name,
            status: value.status,
            start_at: value.start_at,
            end_at: value.end_at,
            meeting_url: value.meeting_url,
        }
    }
}

/// Response carrying credit totals and active bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetBookingSummaryResponse {
    pub credit_remain: i64,
    pub credit_usage: i64,
    pub bookings: Vec<BookingViewPayload>,
}

impl From<BookingSummary> for GetBookingSummaryResponse {
    fn from(value: BookingSummary) -> Self {
        Self {
            credit_remain: value.credit_remain,
            credit_usage: value.credit_usage,
            bookings: value.bookings.into_iter().map(Into::into).collect(),
        }
    }
}

/// Driving port for booking read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Compute the caller's credit totals and list their active bookings.
    async fn booking_summary(
        &self,
        request: GetBookingSummaryRequest,
    ) -> Result<GetBookingSummaryResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingQuery;

#[async_trait]
impl BookingQuery for FixtureBookingQuery {
    async fn booking_summary(
        &self,
        _request: GetBookingSummaryRequest,
    ) -> Result<GetBookingSummaryResponse, Error> {
        Ok(GetBookingSummaryResponse {
            credit_remain: 0,
            credit_usage: 0,
            bookings: Vec::new(),
        })
    }
}
