//! Booking engine service.
//!
//! Implements the booking driving ports over a [`BookingRepository`].
//! Preconditions are checked in a fixed order so callers always see the
//! first applicable failure, then the commit is delegated to the
//! repository's atomic `book`/`cancel` operations. A race that slips past
//! a precondition read resurfaces from the commit as the same error kind
//! the read would have produced.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError,
    CancelBookingRequest, CreateBookingRequest, GetBookingSummaryRequest,
    GetBookingSummaryResponse,
};
use crate::domain::{BookingSummary, Error};

fn map_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::CourseMissing => Error::not_found("course not found"),
        BookingRepositoryError::AlreadyBooked => {
            Error::conflict("an active booking already exists for this course")
        }
        BookingRepositoryError::CapacityExhausted => {
            Error::capacity_exceeded("course has no remaining seats")
        }
        BookingRepositoryError::NoUsableCredit => {
            Error::insufficient_credit("no usable credit remaining")
        }
        BookingRepositoryError::NotBooked => Error::not_found("booking not found"),
    }
}

/// Booking service implementing the command and query driving ports.
#[derive(Clone)]
pub struct BookingService<R> {
    booking_repo: Arc<R>,
}

impl<R> BookingService<R> {
    /// Create a new booking service with the booking repository.
    pub fn new(booking_repo: Arc<R>) -> Self {
        Self { booking_repo }
    }
}

#[async_trait]
impl<R> BookingCommand for BookingService<R>
where
    R: BookingRepository,
{
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<(), Error> {
        let course = self
            .booking_repo
            .find_course(request.course_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;

        if self
            .booking_repo
            .has_active_booking(request.user_id, request.course_id)
            .await
            .map_err(map_repository_error)?
        {
            return Err(Error::conflict(
                "an active booking already exists for this course",
            ));
        }

        if !course.has_open_seats() {
            return Err(Error::capacity_exceeded("course has no remaining seats"));
        }

        let total_credit = self
            .booking_repo
            .total_credit(request.user_id)
            .await
            .map_err(map_repository_error)?;
        if total_credit <= 0 {
            return Err(Error::insufficient_credit("no usable credit remaining"));
        }

        self.booking_repo
            .book(request.user_id, request.course_id, Utc::now())
            .await
            .map_err(map_repository_error)?;

        info!(
            user_id = %request.user_id,
            course_id = %request.course_id,
            "booking created"
        );
        Ok(())
    }

    async fn cancel_booking(&self, request: CancelBookingRequest) -> Result<(), Error> {
        self.booking_repo
            .find_course(request.course_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;

        self.booking_repo
            .cancel(request.user_id, request.course_id)
            .await
            .map_err(map_repository_error)?;

        info!(
            user_id = %request.user_id,
            course_id = %request.course_id,
            "booking cancelled"
        );
        Ok(())
    }
}

#[async_trait]
impl<R> BookingQuery for BookingService<R>
where
    R: BookingRepository,
{
    async fn booking_summary(
        &self,
        request: GetBookingSummaryRequest,
    ) -> Result<GetBookingSummaryResponse, Error> {
        let purchased = self
            .booking_repo
            .total_credit(request.user_id)
            .await
            .map_err(map_repository_error)?;

        let bookings = self
            .booking_repo
            .list_booking_views(request.user_id)
            .await
            .map_err(map_repository_error)?;

        // Remaining credit is derived, never stored: purchases minus one
        // credit per active booking.
        let credit_usage = bookings.len() as i64;
        let summary = BookingSummary {
            credit_remain: purchased - credit_usage,
            credit_usage,
            bookings,
        };
        Ok(summary.into())
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
