//! Diesel-backed adapter for the credit ledger and booking port.
//!
//! `book` and `cancel` each run as a single PostgreSQL transaction so the
//! credit debit, the booking row, and the seat counter always move together.
//! Races that slip past the service's precondition reads are caught here by
//! the schema itself: the guarded capacity update matches no row once the
//! last seat is gone, and the unique index on `(user_id, course_id)` rejects
//! a concurrent duplicate booking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{BookingStatus, BookingView, Course, CourseId, UNKNOWN_COACH_NAME, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{CourseRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{course_bookings, courses, credit_purchases, users};

/// Failure modes inside the ledger transactions.
///
/// Returning one of the typed variants rolls the transaction back, exactly
/// like a Diesel error would.
#[derive(Debug)]
enum TxError {
    CourseMissing,
    AlreadyBooked,
    CapacityExhausted,
    NoUsableCredit,
    NotBooked,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<TxError> for BookingRepositoryError {
    fn from(error: TxError) -> Self {
        match error {
            TxError::CourseMissing => Self::CourseMissing,
            TxError::AlreadyBooked => Self::AlreadyBooked,
            TxError::CapacityExhausted => Self::CapacityExhausted,
            TxError::NoUsableCredit => Self::NoUsableCredit,
            TxError::NotBooked => Self::NotBooked,
            TxError::Diesel(inner) => map_diesel_error(inner),
        }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

/// PostgreSQL adapter for [`BookingRepository`].
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<Course>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = courses::table
            .find(Uuid::from(course_id))
            .select(CourseRow::as_select())
            .first::<CourseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            Course::try_from(row)
                .map_err(|error| BookingRepositoryError::query(error.to_string()))
        })
        .transpose()
    }

    async fn has_active_booking(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = course_bookings::table
            .filter(
                course_bookings::user_id
                    .eq(Uuid::from(user_id))
                    .and(course_bookings::course_id.eq(Uuid::from(course_id))),
            )
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count > 0)
    }

    async fn total_credit(&self, user_id: UserId) -> Result<i64, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: Option<i64> = credit_purchases::table
            .filter(credit_purchases::user_id.eq(Uuid::from(user_id)))
            .select(diesel::dsl::sum(credit_purchases::purchased_credits))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(total.unwrap_or(0))
    }

    async fn book(
        &self,
        user_id: UserId,
        course_id: CourseId,
        booking_at: DateTime<Utc>,
    ) -> Result<(), BookingRepositoryError> {
        let user_uuid = Uuid::from(user_id);
        let course_uuid = Uuid::from(course_id);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                // Guarded decrement: matching zero rows means the course is
                // either gone or out of seats.
                let seats_taken = diesel::update(
                    courses::table.filter(
                        courses::id
                            .eq(course_uuid)
                            .and(courses::remaining_capacity.gt(0)),
                    ),
                )
                .set(courses::remaining_capacity.eq(courses::remaining_capacity - 1))
                .execute(conn)
                .await?;
                if seats_taken == 0 {
                    let known: i64 = courses::table
                        .find(course_uuid)
                        .count()
                        .get_result(conn)
                        .await?;
                    return Err(if known == 0 {
                        TxError::CourseMissing
                    } else {
                        TxError::CapacityExhausted
                    });
                }

                // Debit the oldest purchase that still has usable credit.
                let purchase_id = credit_purchases::table
                    .filter(
                        credit_purchases::user_id
                            .eq(user_uuid)
                            .and(credit_purchases::purchased_credits.gt(0)),
                    )
                    .order(credit_purchases::purchase_at.asc())
                    .select(credit_purchases::id)
                    .for_update()
                    .first::<Uuid>(conn)
                    .await
                    .optional()?
                    .ok_or(TxError::NoUsableCredit)?;
                diesel::update(credit_purchases::table.find(purchase_id))
                    .set(
                        credit_purchases::purchased_credits
                            .eq(credit_purchases::purchased_credits - 1),
                    )
                    .execute(conn)
                    .await?;

                diesel::insert_into(course_bookings::table)
                    .values(NewBookingRow {
                        id: Uuid::new_v4(),
                        user_id: user_uuid,
                        course_id: course_uuid,
                        status: BookingStatus::Booked.as_str(),
                        booking_at,
                    })
                    .execute(conn)
                    .await
                    .map_err(|error| {
                        if is_unique_violation(&error) {
                            TxError::AlreadyBooked
                        } else {
                            TxError::Diesel(error)
                        }
                    })?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(BookingRepositoryError::from)
    }

    async fn cancel(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<(), BookingRepositoryError> {
        let user_uuid = Uuid::from(user_id);
        let course_uuid = Uuid::from(course_id);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let deleted = diesel::delete(
                    course_bookings::table.filter(
                        course_bookings::user_id
                            .eq(user_uuid)
                            .and(course_bookings::course_id.eq(course_uuid)),
                    ),
                )
                .execute(conn)
                .await?;
                if deleted == 0 {
                    return Err(TxError::NotBooked);
                }

                // Restore one credit to the oldest purchase, regardless of
                // which record the original debit hit. A user with a booking
                // always has at least one purchase row; if it has somehow
                // vanished the cancellation still stands, minus the refund.
                let oldest_purchase = credit_purchases::table
                    .filter(credit_purchases::user_id.eq(user_uuid))
                    .order(credit_purchases::purchase_at.asc())
                    .select(credit_purchases::id)
                    .for_update()
                    .first::<Uuid>(conn)
                    .await
                    .optional()?;
                match oldest_purchase {
                    Some(purchase_id) => {
                        diesel::update(credit_purchases::table.find(purchase_id))
                            .set(
                                credit_purchases::purchased_credits
                                    .eq(credit_purchases::purchased_credits + 1),
                            )
                            .execute(conn)
                            .await?;
                    }
                    None => {
                        warn!(user_id = %user_uuid, "no purchase row to restore credit to");
                    }
                }

                diesel::update(courses::table.find(course_uuid))
                    .set(courses::remaining_capacity.eq(courses::remaining_capacity + 1))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(BookingRepositoryError::from)
    }

    async fn list_booking_views(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookingView>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = course_bookings::table
            .inner_join(courses::table.left_join(users::table))
            .filter(course_bookings::user_id.eq(Uuid::from(user_id)))
            .order(course_bookings::booking_at.asc())
            .select((
                courses::id,
                courses::name,
                users::name.nullable(),
                course_bookings::status,
                courses::start_at,
                courses::end_at,
                courses::meeting_url,
            ))
            .load::<BookingViewRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(booking_view_from_row).collect()
    }
}

/// Tuple shape of one joined summary row.
type BookingViewRow = (
    Uuid,
    String,
    Option<String>,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
    Option<String>,
);

fn booking_view_from_row(row: BookingViewRow) -> Result<BookingView, BookingRepositoryError> {
    let (course_id, course_name, coach_name, status, start_at, end_at, meeting_url) = row;
    let status = status
        .parse::<BookingStatus>()
        .map_err(|error| BookingRepositoryError::query(error.to_string()))?;
    Ok(BookingView {
        course_id: CourseId::from_uuid(course_id),
        course_name,
        coach_name: coach_name.unwrap_or_else(|| UNKNOWN_COACH_NAME.to_owned()),
        status,
        start_at,
        end_at,
        meeting_url,
    })
}
