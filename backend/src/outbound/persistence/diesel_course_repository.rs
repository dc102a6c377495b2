//! Diesel-backed adapter for the course catalogue.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CourseListItem, CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CourseRow, CourseUpdate, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, users};

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    map_basic_pool_error(error, CourseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_basic_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

fn map_row(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    Course::try_from(row).map_err(|error| CourseRepositoryError::query(error.to_string()))
}

/// PostgreSQL adapter for [`CourseRepository`].
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list_courses(&self) -> Result<Vec<CourseListItem>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = courses::table
            .left_join(users::table)
            .order(courses::start_at.asc())
            .select((CourseRow::as_select(), users::name.nullable()))
            .load::<(CourseRow, Option<String>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(row, coach_name)| {
                map_row(row).map(|course| CourseListItem { course, coach_name })
            })
            .collect()
    }

    async fn insert_course(&self, course: Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(courses::table)
            .values(NewCourseRow {
                id: Uuid::from(course.id()),
                coach_id: course.coach_id().copied().map(Uuid::from),
                name: course.name(),
                description: course.description(),
                start_at: course.start_at(),
                end_at: course.end_at(),
                meeting_url: course.meeting_url(),
                remaining_capacity: course.remaining_capacity(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update_course(&self, course: Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(courses::table.find(Uuid::from(course.id())))
            .set(CourseUpdate {
                coach_id: course.coach_id().copied().map(Uuid::from),
                name: course.name(),
                description: course.description(),
                start_at: course.start_at(),
                end_at: course.end_at(),
                meeting_url: course.meeting_url(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(CourseRepositoryError::CourseMissing);
        }
        Ok(())
    }

    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = courses::table
            .find(Uuid::from(course_id))
            .select(CourseRow::as_select())
            .first::<CourseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(map_row).transpose()
    }
}
