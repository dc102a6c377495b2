//! Coach and course catalogue service.
//!
//! Implements the [`Catalogue`] driving port over the user and course
//! repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    Catalogue, CoachDetailPayload, CoachPageRequest, CoachPayload, CoursePayload,
    CourseRepository, CourseRepositoryError, CreateCourseRequest, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Course, CourseDraft, CourseId, Error, Role, UNKNOWN_COACH_NAME, UserId};

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail => {
            Error::conflict("email address is already registered")
        }
    }
}

fn map_course_repository_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::CourseMissing => Error::not_found("course not found"),
    }
}

/// Catalogue service implementing the [`Catalogue`] driving port.
#[derive(Clone)]
pub struct CatalogueService<U, C> {
    user_repo: Arc<U>,
    course_repo: Arc<C>,
}

impl<U, C> CatalogueService<U, C> {
    /// Create a new catalogue service with the user and course repositories.
    pub fn new(user_repo: Arc<U>, course_repo: Arc<C>) -> Self {
        Self {
            user_repo,
            course_repo,
        }
    }
}

#[async_trait]
impl<U, C> Catalogue for CatalogueService<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    async fn list_coaches(
        &self,
        request: CoachPageRequest,
    ) -> Result<Vec<CoachPayload>, Error> {
        if request.page < 1 || request.per < 1 {
            return Err(Error::invalid_request(
                "page and per must be positive integers",
            ));
        }

        let coaches = self
            .user_repo
            .list_coaches(request.page, request.per)
            .await
            .map_err(map_user_repository_error)?;
        Ok(coaches
            .into_iter()
            .map(|coach| CoachPayload {
                id: coach.id,
                name: coach.name,
            })
            .collect())
    }

    async fn coach_detail(&self, coach_id: UserId) -> Result<CoachDetailPayload, Error> {
        let user = self
            .user_repo
            .find_by_id(coach_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("coach not found"))?;
        // Accounts without the coach role are invisible here.
        if user.role != Role::Coach {
            return Err(Error::not_found("coach not found"));
        }

        Ok(CoachDetailPayload {
            id: user.id,
            name: user.name.into(),
            role: user.role,
        })
    }

    async fn list_courses(&self) -> Result<Vec<CoursePayload>, Error> {
        let courses = self
            .course_repo
            .list_courses()
            .await
            .map_err(map_course_repository_error)?;
        Ok(courses
            .into_iter()
            .map(|item| CoursePayload {
                id: item.course.id(),
                name: item.course.name().to_owned(),
                coach_name: item
                    .coach_name
                    .unwrap_or_else(|| UNKNOWN_COACH_NAME.to_owned()),
                description: item.course.description().map(ToOwned::to_owned),
                start_at: item.course.start_at(),
                end_at: item.course.end_at(),
                meeting_url: item.course.meeting_url().map(ToOwned::to_owned),
                remaining_capacity: item.course.remaining_capacity(),
            })
            .collect())
    }

    async fn create_course(&self, request: CreateCourseRequest) -> Result<CourseId, Error> {
        let course = Course::new(CourseDraft {
            id: CourseId::random(),
            coach_id: Some(request.coach_id),
            name: request.name,
            description: request.description,
            start_at: request.start_at,
            end_at: request.end_at,
            meeting_url: request.meeting_url,
            remaining_capacity: request.max_participants,
        })
        .map_err(|err| Error::invalid_request(format!("invalid course: {err}")))?;
        let course_id = course.id();

        self.course_repo
            .insert_course(course)
            .await
            .map_err(map_course_repository_error)?;

        info!(course_id = %course_id, "course created");
        Ok(course_id)
    }

    async fn update_course(
        &self,
        course_id: CourseId,
        request: CreateCourseRequest,
    ) -> Result<(), Error> {
        // The capacity field only validates the draft; edits never touch
        // remaining seats, which belong to the booking ledger.
        let course = Course::new(CourseDraft {
            id: course_id,
            coach_id: Some(request.coach_id),
            name: request.name,
            description: request.description,
            start_at: request.start_at,
            end_at: request.end_at,
            meeting_url: request.meeting_url,
            remaining_capacity: request.max_participants,
        })
        .map_err(|err| Error::invalid_request(format!("invalid course: {err}")))?;

        self.course_repo
            .update_course(course)
            .await
            .map_err(map_course_repository_error)?;

        info!(course_id = %course_id, "course updated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
