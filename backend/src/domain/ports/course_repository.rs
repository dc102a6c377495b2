//! Driven port for course catalogue reads and coach-side writes.

use async_trait::async_trait;

use crate::domain::{Course, CourseId};

/// Errors raised by course repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseRepositoryError {
    /// Repository connection could not be established.
    #[error("course repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("course repository query failed: {message}")]
    Query { message: String },
    /// No course matched the given id.
    #[error("course does not exist")]
    CourseMissing,
}

impl CourseRepositoryError {
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

/// One row of the public course listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseListItem {
    pub course: Course,
    pub coach_name: Option<String>,
}

/// Port for course catalogue persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses joined with coach names, ordered by start time.
    async fn list_courses(&self) -> Result<Vec<CourseListItem>, CourseRepositoryError>;

    /// Persist a new course.
    async fn insert_course(&self, course: Course) -> Result<(), CourseRepositoryError>;

    /// Replace the editable fields of an existing course.
    async fn update_course(&self, course: Course) -> Result<(), CourseRepositoryError>;

    /// Find a course by id.
    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<Course>, CourseRepositoryError>;
}

/// Fixture implementation for tests that do not exercise course persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn list_courses(&self) -> Result<Vec<CourseListItem>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_course(&self, _course: Course) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn update_course(&self, _course: Course) -> Result<(), CourseRepositoryError> {
        Err(CourseRepositoryError::CourseMissing)
    }

    async fn find_course(
        &self,
        _course_id: CourseId,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }
}
