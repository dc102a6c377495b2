//! Driving port for the coach and course catalogue.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CourseId, Error, Role, UserId};

/// One row of the paginated coach listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachPayload {
    pub id: UserId,
    pub name: String,
}

/// Page selection for the coach listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachPageRequest {
    pub page: i64,
    pub per: i64,
}

impl Default for CoachPageRequest {
    fn default() -> Self {
        Self { page: 1, per: 5 }
    }
}

/// Public details of a single coach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachDetailPayload {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// One row of the public course listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub id: CourseId,
    pub name: String,
    pub coach_name: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<String>,
    pub remaining_capacity: i32,
}

/// Request to create a course on behalf of a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub coach_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<String>,
    pub max_participants: i32,
}

/// Driving port for catalogue reads and coach-side course creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalogue: Send + Sync {
    /// Page through registered coaches.
    async fn list_coaches(&self, request: CoachPageRequest)
    -> Result<Vec<CoachPayload>, Error>;

    /// Fetch one coach's public details.
    async fn coach_detail(&self, coach_id: UserId) -> Result<CoachDetailPayload, Error>;

    /// List all courses with their coach names.
    async fn list_courses(&self) -> Result<Vec<CoursePayload>, Error>;

    /// Create a new course.
    async fn create_course(&self, request: CreateCourseRequest) -> Result<CourseId, Error>;

    /// Replace the editable fields of an existing course. Remaining
    /// capacity is ledger state and is never touched by an edit.
    async fn update_course(
        &self,
        course_id: CourseId,
        request: CreateCourseRequest,
    ) -> Result<(), Error>;
}

/// Fixture implementation for tests that do not exercise the catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogue;

#[async_trait]
impl Catalogue for FixtureCatalogue {
    async fn list_coaches(
        &self,
        _request: CoachPageRequest,
    ) -> Result<Vec<CoachPayload>, Error> {
        Ok(Vec::new())
    }

    async fn coach_detail(&self, _coach_id: UserId) -> Result<CoachDetailPayload, Error> {
        Err(Error::not_found("coach not found"))
    }

    async fn list_courses(&self) -> Result<Vec<CoursePayload>, Error> {
        Ok(Vec::new())
    }

    async fn create_course(&self, _request: CreateCourseRequest) -> Result<CourseId, Error> {
        Ok(CourseId::random())
    }

    async fn update_course(
        &self,
        _course_id: CourseId,
        _request: CreateCourseRequest,
    ) -> Result<(), Error> {
        Err(Error::not_found("course not found"))
    }
}
