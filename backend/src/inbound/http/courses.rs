//! Course catalogue and booking HTTP handlers.
//!
//! ```text
//! GET    /api/v1/courses
//! POST   /api/v1/courses/{courseId}
//! DELETE /api/v1/courses/{courseId}
//! POST   /api/v1/admin/coaches/courses
//! PUT    /api/v1/admin/coaches/courses/{courseId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Role;
use crate::domain::ports::{
    CancelBookingRequest, CoursePayload, CreateBookingRequest, CreateCourseRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_course_id, parse_rfc3339_timestamp, require_non_empty,
};

/// Request payload for coach-side course creation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequestBody {
    pub name: String,
    pub description: Option<String>,
    #[schema(format = "date-time")]
    pub start_at: String,
    #[schema(format = "date-time")]
    pub end_at: String,
    pub meeting_url: Option<String>,
    pub max_participants: i32,
}

/// Response payload for course creation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseResponseBody {
    pub id: crate::domain::CourseId,
}

/// List all courses with coach names and open seats.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "Course listing", body = Vec<CoursePayload>),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security(())
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CoursePayload>>> {
    let courses = state.catalogue.list_courses().await?;
    Ok(web::Json(courses))
}

/// Book a seat on a course, consuming one credit.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{courseId}",
    params(("courseId" = String, Path, format = "uuid")),
    responses(
        (status = 201, description = "Booking created"),
        (status = 400, description = "Invalid id or no usable credit",
            body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 404, description = "Course not found", body = crate::domain::Error),
        (status = 409, description = "Already booked or course full",
            body = crate::domain::Error),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["courses"],
    operation_id = "createBooking",
    security(("SessionCookie" = []))
)]
#[post("/courses/{courseId}")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let course_id = parse_course_id(&path.into_inner(), FieldName::new("courseId"))?;
    state
        .bookings
        .create_booking(CreateBookingRequest { user_id, course_id })
        .await?;
    Ok(HttpResponse::Created().finish())
}

/// Cancel an active booking, restoring one credit and one seat.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{courseId}",
    params(("courseId" = String, Path, format = "uuid")),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 404, description = "Course or booking not found",
            body = crate::domain::Error),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["courses"],
    operation_id = "cancelBooking",
    security(("SessionCookie" = []))
)]
#[delete("/courses/{courseId}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let course_id = parse_course_id(&path.into_inner(), FieldName::new("courseId"))?;
    state
        .bookings
        .cancel_booking(CancelBookingRequest { user_id, course_id })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Create a course for the authenticated coach.
#[utoipa::path(
    post,
    path = "/api/v1/admin/coaches/courses",
    request_body = CreateCourseRequestBody,
    responses(
        (status = 201, description = "Course created", body = CreateCourseResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 403, description = "Caller is not a coach", body = crate::domain::Error)
    ),
    tags = ["courses"],
    operation_id = "createCourse",
    security(("SessionCookie" = []))
)]
#[post("/admin/coaches/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCourseRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let role = state.accounts.role_of(user_id).await?;
    if !matches!(role, Role::Coach | Role::Admin) {
        return Err(crate::domain::Error::forbidden(
            "only coaches can create courses",
        ));
    }

    let body = payload.into_inner();
    let request = CreateCourseRequest {
        coach_id: user_id,
        name: require_non_empty(body.name, FieldName::new("name"))?,
        description: body.description,
        start_at: parse_rfc3339_timestamp(&body.start_at, FieldName::new("startAt"))?,
        end_at: parse_rfc3339_timestamp(&body.end_at, FieldName::new("endAt"))?,
        meeting_url: body.meeting_url,
        max_participants: body.max_participants,
    };
    let id = state.catalogue.create_course(request).await?;
    Ok(HttpResponse::Created().json(CreateCourseResponseBody { id }))
}

/// Edit a course owned by the authenticated coach.
#[utoipa::path(
    put,
    path = "/api/v1/admin/coaches/courses/{courseId}",
    params(("courseId" = String, Path, format = "uuid")),
    request_body = CreateCourseRequestBody,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 403, description = "Caller is not a coach", body = crate::domain::Error),
        (status = 404, description = "Course not found", body = crate::domain::Error)
    ),
    tags = ["courses"],
    operation_id = "updateCourse",
    security(("SessionCookie" = []))
)]
#[put("/admin/coaches/courses/{courseId}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateCourseRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let role = state.accounts.role_of(user_id).await?;
    if !matches!(role, Role::Coach | Role::Admin) {
        return Err(crate::domain::Error::forbidden(
            "only coaches can edit courses",
        ));
    }

    let course_id = parse_course_id(&path.into_inner(), FieldName::new("courseId"))?;
    let body = payload.into_inner();
    let request = CreateCourseRequest {
        coach_id: user_id,
        name: require_non_empty(body.name, FieldName::new("name"))?,
        description: body.description,
        start_at: parse_rfc3339_timestamp(&body.start_at, FieldName::new("startAt"))?,
        end_at: parse_rfc3339_timestamp(&body.end_at, FieldName::new("endAt"))?,
        meeting_url: body.meeting_url,
        max_participants: body.max_participants,
    };
    state.catalogue.update_course(course_id, request).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
