//! Coach listing and promotion HTTP handlers.
//!
//! ```text
//! GET  /api/v1/coaches?per&page
//! GET  /api/v1/coaches/{coachId}
//! POST /api/v1/admin/coaches/{userId}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::UserId;
use crate::domain::ports::{CoachDetailPayload, CoachPageRequest, CoachPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Paging query parameters; both default when omitted.
#[derive(Debug, Deserialize)]
pub struct CoachPageQuery {
    pub page: Option<i64>,
    pub per: Option<i64>,
}

/// Page through registered coaches.
#[utoipa::path(
    get,
    path = "/api/v1/coaches",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("per" = Option<i64>, Query, description = "Page size, default 5")
    ),
    responses(
        (status = 200, description = "Coach listing", body = Vec<CoachPayload>),
        (status = 400, description = "Invalid paging", body = crate::domain::Error)
    ),
    tags = ["coaches"],
    operation_id = "listCoaches",
    security(())
)]
#[get("/coaches")]
pub async fn list_coaches(
    state: web::Data<HttpState>,
    query: web::Query<CoachPageQuery>,
) -> ApiResult<web::Json<Vec<CoachPayload>>> {
    let defaults = CoachPageRequest::default();
    let request = CoachPageRequest {
        page: query.page.unwrap_or(defaults.page),
        per: query.per.unwrap_or(defaults.per),
    };
    let coaches = state.catalogue.list_coaches(request).await?;
    Ok(web::Json(coaches))
}

/// Fetch one coach's public details.
#[utoipa::path(
    get,
    path = "/api/v1/coaches/{coachId}",
    params(("coachId" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "Coach details", body = CoachDetailPayload),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Coach not found", body = crate::domain::Error)
    ),
    tags = ["coaches"],
    operation_id = "getCoachDetail",
    security(())
)]
#[get("/coaches/{coachId}")]
pub async fn coach_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CoachDetailPayload>> {
    let coach_id = parse_uuid(&path.into_inner(), FieldName::new("coachId"))?;
    let detail = state
        .catalogue
        .coach_detail(UserId::from_uuid(coach_id))
        .await?;
    Ok(web::Json(detail))
}

/// Grant the coach role to an existing account.
#[utoipa::path(
    post,
    path = "/api/v1/admin/coaches/{userId}",
    params(("userId" = String, Path, format = "uuid")),
    responses(
        (status = 201, description = "Coach role granted"),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 404, description = "User not found", body = crate::domain::Error),
        (status = 409, description = "User is already a coach", body = crate::domain::Error)
    ),
    tags = ["coaches"],
    operation_id = "promoteToCoach",
    security(("SessionCookie" = []))
)]
#[post("/admin/coaches/{userId}")]
pub async fn promote_to_coach(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let user_id = parse_uuid(&path.into_inner(), FieldName::new("userId"))?;
    state
        .accounts
        .promote_to_coach(UserId::from_uuid(user_id))
        .await?;
    Ok(HttpResponse::Created().finish())
}
