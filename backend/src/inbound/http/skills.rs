//! Skill catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/v1/skill
//! POST   /api/v1/skill
//! DELETE /api/v1/skill/{skillId}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::ports::{CreateSkillRequest, SkillPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// List all skills.
#[utoipa::path(
    get,
    path = "/api/v1/skill",
    responses(
        (status = 200, description = "Skill listing", body = Vec<SkillPayload>),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["skills"],
    operation_id = "listSkills",
    security(())
)]
#[get("/skill")]
pub async fn list_skills(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<SkillPayload>>> {
    let skills = state.skills.list_skills().await?;
    Ok(web::Json(skills))
}

/// Create a skill.
#[utoipa::path(
    post,
    path = "/api/v1/skill",
    request_body = CreateSkillRequest,
    responses(
        (status = 201, description = "Skill created", body = SkillPayload),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 409, description = "Duplicate skill name", body = crate::domain::Error)
    ),
    tags = ["skills"],
    operation_id = "createSkill",
    security(("SessionCookie" = []))
)]
#[post("/skill")]
pub async fn create_skill(
    state: web::Data<HttpState>,
    payload: web::Json<CreateSkillRequest>,
) -> ApiResult<HttpResponse> {
    let skill = state.skills.create_skill(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(skill))
}

/// Delete a skill.
#[utoipa::path(
    delete,
    path = "/api/v1/skill/{skillId}",
    params(("skillId" = String, Path, format = "uuid")),
    responses(
        (status = 204, description = "Skill deleted"),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Skill not found", body = crate::domain::Error)
    ),
    tags = ["skills"],
    operation_id = "deleteSkill",
    security(("SessionCookie" = []))
)]
#[delete("/skill/{skillId}")]
pub async fn delete_skill(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let skill_id = parse_uuid(&path.into_inner(), FieldName::new("skillId"))?;
    state.skills.delete_skill(skill_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
