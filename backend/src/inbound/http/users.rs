//! Account and per-user HTTP handlers.
//!
//! ```text
//! POST /api/v1/users/signup
//! POST /api/v1/users/login
//! GET  /api/v1/users/profile
//! PUT  /api/v1/users/profile
//! PUT  /api/v1/users/password
//! GET  /api/v1/users/credit-package
//! GET  /api/v1/users/courses
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AccountPayload, GetBookingSummaryRequest, GetBookingSummaryResponse, LoginRequest,
    PurchasePayload, SignUpRequest, UpdatePasswordRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_non_empty};

/// Request payload for renaming the account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequestBody {
    pub name: String,
}

/// Request payload for replacing the account password.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequestBody {
    pub password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = AccountPayload),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 409, description = "Email already registered", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "signUp",
    security(())
)]
#[post("/users/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let account = state.accounts.sign_up(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(account))
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AccountPayload),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Invalid credentials", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security(())
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountPayload>> {
    let account = state.accounts.login(payload.into_inner()).await?;
    session.persist_user(account.id)?;
    Ok(web::Json(account))
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    responses(
        (status = 200, description = "Profile details",
            body = crate::domain::ports::ProfilePayload),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 404, description = "User not found", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security(("SessionCookie" = []))
)]
#[get("/users/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<crate::domain::ports::ProfilePayload>> {
    let user_id = session.require_user_id()?;
    let profile = state.accounts.profile(user_id).await?;
    Ok(web::Json(profile))
}

/// Rename the caller's account.
#[utoipa::path(
    put,
    path = "/api/v1/users/profile",
    request_body = UpdateProfileRequestBody,
    responses(
        (status = 204, description = "Profile updated"),
        (status = 400, description = "Invalid or unchanged name", body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile",
    security(("SessionCookie" = []))
)]
#[put("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let name = require_non_empty(payload.into_inner().name, FieldName::new("name"))?;
    state.accounts.rename(user_id, name).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Replace the caller's password.
#[utoipa::path(
    put,
    path = "/api/v1/users/password",
    request_body = UpdatePasswordRequestBody,
    responses(
        (status = 204, description = "Password updated"),
        (status = 400, description = "Invalid, mismatched, or unchanged password",
            body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "updatePassword",
    security(("SessionCookie" = []))
)]
#[put("/users/password")]
pub async fn update_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdatePasswordRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = payload.into_inner();
    if body.new_password != body.confirm_new_password {
        return Err(crate::domain::Error::invalid_request(
            "new password and confirmation do not match",
        ));
    }
    state
        .accounts
        .update_password(
            user_id,
            UpdatePasswordRequest {
                password: body.password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The caller's purchase history, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/credit-package",
    responses(
        (status = 200, description = "Purchase history", body = Vec<PurchasePayload>),
        (status = 401, description = "Unauthorized", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "listPurchases",
    security(("SessionCookie" = []))
)]
#[get("/users/credit-package")]
pub async fn list_purchases(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PurchasePayload>>> {
    let user_id = session.require_user_id()?;
    let purchases = state.packages.purchase_history(user_id).await?;
    Ok(web::Json(purchases))
}

/// The caller's credit totals and active bookings.
#[utoipa::path(
    get,
    path = "/api/v1/users/courses",
    responses(
        (status = 200, description = "Booking summary", body = GetBookingSummaryResponse),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "getBookingSummary",
    security(("SessionCookie" = []))
)]
#[get("/users/courses")]
pub async fn booking_summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<GetBookingSummaryResponse>> {
    let user_id = session.require_user_id()?;
    let summary = state
        .bookings_query
        .booking_summary(GetBookingSummaryRequest { user_id })
        .await?;
    Ok(web::Json(summary))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
