//! Credit package HTTP handlers.
//!
//! ```text
//! GET    /api/v1/credit-package
//! POST   /api/v1/credit-package
//! POST   /api/v1/credit-package/{creditPackageId}
//! DELETE /api/v1/credit-package/{creditPackageId}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::ports::{CreatePackageRequest, CreditPackagePayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// List purchasable credit packages.
#[utoipa::path(
    get,
    path = "/api/v1/credit-package",
    responses(
        (status = 200, description = "Package listing", body = Vec<CreditPackagePayload>),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["credit-packages"],
    operation_id = "listCreditPackages",
    security(())
)]
#[get("/credit-package")]
pub async fn list_packages(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CreditPackagePayload>>> {
    let packages = state.packages.list_packages().await?;
    Ok(web::Json(packages))
}

/// Create a credit package.
#[utoipa::path(
    post,
    path = "/api/v1/credit-package",
    request_body = CreatePackageRequest,
    responses(
        (status = 201, description = "Package created", body = CreditPackagePayload),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 409, description = "Duplicate package name", body = crate::domain::Error)
    ),
    tags = ["credit-packages"],
    operation_id = "createCreditPackage",
    security(("SessionCookie" = []))
)]
#[post("/credit-package")]
pub async fn create_package(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePackageRequest>,
) -> ApiResult<HttpResponse> {
    let package = state.packages.create_package(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(package))
}

/// Purchase a credit package for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/credit-package/{creditPackageId}",
    params(("creditPackageId" = String, Path, format = "uuid")),
    responses(
        (status = 201, description = "Purchase recorded"),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 404, description = "Package not found", body = crate::domain::Error)
    ),
    tags = ["credit-packages"],
    operation_id = "buyCreditPackage",
    security(("SessionCookie" = []))
)]
#[post("/credit-package/{creditPackageId}")]
pub async fn buy_package(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let package_id = parse_uuid(&path.into_inner(), FieldName::new("creditPackageId"))?;
    state.packages.buy_package(user_id, package_id).await?;
    Ok(HttpResponse::Created().finish())
}

/// Delete a credit package.
#[utoipa::path(
    delete,
    path = "/api/v1/credit-package/{creditPackageId}",
    params(("creditPackageId" = String, Path, format = "uuid")),
    responses(
        (status = 204, description = "Package deleted"),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Package not found", body = crate::domain::Error)
    ),
    tags = ["credit-packages"],
    operation_id = "deleteCreditPackage",
    security(("SessionCookie" = []))
)]
#[delete("/credit-package/{creditPackageId}")]
pub async fn delete_package(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let package_id = parse_uuid(&path.into_inner(), FieldName::new("creditPackageId"))?;
    state.packages.delete_package(package_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
