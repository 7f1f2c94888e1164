use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admins::dtos::{CredentialDto, TokenDto};
use crate::features::admins::services::AdminService;
use crate::shared::types::{ApiResponse, ErrorResponse};

/// Log in as administrator
#[utoipa::path(
    post,
    path = "/api/v1/admins",
    request_body = CredentialDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenDto>),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Username and password not match", body = ErrorResponse),
        (status = 404, description = "Unknown username", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "admins"
)]
pub async fn login(
    State(service): State<Arc<dyn AdminService>>,
    AppJson(payload): AppJson<CredentialDto>,
) -> Result<Json<ApiResponse<TokenDto>>> {
    let token = service.login(payload).await?;
    Ok(Json(ApiResponse::success("login successful", token)))
}
