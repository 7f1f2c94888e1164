use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::show_schedules::dtos::{
    CreateShowScheduleDto, ShowResponseDto, ShowScheduleQuery, ShowsResponseDto,
    UpdateShowScheduleDto,
};
use crate::features::show_schedules::services::ShowScheduleService;
use crate::shared::types::{ApiResponse, ErrorResponse, IdDto};

/// Schedule a show
///
/// `startOn` and `finishOn` use the RFC 822 layout `02 Jan 06 15:04 MST`.
#[utoipa::path(
    post,
    path = "/api/v1/shows",
    request_body = CreateShowScheduleDto,
    responses(
        (status = 201, description = "Show scheduled", body = ApiResponse<IdDto>),
        (status = 400, description = "Invalid payload or time format", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shows"
)]
pub async fn create_show(
    State(service): State<Arc<dyn ShowScheduleService>>,
    AppJson(payload): AppJson<CreateShowScheduleDto>,
) -> Result<(StatusCode, Json<ApiResponse<IdDto>>)> {
    let id = service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "show schedule successfully created",
            IdDto { id },
        )),
    ))
}

/// List shows, all of them or those of one group
#[utoipa::path(
    get,
    path = "/api/v1/shows",
    params(ShowScheduleQuery),
    responses(
        (status = 200, description = "List of shows", body = ApiResponse<ShowsResponseDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shows"
)]
pub async fn get_shows(
    State(service): State<Arc<dyn ShowScheduleService>>,
    AppQuery(query): AppQuery<ShowScheduleQuery>,
) -> Result<Json<ApiResponse<ShowsResponseDto>>> {
    let shows = if query.group_id.is_empty() {
        service.get_all().await?
    } else {
        service.get_by_group_id(query.group_id).await?
    };

    Ok(Json(ApiResponse::success(
        "successfully get show schedules",
        ShowsResponseDto { shows },
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/shows/{id}",
    params(
        ("id" = String, Path, description = "Show schedule ID")
    ),
    responses(
        (status = 200, description = "Show found", body = ApiResponse<ShowResponseDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Show or its group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shows"
)]
pub async fn get_show(
    State(service): State<Arc<dyn ShowScheduleService>>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<ShowResponseDto>>> {
    let show = service.get_by_id(id.clone()).await?;
    Ok(Json(ApiResponse::success(
        format!("successfully get show schedule with id {}", id),
        ShowResponseDto { show },
    )))
}

#[utoipa::path(
    put,
    path = "/api/v1/shows/{id}",
    params(
        ("id" = String, Path, description = "Show schedule ID")
    ),
    request_body = UpdateShowScheduleDto,
    responses(
        (status = 204, description = "Show rescheduled"),
        (status = 400, description = "Invalid payload or time format", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Show not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shows"
)]
pub async fn update_show(
    State(service): State<Arc<dyn ShowScheduleService>>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateShowScheduleDto>,
) -> Result<StatusCode> {
    service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/shows/{id}",
    params(
        ("id" = String, Path, description = "Show schedule ID")
    ),
    responses(
        (status = 204, description = "Show cancelled"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Show not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "shows"
)]
pub async fn delete_show(
    State(service): State<Arc<dyn ShowScheduleService>>,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
