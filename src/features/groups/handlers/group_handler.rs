use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::groups::dtos::{
    CreateGroupDto, GroupResponseDto, GroupsResponseDto, UpdateGroupDto,
};
use crate::features::groups::services::GroupService;
use crate::shared::constants::CONTENT_TYPE_PNG;
use crate::shared::types::{ApiResponse, ErrorResponse, IdDto};

/// Register a group
///
/// Resolves `villageID` against the administrative-area service and stores a
/// snapshot of the village hierarchy as the group's address.
#[utoipa::path(
    post,
    path = "/api/v1/groups",
    request_body = CreateGroupDto,
    responses(
        (status = 201, description = "Group created", body = ApiResponse<IdDto>),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Village not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "groups"
)]
pub async fn create_group(
    State(service): State<Arc<dyn GroupService>>,
    AppJson(payload): AppJson<CreateGroupDto>,
) -> Result<(StatusCode, Json<ApiResponse<IdDto>>)> {
    let id = service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "group successfully created",
            IdDto { id },
        )),
    ))
}

/// List all groups with their addresses and properties
#[utoipa::path(
    get,
    path = "/api/v1/groups",
    responses(
        (status = 200, description = "List of groups", body = ApiResponse<GroupsResponseDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "groups"
)]
pub async fn get_groups(
    State(service): State<Arc<dyn GroupService>>,
) -> Result<Json<ApiResponse<GroupsResponseDto>>> {
    let groups = service.get_all().await?;
    Ok(Json(ApiResponse::success(
        "successfully get groups",
        GroupsResponseDto { groups },
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/{id}",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group found", body = ApiResponse<GroupResponseDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "groups"
)]
pub async fn get_group(
    State(service): State<Arc<dyn GroupService>>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<GroupResponseDto>>> {
    let group = service.get_by_id(id.clone()).await?;
    Ok(Json(ApiResponse::success(
        format!("successfully get group with id {}", id),
        GroupResponseDto { group },
    )))
}

/// Rename a group or change its leader
#[utoipa::path(
    put,
    path = "/api/v1/groups/{id}",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    request_body = UpdateGroupDto,
    responses(
        (status = 204, description = "Group updated"),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "groups"
)]
pub async fn update_group(
    State(service): State<Arc<dyn GroupService>>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateGroupDto>,
) -> Result<StatusCode> {
    service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a group along with its address and properties
#[utoipa::path(
    delete,
    path = "/api/v1/groups/{id}",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "groups"
)]
pub async fn delete_group(
    State(service): State<Arc<dyn GroupService>>,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// QR code (PNG) encoding the group id
#[utoipa::path(
    get,
    path = "/api/v1/groups/{id}/generate",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "QR code image", content_type = "image/png", body = Vec<u8>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "groups"
)]
pub async fn generate_group_qr_code(
    State(service): State<Arc<dyn GroupService>>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse> {
    let png = service.generate_qr_code(id).await?;
    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE_PNG)], png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{RepositoryError, ServiceError};
    use crate::features::addresses::models::Address;
    use crate::features::groups::dtos::GroupDto;
    use crate::features::groups::models::Group;
    use crate::features::groups::repositories::MockGroupRepository;
    use crate::features::groups::routes::routes;
    use crate::features::groups::services::{GroupServiceImpl, MockGroupService};
    use crate::features::villages::models::Village;
    use crate::features::villages::repositories::MockVillageRepository;
    use crate::shared::generators::{MockIdGenerator, MockQrCodeGenerator};
    use axum_test::TestServer;
    use serde_json::json;

    fn server(service: Arc<dyn GroupService>) -> TestServer {
        TestServer::new(routes(service)).unwrap()
    }

    /// Real service wired to mocked collaborators
    fn scenario_service(
        groups: MockGroupRepository,
        villages: MockVillageRepository,
        ids: MockIdGenerator,
    ) -> Arc<dyn GroupService> {
        Arc::new(GroupServiceImpl::new(
            Arc::new(groups),
            Arc::new(villages),
            Arc::new(ids),
            Arc::new(MockQrCodeGenerator::new()),
        ))
    }

    #[tokio::test]
    async fn test_create_group_returns_generated_id() {
        let mut villages = MockVillageRepository::new();
        villages.expect_find_by_id().returning(|id| {
            Ok(Village {
                id: id.to_string(),
                name: "Ngrayun".to_string(),
                ..Default::default()
            })
        });
        let mut ids = MockIdGenerator::new();
        ids.expect_generate_group_id()
            .returning(|| Ok("g-abc".to_string()));
        let mut groups = MockGroupRepository::new();
        groups.expect_insert().times(1).returning(|_| Ok(()));

        let response = server(scenario_service(groups, villages, ids))
            .post("/api/v1/groups")
            .json(&json!({
                "name": "Paguyuban Reog",
                "leader": "Mbah Warok",
                "address": "Jl. Batoro Katong",
                "villageID": "3502010001"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "status": "success",
            "message": "group successfully created",
            "data": { "id": "g-abc" }
        }));
    }

    #[tokio::test]
    async fn test_update_group_missing_fields_is_invalid_payload() {
        let mut groups = MockGroupRepository::new();
        groups.expect_update().never();

        let response = server(scenario_service(
            groups,
            MockVillageRepository::new(),
            MockIdGenerator::new(),
        ))
        .put("/api/v1/groups/g-xyz")
        .json(&json!({}))
        .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({
            "message": "Invalid payload. Please check the payload schema in the API Documentation."
        }));
    }

    #[tokio::test]
    async fn test_get_unknown_group_is_not_found() {
        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_by_id()
            .withf(|id| id == "does-not-exist")
            .returning(|_| Err(RepositoryError::RecordNotFound));

        let response = server(scenario_service(
            groups,
            MockVillageRepository::new(),
            MockIdGenerator::new(),
        ))
        .get("/api/v1/groups/does-not-exist")
        .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "Resource with given ID not found." }));
    }

    #[tokio::test]
    async fn test_get_group_wraps_dto() {
        let mut groups = MockGroupRepository::new();
        groups.expect_find_by_id().returning(|id| {
            Ok(Group {
                id: id.to_string(),
                name: "Paguyuban Reog".to_string(),
                leader: "Mbah Warok".to_string(),
                address: Address {
                    id: id.to_string(),
                    village_id: "3502010001".to_string(),
                    ..Default::default()
                },
                properties: Vec::new(),
            })
        });

        let response = server(scenario_service(
            groups,
            MockVillageRepository::new(),
            MockIdGenerator::new(),
        ))
        .get("/api/v1/groups/g-abc")
        .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "successfully get group with id g-abc");
        assert_eq!(body["data"]["group"]["id"], "g-abc");
        assert_eq!(body["data"]["group"]["address"]["villageID"], "3502010001");
        assert_eq!(body["data"]["group"]["properties"], json!([]));
    }

    #[tokio::test]
    async fn test_get_groups_empty_list() {
        let mut service = MockGroupService::new();
        service.expect_get_all().returning(|| Ok(Vec::<GroupDto>::new()));

        let response = server(Arc::new(service)).get("/api/v1/groups").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "status": "success",
            "message": "successfully get groups",
            "data": { "groups": [] }
        }));
    }

    #[tokio::test]
    async fn test_delete_group_no_content() {
        let mut service = MockGroupService::new();
        service
            .expect_delete()
            .withf(|id| id == "g-abc")
            .returning(|_| Ok(()));

        let response = server(Arc::new(service)).delete("/api/v1/groups/g-abc").await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_group_repository_failure() {
        let mut service = MockGroupService::new();
        service
            .expect_delete()
            .returning(|_| Err(ServiceError::Repository));

        let response = server(Arc::new(service)).delete("/api/v1/groups/g-abc").await;
        response.assert_status_internal_server_error();
        response.assert_json(&json!({ "message": "Something went wrong." }));
    }

    #[tokio::test]
    async fn test_generate_group_qr_code_is_png() {
        let mut service = MockGroupService::new();
        service
            .expect_generate_qr_code()
            .returning(|_| Ok(vec![0x89, b'P', b'N', b'G']));

        let response = server(Arc::new(service))
            .get("/api/v1/groups/g-abc/generate")
            .await;

        response.assert_status_ok();
        response.assert_header("content-type", "image/png");
        assert_eq!(response.as_bytes().as_ref(), &[0x89, b'P', b'N', b'G']);
    }
}
