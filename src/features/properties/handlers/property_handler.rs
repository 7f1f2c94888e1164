use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::properties::dtos::PropertyPayloadDto;
use crate::features::properties::services::PropertyService;
use crate::shared::constants::CONTENT_TYPE_PNG;
use crate::shared::types::{ApiResponse, ErrorResponse, IdDto};

/// Add a property to a group
#[utoipa::path(
    post,
    path = "/api/v1/groups/{id}/properties",
    params(
        ("id" = String, Path, description = "Group ID")
    ),
    request_body = PropertyPayloadDto,
    responses(
        (status = 201, description = "Property created", body = ApiResponse<IdDto>),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn create_property(
    State(service): State<Arc<dyn PropertyService>>,
    AppPath(group_id): AppPath<String>,
    AppJson(payload): AppJson<PropertyPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<IdDto>>)> {
    let id = service.create(group_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "property successfully created",
            IdDto { id },
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/groups/{id}/properties/{propertyID}",
    params(
        ("id" = String, Path, description = "Group ID"),
        ("propertyID" = String, Path, description = "Property ID")
    ),
    request_body = PropertyPayloadDto,
    responses(
        (status = 204, description = "Property updated"),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn update_property(
    State(service): State<Arc<dyn PropertyService>>,
    AppPath((_group_id, property_id)): AppPath<(String, String)>,
    AppJson(payload): AppJson<PropertyPayloadDto>,
) -> Result<StatusCode> {
    service.update(property_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/groups/{id}/properties/{propertyID}",
    params(
        ("id" = String, Path, description = "Group ID"),
        ("propertyID" = String, Path, description = "Property ID")
    ),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn delete_property(
    State(service): State<Arc<dyn PropertyService>>,
    AppPath((_group_id, property_id)): AppPath<(String, String)>,
) -> Result<StatusCode> {
    service.delete(property_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// QR code (PNG) encoding the property id
#[utoipa::path(
    get,
    path = "/api/v1/groups/{id}/properties/{propertyID}/generate",
    params(
        ("id" = String, Path, description = "Group ID"),
        ("propertyID" = String, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "QR code image", content_type = "image/png", body = Vec<u8>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn generate_property_qr_code(
    State(service): State<Arc<dyn PropertyService>>,
    AppPath((_group_id, property_id)): AppPath<(String, String)>,
) -> Result<impl IntoResponse> {
    let png = service.generate_qr_code(property_id).await?;
    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE_PNG)], png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ServiceError;
    use crate::features::properties::routes::routes;
    use crate::features::properties::services::MockPropertyService;
    use axum_test::TestServer;
    use serde_json::json;

    fn server(service: MockPropertyService) -> TestServer {
        TestServer::new(routes(Arc::new(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_property_created() {
        let mut service = MockPropertyService::new();
        service
            .expect_create()
            .withf(|group_id, payload| group_id == "g-abc" && payload.amount == 3)
            .returning(|_, _| Ok("p-1234567".to_string()));

        let response = server(service)
            .post("/api/v1/groups/g-abc/properties")
            .json(&json!({ "name": "Kendang", "description": "Gendang kulit sapi", "amount": 3 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "status": "success",
            "message": "property successfully created",
            "data": { "id": "p-1234567" }
        }));
    }

    #[tokio::test]
    async fn test_create_property_negative_amount_never_reaches_service() {
        let mut service = MockPropertyService::new();
        service.expect_create().never();

        let response = server(service)
            .post("/api/v1/groups/g-abc/properties")
            .json(&json!({ "name": "Kendang", "description": "Gendang", "amount": -1 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_create_property_missing_group() {
        let mut service = MockPropertyService::new();
        service
            .expect_create()
            .returning(|_, _| Err(ServiceError::DataNotFound));

        let response = server(service)
            .post("/api/v1/groups/g-zzz/properties")
            .json(&json!({ "name": "Kendang", "description": "Gendang", "amount": 1 }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_update_property_uses_property_id() {
        let mut service = MockPropertyService::new();
        service
            .expect_update()
            .withf(|id, _| id == "p-1234567")
            .returning(|_, _| Ok(()));

        let response = server(service)
            .put("/api/v1/groups/g-abc/properties/p-1234567")
            .json(&json!({ "name": "Kendang", "description": "Gendang", "amount": 1 }))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_property_no_content() {
        let mut service = MockPropertyService::new();
        service
            .expect_delete()
            .withf(|id| id == "p-1234567")
            .returning(|_| Ok(()));

        let response = server(service)
            .delete("/api/v1/groups/g-abc/properties/p-1234567")
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_generate_property_qr_code_is_png() {
        let mut service = MockPropertyService::new();
        service
            .expect_generate_qr_code()
            .withf(|id| id == "p-1234567")
            .returning(|_| Ok(vec![0x89, b'P', b'N', b'G']));

        let response = server(service)
            .get("/api/v1/groups/g-abc/properties/p-1234567/generate")
            .await;

        response.assert_status_ok();
        response.assert_header("content-type", "image/png");
    }
}
