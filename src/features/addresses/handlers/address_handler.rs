use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::addresses::dtos::UpdateAddressDto;
use crate::features::addresses::services::AddressService;
use crate::shared::types::ErrorResponse;

/// Update a group's address
#[utoipa::path(
    put,
    path = "/api/v1/groups/addresses/{id}",
    params(
        ("id" = String, Path, description = "Group ID (addresses share it)")
    ),
    request_body = UpdateAddressDto,
    responses(
        (status = 204, description = "Address updated"),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Address or village not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "addresses"
)]
pub async fn update_address(
    State(service): State<Arc<dyn AddressService>>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateAddressDto>,
) -> Result<StatusCode> {
    service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ServiceError;
    use crate::features::addresses::routes::routes;
    use crate::features::addresses::services::MockAddressService;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_address_no_content() {
        let mut service = MockAddressService::new();
        service
            .expect_update()
            .withf(|id, payload| id == "g-abc" && payload.village_id == "3502010001")
            .returning(|_, _| Ok(()));

        let server = TestServer::new(routes(Arc::new(service))).unwrap();
        let response = server
            .put("/api/v1/groups/addresses/g-abc")
            .json(&json!({ "address": "Jl. Batoro Katong", "villageID": "3502010001" }))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_update_address_not_found() {
        let mut service = MockAddressService::new();
        service
            .expect_update()
            .returning(|_, _| Err(ServiceError::DataNotFound));

        let server = TestServer::new(routes(Arc::new(service))).unwrap();
        let response = server
            .put("/api/v1/groups/addresses/g-zzz")
            .json(&json!({ "address": "Jl. Batoro Katong", "villageID": "0000000000" }))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "Resource with given ID not found." }));
    }
}
