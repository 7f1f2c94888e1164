use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::STATUS_SUCCESS;

/// Success envelope shared by every JSON endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            data,
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Identifier of a freshly created resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdDto {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(
            "group successfully created",
            IdDto {
                id: "g-abc".to_string(),
            },
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "status": "success",
                "message": "group successfully created",
                "data": { "id": "g-abc" }
            })
        );
    }
}
