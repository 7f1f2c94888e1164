use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::{AppError, ServiceError};
use crate::features::admins::models::AuthenticatedAdmin;

/// JSON body extractor whose rejections use the invalid payload response
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        match &self.0 {
            JsonRejection::JsonDataError(err) => tracing::debug!("Invalid JSON data: {}", err),
            JsonRejection::JsonSyntaxError(err) => tracing::debug!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                tracing::debug!("Missing JSON content type: {}", err)
            }
            other => tracing::debug!("Failed to parse JSON body: {}", other),
        }

        if self.0.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge.into_response();
        }
        AppError::Service(ServiceError::InvalidPayload).into_response()
    }
}

/// Query string extractor whose rejections use the invalid payload response
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("Invalid query string: {}", rejection);
                Err(AppError::Service(ServiceError::InvalidPayload))
            }
        }
    }
}

/// Path parameter extractor whose rejections use the invalid payload response
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("Invalid path parameters: {}", rejection);
                Err(AppError::Service(ServiceError::InvalidPayload))
            }
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("missing or malformed jwt".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::DefaultBodyLimit,
        routing::{get, post},
        Router,
    };
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default)]
        group_id: String,
    }

    async fn filter(AppQuery(query): AppQuery<Filter>) -> String {
        query.group_id
    }

    async fn amount(AppPath(amount): AppPath<u16>) -> String {
        amount.to_string()
    }

    async fn echo(AppJson(body): AppJson<serde_json::Value>) -> String {
        body.to_string()
    }

    fn server() -> TestServer {
        let app = Router::new()
            .route("/shows", get(filter))
            .route("/amounts/{amount}", get(amount))
            .route("/echo", post(echo))
            .layer(DefaultBodyLimit::max(64));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_query_is_extracted() {
        let response = server().get("/shows?group_id=g-abc").await;
        response.assert_status_ok();
        response.assert_text("g-abc");
    }

    #[tokio::test]
    async fn test_duplicate_query_field_is_invalid_payload() {
        let response = server().get("/shows?group_id=a&group_id=b").await;
        response.assert_status_bad_request();
        response.assert_json(&json!({
            "message": "Invalid payload. Please check the payload schema in the API Documentation."
        }));
    }

    #[tokio::test]
    async fn test_unparsable_path_is_invalid_payload() {
        let response = server().get("/amounts/lots").await;
        response.assert_status_bad_request();
        response.assert_json(&json!({
            "message": "Invalid payload. Please check the payload schema in the API Documentation."
        }));
    }

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        let response = server()
            .post("/echo")
            .json(&json!({ "description": "x".repeat(256) }))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        response.assert_json(&json!({ "message": "Request Entity Too Large" }));
    }
}
