use crate::core::error::AppError;
use crate::features::admins::models::AuthenticatedAdmin;
use crate::shared::generators::TokenGenerator;
use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use base64::prelude::*;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let authorized = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok())
                .and_then(|value| value.strip_prefix("Basic "))
                .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
                .and_then(|decoded| String::from_utf8(decoded).ok())
                .is_some_and(|creds| creds == *credentials);

            if authorized {
                return Ok(next.run(req).await);
            }

            let response = (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                Body::from("Unauthorized"),
            )
                .into_response();

            Err(response)
        })
    }
}

/// Turn a handler panic into the generic 500 body
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Unknown(detail).into_response()
}

/// JSON 404 for requests that match no route
pub async fn route_not_found() -> AppError {
    AppError::NotFound
}

/// Serve `/api/v1/shows/` as `/api/v1/shows`.
///
/// The path is rewritten before `router` matches, so mount the result as a
/// fallback service rather than a layer.
pub fn normalize_paths(router: Router) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router)
}

type SetHeader = SetResponseHeaderLayer<HeaderValue>;

pub type SecureHeaders =
    ServiceBuilder<Stack<SetHeader, Stack<SetHeader, Stack<SetHeader, Identity>>>>;

/// Browser hardening headers, kept when a handler already set them
pub fn secure_headers() -> SecureHeaders {
    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
}

struct ClientWindow {
    count: u32,
    window_start: Instant,
}

/// Fixed-window request counter keyed by client IP
#[derive(Clone)]
pub struct RateLimiter {
    clients: Arc<Mutex<HashMap<String, ClientWindow>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn per_second(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(1))
    }

    /// Count one request from `client`; `false` once the window is used up.
    async fn check(&self, client: &str) -> bool {
        let mut clients = self.clients.lock().await;
        let now = Instant::now();

        let entry = clients
            .entry(client.to_owned())
            .or_insert_with(|| ClientWindow {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }

    /// Forget clients whose window closed more than a minute ago
    pub async fn cleanup(&self) {
        let cutoff = self.window + Duration::from_secs(60);
        let now = Instant::now();
        self.clients
            .lock()
            .await
            .retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
    }
}

/// First `X-Forwarded-For` entry, then the peer address
fn client_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_ip(&req);
    if !limiter.check(&client).await {
        tracing::debug!("Rate limit exceeded for {}", client);
        return Err(AppError::TooManyRequests);
    }
    Ok(next.run(req).await)
}

/// Require a valid admin bearer token and expose its claims to handlers
pub async fn auth_middleware(
    State(tokens): State<Arc<dyn TokenGenerator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("missing or malformed jwt".to_string()))?;

    let claims = tokens.extract_token(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        AppError::Unauthorized("invalid or expired jwt".to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedAdmin {
        id: claims.id,
        username: claims.username,
    });
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::generators::{GeneratorError, MockTokenGenerator, TokenClaims};
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use axum::middleware::from_fn;
    use axum_test::TestServer;
    use jsonwebtoken::errors::ErrorKind;

    async fn whoami(admin: AuthenticatedAdmin) -> String {
        admin.username
    }

    fn server(tokens: MockTokenGenerator) -> TestServer {
        let tokens: Arc<dyn TokenGenerator> = Arc::new(tokens);
        let app = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn_with_state(tokens, auth_middleware));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut tokens = MockTokenGenerator::new();
        tokens.expect_extract_token().never();

        let response = server(tokens).get("/whoami").await;
        response.assert_status_unauthorized();
        response.assert_json(&serde_json::json!({ "message": "missing or malformed jwt" }));
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let mut tokens = MockTokenGenerator::new();
        tokens
            .expect_extract_token()
            .returning(|_| Err(GeneratorError::Token(ErrorKind::InvalidSignature.into())));

        let response = server(tokens)
            .get("/whoami")
            .authorization_bearer("forged")
            .await;
        response.assert_status_unauthorized();
        response.assert_json(&serde_json::json!({ "message": "invalid or expired jwt" }));
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let mut tokens = MockTokenGenerator::new();
        tokens
            .expect_extract_token()
            .withf(|token| token == "good")
            .returning(|_| {
                Ok(TokenClaims {
                    id: "a-xyz".to_string(),
                    username: "warok".to_string(),
                    iat: 0,
                    exp: i64::MAX,
                })
            });

        let response = server(tokens)
            .get("/whoami")
            .authorization_bearer("good")
            .await;
        response.assert_status_ok();
        response.assert_text("warok");
    }

    fn swagger_server() -> TestServer {
        let app = Router::new()
            .route("/swagger-ui", get(|| async { "docs" }))
            .layer(from_fn(basic_auth_middleware(Arc::new(
                "admin:secret".to_string(),
            ))));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_basic_auth_accepts_configured_credentials() {
        let encoded = BASE64_STANDARD.encode("admin:secret");
        let response = swagger_server()
            .get("/swagger-ui")
            .authorization(format!("Basic {}", encoded))
            .await;
        response.assert_status_ok();
        response.assert_text("docs");
    }

    #[tokio::test]
    async fn test_basic_auth_challenges_wrong_credentials() {
        let encoded = BASE64_STANDARD.encode("admin:guess");
        let response = swagger_server()
            .get("/swagger-ui")
            .authorization(format!("Basic {}", encoded))
            .await;
        response.assert_status_unauthorized();
        response.assert_header("www-authenticate", "Basic realm=\"Swagger UI\"");
    }

    fn normalized_server() -> TestServer {
        let api = Router::new()
            .route("/api/v1/shows", get(|| async { "shows" }))
            .fallback(route_not_found);
        let app = Router::new()
            .route("/swagger-ui/", get(|| async { "docs" }))
            .fallback_service(normalize_paths(api));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let response = normalized_server().get("/api/v1/shows/").await;
        response.assert_status_ok();
        response.assert_text("shows");
    }

    #[tokio::test]
    async fn test_mounted_routes_keep_trailing_slash() {
        let response = normalized_server().get("/swagger-ui/").await;
        response.assert_status_ok();
        response.assert_text("docs");
    }

    #[tokio::test]
    async fn test_normalized_unknown_route_has_json_body() {
        let response = normalized_server().get("/api/v1/nowhere/").await;
        response.assert_status_not_found();
        response.assert_json(&serde_json::json!({ "message": "Not Found" }));
    }

    #[tokio::test]
    async fn test_unknown_route_has_json_body() {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .fallback(route_not_found);
        let response = TestServer::new(app).unwrap().get("/nowhere").await;

        response.assert_status_not_found();
        response.assert_json(&serde_json::json!({ "message": "Not Found" }));
    }

    #[tokio::test]
    async fn test_secure_headers_added() {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .layer(secure_headers());
        let response = TestServer::new(app).unwrap().get("/health").await;

        response.assert_status_ok();
        response.assert_header("x-xss-protection", "1; mode=block");
        response.assert_header("x-content-type-options", "nosniff");
        response.assert_header("x-frame-options", "SAMEORIGIN");
    }

    fn rate_limited_server(max_requests: u32) -> TestServer {
        let limiter = RateLimiter::new(max_requests, Duration::from_secs(60));
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .layer(from_fn_with_state(limiter, rate_limit_middleware));
        TestServer::new(app).unwrap()
    }

    fn forwarded_for(ip: &'static str) -> (header::HeaderName, HeaderValue) {
        (
            header::HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_static(ip),
        )
    }

    #[tokio::test]
    async fn test_rate_limit_rejects_after_quota() {
        let server = rate_limited_server(2);
        let (name, value) = forwarded_for("10.0.0.1");

        for _ in 0..2 {
            server
                .get("/health")
                .add_header(name.clone(), value.clone())
                .await
                .assert_status_ok();
        }

        let response = server.get("/health").add_header(name, value).await;
        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        response.assert_json(&serde_json::json!({ "message": "Too Many Requests" }));
    }

    #[tokio::test]
    async fn test_rate_limit_counts_clients_separately() {
        let server = rate_limited_server(1);
        let (name, first) = forwarded_for("10.0.0.1");
        let (_, second) = forwarded_for("10.0.0.2");

        server
            .get("/health")
            .add_header(name.clone(), first.clone())
            .await
            .assert_status_ok();
        server
            .get("/health")
            .add_header(name.clone(), second)
            .await
            .assert_status_ok();
        server
            .get("/health")
            .add_header(name, first)
            .await
            .assert_status(StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_rate_limit_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_millis(50));
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(limiter.check("10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_panic_becomes_unknown_error() {
        use tower_http::catch_panic::CatchPanicLayer;

        async fn explode() -> &'static str {
            panic!("boom")
        }

        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(panic_response));
        let response = TestServer::new(app).unwrap().get("/explode").await;

        response.assert_status_internal_server_error();
        response.assert_json(&serde_json::json!({ "message": "Unknown Error." }));
    }
}
