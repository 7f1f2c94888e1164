mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::error::ServiceError;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::addresses::{
    routes as addresses_routes, AddressService, AddressServiceImpl, PgAddressRepository,
};
use crate::features::admins::dtos::CredentialDto;
use crate::features::admins::{
    routes as admins_routes, AdminService, AdminServiceImpl, PgAdminRepository,
};
use crate::features::groups::{
    routes as groups_routes, GroupRepository, GroupService, GroupServiceImpl, PgGroupRepository,
};
use crate::features::properties::{
    routes as properties_routes, PgPropertyRepository, PropertyService, PropertyServiceImpl,
};
use crate::features::show_schedules::{
    routes as show_schedules_routes, PgShowScheduleRepository, ShowScheduleService,
    ShowScheduleServiceImpl,
};
use crate::features::villages::{HttpVillageRepository, VillageRepository};
use crate::modules::logging::ErrorLogger;
use crate::shared::generators::{
    Argon2PasswordGenerator, IdGenerator, JwtTokenGenerator, PngQrCodeGenerator,
    QrCodeGenerator, RandomIdGenerator, TokenGenerator,
};
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::{middleware::from_fn, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let error_logger = ErrorLogger::new(pool.clone());

    // Generators
    let id_generator: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator::new());
    let qr_code_generator: Arc<dyn QrCodeGenerator> = Arc::new(PngQrCodeGenerator::new());
    let token_generator: Arc<dyn TokenGenerator> = Arc::new(JwtTokenGenerator::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl,
    ));

    // Repositories
    let village_repository: Arc<dyn VillageRepository> = Arc::new(
        HttpVillageRepository::new(&config.administrative_area, error_logger.clone())
            .map_err(|e| anyhow::anyhow!("Failed to build village lookup client: {}", e))?,
    );
    tracing::info!(
        "Village lookup configured at {}",
        config.administrative_area.base_url
    );
    let group_repository: Arc<dyn GroupRepository> = Arc::new(PgGroupRepository::new(
        pool.clone(),
        error_logger.clone(),
    ));

    // Services
    let admin_service: Arc<dyn AdminService> = Arc::new(AdminServiceImpl::new(
        Arc::new(PgAdminRepository::new(pool.clone(), error_logger.clone())),
        Arc::clone(&id_generator),
        Arc::new(Argon2PasswordGenerator::new()),
        Arc::clone(&token_generator),
    ));
    let group_service: Arc<dyn GroupService> = Arc::new(GroupServiceImpl::new(
        Arc::clone(&group_repository),
        Arc::clone(&village_repository),
        Arc::clone(&id_generator),
        Arc::clone(&qr_code_generator),
    ));
    let address_service: Arc<dyn AddressService> = Arc::new(AddressServiceImpl::new(
        Arc::new(PgAddressRepository::new(pool.clone(), error_logger.clone())),
        Arc::clone(&village_repository),
    ));
    let property_service: Arc<dyn PropertyService> = Arc::new(PropertyServiceImpl::new(
        Arc::new(PgPropertyRepository::new(pool.clone(), error_logger.clone())),
        Arc::clone(&group_repository),
        Arc::clone(&id_generator),
        Arc::clone(&qr_code_generator),
    ));
    let show_schedule_service: Arc<dyn ShowScheduleService> =
        Arc::new(ShowScheduleServiceImpl::new(
            Arc::new(PgShowScheduleRepository::new(
                pool.clone(),
                error_logger.clone(),
            )),
            Arc::clone(&group_repository),
            Arc::clone(&id_generator),
        ));
    tracing::info!("Services initialized");

    seed_admin(&config, admin_service.as_ref()).await?;

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require a token issued by the login endpoint)
    let protected_routes = Router::new()
        .merge(groups_routes::routes(group_service))
        .merge(addresses_routes::routes(address_service))
        .merge(properties_routes::routes(property_service))
        .merge(show_schedules_routes::routes(show_schedule_service))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&token_generator),
            middleware::auth_middleware,
        ));

    async fn health_check() -> StatusCode {
        StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes = Router::new().merge(admins_routes::routes(admin_service));

    let rate_limiter = middleware::RateLimiter::per_second(config.app.rate_limit_per_second);
    {
        let rate_limiter = rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                rate_limiter.cleanup().await;
            }
        });
    }
    tracing::info!(
        "Rate limit: {} requests/second per client, body limit: {} bytes",
        config.app.rate_limit_per_second,
        config.app.max_request_body_size
    );

    let api_routes = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .fallback(middleware::route_not_found);

    // Swagger UI relies on its trailing slash, so only the API is normalized
    let app = Router::new()
        .merge(swagger)
        .fallback_service(middleware::normalize_paths(api_routes))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::cors_layer(
                    config.app.cors_allowed_origins.clone(),
                ))
                .layer(middleware::secure_headers())
                .layer(CompressionLayer::new())
                .layer(axum::middleware::from_fn_with_state(
                    rate_limiter,
                    middleware::rate_limit_middleware,
                ))
                .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.app.request_timeout,
                ))
                .layer(CatchPanicLayer::custom(middleware::panic_response)),
        );

    let addr = config.app.server_address();
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

/// Create the configured administrator account on first start
async fn seed_admin(config: &Config, admin_service: &dyn AdminService) -> anyhow::Result<()> {
    let Some((username, password)) = config.admin_seed.credentials() else {
        tracing::info!("Admin seed skipped (ADMIN_USERNAME/ADMIN_PASSWORD not set)");
        return Ok(());
    };

    let credential = CredentialDto {
        username: username.to_string(),
        password: password.to_string(),
    };
    match admin_service
        .seed(config.admin_seed.name.clone(), credential)
        .await
    {
        Ok(id) => {
            tracing::info!("Admin {} seeded with id {}", username, id);
            Ok(())
        }
        Err(ServiceError::DataAlreadyExists) => {
            tracing::info!("Admin {} already exists", username);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to seed admin {}: {}", username, e)),
    }
}
