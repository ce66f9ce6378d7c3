mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::advertisers::repositories::PgAdvertiserRepository;
use crate::features::advertisers::{
    admin_routes as advertisers_admin_routes, public_routes as advertisers_public_routes,
    AdvertiserService,
};
use crate::features::catalog::{load_catalog, routes as catalog_routes};
use crate::features::images::{routes as images_routes, ImageService, ImageState};
use crate::features::media::{routes as media_routes, MediaService};
use crate::features::registrations::repositories::PgRegistrationRepository;
use crate::features::registrations::{
    admin_routes as registrations_admin_routes, public_routes as registrations_public_routes,
    RegistrationService,
};
use crate::features::silos::{routes as silos_routes, SiloService};
use crate::features::sitemap::{routes as sitemap_routes, SitemapService};
use crate::modules::storage::{MediaStorage, MinIOClient};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::{middleware::from_fn, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
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

/// Liveness plus a database round trip
async fn health_check(State(pool): State<PgPool>) -> StatusCode {
    match database::ping(&pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
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

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Catalog is immutable after this point
    let catalog = Arc::new(
        load_catalog(&config.catalog).map_err(|e| anyhow::anyhow!("Invalid catalog: {}", e))?,
    );
    tracing::info!(
        "Catalog loaded: {} cities, {} services, {} silo pages",
        catalog.cities().len(),
        catalog.services().len(),
        catalog.silo_count()
    );

    // Object storage; bucket setup problems are logged, not fatal
    let media_storage: Arc<dyn MediaStorage> = Arc::new(
        MinIOClient::new(config.minio.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?,
    );
    tracing::info!("MinIO client initialized for bucket: {}", config.minio.bucket);

    // Repositories
    let advertiser_repo = Arc::new(PgAdvertiserRepository::new(pool.clone()));
    let registration_repo = Arc::new(PgRegistrationRepository::new(pool.clone()));

    // Services
    let image_service = Arc::new(ImageService::new(Arc::clone(&catalog)));
    let advertiser_service = Arc::new(AdvertiserService::new(
        advertiser_repo.clone(),
        Arc::clone(&catalog),
        Arc::clone(&media_storage),
    ));
    let registration_service = Arc::new(RegistrationService::new(
        registration_repo,
        advertiser_repo.clone(),
        Arc::clone(&catalog),
    ));
    let silo_service = Arc::new(SiloService::new(
        advertiser_repo,
        Arc::clone(&catalog),
        Arc::clone(&image_service),
        config.catalog.page_image_count,
    ));
    let media_service = Arc::new(MediaService::new(media_storage));
    let sitemap_service = Arc::new(SitemapService::new(
        Arc::clone(&catalog),
        Arc::clone(&advertiser_service),
        &config.app.site_url,
    ));
    let image_state = Arc::new(ImageState {
        catalog: Arc::clone(&catalog),
        images: image_service,
        default_count: config.catalog.page_image_count,
    });
    tracing::info!("Services initialized");

    // Build application router with dynamic swagger config
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
            .layer(from_fn(middleware::basic_auth_middleware(
                Arc::new(credentials),
                "Swagger",
            )))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Admin routes (HTTP basic auth)
    let admin_routes = Router::new()
        .merge(advertisers_admin_routes(Arc::clone(&advertiser_service)))
        .merge(registrations_admin_routes(Arc::clone(&registration_service)))
        .layer(from_fn(middleware::basic_auth_middleware(
            Arc::new(config.admin.credentials()),
            "Admin",
        )));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(catalog_routes(Arc::clone(&catalog)))
        .merge(images_routes(image_state))
        .merge(silos_routes(silo_service))
        .merge(advertisers_public_routes(advertiser_service))
        .merge(registrations_public_routes(registration_service))
        .merge(media_routes(media_service))
        .merge(sitemap_routes(sitemap_service));

    let health_route = Router::new()
        .route("/health", axum::routing::get(health_check))
        .with_state(pool);

    let app = Router::new()
        .merge(swagger)
        .nest("/api/admin", admin_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

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

    axum::serve(listener, app).await?;

    Ok(())
}
