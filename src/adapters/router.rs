use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    adapters::{
        controllers::{health_controller::HealthController, image_controller::ImageController},
        middleware::{cors_layer, expose_error_details, panic_handler},
        state::AppState,
    },
    domain::config::{public_url::UPLOADS_ROUTE, ServerConfig},
};

const UPLOADS_CACHE_CONTROL: &str = "public, max-age=86400";

pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/api/upload", post(ImageController::upload_image))
        .route("/api/upload-multiple", post(ImageController::upload_images))
        .route("/api/images", get(ImageController::list_images))
        // Catch-all so names with separators reach validation instead of 404ing.
        .route("/api/image/{*filename}", delete(ImageController::delete_image))
        .route("/api/health", get(HealthController::health_check))
        .layer(DefaultBodyLimit::max(config.limits.request_body_limit()))
        .layer(middleware::from_fn_with_state(
            app_state.mode,
            expose_error_details,
        ));

    let uploads_routes = Router::new()
        .nest_service(UPLOADS_ROUTE, ServeDir::new(app_state.storage.root()))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static(UPLOADS_CACHE_CONTROL),
        ));

    let mut router = Router::new().merge(api_routes).merge(uploads_routes);

    let frontend_index = config.frontend_dir.join("index.html");
    if config.mode.is_production() && frontend_index.is_file() {
        info!(
            "Serving frontend from {} with SPA fallback",
            config.frontend_dir.display()
        );
        router = router.fallback_service(
            ServeDir::new(&config.frontend_dir)
                .append_index_html_on_directories(true)
                .fallback(ServeFile::new(frontend_index)),
        );
    } else {
        router = router.route("/", get(HealthController::index));
    }

    router
        .layer(CatchPanicLayer::custom(panic_handler(app_state.mode)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.allowed_origins.as_deref()))
        .with_state(app_state)
}
