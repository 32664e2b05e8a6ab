#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use services::AppState;

/// CSP middleware adds Content-Security-Policy header to all responses
async fn csp_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'self'; \
             script-src 'self' 'unsafe-inline'; \
             style-src 'self' 'unsafe-inline'; \
             img-src 'self' data: https:; \
             connect-src 'self'",
        ),
    );
    response
}

pub fn create_router(app_state: Arc<services::AppState>) -> Router {
    // CORS configuration for the API surface
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any); // TODO: restrict to specific origins in production

    let mut router = Router::new()
        // Public endpoints (no auth required)
        .route("/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler)
                .layer(middleware::from_fn(handlers::metrics_auth_middleware)),
        )
        .nest("/api/v1", api_routes().layer(cors));

    // Static assets for the bundled single-page UI, when configured
    if let Some(ui_dir) = app_state.config.ui_dir.as_deref() {
        let ui = Path::new(ui_dir);
        router = router
            .nest_service("/static", ServeDir::new(ui.join("static")))
            .route_service("/favicon.ico", ServeFile::new(ui.join("favicon.ico")))
            .route_service("/manifest.json", ServeFile::new(ui.join("manifest.json")));
    }

    router
        // Everything else: index.html for client routing, JSON 404 under /api
        .fallback(handlers::spa_fallback)
        .with_state(app_state)
        .layer(middleware::from_fn(csp_middleware)) // Apply CSP to all responses
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<services::AppState>> {
    Router::new()
        .route(
            "/tests/officer-subject",
            get(handlers::tests::get_or_create_test),
        )
        .route("/tests/start", post(handlers::tests::start_test))
        .route("/tests/submit", post(handlers::tests::submit_test))
        .route("/officers", get(handlers::officers::list_officers))
        .route("/officers/{id}", get(handlers::officers::get_officer))
        .route("/subjects", get(handlers::catalog::list_subjects))
        .route("/units", get(handlers::officers::list_units))
        .route("/results/export", get(handlers::exports::export_results))
}
