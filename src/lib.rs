pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod infrastructure;
pub mod multipart;
pub mod naming;
pub mod services;
pub mod sniff;

use crate::config::RelayConfig;
use crate::services::relay::UploadRelay;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::upload::relay_upload,
        handlers::health::health_check,
    ),
    components(
        schemas(
            handlers::upload::UploadResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "upload", description = "Verified upload relay endpoint"),
        (name = "system", description = "Service status endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<UploadRelay>,
    pub config: RelayConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .route(
            "/upload",
            post(handlers::upload::relay_upload).options(handlers::upload::relay_upload),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_body_size.saturating_add(10 * 1024 * 1024),
        ))
        .with_state(state)
}
