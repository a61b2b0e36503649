use crate::AppState;
use crate::error::UploadError;
use crate::gateway::{GatewayRequest, GatewayResponse};
use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

/// Success payload, as documented. The body itself is produced by the
/// response envelope.
#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    /// Public URL of the stored object
    pub s3_url: String,
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(
        content = String,
        description = "multipart/form-data body with the upload under the \"file\" field",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "File verified and stored", body = UploadResponse),
        (status = 400, description = "Rejected upload, plain-text diagnostic")
    ),
    tag = "upload"
)]
pub async fn relay_upload(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    // Preflights are answered without reading the body.
    if parts.method == Method::OPTIONS {
        let event = GatewayRequest::new(parts.method, parts.headers, String::new());
        return state.relay.handle(event).await.into_response();
    }

    // The hosting gateway transports request bodies base64-encoded; this
    // adapter performs that role for direct HTTP callers.
    let raw = match axum::body::to_bytes(body, state.config.max_body_size).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            let err = UploadError::RequestParse(e.to_string());
            return GatewayResponse::client_error(&err).into_response();
        }
    };

    let event = GatewayRequest::new(parts.method, parts.headers, BASE64.encode(&raw));
    state.relay.handle(event).await.into_response()
}
