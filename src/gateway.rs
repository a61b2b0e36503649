use crate::error::UploadError;
use axum::{
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "OPTIONS,POST";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers, Origin, Accept, \
     X-Requested-With, Content-Type, Access-Control-Request-Method, \
     Access-Control-Request-Headers, Access-Control-Allow-Origin";

/// An upload request as delivered by the hosting gateway: method and headers
/// of the original HTTP request plus its body, base64-encoded for binary-safe
/// transport.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: String,
}

impl GatewayRequest {
    pub fn new(method: Method, headers: HeaderMap, body: String) -> Self {
        Self {
            method,
            headers,
            body,
        }
    }

    /// The request's Content-Type header, if present and readable.
    /// `HeaderMap` lookup is case-insensitive.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Response envelope. The CORS header trio is attached to every response,
/// success and failure alike.
#[derive(Debug)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl GatewayResponse {
    /// Preflight short-circuit: 200 with no body processing performed.
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/plain",
            body: "Success".to_string(),
        }
    }

    /// Successful upload: the stored object's public location.
    pub fn success(location: &str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: json!({ "s3_url": location }).to_string(),
        }
    }

    /// Client-facing rejection: 400 with the error's diagnostic text.
    pub fn client_error(err: &UploadError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            content_type: "text/plain",
            body: err.to_string(),
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );
        (self.status, headers, self.body).into_response()
    }
}
