use crate::error::UploadError;
use crate::gateway::{GatewayRequest, GatewayResponse};
use crate::multipart::{self, form, scan::PartScanner};
use crate::naming;
use crate::services::storage::ObjectStore;
use crate::sniff;
use axum::http::Method;
use std::sync::Arc;
use tracing::{info, warn};

/// The form field the client must put the upload under.
pub const FILE_FIELD: &str = "file";

/// The upload pipeline: resolve the boundary, decode the transported body,
/// locate the declared file field, verify a scanned part against the
/// declared type, name the object and hand it to storage.
pub struct UploadRelay {
    store: Arc<dyn ObjectStore>,
}

impl UploadRelay {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Entry point for one gateway request.
    ///
    /// OPTIONS short-circuits with the preflight response before any body
    /// handling. Everything else runs the pipeline and maps failures to
    /// 400 envelopes; no error escapes as a fault.
    pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
        if request.method == Method::OPTIONS {
            return GatewayResponse::preflight();
        }

        match self.process(&request).await {
            Ok(location) => GatewayResponse::success(&location),
            Err(err) => {
                warn!("Upload rejected: {}", err);
                GatewayResponse::client_error(&err)
            }
        }
    }

    async fn process(&self, request: &GatewayRequest) -> Result<String, UploadError> {
        let content_type = request.content_type().unwrap_or_default();
        let boundary = multipart::resolve_boundary(content_type)?;
        let raw = multipart::decode_body(&request.body)?;

        // The decoded body is shared by the strict form parse and the
        // verification scan; Bytes clones are reference-counted.
        let fields = form::parse_form(raw.clone(), &boundary).await?;
        let file = fields.file(FILE_FIELD).ok_or(UploadError::MissingFile)?;
        info!(
            "Upload request: filename {:?}, declared type {:?}",
            file.file_name, file.content_type
        );

        let scanner = PartScanner::new(raw, &boundary);
        let payload = sniff::select_payload(scanner, &file.content_type)
            .await
            .ok_or(UploadError::NoMatchingPart)?;

        let key = naming::object_key(&file.content_type)?;
        let detected = sniff::sniff_content_type(&payload);
        info!(
            "Verified {} byte(s) as {}, storing under {}",
            payload.len(),
            detected,
            key
        );

        let location = self.store.put(&key, payload).await.map_err(|e| {
            tracing::error!("Storage put failed: {:?}", e);
            UploadError::Upload(e)
        })?;

        info!("Stored object available at {}", location);
        Ok(location)
    }
}
