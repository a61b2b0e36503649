pub mod form;
pub mod scan;

use crate::error::UploadError;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use bytes::Bytes;

/// Extracts the multipart boundary token from a Content-Type header value.
///
/// Structured media-type parsing only: the value must name a
/// `multipart/form-data` type carrying a `boundary` parameter. Extra
/// parameters are tolerated. Pure and idempotent.
pub fn resolve_boundary(content_type: &str) -> Result<String, UploadError> {
    multer::parse_boundary(content_type)
        .map_err(|e| UploadError::MalformedContentType(e.to_string()))
}

/// Decodes the gateway-transported request body (standard base64, padded).
pub fn decode_body(body: &str) -> Result<Bytes, UploadError> {
    let decoded = BASE64.decode(body)?;
    Ok(Bytes::from(decoded))
}
