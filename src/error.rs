use thiserror::Error;

/// Failures surfaced to the client by the upload pipeline.
///
/// Every variant maps to a 400 response whose plain-text body is the
/// Display text. Storage variants keep their cause for logging but
/// stay opaque on the wire.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to parse multipart form: {0}")]
    RequestParse(String),

    #[error("missing file")]
    MissingFile,

    #[error("Failed to parse media type from header: {0}")]
    MalformedContentType(String),

    #[error("Failed to decode request body: {0}")]
    BodyDecode(#[from] base64::DecodeError),

    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    #[error("no part matched the declared content type")]
    NoMatchingPart,

    #[error("Failed to connect to storage")]
    StorageSession(anyhow::Error),

    #[error("Failed to upload to storage")]
    Upload(anyhow::Error),
}
