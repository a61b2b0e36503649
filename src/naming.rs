use crate::error::UploadError;
use uuid::Uuid;

/// Splits a declared content type into primary type and subtype.
///
/// Anything other than exactly two non-empty `/`-separated segments is
/// rejected instead of being indexed blindly.
pub fn split_media_type(declared: &str) -> Result<(&str, &str), UploadError> {
    let mut segments = declared.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(primary), Some(subtype), None) if !primary.is_empty() && !subtype.is_empty() => {
            Ok((primary, subtype))
        }
        _ => Err(UploadError::InvalidContentType(declared.to_string())),
    }
}

/// Composes the storage key for a declared type:
/// `<primary>_<uuid>.<subtype>` with a fresh v4 uuid per call, trimmed of
/// surrounding whitespace and control characters (stray carriage returns
/// can arrive from header parsing).
pub fn object_key(declared: &str) -> Result<String, UploadError> {
    let (primary, subtype) = split_media_type(declared)?;
    let key = format!("{}_{}.{}", primary, Uuid::new_v4(), subtype);
    Ok(key
        .trim_matches(|c: char| c.is_whitespace() || c.is_control())
        .to_string())
}
