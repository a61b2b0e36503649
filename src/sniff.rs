use crate::multipart::scan::PartScanner;
use bytes::Bytes;

/// Binary data bytes per the WHATWG MIME sniffing rules. Any of these in
/// the inspected prefix means the payload is not plain text.
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f)
}

/// Sniffs the effective content type of a payload from its leading bytes.
///
/// Known magic-byte signatures win. Otherwise the first 512 bytes decide
/// between `text/plain; charset=utf-8` and `application/octet-stream`,
/// mirroring the standard content-detection algorithm.
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type();
    }

    let prefix = &bytes[..bytes.len().min(512)];
    if prefix.iter().copied().any(is_binary_byte) {
        "application/octet-stream"
    } else {
        "text/plain; charset=utf-8"
    }
}

/// Drives the scanner to exhaustion and returns the payload of the last
/// part whose sniffed type equals the declared one, both trimmed.
///
/// Every part is inspected regardless of its field name, and a later match
/// replaces an earlier one. That is deliberate, long-standing behavior:
/// clients sending several parts of the declared type get the final one
/// stored. `None` means nothing matched and the upload must be rejected.
pub async fn select_payload(mut scanner: PartScanner, declared: &str) -> Option<Bytes> {
    let declared = declared.trim();
    let mut selected = None;
    let mut scanned = 0usize;

    while let Some(part) = scanner.next_part().await {
        scanned += 1;
        let sniffed = sniff_content_type(&part.bytes);
        if sniffed.trim() == declared {
            selected = Some(part.bytes);
        }
    }

    tracing::debug!(
        "Scanned {} part(s) against declared type {:?}",
        scanned,
        declared
    );
    selected
}
