use axum::http::HeaderMap;
use bytes::Bytes;
use multer::Multipart;
use std::convert::Infallible;

/// A single multipart part: its header set and fully buffered payload.
#[derive(Debug, Clone)]
pub struct Part {
    pub headers: HeaderMap,
    pub bytes: Bytes,
}

/// Lazy, finite, non-restartable iterator over the parts of a multipart
/// body.
///
/// Scanning is best-effort: a parse error mid-stream ends the sequence with
/// a warning instead of failing the request. Parts already yielded remain
/// valid; the damaged part and everything after it are dropped. Once
/// exhausted a scanner stays exhausted.
pub struct PartScanner {
    multipart: Multipart<'static>,
    done: bool,
}

impl PartScanner {
    pub fn new(body: Bytes, boundary: &str) -> Self {
        let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
        Self {
            multipart: Multipart::new(stream, boundary),
            done: false,
        }
    }

    pub async fn next_part(&mut self) -> Option<Part> {
        if self.done {
            return None;
        }

        let field = match self.multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                tracing::warn!("Multipart scan stopped early: {}", e);
                self.done = true;
                return None;
            }
        };

        let headers = field.headers().clone();
        match field.bytes().await {
            Ok(bytes) => Some(Part { headers, bytes }),
            Err(e) => {
                tracing::warn!("Multipart scan stopped early: {}", e);
                self.done = true;
                None
            }
        }
    }
}
