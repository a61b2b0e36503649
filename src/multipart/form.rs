use crate::error::UploadError;
use bytes::Bytes;
use multer::Multipart;
use std::collections::HashMap;
use std::convert::Infallible;

/// A file field extracted from the form: the client's original filename,
/// the declared content type from the part header (empty when absent) and
/// the raw content bytes.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub content: Bytes,
}

#[derive(Debug, Clone)]
pub enum FormField {
    Text(String),
    File(FileDescriptor),
}

/// The parsed form, keyed by field name. Built once per request and
/// read-only afterward. Duplicate field names overwrite earlier ones.
#[derive(Debug, Default)]
pub struct FieldSet {
    fields: HashMap<String, FormField>,
}

impl FieldSet {
    pub fn file(&self, name: &str) -> Option<&FileDescriptor> {
        match self.fields.get(name) {
            Some(FormField::File(descriptor)) => Some(descriptor),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FormField::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parses the decoded request body into a [`FieldSet`].
///
/// Parts carrying a `filename` disposition parameter are files, the rest
/// are text. Unlike the verification scan this parse is strict: any
/// malformed part fails the whole request.
pub async fn parse_form(body: Bytes, boundary: &str) -> Result<FieldSet, UploadError> {
    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = Multipart::new(stream, boundary);

    let mut fields = HashMap::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(UploadError::RequestParse(e.to_string())),
        };

        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_default();

        match file_name {
            Some(file_name) => {
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::RequestParse(e.to_string()))?;
                fields.insert(
                    field_name.clone(),
                    FormField::File(FileDescriptor {
                        field_name,
                        file_name,
                        content_type,
                        content,
                    }),
                );
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| UploadError::RequestParse(e.to_string()))?;
                fields.insert(field_name, FormField::Text(text));
            }
        }
    }

    Ok(FieldSet { fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "XYZ123";

    fn body(parts: &str) -> Bytes {
        Bytes::from(format!("{parts}--{BOUNDARY}--\r\n"))
    }

    fn file_part(name: &str, filename: &str, content_type: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {content}\r\n"
        )
    }

    fn text_part(name: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
             {content}\r\n"
        )
    }

    #[tokio::test]
    async fn test_parse_form_classifies_fields() {
        let raw = body(&format!(
            "{}{}",
            file_part("file", "cat.png", "image/png", "pngbytes"),
            text_part("caption", "a cat")
        ));

        let fields = parse_form(raw, BOUNDARY).await.unwrap();
        assert_eq!(fields.len(), 2);

        let file = fields.file("file").unwrap();
        assert_eq!(file.field_name, "file");
        assert_eq!(file.file_name, "cat.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.content.as_ref(), b"pngbytes");

        assert_eq!(fields.text("caption"), Some("a cat"));
        assert!(fields.file("caption").is_none());
    }

    #[tokio::test]
    async fn test_parse_form_duplicate_names_last_wins() {
        let raw = body(&format!(
            "{}{}",
            file_part("file", "first.txt", "text/plain", "first"),
            file_part("file", "second.txt", "text/plain", "second")
        ));

        let fields = parse_form(raw, BOUNDARY).await.unwrap();
        assert_eq!(fields.len(), 1);
        let file = fields.file("file").unwrap();
        assert_eq!(file.file_name, "second.txt");
        assert_eq!(file.content.as_ref(), b"second");
    }

    #[tokio::test]
    async fn test_parse_form_missing_content_type_is_empty() {
        let raw = body(&format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"blob\"\r\n\r\n\
             data\r\n"
        ));

        let fields = parse_form(raw, BOUNDARY).await.unwrap();
        assert_eq!(fields.file("file").unwrap().content_type, "");
    }

    #[tokio::test]
    async fn test_parse_form_truncated_body_is_an_error() {
        let raw = Bytes::from(file_part("file", "cat.png", "image/png", "pngbytes"));
        let err = parse_form(raw, BOUNDARY).await.unwrap_err();
        assert!(matches!(err, UploadError::RequestParse(_)));
    }

    #[tokio::test]
    async fn test_parse_form_empty_terminated_body() {
        let raw = Bytes::from(format!("--{BOUNDARY}--\r\n"));
        let fields = parse_form(raw, BOUNDARY).await.unwrap();
        assert!(fields.is_empty());
    }
}
