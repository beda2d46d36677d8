//! Request bodies assembled by the forms

use serde::Serialize;

/// File picked in an upload input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Guess the MIME type from the extension
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FileUpload),
}

/// Ordered multipart form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<(String, PartValue)>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push((name.to_string(), PartValue::Text(value.into())));
        self
    }

    pub fn optional_text(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    /// List fields travel as a JSON-encoded string array
    pub fn json_list(self, name: &str, values: &[String]) -> Self {
        let encoded = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
        self.text(name, encoded)
    }

    pub fn file(mut self, name: &str, file: Option<FileUpload>) -> Self {
        if let Some(file) = file {
            self.parts.push((name.to_string(), PartValue::File(file)));
        }
        self
    }

    pub fn parts(&self) -> &[(String, PartValue)] {
        &self.parts
    }

    pub fn get(&self, name: &str) -> Option<&PartValue> {
        self.parts
            .iter()
            .find(|(part_name, _)| part_name == name)
            .map(|(_, value)| value)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(PartValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn into_parts(self) -> Vec<(String, PartValue)> {
        self.parts
    }
}

/// What a create or update call sends
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(MultipartBody),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

impl From<MultipartBody> for RequestBody {
    fn from(body: MultipartBody) -> Self {
        Self::Multipart(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_skips_absent_fields() {
        let body = MultipartBody::new()
            .text("firstName", "Anna")
            .optional_text("middleName", None::<String>)
            .file("photo", None);

        assert_eq!(body.parts().len(), 1);
        assert!(body.get("middleName").is_none());
    }

    #[test]
    fn test_json_list_encoding() {
        let body = MultipartBody::new().json_list("tags", &["a".to_string(), "b".to_string()]);
        assert_eq!(body.get_text("tags"), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(FileUpload::from_bytes("Photo.JPG", vec![]).mime_type, "image/jpeg");
        assert_eq!(FileUpload::from_bytes("icon.svg", vec![]).mime_type, "image/svg+xml");
        assert_eq!(FileUpload::from_bytes("blob", vec![]).mime_type, "application/octet-stream");
    }
}
