//! HTTP client for the API gateway
//!
//! One POST per upload, `multipart/form-data` with a single part named
//! `image`. The gateway response is parsed as JSON regardless of HTTP
//! status: a 4xx/5xx with a JSON body is handed to the caller the same as a
//! 2xx, matching the gateway's error-as-payload convention.

use crate::constants::APP_VERSION;
use crate::types::UploadSlot;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("response was not valid JSON (HTTP {status}): {source}")]
    InvalidJson {
        status: StatusCode,
        source: serde_json::Error,
    },
}

/// Client for the gateway's two upload endpoints.
#[derive(Clone)]
pub struct GatewayClient {
    base_url: String,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: String) -> Self {
        let user_agent = format!("GatewayImageUploader/{}", APP_VERSION);

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .user_agent(&user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { base_url, client }
    }

    fn upload_url(&self, slot: UploadSlot) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), slot.endpoint_path())
    }

    /// Upload image bytes to the given slot's endpoint.
    ///
    /// The multipart boundary and content-type header come from the form
    /// builder; no other headers are set.
    pub async fn upload_image(
        &self,
        slot: UploadSlot,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<serde_json::Value, UploadError> {
        let url = self.upload_url(slot);
        debug!(slot = slot.label(), url = %url, bytes = bytes.len(), "Sending upload request");

        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        if let Some(mime) = mime_for_file_name(file_name) {
            part = part.mime_str(mime)?;
        }
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(slot = slot.label(), status = %status, "Upload response received");

        serde_json::from_str(&body).map_err(|source| UploadError::InvalidJson { status, source })
    }
}

/// Content type for the `image` part, derived from the file extension. The
/// browser original took this from the platform file handle; `None` leaves
/// the part as application/octet-stream.
pub fn mime_for_file_name(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_url_per_slot() {
        let client = GatewayClient::new("https://gateway.example.com".to_string());
        assert_eq!(
            client.upload_url(UploadSlot::A),
            "https://gateway.example.com/api/a"
        );
        assert_eq!(
            client.upload_url(UploadSlot::B),
            "https://gateway.example.com/api/b"
        );
    }

    #[test]
    fn test_upload_url_trailing_slash() {
        let client = GatewayClient::new("http://localhost:8080/".to_string());
        assert_eq!(client.upload_url(UploadSlot::A), "http://localhost:8080/api/a");
    }

    #[test]
    fn test_mime_for_file_name() {
        assert_eq!(mime_for_file_name("photo.png"), Some("image/png"));
        assert_eq!(mime_for_file_name("photo.JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_file_name("anim.gif"), Some("image/gif"));
        assert_eq!(mime_for_file_name("scan.tiff"), None);
        assert_eq!(mime_for_file_name("no_extension"), None);
    }

    #[tokio::test]
    async fn test_upload_success_parses_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/a")
            .match_body(mockito::Matcher::Regex(r#"name="image""#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"backend": "A", "status": "ok"}).to_string())
            .create_async()
            .await;

        let client = GatewayClient::new(server.url());
        let result = client
            .upload_image(UploadSlot::A, "photo.png", b"fake png bytes".to_vec())
            .await;

        mock.assert_async().await;
        let payload = result.unwrap();
        assert_eq!(payload["backend"], "A");
        assert_eq!(payload["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_slot_b_hits_its_own_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/b")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"backend": "B", "status": "ok"}).to_string())
            .create_async()
            .await;

        let client = GatewayClient::new(server.url());
        let result = client
            .upload_image(UploadSlot::B, "photo.png", vec![0u8; 16])
            .await;

        mock.assert_async().await;
        assert_eq!(result.unwrap()["backend"], "B");
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/a")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(json!({"backend": "A", "error": "disk full"}).to_string())
            .create_async()
            .await;

        let client = GatewayClient::new(server.url());
        let result = client
            .upload_image(UploadSlot::A, "photo.png", vec![1, 2, 3])
            .await;

        // Status codes are passed through as payload, not surfaced as errors.
        let payload = result.unwrap();
        assert_eq!(payload["error"], "disk full");
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/b")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>gateway timeout page</html>")
            .create_async()
            .await;

        let client = GatewayClient::new(server.url());
        let result = client
            .upload_image(UploadSlot::B, "photo.png", vec![1, 2, 3])
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, UploadError::InvalidJson { .. }));
        assert!(err.to_string().contains("200"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_network_error() {
        // Nothing listens on port 1.
        let client = GatewayClient::new("http://127.0.0.1:1".to_string());
        let result = client
            .upload_image(UploadSlot::A, "photo.png", vec![1, 2, 3])
            .await;

        assert!(matches!(result.unwrap_err(), UploadError::Network(_)));
    }
}
