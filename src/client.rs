//! # Photos Library Client Module
//!
//! Client HTTP per il protocollo a due fasi di Google Photos.
//!
//! ## Responsabilità:
//! - Fase 1: POST dei byte grezzi a `/v1/uploads`, il body di risposta
//!   (testo semplice, non JSON) è il token di upload
//! - Fase 2: POST JSON a `/v1/mediaItems:batchCreate` con esattamente un
//!   descrittore `{description, simpleMediaItem: {uploadToken}}`
//! - Inietta l'header `Authorization: Bearer <token>` su ogni richiesta
//! - Espone il trait `MediaLibrary`, il seam tra l'engine di
//!   orchestrazione e il protocollo di rete
//!
//! ## Vincoli del protocollo:
//! - Upload non-resumable: l'intero file viene spedito in un'unica
//!   richiesta (`X-Goog-Upload-Protocol: raw`), streamato da disco senza
//!   bufferizzarlo in memoria
//! - Il token resta valido per più chiamate di attach entro il TTL del
//!   servizio: i retry della fase 2 riusano lo stesso token

use crate::config::Config;
use crate::error::{AttachError, UploadError};
use crate::job::{AttachResult, MediaJob, UploadToken};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Seam between the worker pool and the remote library. Implementations
/// must be safe to share across workers behind an `Arc`.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Phase 1: stream the file bytes and obtain an upload token.
    async fn upload_media(&self, job: &MediaJob) -> Result<UploadToken, UploadError>;

    /// Phase 2: commit a staged token as a new library item.
    async fn attach_media(&self, token: &UploadToken) -> Result<AttachResult, AttachError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchCreateRequest {
    new_media_items: Vec<NewMediaItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewMediaItem {
    description: String,
    simple_media_item: SimpleMediaItem,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimpleMediaItem {
    upload_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchCreateResponse {
    #[serde(default)]
    new_media_item_results: Vec<NewMediaItemResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewMediaItemResult {
    media_item: Option<RemoteMediaItem>,
    status: Option<RemoteStatus>,
}

#[derive(Debug, Deserialize)]
struct RemoteMediaItem {
    id: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteStatus {
    message: Option<String>,
}

/// HTTP client for the Google Photos Library API.
#[derive(Clone, Debug)]
pub struct PhotosClient {
    client: reqwest::Client,
    upload_base: String,
    api_base: String,
    access_token: String,
}

impl PhotosClient {
    /// Create a client with the given bearer token and endpoint config.
    /// No overall request timeout: large video uploads are legitimate
    /// long-running requests. Only the connect phase is bounded.
    pub fn new(access_token: String, config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            upload_base: config.upload_base_url.trim_end_matches('/').to_string(),
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.access_token))
    }
}

#[async_trait]
impl MediaLibrary for PhotosClient {
    async fn upload_media(&self, job: &MediaJob) -> Result<UploadToken, UploadError> {
        let file = tokio::fs::File::open(&job.path).await?;
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));

        let url = format!("{}/v1/uploads", self.upload_base);
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("X-Goog-Upload-File-Name", &job.display_name)
            .header("X-Goog-Upload-Protocol", "raw")
            .body(body);

        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.is_empty() {
            return Err(UploadError::EmptyToken);
        }

        debug!("Staged {} ({} bytes)", job.display_name, job.size_bytes);

        Ok(UploadToken {
            value: text,
            display_name: job.display_name.clone(),
        })
    }

    async fn attach_media(&self, token: &UploadToken) -> Result<AttachResult, AttachError> {
        let payload = BatchCreateRequest {
            new_media_items: vec![NewMediaItem {
                description: token.display_name.clone(),
                simple_media_item: SimpleMediaItem {
                    upload_token: token.value.clone(),
                },
            }],
        };

        let url = format!("{}/v1/mediaItems:batchCreate", self.api_base);
        let request = self.client.post(&url).json(&payload);
        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttachError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: BatchCreateResponse = response.json().await?;
        let first = parsed
            .new_media_item_results
            .into_iter()
            .next()
            .ok_or(AttachError::EmptyBatch)?;

        // The embedded per-item status is logged but does not fail the job
        // when a media item is present: a successful batchCreate call counts
        // as attach success.
        if let Some(ref item_status) = first.status {
            if let Some(ref message) = item_status.message {
                if message != "Success" && message != "OK" {
                    debug!("batchCreate item status for {}: {}", token.display_name, message);
                }
            }
        }

        let item = first.media_item.ok_or_else(|| AttachError::MissingItem {
            message: first
                .status
                .and_then(|s| s.message)
                .unwrap_or_else(|| "no status message".to_string()),
        })?;

        Ok(AttachResult {
            item_id: item.id,
            display_name: item
                .description
                .unwrap_or_else(|| token.display_name.clone()),
            http_status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn client_for(server: &mockito::ServerGuard) -> PhotosClient {
        let config = Config {
            upload_base_url: server.url(),
            api_base_url: server.url(),
            ..Default::default()
        };
        PhotosClient::new("test-token".to_string(), &config).unwrap()
    }

    fn temp_media_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"raw image bytes").unwrap();
        path
    }

    #[tokio::test]
    async fn test_upload_sends_headers_and_returns_token_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/uploads")
            .match_header("content-type", "application/octet-stream")
            .match_header("x-goog-upload-file-name", "photo.jpg")
            .match_header("x-goog-upload-protocol", "raw")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body("upload-token-123")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_media_file(&temp_dir, "photo.jpg");

        let client = client_for(&server);
        let token = client
            .upload_media(&MediaJob::new(path, 15))
            .await
            .unwrap();

        assert_eq!(token.value, "upload-token-123");
        assert_eq!(token.display_name, "photo.jpg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_non_success_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/uploads")
            .with_status(403)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_media_file(&temp_dir, "photo.jpg");

        let client = client_for(&server);
        let err = client
            .upload_media(&MediaJob::new(path, 15))
            .await
            .unwrap_err();

        match err {
            UploadError::Rejected { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let err = client
            .upload_media(&MediaJob::new(PathBuf::from("/no/such/file.jpg"), 0))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Io(_)));
    }

    #[tokio::test]
    async fn test_attach_sends_single_item_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/mediaItems:batchCreate")
            .match_header("authorization", "Bearer test-token")
            .match_body(mockito::Matcher::Json(json!({
                "newMediaItems": [{
                    "description": "photo.jpg",
                    "simpleMediaItem": { "uploadToken": "upload-token-123" }
                }]
            })))
            .with_status(200)
            .with_body(
                json!({
                    "newMediaItemResults": [{
                        "mediaItem": { "id": "remote-1", "description": "photo.jpg" },
                        "status": { "message": "Success" }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let token = UploadToken {
            value: "upload-token-123".to_string(),
            display_name: "photo.jpg".to_string(),
        };

        let result = client.attach_media(&token).await.unwrap();
        assert_eq!(result.item_id, "remote-1");
        assert_eq!(result.display_name, "photo.jpg");
        assert_eq!(result.http_status, 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_attach_non_success_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/mediaItems:batchCreate")
            .with_status(500)
            .with_body("backend error")
            .create_async()
            .await;

        let client = client_for(&server);
        let token = UploadToken {
            value: "tok".to_string(),
            display_name: "photo.jpg".to_string(),
        };

        let err = client.attach_media(&token).await.unwrap_err();
        match err {
            AttachError::Rejected { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_attach_empty_results_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/mediaItems:batchCreate")
            .with_status(200)
            .with_body(json!({ "newMediaItemResults": [] }).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let token = UploadToken {
            value: "tok".to_string(),
            display_name: "photo.jpg".to_string(),
        };

        let err = client.attach_media(&token).await.unwrap_err();
        assert!(matches!(err, AttachError::EmptyBatch));
    }

    #[tokio::test]
    async fn test_attach_result_without_item_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/mediaItems:batchCreate")
            .with_status(200)
            .with_body(
                json!({
                    "newMediaItemResults": [{
                        "status": { "message": "Internal error" }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let token = UploadToken {
            value: "tok".to_string(),
            display_name: "photo.jpg".to_string(),
        };

        let err = client.attach_media(&token).await.unwrap_err();
        match err {
            AttachError::MissingItem { message } => assert_eq!(message, "Internal error"),
            other => panic!("expected MissingItem, got {:?}", other),
        }
    }
}
