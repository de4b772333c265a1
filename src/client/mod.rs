//! HTTP client for the ViaRAG service.
//!
//! Each method maps onto exactly one remote endpoint. The client holds no
//! mutable state, so a single instance can be cloned and shared across tasks.
//! Dropping a returned future cancels the outstanding request.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::{
    ChunkList, ChunkTextRequest, ClientConfig, ContextMatch, DeleteRequest, DeleteResult,
    DocumentInfo, DocumentList, HealthStatus, PromptRequest, QueryResult, UploadRequest,
    UploadResult, UploadSource,
};

pub const HEALTH_PATH: &str = "/api/v1/simple/health";
pub const QUERY_PATH: &str = "/api/v1/simple/query/";
pub const DIRECT_QUERY_PATH: &str = "/api/v1/simple/query/direct";
pub const MATCH_PATH: &str = "/api/v1/simple/query/match";
pub const UPLOAD_PATH: &str = "/api/v1/simple/upload";
pub const CHUNK_PATH: &str = "/api/v1/simple/chunk";
pub const LIST_DOCUMENTS_PATH: &str = "/api/v1/advanced/documents/list";
pub const DELETE_DOCUMENT_PATH: &str = "/api/v1/advanced/delete/delete/by-doc-id";

const OCTET_STREAM: &str = "application/octet-stream";

/// Client for the ViaRAG ingestion and retrieval API.
#[derive(Debug, Clone)]
pub struct ViaRagClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ViaRagClient {
    /// Create a client. Every request carries the bearer credential and a
    /// JSON content type unless the body sets its own.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            ClientError::InvalidConfig(format!("invalid base URL '{}': {}", base_url, e))
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|_| {
            ClientError::InvalidConfig("API key is not a valid header value".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Get the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check whether the service is up.
    pub async fn health_check(&self) -> Result<HealthStatus, ClientError> {
        self.send(self.request(Method::GET, HEALTH_PATH)).await
    }

    /// Retrieve the `top_k` (default 5) most relevant chunks and generate an
    /// answer from them.
    pub async fn query(&self, prompt: &str, top_k: Option<u32>) -> Result<QueryResult, ClientError> {
        self.post_json(QUERY_PATH, &PromptRequest::ranked(prompt, top_k))
            .await
    }

    /// Send the prompt straight to the model, skipping retrieval.
    pub async fn direct_query(&self, prompt: &str) -> Result<QueryResult, ClientError> {
        self.post_json(DIRECT_QUERY_PATH, &PromptRequest::direct(prompt))
            .await
    }

    /// Return the `top_k` (default 5) matching chunks without generation.
    pub async fn match_context(
        &self,
        prompt: &str,
        top_k: Option<u32>,
    ) -> Result<Vec<ContextMatch>, ClientError> {
        self.post_json(MATCH_PATH, &PromptRequest::ranked(prompt, top_k))
            .await
    }

    /// Upload a document as multipart form data.
    ///
    /// Parts: `file`, then `metadata` and `chunking_config` as JSON text when
    /// present. Absent options produce no part at all.
    pub async fn upload_document(&self, request: UploadRequest) -> Result<UploadResult, ClientError> {
        let form = build_upload_form(request).await?;
        self.send(self.request(Method::POST, UPLOAD_PATH).multipart(form))
            .await
    }

    /// Split text into chunks on the service and return them in order.
    pub async fn chunk_text(&self, request: &ChunkTextRequest) -> Result<Vec<String>, ClientError> {
        let list: ChunkList = self.post_json(CHUNK_PATH, request).await?;
        Ok(list.chunks)
    }

    pub async fn list_documents(&self) -> Result<Vec<DocumentInfo>, ClientError> {
        let list: DocumentList = self
            .send(self.request(Method::GET, LIST_DOCUMENTS_PATH))
            .await?;
        Ok(list.documents)
    }

    /// Remove every indexed chunk belonging to `doc_id`.
    pub async fn delete_document(&self, doc_id: &str) -> Result<DeleteResult, ClientError> {
        self.post_json(DELETE_DOCUMENT_PATH, &DeleteRequest { doc_id })
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "sending request");
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let path = response.url().path().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %path, "service rejected request");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(status = status.as_u16(), %path, bytes = body.len(), "received response");

        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse {
            message: e.to_string(),
            body,
        })
    }
}

/// Assemble the multipart body for an upload.
async fn build_upload_form(request: UploadRequest) -> Result<Form, ClientError> {
    let file_part = match request.source {
        UploadSource::Path(path) => {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    ClientError::InvalidUpload(format!(
                        "path has no file name: {}",
                        path.display()
                    ))
                })?;
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            let data = tokio::fs::read(&path).await?;
            Part::bytes(data)
                .file_name(filename)
                .mime_str(mime.essence_str())?
        }
        UploadSource::Bytes { data, filename } => {
            if filename.trim().is_empty() {
                return Err(ClientError::InvalidUpload(
                    "a filename is required when uploading a byte buffer".to_string(),
                ));
            }
            Part::bytes(data).file_name(filename).mime_str(OCTET_STREAM)?
        }
    };

    let mut form = Form::new().part("file", file_part);

    if let Some(metadata) = request.metadata {
        let json = serde_json::to_string(&metadata)
            .map_err(|e| ClientError::InvalidUpload(e.to_string()))?;
        form = form.text("metadata", json);
    }

    if let Some(chunking) = request.chunking {
        let json = serde_json::to_string(&chunking)
            .map_err(|e| ClientError::InvalidUpload(e.to_string()))?;
        form = form.text("chunking_config", json);
    }

    Ok(form)
}
