//! Document, upload and chunking models.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: u32 = 1000;
pub const DEFAULT_CHUNK_OVERLAP: u32 = 200;
pub const DEFAULT_SPLITTER: &str = "recursive";

/// One entry of the document listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub doc_id: String,
    pub filename: String,
}

/// Identifiers of a newly ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub doc_id: String,
    pub filename: String,
    pub message: String,
}

/// Status message returned after deleting a document's chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub message: String,
}

/// Chunking settings sent alongside an upload.
///
/// Unset fields are left out of the encoded JSON so the service applies its
/// own defaults. No validation happens client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_overlap: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitter: Option<String>,
}

impl ChunkingConfig {
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    #[must_use]
    pub fn with_chunk_overlap(mut self, chunk_overlap: u32) -> Self {
        self.chunk_overlap = Some(chunk_overlap);
        self
    }

    #[must_use]
    pub fn with_splitter(mut self, splitter: impl Into<String>) -> Self {
        self.splitter = Some(splitter.into());
        self
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    pub fn chunk_overlap(&self) -> u32 {
        self.chunk_overlap.unwrap_or(DEFAULT_CHUNK_OVERLAP)
    }

    pub fn splitter(&self) -> &str {
        self.splitter.as_deref().unwrap_or(DEFAULT_SPLITTER)
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_size.is_none() && self.chunk_overlap.is_none() && self.splitter.is_none()
    }
}

/// Body of the remote text-splitting endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkTextRequest {
    pub text: String,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
    pub splitter: String,
}

impl ChunkTextRequest {
    /// Create a request with the default size, overlap and splitter.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            splitter: DEFAULT_SPLITTER.to_string(),
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_chunk_overlap(mut self, chunk_overlap: u32) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }

    #[must_use]
    pub fn with_splitter(mut self, splitter: impl Into<String>) -> Self {
        self.splitter = splitter.into();
        self
    }

    /// Apply any fields set on a [`ChunkingConfig`], keeping defaults for the rest.
    #[must_use]
    pub fn with_config(self, config: &ChunkingConfig) -> Self {
        let splitter = config.splitter().to_string();
        self.with_chunk_size(config.chunk_size())
            .with_chunk_overlap(config.chunk_overlap())
            .with_splitter(splitter)
    }
}

/// Where the bytes of an uploaded file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A file on disk; its final path component is sent as the filename.
    Path(PathBuf),
    /// An in-memory buffer, which carries no name of its own.
    Bytes { data: Vec<u8>, filename: String },
}

impl UploadSource {
    /// Filename announced in the multipart part.
    pub fn filename(&self) -> Option<String> {
        match self {
            UploadSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            UploadSource::Bytes { filename, .. } => Some(filename.clone()),
        }
    }
}

/// A document upload: the file plus optional metadata and chunking settings.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub source: UploadSource,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub chunking: Option<ChunkingConfig>,
}

impl UploadRequest {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(UploadSource::Path(path.as_ref().to_path_buf()))
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self::new(UploadSource::Bytes {
            data: data.into(),
            filename: filename.into(),
        })
    }

    pub fn new(source: UploadSource) -> Self {
        Self {
            source,
            metadata: None,
            chunking: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = Some(chunking);
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentList {
    pub documents: Vec<DocumentInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChunkList {
    pub chunks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteRequest<'a> {
    pub doc_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_config_omits_unset_fields() {
        let config = ChunkingConfig::default().with_chunk_size(500);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"chunk_size":500}"#);

        let json = serde_json::to_string(&ChunkingConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_chunking_config_effective_defaults() {
        let config = ChunkingConfig::default();
        assert!(config.is_empty());
        assert_eq!(config.chunk_size(), 1000);
        assert_eq!(config.chunk_overlap(), 200);
        assert_eq!(config.splitter(), "recursive");
    }

    #[test]
    fn test_chunk_text_request_defaults() {
        let body = serde_json::to_value(ChunkTextRequest::new("abc")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "text": "abc",
                "chunk_size": 1000,
                "chunk_overlap": 200,
                "splitter": "recursive",
            })
        );
    }

    #[test]
    fn test_chunk_text_request_with_partial_config() {
        let config = ChunkingConfig::default().with_splitter("token");
        let request = ChunkTextRequest::new("abc").with_config(&config);
        assert_eq!(request.chunk_size, 1000);
        assert_eq!(request.chunk_overlap, 200);
        assert_eq!(request.splitter, "token");
    }

    #[test]
    fn test_upload_source_filename() {
        let source = UploadSource::Path(PathBuf::from("/tmp/reports/q3.pdf"));
        assert_eq!(source.filename().as_deref(), Some("q3.pdf"));

        let request = UploadRequest::from_bytes(b"hello".to_vec(), "notes.txt");
        assert_eq!(request.source.filename().as_deref(), Some("notes.txt"));
        assert!(request.metadata.is_none());
        assert!(request.chunking.is_none());
    }

    #[test]
    fn test_delete_request_shape() {
        let body = serde_json::to_value(DeleteRequest { doc_id: "d1" }).unwrap();
        assert_eq!(body, serde_json::json!({"doc_id": "d1"}));
    }
}
