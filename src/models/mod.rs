mod config;
mod document;
mod format;
mod health;
mod query;

pub use config::{
    ApiConfig, ClientConfig, Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, OutputConfig,
};
pub use document::{
    ChunkTextRequest, ChunkingConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_SPLITTER,
    DeleteResult, DocumentInfo, UploadRequest, UploadResult, UploadSource,
};
pub(crate) use document::{ChunkList, DeleteRequest, DocumentList};
pub use format::OutputFormat;
pub use health::HealthStatus;
pub use query::{ContextMatch, DEFAULT_TOP_K, QueryResult};
pub(crate) use query::PromptRequest;
