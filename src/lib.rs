//! Client SDK for the ViaRAG document ingestion and retrieval-augmented
//! generation service, plus the `viarag` command-line front end.
//!
//! ```rust,no_run
//! use viarag::{ClientConfig, ViaRagClient};
//!
//! # async fn run() -> Result<(), viarag::ClientError> {
//! let client = ViaRagClient::new(&ClientConfig::new("my-api-key"))?;
//! let answer = client.query("What changed in Q3?", None).await?;
//! println!("{}", answer.response);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod utils;

pub use cli::{Cli, Commands};
pub use client::ViaRagClient;
pub use error::{ClientError, ConfigError};
pub use models::{
    ChunkTextRequest, ChunkingConfig, ClientConfig, Config, ContextMatch, DeleteResult,
    DocumentInfo, HealthStatus, OutputFormat, QueryResult, UploadRequest, UploadResult,
    UploadSource,
};
