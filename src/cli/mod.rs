//! CLI module for the ViaRAG client.

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::client::ViaRagClient;
use crate::models::{Config, OutputFormat};

/// Command-line client for the ViaRAG document ingestion and RAG service.
#[derive(Debug, Parser)]
#[command(name = "viarag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text, json, or markdown"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection overrides; each falls back to the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    #[arg(
        long,
        global = true,
        env = "VIARAG_API_KEY",
        hide_env_values = true,
        help = "API key sent as a bearer token"
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        global = true,
        env = "VIARAG_BASE_URL",
        help = "Service base URL"
    )]
    pub base_url: Option<String>,

    #[arg(
        long,
        global = true,
        env = "VIARAG_TIMEOUT_MS",
        help = "Request timeout in milliseconds"
    )]
    pub timeout_ms: Option<u64>,
}

impl ConnectionArgs {
    /// Build a client from these overrides layered over `config`.
    pub fn client(&self, config: &Config) -> Result<ViaRagClient> {
        let client_config = config.client_config(
            self.api_key.clone(),
            self.base_url.clone(),
            self.timeout_ms,
        )?;
        ViaRagClient::new(&client_config).context("failed to create ViaRAG client")
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the service is reachable and healthy
    Health,

    /// Ask a question answered from uploaded documents (or directly with --direct)
    Query(commands::QueryArgs),

    /// Show the context chunks that best match a prompt
    Match(commands::MatchArgs),

    /// Split text into chunks using the service's splitter
    Chunk(commands::ChunkArgs),

    /// Manage uploaded documents (list, upload, delete)
    #[command(subcommand)]
    Docs(commands::DocsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_with_top_k() {
        let cli = Cli::try_parse_from(["viarag", "query", "what is rag?", "--top-k", "3"]).unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.prompt, "what is rag?");
                assert_eq!(args.top_k, Some(3));
                assert!(!args.direct);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_direct_conflicts_with_top_k() {
        let result = Cli::try_parse_from(["viarag", "query", "hi", "--direct", "--top-k", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_connection_flags() {
        let cli = Cli::try_parse_from([
            "viarag",
            "docs",
            "list",
            "--api-key",
            "k",
            "--base-url",
            "http://127.0.0.1:8000",
            "-f",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.connection.api_key.as_deref(), Some("k"));
        assert_eq!(
            cli.connection.base_url.as_deref(),
            Some("http://127.0.0.1:8000")
        );
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Docs(commands::DocsCommand::List)
        ));
    }

    #[test]
    fn test_connection_args_build_client() {
        let args = ConnectionArgs {
            api_key: Some("k".to_string()),
            base_url: Some("http://127.0.0.1:8000/".to_string()),
            timeout_ms: Some(1_000),
        };
        let client = args.client(&Config::default()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.timeout(), std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_upload_chunking_flags() {
        let cli = Cli::try_parse_from([
            "viarag",
            "docs",
            "upload",
            "a.pdf",
            "b.pdf",
            "--chunk-size",
            "512",
        ])
        .unwrap();
        match cli.command {
            Commands::Docs(commands::DocsCommand::Upload {
                paths, chunking, ..
            }) => {
                assert_eq!(paths.len(), 2);
                let config = chunking.to_config().unwrap();
                assert_eq!(config.chunk_size, Some(512));
                assert!(config.chunk_overlap.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
