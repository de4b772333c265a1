use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::cli::output::get_formatter;
use crate::models::{ChunkTextRequest, ChunkingConfig, Config, OutputFormat};

/// Chunking overrides shared by `chunk` and `docs upload`.
#[derive(Debug, Clone, Default, Args)]
pub struct ChunkingArgs {
    #[arg(long, help = "Target chunk size in characters (default 1000)")]
    pub chunk_size: Option<u32>,

    #[arg(long, help = "Overlap between consecutive chunks (default 200)")]
    pub chunk_overlap: Option<u32>,

    #[arg(long, help = "Splitter strategy (default \"recursive\")")]
    pub splitter: Option<String>,
}

impl ChunkingArgs {
    /// Only the flags actually given; `None` when none were.
    pub fn to_config(&self) -> Option<ChunkingConfig> {
        let config = ChunkingConfig {
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            splitter: self.splitter.clone(),
        };
        (!config.is_empty()).then_some(config)
    }
}

#[derive(Debug, Args)]
pub struct ChunkArgs {
    #[arg(help = "Text to split (reads stdin when omitted)")]
    pub text: Option<String>,

    #[arg(long, conflicts_with = "text", help = "Read the text from a file")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub chunking: ChunkingArgs,
}

fn read_input(args: &ChunkArgs) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }
    if let Some(ref path) = args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

pub async fn handle_chunk(
    args: ChunkArgs,
    connection: &ConnectionArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let text = read_input(&args)?;
    if text.trim().is_empty() {
        anyhow::bail!("no text to chunk");
    }

    let config = Config::load()?;
    let formatter = get_formatter(format);
    let client = connection.client(&config)?;

    let request = ChunkTextRequest::new(text)
        .with_config(&args.chunking.to_config().unwrap_or_default());

    if verbose {
        eprintln!(
            "Chunking {} chars (size {}, overlap {}, splitter {})",
            request.text.chars().count(),
            request.chunk_size,
            request.chunk_overlap,
            request.splitter
        );
    }

    let chunks = client.chunk_text(&request).await?;

    print!("{}", formatter.format_chunks(&chunks));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_means_no_config() {
        assert!(ChunkingArgs::default().to_config().is_none());
    }

    #[test]
    fn test_partial_flags() {
        let args = ChunkingArgs {
            splitter: Some("sentence".to_string()),
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.splitter.as_deref(), Some("sentence"));
        assert!(config.chunk_size.is_none());
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "some text").unwrap();

        let args = ChunkArgs {
            text: None,
            file: Some(path),
            chunking: ChunkingArgs::default(),
        };
        assert_eq!(read_input(&args).unwrap(), "some text");
    }

    #[test]
    fn test_read_input_prefers_inline_text() {
        let args = ChunkArgs {
            text: Some("inline".to_string()),
            file: None,
            chunking: ChunkingArgs::default(),
        };
        assert_eq!(read_input(&args).unwrap(), "inline");
    }
}
