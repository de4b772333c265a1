//! Document management commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use super::chunk::ChunkingArgs;
use crate::cli::ConnectionArgs;
use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat, UploadRequest};

#[derive(Debug, Subcommand)]
pub enum DocsCommand {
    /// List every document known to the index
    List,

    /// Upload one or more files for ingestion
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Metadata attached to each upload, as a JSON object
        #[arg(long, short = 'm')]
        metadata: Option<String>,

        #[command(flatten)]
        chunking: ChunkingArgs,
    },

    /// Delete all indexed chunks of a document
    Delete {
        /// Document ID as shown by `docs list`
        #[arg(required = true)]
        doc_id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        force: bool,
    },
}

pub async fn handle_docs(
    cmd: DocsCommand,
    connection: &ConnectionArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    match cmd {
        DocsCommand::List => handle_list(connection, format).await,
        DocsCommand::Upload {
            paths,
            metadata,
            chunking,
        } => handle_upload(paths, metadata, chunking, connection, format, verbose).await,
        DocsCommand::Delete { doc_id, force } => {
            handle_delete(doc_id, force, connection, format).await
        }
    }
}

async fn handle_list(connection: &ConnectionArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);
    let client = connection.client(&config)?;

    let documents = client.list_documents().await?;

    print!("{}", formatter.format_documents(&documents));
    Ok(())
}

fn parse_metadata(raw: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("metadata must be valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("metadata must be a JSON object"),
    }
}

async fn handle_upload(
    paths: Vec<PathBuf>,
    metadata: Option<String>,
    chunking: ChunkingArgs,
    connection: &ConnectionArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let metadata = metadata.as_deref().map(parse_metadata).transpose()?;
    let chunking = chunking.to_config();

    for path in &paths {
        if !path.is_file() {
            anyhow::bail!("not a file: {}", path.display());
        }
    }

    let config = Config::load()?;
    let formatter = get_formatter(format);
    let client = connection.client(&config)?;

    if verbose {
        eprintln!("Uploading {} file(s) to {}", paths.len(), client.base_url());
        if let Some(ref c) = chunking {
            eprintln!(
                "  Chunking: size {}, overlap {}, splitter {}",
                c.chunk_size(),
                c.chunk_overlap(),
                c.splitter()
            );
        }
    }

    let pb = if paths.len() > 1 {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                .context("invalid progress template")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(paths.len());
    let mut failed = 0usize;

    for path in &paths {
        let mut request = UploadRequest::from_path(path);
        if let Some(ref m) = metadata {
            request = request.with_metadata(m.clone());
        }
        if let Some(ref c) = chunking {
            request = request.with_chunking(c.clone());
        }

        match client.upload_document(request).await {
            Ok(result) => results.push(result),
            Err(e) => {
                failed += 1;
                let message = formatter.format_error(&format!("{}: {}", path.display(), e));
                if pb.is_hidden() {
                    eprint!("{}", message);
                } else {
                    pb.println(message.trim_end());
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    for result in &results {
        print!("{}", formatter.format_upload(result));
    }

    if failed > 0 {
        anyhow::bail!("{} of {} upload(s) failed", failed, paths.len());
    }
    Ok(())
}

async fn handle_delete(
    doc_id: String,
    force: bool,
    connection: &ConnectionArgs,
    format: OutputFormat,
) -> Result<()> {
    let doc_id = doc_id.trim().to_string();
    if doc_id.is_empty() {
        anyhow::bail!("document ID cannot be empty");
    }

    let config = Config::load()?;
    let formatter = get_formatter(format);

    if !force {
        println!(
            "This will delete all indexed chunks of document '{}'. Continue? [y/N]",
            doc_id
        );
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.format_message("Cancelled."));
            return Ok(());
        }
    }

    let client = connection.client(&config)?;
    let result = client.delete_document(&doc_id).await?;

    print!("{}", formatter.format_message(&result.message));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata_object() {
        let map = parse_metadata(r#"{"team": "finance", "year": 2024}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["team"], "finance");
    }

    #[test]
    fn test_parse_metadata_rejects_non_objects() {
        assert!(parse_metadata("[1, 2]").is_err());
        assert!(parse_metadata("\"text\"").is_err());
        assert!(parse_metadata("{not json").is_err());
    }
}
