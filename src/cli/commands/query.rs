use anyhow::Result;
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::cli::output::get_formatter;
use crate::models::{Config, DEFAULT_TOP_K, OutputFormat};

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[arg(required = true, help = "Question to ask")]
    pub prompt: String,

    #[arg(
        long,
        short = 'k',
        help = "Number of context chunks to retrieve (default 5)"
    )]
    pub top_k: Option<u32>,

    #[arg(
        long,
        conflicts_with = "top_k",
        help = "Skip retrieval and send the prompt straight to the model"
    )]
    pub direct: bool,
}

#[derive(Debug, Args)]
pub struct MatchArgs {
    #[arg(required = true, help = "Prompt to match against indexed chunks")]
    pub prompt: String,

    #[arg(
        long,
        short = 'k',
        help = "Number of matches to return (default 5)"
    )]
    pub top_k: Option<u32>,
}

fn validate(prompt: &str, top_k: Option<u32>) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("prompt cannot be empty");
    }
    if top_k == Some(0) {
        anyhow::bail!("top-k must be at least 1");
    }
    Ok(())
}

pub async fn handle_query(
    args: QueryArgs,
    connection: &ConnectionArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    validate(&args.prompt, args.top_k)?;

    let config = Config::load()?;
    let formatter = get_formatter(format);
    let client = connection.client(&config)?;

    if verbose {
        eprintln!("Prompt: \"{}\"", args.prompt);
        if args.direct {
            eprintln!("  Mode: direct (no retrieval)");
        } else {
            eprintln!("  Top-k: {}", args.top_k.unwrap_or(DEFAULT_TOP_K));
        }
    }

    let result = if args.direct {
        client.direct_query(&args.prompt).await?
    } else {
        client.query(&args.prompt, args.top_k).await?
    };

    print!("{}", formatter.format_query_result(&result));
    Ok(())
}

pub async fn handle_match(
    args: MatchArgs,
    connection: &ConnectionArgs,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    validate(&args.prompt, args.top_k)?;

    let config = Config::load()?;
    let formatter = get_formatter(format);
    let client = connection.client(&config)?;

    if verbose {
        eprintln!("Prompt: \"{}\"", args.prompt);
        eprintln!("  Top-k: {}", args.top_k.unwrap_or(DEFAULT_TOP_K));
    }

    let matches = client.match_context(&args.prompt, args.top_k).await?;

    print!("{}", formatter.format_matches(&args.prompt, &matches));
    Ok(())
}
