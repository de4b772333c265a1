use anyhow::Result;

use crate::cli::ConnectionArgs;
use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat};

pub async fn handle_health(
    connection: &ConnectionArgs,
    format: OutputFormat,
    _verbose: bool,
) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);
    let client = connection.client(&config)?;

    match client.health_check().await {
        Ok(health) => {
            print!("{}", formatter.format_health(&health, client.base_url()));
            Ok(())
        }
        Err(e) => {
            if e.is_connection() {
                eprintln!(
                    "Hint: could not reach {}. Check --base-url and your network.",
                    client.base_url()
                );
            } else if matches!(e.status_code(), Some(401 | 403)) {
                eprintln!("Hint: the API key was rejected. Check VIARAG_API_KEY.");
            }
            Err(e.into())
        }
    }
}
