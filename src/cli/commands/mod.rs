mod chunk;
mod config;
mod docs;
mod health;
mod query;

pub use chunk::{ChunkArgs, ChunkingArgs};
pub use config::ConfigCommand;
pub use docs::DocsCommand;
pub use query::{MatchArgs, QueryArgs};

pub use chunk::handle_chunk;
pub use config::handle_config;
pub use docs::handle_docs;
pub use health::handle_health;
pub use query::{handle_match, handle_query};
