//! Utility modules.

pub mod text;

pub use text::{PREVIEW_CHARS, preview};
