//! Results host access, shared by the viewer CLI and scripts.
//!
//! This crate is the single source of truth for loading table payloads:
//! URL assembly, the one-shot fetch, JSON decoding, saved viewer defaults.
//!
//! No table logic. No retries.

mod client;
mod config;

pub use client::{decode_rows, join_base, FetchError, ResultsClient};
pub use config::{config_file_path, delete_config, load_config, save_config, ViewerConfig};
