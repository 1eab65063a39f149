//! Diagview core library.
//!
//! This crate indexes compiler diagnostics of the form
//! `path:line[:column]: message` per source file and joins them back onto
//! the source text for a viewer.
//!
//! High-level modules:
//! - `parse`: Location-prefix parser for single diagnostic lines.
//! - `index`: Note aggregation, path keys, and the terminal sort.
//! - `annotate`: Two-pointer merge of sorted notes with on-disk source.
//! - `models`: Notes, annotated views, stats, and indexer rules.
//! - `config`: Discovery and effective configuration resolution.
//! - `error`: Error types for queries and configuration.
//! - `output`: Human/JSON printers for listing and annotated files.
//! - `server`: JSON HTTP endpoints over a built index.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: Supporting helpers.
pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod output;
pub mod parse;
pub mod server;
pub mod utils;

pub use annotate::load;
pub use error::IndexError;
pub use index::{File, Index, PathCase};
pub use models::rules::IndexConfig;
pub use models::{AnnotatedFile, Note};
