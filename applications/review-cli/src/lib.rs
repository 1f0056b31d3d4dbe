//! Clip review command-line front end
//!
//! Runs the review session pipeline over local files: analyze a clip,
//! process a batch into a directory, or process and upload a batch to the
//! configured server.

pub mod commands;
pub mod config;
pub mod local;

pub use commands::{analyze, process, save, AnalysisReport, OptionOverrides};
pub use config::CliConfig;
