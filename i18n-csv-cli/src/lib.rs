//! CLI library for testing purposes

pub mod config;
pub mod export;
pub mod generate;
pub mod report;
pub mod validation;
pub mod watch;

pub use config::{FileConfig, load_config};
pub use generate::SourceOptions;
