#![forbid(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod grafana;
pub mod http;
pub mod json;
pub mod prometheus;
pub mod report;

pub use analyzer::Analyzer;
pub use config::{Cli, Command, Settings};
pub use error::{AnalyzerError, AnalyzerResult};
