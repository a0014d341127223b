//! codeswap - batch source code conversion through a code-generation service
//!
//! The library walks an input file or directory, sends every file with the
//! configured extension to a [`CodeGenerator`] and writes the converted code
//! under the output directory.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod processors;

// Re-export key types for convenience
pub use crate::core::{
    client::{ChatClient, CodeGenerator, ConversionClient, GeneratedReply, OutputFormat},
    config::{AppConfig, ClientConfig, RunConfig},
    errors::{CodeswapError, Result},
    models::{ConversionRequest, ConversionResult, FileOutcome, FileTask, OutputLayout, RunSummary},
    sanitizer::sanitize,
};

pub use crate::processors::{
    file::FileProcessor,
    output::OutputWriter,
    walker::{discover, SourceFile, TreeWalker},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
