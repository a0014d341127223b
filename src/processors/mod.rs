//! File discovery, per-file conversion and output writing

pub mod file;
pub mod output;
pub mod walker;
