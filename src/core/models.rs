//! Core data models for conversion runs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How converted files are laid out under the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputLayout {
    /// Every output lands directly in the output directory; same-named inputs overwrite each other
    #[default]
    Flat,
    /// Input subdirectories are recreated under the output directory
    Mirror,
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLayout::Flat => write!(f, "flat"),
            OutputLayout::Mirror => write!(f, "mirror"),
        }
    }
}

/// Conversion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub source_language: String,
    pub destination_language: String,
    pub content: String,
}

impl ConversionRequest {
    pub fn new(
        source_language: impl Into<String>,
        destination_language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            destination_language: destination_language.into(),
            content: content.into(),
        }
    }
}

/// Sanitized conversion result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub text: String,
}

impl ConversionResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A single file visited during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub input_path: PathBuf,
    pub input_extension: String,
    pub output_dir: PathBuf,
    pub output_extension: String,
    /// Directory of the file relative to the walk root, empty for top-level files
    pub relative_dir: PathBuf,
}

impl FileTask {
    /// Extension of the input file with its leading dot, or `""` when it has none
    pub fn extension(&self) -> String {
        file_extension(&self.input_path)
    }

    /// Whether the input file carries the configured input extension
    pub fn is_selected(&self) -> bool {
        self.extension() == self.input_extension
    }
}

/// Extension of `path` including the leading dot.
///
/// Dot-files such as `.bashrc` have no extension; `foo.` has the extension `.`.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// What happened to one visited file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Extension did not match
    Skipped,
    /// Converted and written to the given path
    Converted(PathBuf),
    /// Dry run; the path that would have been written
    Previewed(PathBuf),
}

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub visited: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.visited += 1;
        match outcome {
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Converted(_) | FileOutcome::Previewed(_) => self.converted += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.visited += 1;
        self.failed += 1;
    }
}
