//! Input discovery and run orchestration

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::core::client::CodeGenerator;
use crate::core::config::RunConfig;
use crate::core::errors::{CodeswapError, Result};
use crate::core::models::{FileOutcome, RunSummary};
use crate::processors::file::FileProcessor;

/// A candidate file together with the root it was found under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub root: PathBuf,
    pub path: PathBuf,
}

/// Enumerate every file under `input`.
///
/// A directory is walked recursively in filesystem order. A single file yields
/// itself as an absolute path. Anything else is [`CodeswapError::InvalidInputPath`].
pub fn discover(input: &Path) -> Result<Vec<SourceFile>> {
    if input.is_dir() {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(input) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Cannot read directory entry: {}", e);
                    continue;
                }
            };

            if entry.path().is_file() {
                files.push(SourceFile {
                    root: input.to_path_buf(),
                    path: entry.into_path(),
                });
            } else if entry.path_is_symlink() && !entry.path().exists() {
                debug!("Skipping broken symlink {}", entry.path().display());
            }
        }
        Ok(files)
    } else if input.is_file() {
        let path = std::path::absolute(input).map_err(|e| CodeswapError::file(input, e))?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(vec![SourceFile { root, path }])
    } else {
        Err(CodeswapError::InvalidInputPath {
            path: input.display().to_string(),
        })
    }
}

/// Walks the input tree and converts every matching file, one at a time
#[derive(Debug)]
pub struct TreeWalker<G> {
    processor: FileProcessor<G>,
}

impl<G: CodeGenerator> TreeWalker<G> {
    /// Create a walker for one run
    pub fn new(config: RunConfig, generator: G) -> Self {
        Self {
            processor: FileProcessor::new(Arc::new(config), generator),
        }
    }

    pub fn config(&self) -> &RunConfig {
        self.processor.config()
    }

    /// Candidate files for this run
    pub fn discover(&self) -> Result<Vec<SourceFile>> {
        discover(&self.config().input_path)
    }

    /// Convert every candidate file
    pub async fn run(&self) -> Result<RunSummary> {
        let files = self.discover()?;
        self.run_files(&files, |_, _| {}).await
    }

    /// Convert the given candidates in order, calling `on_file` after each one.
    ///
    /// The first failure ends the run unless `continue_on_error` is set, in which
    /// case it is logged and counted.
    pub async fn run_files<F>(&self, files: &[SourceFile], mut on_file: F) -> Result<RunSummary>
    where
        F: FnMut(&SourceFile, &Result<FileOutcome>),
    {
        let config = self.config();
        info!(
            "Converting {} in {} to {} in {}",
            config.source_language,
            config.input_path.display(),
            config.destination_language,
            config.output_path.display()
        );

        let start_time = Instant::now();
        let mut summary = RunSummary::default();

        for file in files {
            let task = config.task_for(&file.root, &file.path);
            let result = self.processor.process(&task).await;
            on_file(file, &result);

            match result {
                Ok(outcome) => summary.record(&outcome),
                Err(e) if config.continue_on_error => {
                    error!("Failed to convert {}: {}", file.path.display(), e);
                    summary.record_failure();
                }
                Err(e) => return Err(e),
            }
        }

        summary.elapsed = start_time.elapsed();
        info!(
            "Completed: {} converted, {} skipped, {} failed in {:?}",
            summary.converted, summary.skipped, summary.failed, summary.elapsed
        );

        Ok(summary)
    }
}
