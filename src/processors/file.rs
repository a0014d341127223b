//! Per-file conversion

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::client::{CodeGenerator, ConversionClient};
use crate::core::config::RunConfig;
use crate::core::errors::{CodeswapError, Result};
use crate::core::models::{ConversionRequest, FileOutcome, FileTask};
use crate::processors::output::OutputWriter;

/// Filters, converts and writes a single file
#[derive(Debug)]
pub struct FileProcessor<G> {
    config: Arc<RunConfig>,
    client: ConversionClient<G>,
    writer: OutputWriter,
}

impl<G: CodeGenerator> FileProcessor<G> {
    /// Create a processor for one run
    pub fn new(config: Arc<RunConfig>, generator: G) -> Self {
        let writer = OutputWriter::new(config.layout);
        Self {
            config,
            client: ConversionClient::new(generator),
            writer,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Convert `task` if its extension matches the configured one
    pub async fn process(&self, task: &FileTask) -> Result<FileOutcome> {
        if !task.is_selected() {
            debug!("Skipping {}", task.input_path.display());
            return Ok(FileOutcome::Skipped);
        }

        let content = tokio::fs::read_to_string(&task.input_path)
            .await
            .map_err(|e| CodeswapError::file(&task.input_path, e))?;

        info!("Converting {}...", task.input_path.display());

        let request = ConversionRequest::new(
            self.config.source_language.as_str(),
            self.config.destination_language.as_str(),
            content,
        );
        let result = self.client.convert(&request, self.config.dry_run).await?;

        let output = self.writer.write(task, &result, self.config.dry_run).await?;

        if self.config.dry_run {
            Ok(FileOutcome::Previewed(output))
        } else {
            Ok(FileOutcome::Converted(output))
        }
    }
}
