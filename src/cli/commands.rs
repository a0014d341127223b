//! CLI argument definitions and the convert handler

use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::client::ChatClient;
use crate::core::config::{resolve_extension, AppConfig, RunConfig, DEFAULT_CONFIG_PATH};
use crate::core::errors::CodeswapError;
use crate::core::models::{OutputLayout, RunSummary};
use crate::processors::walker::TreeWalker;

/// Convert source files from one programming language to another
#[derive(Parser, Debug, Clone)]
#[command(name = "codeswap", version, about, long_about = None)]
pub struct ConvertArgs {
    /// Simulated execution: no service calls, nothing written
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity level (-v warn, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration filepath
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Source language
    #[arg(short, long)]
    pub source: String,

    /// Destination language
    #[arg(short, long)]
    pub destination: String,

    /// File or directory containing the source code
    #[arg(short, long)]
    pub input: String,

    /// Input extension (defaults to the input path)
    #[arg(long, visible_alias = "ie")]
    pub input_extension: Option<String>,

    /// Output directory containing the destination code
    #[arg(short, long)]
    pub output: String,

    /// Output extension (defaults to the output path)
    #[arg(long, visible_alias = "oe")]
    pub output_extension: Option<String>,

    /// Log failing files and keep converting the rest
    #[arg(long)]
    pub continue_on_error: bool,

    /// Recreate input subdirectories under the output directory
    #[arg(long)]
    pub mirror: bool,
}

impl ConvertArgs {
    /// Build the run configuration from the arguments and the loaded config file
    pub fn to_run_config(&self, app_config: &AppConfig) -> crate::core::errors::Result<RunConfig> {
        let client_config = app_config.client_config()?;

        let input_extension = resolve_extension(self.input_extension.as_deref(), &self.input);
        let output_extension = resolve_extension(self.output_extension.as_deref(), &self.output);

        let layout = if self.mirror {
            OutputLayout::Mirror
        } else {
            OutputLayout::Flat
        };

        let config = RunConfig::new(
            self.source.as_str(),
            self.destination.as_str(),
            &self.input,
            &input_extension,
            &self.output,
            &output_extension,
        )
        .with_dry_run(self.dry_run)
        .with_client_config(client_config)
        .with_continue_on_error(self.continue_on_error)
        .with_layout(layout);

        config.validate()?;
        Ok(config)
    }
}

/// Log level from which per-file log lines replace the progress bar
const PROGRESS_HIDDEN_VERBOSITY: u8 = 2;

/// Progress bar over `len` files; hidden once log output would interleave with it
pub fn progress_bar(len: u64, verbosity: u8) -> anyhow::Result<ProgressBar> {
    if verbosity >= PROGRESS_HIDDEN_VERBOSITY {
        return Ok(ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden()));
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Handle the convert command
pub async fn handle_convert(args: ConvertArgs) -> anyhow::Result<RunSummary> {
    let app_config = AppConfig::from_file(&args.config)?;
    let config = args.to_run_config(&app_config)?;

    info!("Input: {}", config.input_path.display());
    info!("Output: {}", config.output_path.display());
    info!("Layout: {}", config.layout);
    debug!(
        "Extensions: {} -> {}",
        config.input_extension, config.output_extension
    );

    let generator = ChatClient::from_config(&config.client_config)?;
    debug!("Generation service: {}", generator.endpoint());

    let dry_run = config.dry_run;
    let verbosity = args.verbose;
    let walker = TreeWalker::new(config, generator);
    let files = walker.discover()?;

    let pb = progress_bar(files.len() as u64, verbosity)?;

    let summary = walker
        .run_files(&files, |file, result| {
            pb.inc(1);
            match result {
                Ok(_) => pb.set_message(format!("Processed: {}", file.path.display())),
                Err(e) => pb.set_message(format!("Failed: {} - {}", file.path.display(), e)),
            }
        })
        .await;

    pb.finish_and_clear();
    let summary = summary?;

    if dry_run {
        println!("\n✅ Dry run completed!");
        println!("   Would convert: {}", summary.converted);
    } else {
        println!("\n✅ Conversion completed!");
        println!("   Converted: {}", summary.converted);
    }
    println!("   Skipped: {}", summary.skipped);
    println!("   Failed: {}", summary.failed);
    println!("   Time: {:?}", summary.elapsed);

    if summary.failed > 0 {
        return Err(CodeswapError::FilesFailed {
            failed: summary.failed,
        }
        .into());
    }

    Ok(summary)
}
