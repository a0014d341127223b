//! Main entry point for the codeswap CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing::error;

use codeswap::cli::commands::{handle_convert, ConvertArgs};
use codeswap::cli::logging::init_logging;
use codeswap::CodeswapError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    let args = ConvertArgs::parse();
    init_logging(args.verbose);

    match handle_convert(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<CodeswapError>()
                .map(CodeswapError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
