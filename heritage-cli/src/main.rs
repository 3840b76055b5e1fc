//! Heritage CLI - temples, states and 3D heritage models.
//!
//! Commands:
//! - `heritage models [--location S] [--limit N]`: Load 3D models from the catalog
//! - `heritage featured`: Show the landing page's featured models
//! - `heritage states`: List states
//! - `heritage temples <state>`: Show a state's temples and 3D models
//! - `heritage temple <slug>`: Show a temple's details and 3D models
//! - `heritage dump`: Print the raw catalog envelope
//!
//! Exit codes:
//! - 0: Success (an empty catalog is still a success)
//! - 1: Error (the catalog could not be loaded)
//! - 2: Unknown state or temple

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use heritage_cli::{commands, Cli, Context, EXIT_FAILURE};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("heritage=debug,heritage_cli=debug,heritage_catalog=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = dispatch_command(cli).await;
    std::process::exit(exit_code);
}

/// Build the context from global flags and run the subcommand.
async fn dispatch_command(cli: Cli) -> i32 {
    let ctx = match Context::from_options(
        cli.config.as_deref(),
        cli.endpoint.as_deref(),
        cli.timeout,
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return EXIT_FAILURE;
        }
    };

    let mut stdout = io::stdout();
    result_to_exit(commands::run(&ctx, cli.command, &mut stdout).await)
}

/// Convert a handler result to an exit code.
fn result_to_exit(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}
