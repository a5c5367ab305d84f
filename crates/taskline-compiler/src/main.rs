//! `taskline` command-line entry point

use anyhow::Context;
use std::process::ExitCode;
use taskline_compiler::cli::{command, init_tracing, options_from_matches};
use taskline_compiler::{ChangeWatcher, Compiler};

#[tokio::main]
async fn main() -> ExitCode {
    let matches = command().get_matches();

    match run(&matches).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(matches: &clap::ArgMatches) -> anyhow::Result<ExitCode> {
    let options = options_from_matches(matches).context("failed to load configuration")?;
    init_tracing(options.log_format, options.verbose);
    tracing::info!(version = taskline_compiler::VERSION, "taskline starting");

    let compiler = Compiler::new(options.config);
    compiler
        .bootstrap()
        .await
        .context("failed to create project directories")?;

    if !options.watch {
        let code = match compiler.compile_logged().await {
            Some(_) => ExitCode::SUCCESS,
            None => ExitCode::FAILURE,
        };
        return Ok(code);
    }

    compiler.compile_logged().await;

    let watcher = ChangeWatcher::new(compiler);
    tokio::select! {
        result = watcher.run() => {
            let summary = result.context("file watcher failed")?;
            tracing::info!(?summary, "watcher stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, stopping watcher");
        }
    }

    Ok(ExitCode::SUCCESS)
}
