//! Realpix - prompt-to-image CLI for Stability AI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod interactive;
mod model;
mod output;
mod params;
mod ports;
mod render;
mod session;
mod view;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::ImageError;
use crate::interactive::report;
use crate::render::render;
use crate::session::Session;
use crate::view::Event;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("REALPIX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "realpix=debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<ExitCode, ImageError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
        }
    }

    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    let prompt = cli.resolve_prompt()?;

    let engine = config.engine();
    let download_dir = cli.output_dir.as_ref().map_or_else(|| config.output.dir.clone(), PathBuf::from);
    tracing::debug!(%engine, dir = %download_dir.display(), "resolved settings");

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("REALPIX_REPLAY").ok();
    let is_recording = std::env::var("REALPIX_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let mut session = Session::new(ctx.generator, engine, download_dir);
    if let Some(text) = prompt {
        session.dispatch(Event::PromptEdited(text));
    }

    let code = if cli.interactive {
        interactive::run(&mut session).await;
        ExitCode::SUCCESS
    } else {
        one_shot(&mut session, &cli).await
    };
    drop(session);

    if let Some(recording) = recording_session {
        match recording.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(code)
}

/// Generate once, show the grid, then download the selected tiles.
async fn one_shot(session: &mut Session, cli: &Cli) -> ExitCode {
    let mut notices = session.dispatch(Event::GenerateRequested);
    notices.extend(session.settle().await);
    print!("{}", render(session.view()));

    if !cli.no_download {
        let indices: Vec<usize> = if cli.download.is_empty() {
            (0..session.view().images().len()).collect()
        } else {
            cli.download.clone()
        };
        for index in indices {
            notices.extend(session.dispatch(Event::DownloadRequested(index)));
        }
    }

    report(&notices);
    if notices.iter().any(view::Notice::is_failure) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
