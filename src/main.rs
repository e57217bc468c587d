mod cli;
mod config;
mod error;
mod gateway;
mod missions;
mod model;
mod notify;
mod refresh;
mod tui;

use crate::cli::{AdoptArgs, BackendArgs, Command, MissionsArgs, OrphansArgs, RootArgs};
use crate::config::{load_config, AppConfig};
use crate::gateway::PostgrestGateway;
use crate::missions::MissionBoard;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ALFA_LOG";

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    match &args.command {
        Command::Orphans(cmd) => cmd_orphans(&args.backend, cmd),
        Command::Adopt(cmd) => cmd_adopt(&args.backend, cmd),
        Command::Missions(cmd) => cmd_missions(&args.backend, cmd),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn app_config(backend: &BackendArgs) -> Result<AppConfig> {
    load_config(&backend.overrides()).context("load config")
}

fn cmd_orphans(backend: &BackendArgs, args: &OrphansArgs) -> Result<()> {
    let config = app_config(backend)?;
    let gateway = PostgrestGateway::new(&config.gateway);
    let mut board = MissionBoard::new(config.toast_ttl);
    board.reload(&gateway).context("load orphan pins")?;

    if args.json {
        let text =
            serde_json::to_string_pretty(board.orphans()).context("serialize orphan pins")?;
        println!("{text}");
    } else {
        print!("{}", tui::text::render_listing(board.orphans()));
    }
    Ok(())
}

/// Outcome of a one-shot adoption, as printed with `--json`.
#[derive(Debug, Serialize)]
struct AdoptReport<'a> {
    pin_id: &'a str,
    sku: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<&'static str>,
    message: String,
}

fn cmd_adopt(backend: &BackendArgs, args: &AdoptArgs) -> Result<()> {
    let config = app_config(backend)?;
    let gateway = PostgrestGateway::new(&config.gateway);
    let mut board = MissionBoard::new(config.toast_ttl);
    board.reload(&gateway).context("load orphan pins")?;

    let outcome = board
        .start_adoption(&args.pin)
        .and_then(|()| board.update_sku_input(&args.sku))
        .and_then(|()| board.submit(&gateway));
    let message = board
        .notification()
        .map(|toast| toast.message.clone())
        .unwrap_or_default();

    if args.json {
        let report = AdoptReport {
            pin_id: &args.pin,
            sku: args.sku.trim(),
            ok: outcome.is_ok(),
            asset_id: outcome.as_ref().ok().cloned(),
            classification: outcome.as_ref().err().map(|err| err.classification()),
            message,
        };
        let text = serde_json::to_string_pretty(&report).context("serialize adopt report")?;
        println!("{text}");
    } else if outcome.is_ok() {
        println!("{message}");
    }

    outcome
        .map(|_| ())
        .with_context(|| format!("adopt pin {}", args.pin))
}

fn cmd_missions(backend: &BackendArgs, args: &MissionsArgs) -> Result<()> {
    let mut overrides = backend.overrides();
    overrides.refresh_secs = args.refresh_secs;
    overrides.toast_secs = args.toast_secs;
    let config = load_config(&overrides).context("load config")?;
    tui::run(&config)
}
