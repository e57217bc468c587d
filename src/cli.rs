//! CLI argument parsing.
//!
//! Commands stay thin: they resolve configuration, build a gateway and hand
//! off to the mission board.
use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "alfa",
    version,
    about = "Orphan-pin reconciliation for the ALFA-OS backend",
    after_help = "Commands:\n  orphans                          List pins with no linked asset\n  adopt --pin <id> --sku <slug>    Link one pin to the asset with that SKU\n  missions                         Interactive mission board\n\nExamples:\n  ALFA_SUPABASE_URL=https://xyz.supabase.co ALFA_SUPABASE_ANON_KEY=... alfa orphans\n  alfa adopt --pin 884763 --sku desk-lamp-01\n  alfa missions --refresh-secs 30",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Orphans(OrphansArgs),
    Adopt(AdoptArgs),
    Missions(MissionsArgs),
}

/// Backend connection flags shared by every command.
#[derive(Args, Debug, Default)]
pub struct BackendArgs {
    /// JSON config file (defaults to <config dir>/alfa/config.json when present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides ALFA_SUPABASE_URL)
    #[arg(long, value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Anon API key (overrides ALFA_SUPABASE_ANON_KEY)
    #[arg(long, value_name = "KEY", global = true)]
    pub key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

/// List orphan pins, newest first.
#[derive(Parser, Debug)]
#[command(about = "List pins with no linked asset, newest first")]
pub struct OrphansArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Link a single pin to an asset by SKU.
#[derive(Parser, Debug)]
#[command(about = "Link one orphan pin to the asset with the given SKU")]
pub struct AdoptArgs {
    /// Pin identifier (`pin_id`)
    #[arg(long, value_name = "PIN_ID")]
    pub pin: String,

    /// Asset SKU slug
    #[arg(long, value_name = "SKU")]
    pub sku: String,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Interactive mission board.
#[derive(Parser, Debug)]
#[command(about = "Interactive mission board (falls back to a listing without a TTY)")]
pub struct MissionsArgs {
    /// Reload the orphan list every N seconds while no adoption is open
    #[arg(long, value_name = "SECS")]
    pub refresh_secs: Option<u64>,

    /// How long notifications stay on screen
    #[arg(long, value_name = "SECS")]
    pub toast_secs: Option<u64>,
}

impl BackendArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            url: self.url.clone(),
            api_key: self.key.clone(),
            timeout_secs: self.timeout_secs,
            ..ConfigOverrides::default()
        }
    }
}
