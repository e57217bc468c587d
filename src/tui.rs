//! Interactive mission board.
//!
//! A TUI over the orphan list with an adoption form and transient
//! notifications. Without a terminal it prints the listing and exits.
mod app;
mod external;
mod format;
pub mod text;
mod ui;

use crate::config::AppConfig;
use crate::gateway::PostgrestGateway;
use crate::missions::MissionBoard;
use anyhow::Result;
use std::io::{self, IsTerminal};

const EVENT_POLL_MS: u64 = 200;

/// Run the board, falling back to text output for non-TTY environments.
pub fn run(config: &AppConfig) -> Result<()> {
    let gateway = PostgrestGateway::new(&config.gateway);
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        let mut board = MissionBoard::new(config.toast_ttl);
        board.reload(&gateway)?;
        print!("{}", text::render_listing(board.orphans()));
        return Ok(());
    }
    ui::run_tui(gateway, config)
}
