//! TUI event loop for the mission board.

use super::app::App;
use super::external::TerminalGuard;
use super::EVENT_POLL_MS;
use crate::config::AppConfig;
use crate::gateway::PostgrestGateway;
use crate::missions::MissionBoard;
use crate::refresh::RefreshSchedule;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::{Duration, Instant};

pub(super) fn run_tui(gateway: PostgrestGateway, config: &AppConfig) -> Result<()> {
    let backend_label = gateway.base_url().to_string();
    let schedule = config
        .refresh_interval
        .map(|interval| RefreshSchedule::every(interval, Instant::now()));
    let mut app = App::new(
        gateway,
        MissionBoard::new(config.toast_ttl),
        backend_label,
        schedule,
    );
    app.reload();

    let guard = TerminalGuard::enter()?;
    let mut terminal = {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        ratatui::Terminal::new(backend).context("init terminal")?
    };

    loop {
        app.tick(Instant::now());
        terminal
            .draw(|frame| app.draw(frame))
            .context("draw mission board")?;

        if !event::poll(Duration::from_millis(EVENT_POLL_MS)).context("poll event")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = action_from_key(key, app.is_editing()) else {
            continue;
        };
        match action {
            Action::Quit => break,
            Action::Up => app.move_selection(-1),
            Action::Down => app.move_selection(1),
            Action::PageUp => app.move_selection(-10),
            Action::PageDown => app.move_selection(10),
            Action::Adopt => app.adopt_selected(),
            Action::Input(ch) => app.push_char(ch),
            Action::Backspace => app.pop_char(),
            Action::Submit => {
                if let Some(request) = app.begin_submit() {
                    terminal
                        .draw(|frame| app.draw(frame))
                        .context("draw mission board")?;
                    app.finish_submit(&request);
                }
            }
            Action::Cancel => app.cancel(),
            Action::Copy => app.copy_selected_id(),
            Action::Reload => app.reload(),
            Action::Dismiss => app.dismiss_notification(),
            Action::ToggleHelp => app.toggle_help(),
        }
    }

    app.shutdown();
    drop(guard);
    terminal.show_cursor().ok();
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    Adopt,
    Input(char),
    Backspace,
    Submit,
    Cancel,
    Copy,
    Reload,
    Dismiss,
    ToggleHelp,
}

fn action_from_key(key: KeyEvent, editing: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if editing {
        return match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(ch) => Some(Action::Input(ch)),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Enter | KeyCode::Char('a') => Some(Action::Adopt),
        KeyCode::Char('c') => Some(Action::Copy),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('x') => Some(Action::Dismiss),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}
