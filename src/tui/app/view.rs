use super::super::format::{session_summary, single_line, truncate_text};
use super::App;
use crate::gateway::DataGateway;
use crate::missions::AdoptionSession;
use crate::model::OrphanPin;
use crate::notify::{Notification, NotificationKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

impl<G: DataGateway> App<G> {
    pub(in crate::tui) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let form_height = if self.board.session().is_idle() { 0 } else { 5 };
        let error_height = if self.board.load_error().is_some() { 3 } else { 0 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(error_height),
                Constraint::Min(3),
                Constraint::Length(form_height),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_header(frame, layout[0]);
        if let Some(error) = self.board.load_error() {
            let banner = Paragraph::new(error.to_string())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: true });
            frame.render_widget(banner, layout[1]);
        }
        self.draw_list(frame, layout[2]);
        if !self.board.session().is_idle() {
            self.draw_form(frame, layout[3]);
        }
        self.draw_footer(frame, layout[4]);

        if let Some(toast) = self.board.notification() {
            draw_toast(frame, toast);
        }
        if self.show_help {
            draw_help(frame);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let refresh = match self.schedule.as_ref().filter(|s| !s.is_cancelled()) {
            Some(schedule) => format!("every {}s", schedule.interval().as_secs()),
            None => "manual".to_string(),
        };
        let reserved = "Missions Control | Backend: ".len();
        let backend = truncate_text(
            &self.backend_label,
            (area.width as usize).saturating_sub(reserved),
        );
        let line1 = Line::from(vec![
            Span::styled(
                "Missions Control",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | Backend: "),
            Span::styled(backend, Style::default().add_modifier(Modifier::BOLD)),
        ]);
        let line2 = Line::from(vec![
            Span::raw("Orphans: "),
            Span::styled(
                self.board.orphans().len().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | Session: "),
            Span::styled(
                session_summary(self.board.session()),
                session_style(self.board.session()),
            ),
            Span::raw(" | Refresh: "),
            Span::raw(refresh),
        ]);
        frame.render_widget(Paragraph::new(vec![line1, line2]), area);
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let title = format!("Orphan pins ({})", self.board.orphans().len());
        let block = Block::default().borders(Borders::ALL).title(title);
        if self.board.orphans().is_empty() {
            let empty = Paragraph::new(vec![
                Line::from("All pins assigned."),
                Line::from("No active missions."),
            ])
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let width = area.width.saturating_sub(4) as usize;
        let target = self.board.session().target_pin_id();
        let items = self
            .board
            .orphans()
            .iter()
            .map(|pin| pin_list_item(pin, width, target == Some(pin.pin_id.as_str())))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(self.selection));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let session = self.board.session();
        let pin_id = session.target_pin_id().unwrap_or_default();
        let input = session.sku_input().unwrap_or_default();
        let (status, cursor) = if session.is_submitting() {
            ("linking...", "")
        } else {
            ("Enter submit | Esc cancel", "_")
        };
        let lines = vec![
            Line::from(vec![
                Span::raw("Adopt pin "),
                Span::styled(pin_id.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::raw("SKU: "),
                Span::styled(
                    format!("{input}{cursor}"),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
        ];
        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Link to asset"),
        );
        frame.render_widget(form, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.board.session().is_idle() {
            "q quit | j/k move | a adopt | c copy id | r reload | x dismiss | ? help"
        } else {
            "type SKU | Backspace delete | Enter submit | Esc cancel"
        };
        let hints = truncate_text(hints, area.width as usize);
        let paragraph =
            Paragraph::new(hints).style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(paragraph, area);
    }
}

fn pin_list_item(pin: &OrphanPin, width: usize, is_target: bool) -> ListItem<'static> {
    let marker = if is_target { "> " } else { "" };
    let title = Line::from(vec![
        Span::raw(marker),
        Span::styled(
            truncate_text(pin.display_title(), width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let id_line = Line::from(Span::styled(
        truncate_text(&format!("PIN_ID: {} | {}", pin.pin_id, pin.created_at), width),
        Style::default().fg(Color::DarkGray),
    ));
    let description = pin
        .description
        .as_deref()
        .map(single_line)
        .unwrap_or_default();
    let detail = Line::from(truncate_text(&description, width));
    ListItem::new(vec![title, id_line, detail])
}

fn session_style(session: &AdoptionSession) -> Style {
    match session {
        AdoptionSession::Idle => Style::default().fg(Color::Green),
        AdoptionSession::Editing { .. } => Style::default().fg(Color::Yellow),
        AdoptionSession::Submitting { .. } => Style::default().fg(Color::Cyan),
    }
}

fn draw_toast(frame: &mut Frame, toast: &Notification) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let height = TOAST_HEIGHT.min(area.height);
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    };
    let (color, label) = match toast.kind {
        NotificationKind::Success => (Color::Green, "OK"),
        NotificationKind::Error => (Color::Red, toast.classification.unwrap_or("Error")),
    };
    let paragraph = Paragraph::new(toast.message.clone())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    let lines = vec![
        Line::from("Keys:"),
        Line::from("  q / Esc: quit"),
        Line::from("  Up/Down, j/k: move selection"),
        Line::from("  a / Enter: adopt selected pin"),
        Line::from("  c: copy selected pin id"),
        Line::from("  r: reload orphan pins"),
        Line::from("  x: dismiss notification"),
        Line::from("  ?: toggle help"),
        Line::from(""),
        Line::from("While adopting:"),
        Line::from("  type the asset SKU, Enter to link, Esc to cancel"),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
