//! Application state for the mission board TUI.

use super::super::external::try_copy_to_clipboard;
use super::App;
use crate::gateway::DataGateway;
use crate::missions::session::SubmitRequest;
use crate::missions::{AdoptionSession, MissionBoard};
use crate::model::{short_id, OrphanPin};
use crate::notify::Notification;
use crate::refresh::RefreshSchedule;
use std::time::Instant;

impl<G: DataGateway> App<G> {
    pub(in crate::tui) fn new(
        gateway: G,
        board: MissionBoard,
        backend_label: String,
        schedule: Option<RefreshSchedule>,
    ) -> Self {
        Self {
            gateway,
            board,
            backend_label,
            selection: 0,
            show_help: false,
            schedule,
        }
    }

    pub(in crate::tui) fn reload(&mut self) {
        if self.board.reload(&self.gateway).is_ok() {
            let count = self.board.orphans().len();
            tracing::debug!(count, "orphan list reloaded");
        }
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.reset(Instant::now());
        }
        self.clamp_selection();
    }

    /// Housekeeping run on every loop iteration.
    pub(in crate::tui) fn tick(&mut self, now: Instant) {
        self.board.expire_notification(now);
        let busy = !self.board.session().is_idle();
        let due = self
            .schedule
            .as_mut()
            .is_some_and(|schedule| schedule.due(now, busy));
        if due {
            self.reload();
        }
    }

    /// Stop periodic reloads; called on teardown.
    pub(in crate::tui) fn shutdown(&mut self) {
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.cancel();
        }
    }

    pub(in crate::tui) fn is_editing(&self) -> bool {
        matches!(self.board.session(), AdoptionSession::Editing { .. })
    }

    pub(in crate::tui) fn move_selection(&mut self, delta: isize) {
        let max = self.board.orphans().len();
        if max == 0 {
            self.selection = 0;
            return;
        }
        let next = self.selection as isize + delta;
        self.selection = next.clamp(0, max as isize - 1) as usize;
    }

    pub(in crate::tui) fn selected_pin(&self) -> Option<&OrphanPin> {
        self.board.orphans().get(self.selection)
    }

    pub(in crate::tui) fn adopt_selected(&mut self) {
        let Some(pin_id) = self.selected_pin().map(|pin| pin.pin_id.clone()) else {
            self.board.notify(Notification::error_message(
                "No orphan pin selected.",
                None,
                self.board.toast_ttl(),
            ));
            return;
        };
        let _ = self.board.start_adoption(&pin_id);
    }

    pub(in crate::tui) fn push_char(&mut self, ch: char) {
        let Some(mut input) = self.board.session().sku_input().map(str::to_string) else {
            return;
        };
        input.push(ch);
        let _ = self.board.update_sku_input(&input);
    }

    pub(in crate::tui) fn pop_char(&mut self) {
        let Some(mut input) = self.board.session().sku_input().map(str::to_string) else {
            return;
        };
        input.pop();
        let _ = self.board.update_sku_input(&input);
    }

    /// First half of a submit; the caller draws the `Submitting` frame
    /// before handing the request to [`App::finish_submit`].
    pub(in crate::tui) fn begin_submit(&mut self) -> Option<SubmitRequest> {
        self.board.begin_submit().ok()
    }

    pub(in crate::tui) fn finish_submit(&mut self, request: &SubmitRequest) {
        if self.board.finish_submit(&self.gateway, request).is_ok() {
            self.clamp_selection();
        }
    }

    pub(in crate::tui) fn cancel(&mut self) {
        let _ = self.board.cancel_adoption();
    }

    pub(in crate::tui) fn copy_selected_id(&mut self) {
        let Some(pin_id) = self.selected_pin().map(|pin| pin.pin_id.clone()) else {
            return;
        };
        let ttl = self.board.toast_ttl();
        let notification = match try_copy_to_clipboard(&pin_id) {
            Ok(true) => {
                Notification::success(format!("Pin ID {}... copied!", short_id(&pin_id)), ttl)
            }
            Ok(false) | Err(_) => Notification::error_message("Failed to copy ID.", None, ttl),
        };
        self.board.notify(notification);
    }

    pub(in crate::tui) fn dismiss_notification(&mut self) {
        self.board.dismiss_notification();
    }

    pub(in crate::tui) fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    fn clamp_selection(&mut self) {
        let max = self.board.orphans().len();
        if max == 0 {
            self.selection = 0;
        } else if self.selection >= max {
            self.selection = max - 1;
        }
    }
}
