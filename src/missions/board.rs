//! In-memory mission board: orphan list, adoption session and notification.
//!
//! The board is the error boundary of the workflow. Every failure is turned
//! into a notification before it is handed back to the caller.
use super::linker::link;
use super::loader::load_orphans;
use super::session::{AdoptionSession, SubmitRequest};
use crate::error::MissionError;
use crate::gateway::DataGateway;
use crate::model::OrphanPin;
use crate::notify::{Notification, DEFAULT_TOAST_TTL};
use std::time::{Duration, Instant};

pub struct MissionBoard {
    orphans: Vec<OrphanPin>,
    session: AdoptionSession,
    notification: Option<Notification>,
    load_error: Option<String>,
    toast_ttl: Duration,
}

impl Default for MissionBoard {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl MissionBoard {
    pub fn new(toast_ttl: Duration) -> Self {
        Self {
            orphans: Vec::new(),
            session: AdoptionSession::Idle,
            notification: None,
            load_error: None,
            toast_ttl,
        }
    }

    pub fn orphans(&self) -> &[OrphanPin] {
        &self.orphans
    }

    pub fn session(&self) -> &AdoptionSession {
        &self.session
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Replace the orphan list with a fresh snapshot. On failure the previous
    /// list is kept and the error is recorded.
    pub fn reload<G: DataGateway>(&mut self, gateway: &G) -> Result<usize, MissionError> {
        match load_orphans(gateway) {
            Ok(pins) => {
                self.orphans = pins;
                self.load_error = None;
                Ok(self.orphans.len())
            }
            Err(err) => {
                let err = match err {
                    MissionError::DataAccess(message) => {
                        MissionError::DataAccess(format!("Failed to fetch orphan pins: {message}"))
                    }
                    other => other,
                };
                self.load_error = Some(err.to_string());
                Err(self.raise(err))
            }
        }
    }

    /// Open an adoption for a pin currently on the board.
    pub fn start_adoption(&mut self, pin_id: &str) -> Result<(), MissionError> {
        if !self.orphans.iter().any(|pin| pin.pin_id == pin_id) {
            let err = MissionError::Validation(format!("Pin {pin_id} is not in the orphan set."));
            return Err(self.raise(err));
        }
        let next = self.session.start_adoption(pin_id);
        self.transition(next)
    }

    pub fn update_sku_input(&mut self, text: &str) -> Result<(), MissionError> {
        let next = self.session.update_sku_input(text);
        self.transition(next)
    }

    pub fn cancel_adoption(&mut self) -> Result<(), MissionError> {
        let next = self.session.cancel_adoption();
        self.transition(next)
    }

    /// Submit the current session through the linker.
    ///
    /// Returns the linked asset id. Blank input fails before any remote call.
    pub fn submit<G: DataGateway>(&mut self, gateway: &G) -> Result<String, MissionError> {
        let request = self.begin_submit()?;
        self.finish_submit(gateway, &request)
    }

    /// Lock the session into `Submitting` and hand back the link request.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, MissionError> {
        match self.session.submit() {
            Ok((submitting, request)) => {
                self.session = submitting;
                Ok(request)
            }
            Err(err) => Err(self.raise(err)),
        }
    }

    /// Run the link for a request from [`MissionBoard::begin_submit`].
    pub fn finish_submit<G: DataGateway>(
        &mut self,
        gateway: &G,
        request: &SubmitRequest,
    ) -> Result<String, MissionError> {
        let outcome = link(gateway, &request.pin_id, &request.sku);
        self.settle(&request.pin_id, &request.sku, outcome)
    }

    /// Apply a link outcome to the list and session.
    ///
    /// Split from [`MissionBoard::submit`] so a completion that lands after a
    /// cancel is handled the same way: the list still shrinks on success and
    /// the idle session stays idle.
    pub fn settle(
        &mut self,
        pin_id: &str,
        sku: &str,
        outcome: Result<String, MissionError>,
    ) -> Result<String, MissionError> {
        self.session = self.session.complete(&outcome);
        match outcome {
            Ok(asset_id) => {
                self.apply_local_removal(pin_id);
                self.notification = Some(Notification::success(
                    format!("Pin {pin_id} linked to {sku}."),
                    self.toast_ttl,
                ));
                Ok(asset_id)
            }
            Err(err) => Err(self.raise(err)),
        }
    }

    /// Drop `pin_id` from the local orphan list without a reload.
    pub fn apply_local_removal(&mut self, pin_id: &str) -> bool {
        let before = self.orphans.len();
        self.orphans.retain(|pin| pin.pin_id != pin_id);
        self.orphans.len() != before
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Clear the notification once its time-to-live has passed.
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        if self
            .notification
            .as_ref()
            .is_some_and(|toast| toast.is_expired(now))
        {
            self.notification = None;
            return true;
        }
        false
    }

    pub fn toast_ttl(&self) -> Duration {
        self.toast_ttl
    }

    fn transition(
        &mut self,
        next: Result<AdoptionSession, MissionError>,
    ) -> Result<(), MissionError> {
        match next {
            Ok(session) => {
                self.session = session;
                Ok(())
            }
            Err(err) => Err(self.raise(err)),
        }
    }

    fn raise(&mut self, err: MissionError) -> MissionError {
        self.notification = Some(Notification::error(&err, self.toast_ttl));
        err
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
