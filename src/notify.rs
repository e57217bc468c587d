//! Transient user notifications.
use crate::error::MissionError;
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Error classification; `None` for successes.
    pub classification: Option<&'static str>,
    raised_at: Instant,
    ttl: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            classification: None,
            raised_at: Instant::now(),
            ttl,
        }
    }

    pub fn error(err: &MissionError, ttl: Duration) -> Self {
        Self::error_message(err.to_string(), Some(err.classification()), ttl)
    }

    pub fn error_message(
        message: impl Into<String>,
        classification: Option<&'static str>,
        ttl: Duration,
    ) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            classification,
            raised_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.ttl
    }
}
