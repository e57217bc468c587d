//! Adoption session state machine.
//!
//! Each transition borrows the current value and returns the next one, so a
//! rejected transition leaves the caller holding the unchanged session.
use crate::error::MissionError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdoptionSession {
    #[default]
    Idle,
    Editing {
        target_pin_id: String,
        sku_input: String,
    },
    Submitting {
        target_pin_id: String,
        sku_input: String,
    },
}

/// What the linker needs once a submit is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub pin_id: String,
    pub sku: String,
}

impl AdoptionSession {
    pub fn state_label(&self) -> &'static str {
        match self {
            AdoptionSession::Idle => "idle",
            AdoptionSession::Editing { .. } => "editing",
            AdoptionSession::Submitting { .. } => "submitting",
        }
    }

    pub fn target_pin_id(&self) -> Option<&str> {
        match self {
            AdoptionSession::Idle => None,
            AdoptionSession::Editing { target_pin_id, .. }
            | AdoptionSession::Submitting { target_pin_id, .. } => Some(target_pin_id),
        }
    }

    pub fn sku_input(&self) -> Option<&str> {
        match self {
            AdoptionSession::Idle => None,
            AdoptionSession::Editing { sku_input, .. }
            | AdoptionSession::Submitting { sku_input, .. } => Some(sku_input),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, AdoptionSession::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, AdoptionSession::Submitting { .. })
    }

    pub fn start_adoption(&self, pin_id: &str) -> Result<Self, MissionError> {
        match self {
            AdoptionSession::Idle => Ok(AdoptionSession::Editing {
                target_pin_id: pin_id.to_string(),
                sku_input: String::new(),
            }),
            _ => Err(self.invalid("start an adoption")),
        }
    }

    pub fn update_sku_input(&self, text: &str) -> Result<Self, MissionError> {
        match self {
            AdoptionSession::Editing { target_pin_id, .. } => Ok(AdoptionSession::Editing {
                target_pin_id: target_pin_id.clone(),
                sku_input: text.to_string(),
            }),
            _ => Err(self.invalid("edit the SKU")),
        }
    }

    pub fn cancel_adoption(&self) -> Result<Self, MissionError> {
        match self {
            AdoptionSession::Idle => Err(self.invalid("cancel")),
            _ => Ok(AdoptionSession::Idle),
        }
    }

    /// Lock the input and hand back the request for the linker.
    pub fn submit(&self) -> Result<(Self, SubmitRequest), MissionError> {
        match self {
            AdoptionSession::Editing {
                target_pin_id,
                sku_input,
            } => {
                let sku = sku_input.trim();
                if sku.is_empty() {
                    return Err(MissionError::Validation("Please enter a SKU.".to_string()));
                }
                let request = SubmitRequest {
                    pin_id: target_pin_id.clone(),
                    sku: sku.to_string(),
                };
                let next = AdoptionSession::Submitting {
                    target_pin_id: target_pin_id.clone(),
                    sku_input: sku_input.clone(),
                };
                Ok((next, request))
            }
            _ => Err(self.invalid("submit")),
        }
    }

    /// Settle a submission. A completion that arrives after a cancel finds
    /// the session idle and leaves it that way.
    pub fn complete<T>(&self, outcome: &Result<T, MissionError>) -> Self {
        match (self, outcome) {
            (AdoptionSession::Submitting { .. }, Ok(_)) => AdoptionSession::Idle,
            (
                AdoptionSession::Submitting {
                    target_pin_id,
                    sku_input,
                },
                Err(_),
            ) => AdoptionSession::Editing {
                target_pin_id: target_pin_id.clone(),
                sku_input: sku_input.clone(),
            },
            (other, _) => other.clone(),
        }
    }

    fn invalid(&self, event: &'static str) -> MissionError {
        MissionError::InvalidTransition {
            event,
            state: self.state_label(),
        }
    }
}
