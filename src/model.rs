//! Row types for the tables the workflow touches.
use serde::{Deserialize, Serialize};

pub const PINS_TABLE: &str = "active_pins";
pub const ASSETS_TABLE: &str = "assets";

/// A pin from `active_pins`. Only rows with a null `asset_id` are orphans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanPin {
    pub pin_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub asset_id: Option<String>,
    pub created_at: String,
}

impl OrphanPin {
    pub fn is_orphan(&self) -> bool {
        self.asset_id.is_none()
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Untitled Pin",
        }
    }
}

/// First eight characters of a pin id, for compact notifications.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// The slice of an `assets` row needed to link a pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub id: String,
}
