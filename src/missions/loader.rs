//! Orphan set loader.
use crate::error::MissionError;
use crate::gateway::{DataGateway, Filter, Order};
use crate::model::{OrphanPin, PINS_TABLE};

/// Fetch every pin without an asset, newest first.
///
/// The result is a snapshot; callers reload after each mutation.
pub fn load_orphans<G: DataGateway>(gateway: &G) -> Result<Vec<OrphanPin>, MissionError> {
    let rows = gateway.query(
        PINS_TABLE,
        &Filter::IsNull("asset_id"),
        Some(Order::desc("created_at")),
    )?;

    let mut pins = Vec::with_capacity(rows.len());
    for row in rows {
        let pin: OrphanPin = serde_json::from_value(row)
            .map_err(|err| MissionError::DataAccess(format!("malformed pin row: {err}")))?;
        if !pin.is_orphan() {
            tracing::warn!(pin_id = %pin.pin_id, "dropping linked pin from orphan set");
            continue;
        }
        pins.push(pin);
    }
    // Stable, so rows with equal timestamps keep the backend's order.
    pins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(pins)
}
