//! Resolve a SKU to an asset and attach it to a pin.
use crate::error::MissionError;
use crate::gateway::{DataGateway, Filter};
use crate::model::{AssetRef, ASSETS_TABLE, PINS_TABLE};
use serde_json::json;

/// Link `pin_id` to the asset whose `sku_slug` matches `sku_text`.
///
/// Two independent remote calls: the lookup always completes before the
/// write, and nothing is undone if the write fails.
pub fn link<G: DataGateway>(
    gateway: &G,
    pin_id: &str,
    sku_text: &str,
) -> Result<String, MissionError> {
    let asset = resolve_asset(gateway, sku_text)?;

    gateway
        .update(
            PINS_TABLE,
            &Filter::Eq("pin_id", pin_id.to_string()),
            &json!({ "asset_id": asset.id }),
        )
        .map_err(|err| MissionError::LinkWriteFailed(err.message().to_string()))?;

    tracing::info!(pin_id, asset_id = %asset.id, sku = sku_text.trim(), "pin linked");
    Ok(asset.id)
}

fn resolve_asset<G: DataGateway>(gateway: &G, sku_text: &str) -> Result<AssetRef, MissionError> {
    let sku = sku_text.trim();
    let row = gateway
        .lookup(ASSETS_TABLE, &Filter::Eq("sku_slug", sku.to_string()))?
        .ok_or_else(|| MissionError::AssetNotFound(sku_text.to_string()))?;
    serde_json::from_value(row)
        .map_err(|err| MissionError::DataAccess(format!("malformed asset row: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::{asset_row, pin_row, Call, MemoryGateway, Op};

    fn gateway() -> MemoryGateway {
        MemoryGateway::new()
            .with_rows(ASSETS_TABLE, vec![asset_row("A9", "sku-42")])
            .with_rows(PINS_TABLE, vec![pin_row("P1", "2024-01-02", None)])
    }

    #[test]
    fn resolves_then_writes_asset_id() {
        let gateway = gateway();
        let asset_id = link(&gateway, "P1", "  sku-42 ").expect("link");
        assert_eq!(asset_id, "A9");
        assert_eq!(
            gateway.calls(),
            vec![
                Call::Lookup {
                    table: ASSETS_TABLE.to_string(),
                    filter: Filter::Eq("sku_slug", "sku-42".to_string()),
                },
                Call::Update {
                    table: PINS_TABLE.to_string(),
                    filter: Filter::Eq("pin_id", "P1".to_string()),
                    patch: json!({ "asset_id": "A9" }),
                },
            ]
        );
        assert_eq!(gateway.rows(PINS_TABLE)[0]["asset_id"], json!("A9"));
    }

    #[test]
    fn unknown_sku_never_writes() {
        let gateway = gateway();
        let err = link(&gateway, "P1", "ghost").expect_err("unknown sku");
        assert_eq!(err, MissionError::AssetNotFound("ghost".to_string()));
        assert_eq!(gateway.calls().len(), 1);
        assert!(gateway.rows(PINS_TABLE)[0]["asset_id"].is_null());
    }

    #[test]
    fn lookup_failure_is_a_data_access_error() {
        let gateway = gateway();
        gateway.fail_next(Op::Lookup, "connection reset");
        let err = link(&gateway, "P1", "sku-42").expect_err("lookup fails");
        assert_eq!(err, MissionError::DataAccess("connection reset".to_string()));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[test]
    fn write_failure_carries_backend_message() {
        let gateway = gateway();
        gateway.fail_next(Op::Update, "new row violates row-level security policy");
        let err = link(&gateway, "P1", "sku-42").expect_err("write fails");
        assert_eq!(
            err,
            MissionError::LinkWriteFailed("new row violates row-level security policy".to_string())
        );
        assert_eq!(gateway.calls().len(), 2, "no retry, no compensation");
    }
}
