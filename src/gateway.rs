//! Remote data gateway.
//!
//! The workflow never builds requests itself; it describes a table, a filter
//! and an ordering, and a [`DataGateway`] turns that into a backend call.
//! Rows travel as JSON values so each caller decodes only the columns it needs.
#[cfg(test)]
pub mod memory;
mod postgrest;

pub use postgrest::PostgrestGateway;

use crate::error::GatewayError;
use serde_json::Value;

/// Row filter understood by every gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column IS NULL`
    IsNull(&'static str),
    /// `column = value`
    Eq(&'static str, String),
}

impl Filter {
    pub fn column(&self) -> &'static str {
        match self {
            Filter::IsNull(column) | Filter::Eq(column, _) => column,
        }
    }

    /// Operator/value pair in PostgREST query syntax.
    pub fn postgrest_expr(&self) -> String {
        match self {
            Filter::IsNull(_) => "is.null".to_string(),
            Filter::Eq(_, value) => format!("eq.{value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub descending: bool,
}

impl Order {
    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    pub fn postgrest_expr(&self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}.{direction}", self.column)
    }
}

/// Backend operations consumed by the reconciliation workflow.
pub trait DataGateway {
    /// All rows of `table` matching `filter`, in `order` when given.
    fn query(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
    ) -> Result<Vec<Value>, GatewayError>;

    /// At most one row of `table` matching `filter`.
    fn lookup(&self, table: &str, filter: &Filter) -> Result<Option<Value>, GatewayError>;

    /// Apply `patch` to every row of `table` matching `filter`.
    fn update(&self, table: &str, filter: &Filter, patch: &Value) -> Result<(), GatewayError>;
}

impl<G: DataGateway + ?Sized> DataGateway for &G {
    fn query(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
    ) -> Result<Vec<Value>, GatewayError> {
        (**self).query(table, filter, order)
    }

    fn lookup(&self, table: &str, filter: &Filter) -> Result<Option<Value>, GatewayError> {
        (**self).lookup(table, filter)
    }

    fn update(&self, table: &str, filter: &Filter, patch: &Value) -> Result<(), GatewayError> {
        (**self).update(table, filter, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgrest_expressions() {
        assert_eq!(Filter::IsNull("asset_id").postgrest_expr(), "is.null");
        assert_eq!(
            Filter::Eq("sku_slug", "sku-42".to_string()).postgrest_expr(),
            "eq.sku-42"
        );
        assert_eq!(Order::desc("created_at").postgrest_expr(), "created_at.desc");
    }
}
