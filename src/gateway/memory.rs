//! Recording in-memory gateway for workflow tests.
use super::{DataGateway, Filter, Order};
use crate::error::GatewayError;
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Query {
        table: String,
        filter: Filter,
        order: Option<Order>,
    },
    Lookup { table: String, filter: Filter },
    Update {
        table: String,
        filter: Filter,
        patch: Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Query,
    Lookup,
    Update,
}

#[derive(Default)]
pub struct MemoryGateway {
    tables: RefCell<BTreeMap<String, Vec<Value>>>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<Vec<(Op, String)>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.tables.borrow_mut().insert(table.to_string(), rows);
        self
    }

    /// Make the next call of kind `op` fail with `message`.
    pub fn fail_next(&self, op: Op, message: &str) {
        self.failures.borrow_mut().push((op, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.borrow().get(table).cloned().unwrap_or_default()
    }

    fn take_failure(&self, op: Op, table: &str) -> Result<(), GatewayError> {
        let mut failures = self.failures.borrow_mut();
        if let Some(pos) = failures.iter().position(|(kind, _)| *kind == op) {
            let (_, message) = failures.remove(pos);
            return Err(GatewayError::Status {
                table: table.to_string(),
                status: 500,
                message,
            });
        }
        Ok(())
    }

    fn matching(&self, table: &str, filter: &Filter) -> Vec<Value> {
        self.rows(table)
            .into_iter()
            .filter(|row| matches(row, filter))
            .collect()
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::IsNull(column) => matches!(row.get(*column), None | Some(Value::Null)),
        Filter::Eq(column, expected) => {
            row.get(*column).and_then(Value::as_str) == Some(expected.as_str())
        }
    }
}

fn sort_key(row: &Value, column: &str) -> String {
    row.get(column)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl DataGateway for MemoryGateway {
    fn query(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
    ) -> Result<Vec<Value>, GatewayError> {
        self.calls.borrow_mut().push(Call::Query {
            table: table.to_string(),
            filter: filter.clone(),
            order,
        });
        self.take_failure(Op::Query, table)?;
        let mut rows = self.matching(table, filter);
        if let Some(order) = order {
            rows.sort_by_key(|row| sort_key(row, order.column));
            if order.descending {
                rows.reverse();
            }
        }
        Ok(rows)
    }

    fn lookup(&self, table: &str, filter: &Filter) -> Result<Option<Value>, GatewayError> {
        self.calls.borrow_mut().push(Call::Lookup {
            table: table.to_string(),
            filter: filter.clone(),
        });
        self.take_failure(Op::Lookup, table)?;
        Ok(self.matching(table, filter).into_iter().next())
    }

    fn update(&self, table: &str, filter: &Filter, patch: &Value) -> Result<(), GatewayError> {
        self.calls.borrow_mut().push(Call::Update {
            table: table.to_string(),
            filter: filter.clone(),
            patch: patch.clone(),
        });
        self.take_failure(Op::Update, table)?;
        let empty = Map::new();
        let fields = patch.as_object().unwrap_or(&empty);
        let mut tables = self.tables.borrow_mut();
        for row in tables.entry(table.to_string()).or_default().iter_mut() {
            if !matches(row, filter) {
                continue;
            }
            if let Some(object) = row.as_object_mut() {
                for (key, value) in fields {
                    object.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(())
    }
}

pub fn pin_row(pin_id: &str, created_at: &str, asset_id: Option<&str>) -> Value {
    json!({
        "pin_id": pin_id,
        "created_at": created_at,
        "title": format!("Pin {pin_id}"),
        "description": null,
        "image_url": format!("https://img.example/{pin_id}.jpg"),
        "asset_id": asset_id,
    })
}

pub fn asset_row(id: &str, sku_slug: &str) -> Value {
    json!({ "id": id, "sku_slug": sku_slug, "name": sku_slug })
}
