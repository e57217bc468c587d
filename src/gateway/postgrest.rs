//! PostgREST (Supabase REST) implementation of the gateway.
use super::{DataGateway, Filter, Order};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use serde::Deserialize;
use serde_json::Value;
use ureq::{Agent, Body, RequestBuilder};

const REST_PREFIX: &str = "rest/v1";

/// Blocking client for `<url>/rest/v1/<table>` endpoints.
pub struct PostgrestGateway {
    agent: Agent,
    base_url: String,
    api_key: String,
    bearer: String,
}

/// Error envelope PostgREST returns with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl PostgrestGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(agent_config),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            bearer: format!("Bearer {}", config.api_key),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{REST_PREFIX}/{table}", self.base_url)
    }

    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        request
            .header("apikey", self.api_key.as_str())
            .header("Authorization", self.bearer.as_str())
    }

    fn fetch_rows(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, GatewayError> {
        let request = read_params(filter, order, limit).into_iter().fold(
            self.authorize(self.agent.get(self.table_url(table)))
                .header("Accept", "application/json"),
            |request, (key, value)| request.query(key, value),
        );
        let response = request.call().map_err(|err| GatewayError::Transport {
            table: table.to_string(),
            message: err.to_string(),
        })?;
        let mut body = check_status(table, response)?;
        body.read_json::<Vec<Value>>()
            .map_err(|err| GatewayError::Decode {
                table: table.to_string(),
                message: err.to_string(),
            })
    }
}

impl DataGateway for PostgrestGateway {
    fn query(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
    ) -> Result<Vec<Value>, GatewayError> {
        let rows = self.fetch_rows(table, filter, order, None)?;
        tracing::debug!(table, rows = rows.len(), "query");
        Ok(rows)
    }

    fn lookup(&self, table: &str, filter: &Filter) -> Result<Option<Value>, GatewayError> {
        let rows = self.fetch_rows(table, filter, None, Some(1))?;
        tracing::debug!(table, found = !rows.is_empty(), "lookup");
        Ok(rows.into_iter().next())
    }

    fn update(&self, table: &str, filter: &Filter, patch: &Value) -> Result<(), GatewayError> {
        let request = self
            .authorize(self.agent.patch(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .query(filter.column(), filter.postgrest_expr());
        let response = request
            .send_json(patch)
            .map_err(|err| GatewayError::Transport {
                table: table.to_string(),
                message: err.to_string(),
            })?;
        check_status(table, response)?;
        tracing::debug!(table, "update");
        Ok(())
    }
}

/// Query-string pairs for a row read, in the order they are sent.
fn read_params(
    filter: &Filter,
    order: Option<Order>,
    limit: Option<usize>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        (filter.column(), filter.postgrest_expr()),
    ];
    if let Some(order) = order {
        params.push(("order", order.postgrest_expr()));
    }
    if let Some(limit) = limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

fn check_status(table: &str, response: ureq::http::Response<Body>) -> Result<Body, GatewayError> {
    let status = response.status();
    let mut body = response.into_body();
    if status.is_success() {
        return Ok(body);
    }
    let text = body.read_to_string().unwrap_or_default();
    tracing::debug!(table, status = status.as_u16(), "backend rejected request");
    Err(GatewayError::Status {
        table: table.to_string(),
        status: status.as_u16(),
        message: error_message(status.as_u16(), status.canonical_reason(), &text),
    })
}

fn error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.trim().is_empty()) {
            return match parsed.hint.filter(|h| !h.trim().is_empty()) {
                Some(hint) => format!("{message} ({hint})"),
                None => message,
            };
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    match reason {
        Some(reason) => format!("HTTP {status} {reason}"),
        None => format!("HTTP {status}"),
    }
}
