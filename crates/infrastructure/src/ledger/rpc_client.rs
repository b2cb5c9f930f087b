use async_trait::async_trait;
use ledger_dns_application::ports::LedgerRpc;
use ledger_dns_domain::config::LedgerConfig;
use ledger_dns_domain::{DomainError, LedgerMessage, RunningInfo};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client for the ledger node's API endpoint.
pub struct CounterpartyRpcClient {
    client: reqwest::Client,
    url: String,
    username: String,
    password: String,
    request_id: AtomicU64,
}

impl CounterpartyRpcClient {
    pub fn new(cfg: &LedgerConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ledger-dns/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            url: cfg.rpc_url.clone(),
            username: cfg.rpc_username.clone(),
            password: cfg.rpc_password.clone(),
            request_id: AtomicU64::new(1),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, DomainError> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        debug!(method, id, "Ledger RPC call");

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::LedgerUnavailable(format!("{}: {}", method, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::LedgerUnavailable(format!("{}: {}", method, e)))?;

        if !status.is_success() && !body.trim_start().starts_with('{') {
            return Err(DomainError::LedgerUnavailable(format!(
                "{}: HTTP {}",
                method,
                status.as_u16()
            )));
        }

        parse_rpc_response(method, &body)
    }
}

fn parse_rpc_response<T: DeserializeOwned>(method: &str, body: &str) -> Result<T, DomainError> {
    let response: RpcResponse<T> = serde_json::from_str(body)
        .map_err(|e| DomainError::InvalidLedgerResponse(format!("{}: {}", method, e)))?;

    if let Some(error) = response.error {
        return Err(DomainError::LedgerRpc {
            code: error.code,
            message: error.message,
        });
    }

    response
        .result
        .ok_or_else(|| DomainError::InvalidLedgerResponse(format!("{}: missing result", method)))
}

#[async_trait]
impl LedgerRpc for CounterpartyRpcClient {
    #[instrument(skip(self))]
    async fn running_info(&self) -> Result<RunningInfo, DomainError> {
        self.call("get_running_info", serde_json::json!({})).await
    }

    #[instrument(skip(self))]
    async fn block_messages(&self, height: u64) -> Result<Vec<LedgerMessage>, DomainError> {
        self.call("get_messages", serde_json::json!({ "block_index": height }))
            .await
    }
}
