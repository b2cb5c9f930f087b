use async_trait::async_trait;
use ledger_dns_application::ports::IssuanceHistory;
use ledger_dns_domain::config::HistoryConfig;
use ledger_dns_domain::{DomainError, IssuancePage};
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the block explorer endpoint `GET {base}{asset}/{page}`.
pub struct CounterpartyChainHistoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl CounterpartyChainHistoryClient {
    pub fn new(cfg: &HistoryConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ledger-dns/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }

    pub fn page_url(&self, asset: &str, page: u32) -> String {
        let separator = if self.base_url.ends_with('/') { "" } else { "/" };
        format!("{}{}{}/{}", self.base_url, separator, asset, page)
    }
}

#[async_trait]
impl IssuanceHistory for CounterpartyChainHistoryClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, asset: &str, page: u32) -> Result<IssuancePage, DomainError> {
        let url = self.page_url(asset, page);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::HistoryApi(format!("fetch error for {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::HistoryApi(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        let page_data: IssuancePage = response
            .json()
            .await
            .map_err(|e| DomainError::HistoryApi(format!("read error for {}: {}", url, e)))?;

        debug!(asset, page, items = page_data.data.len(), total = page_data.total, "History page fetched");
        Ok(page_data)
    }
}
