use ledger_dns_domain::{Config, DomainError};
use ledger_dns_infrastructure::ledger::{CounterpartyChainHistoryClient, CounterpartyRpcClient};
use std::sync::Arc;

pub struct LedgerClients {
    pub rpc: Arc<CounterpartyRpcClient>,
    pub history: Arc<CounterpartyChainHistoryClient>,
}

impl LedgerClients {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        Ok(Self {
            rpc: Arc::new(CounterpartyRpcClient::new(&config.ledger)?),
            history: Arc::new(CounterpartyChainHistoryClient::new(&config.history)?),
        })
    }
}
