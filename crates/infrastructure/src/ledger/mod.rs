pub mod history_client;
pub mod rpc_client;

pub use history_client::CounterpartyChainHistoryClient;
pub use rpc_client::CounterpartyRpcClient;
