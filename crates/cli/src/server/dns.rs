use hickory_server::ServerFuture;
use ledger_dns_infrastructure::dns::LedgerDnsHandler;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::info;

const TCP_TIMEOUT: Duration = Duration::from_secs(10);

/// Serve UDP and TCP on `bind_addr` until `shutdown` fires.
pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: LedgerDnsHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let udp_socket = UdpSocket::bind(bind_addr).await?;
    let tcp_listener = TcpListener::bind(bind_addr).await?;

    let mut server = ServerFuture::new(handler);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, TCP_TIMEOUT);

    info!(bind_address = %bind_addr, "DNS server ready (UDP + TCP)");

    tokio::select! {
        result = server.block_until_done() => result?,
        _ = shutdown.cancelled() => info!("DNS server: shutting down"),
    }

    Ok(())
}
