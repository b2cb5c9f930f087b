use clap::Parser;
use ledger_dns_domain::{CliOverrides, ResolutionMode};
use ledger_dns_infrastructure::dns::LedgerDnsHandler;
use ledger_dns_jobs::{JobRunner, LedgerSyncJob};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ledger-dns")]
#[command(version)]
#[command(about = "Ledger DNS - authoritative DNS for records published in asset descriptions")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path (`:memory:` keeps the index in memory)
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Ledger JSON-RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    /// Resolution mode (indexed, live)
    #[arg(long)]
    mode: Option<ResolutionMode>,

    /// Serve queries without running the ledger sync job
    #[arg(long)]
    no_sync: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        database_path: cli.database,
        log_level: cli.log_level,
        rpc_url: cli.rpc_url,
        resolution_mode: cli.mode,
        no_sync: cli.no_sync,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ledger DNS Server v{}", env!("CARGO_PKG_VERSION"));

    let store = bootstrap::init_store(&config.database).await?;

    let clients = di::LedgerClients::new(&config)?;
    let use_cases = di::UseCases::new(&config, store, &clients);

    let shutdown = CancellationToken::new();

    if config.sync.enabled {
        let sync_job = LedgerSyncJob::new(use_cases.sync_ledger.clone())
            .with_intervals(config.sync.min_interval(), config.sync.max_backoff());
        JobRunner::new()
            .with_ledger_sync(sync_job)
            .with_shutdown_token(shutdown.clone())
            .start()
            .await;
    } else {
        info!("Ledger sync disabled; serving the existing index");
    }

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    let ip: IpAddr = config.server.bind_address.parse()?;
    let dns_addr = SocketAddr::new(ip, config.server.dns_port);
    let handler = LedgerDnsHandler::new(
        use_cases.resolve_zone_records.clone(),
        config.resolution.record_ttl,
        Duration::from_secs(config.resolution.query_timeout_secs),
    );

    let result = server::start_dns_server(dns_addr, handler, shutdown.clone()).await;
    shutdown.cancel();

    if let Err(e) = &result {
        error!(error = %e, "DNS server error");
    }

    info!("Server shutdown complete");
    result
}
