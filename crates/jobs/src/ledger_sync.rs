use ledger_dns_application::use_cases::SyncLedgerUseCase;
use ledger_dns_domain::SyncOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(250);
const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Delay schedule for the sync loop: a fixed pause after useful work,
/// doubling up to a ceiling while the ledger is catching up or failing.
#[derive(Debug, Clone)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(min: Duration, max: Duration) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            current: min,
        }
    }

    pub fn reset(&mut self) -> Duration {
        self.current = self.min;
        self.min
    }

    pub fn grow(&mut self) -> Duration {
        let delay = self.current;
        let doubled = self.current.saturating_mul(2).max(Duration::from_millis(1));
        self.current = doubled.min(self.max);
        delay
    }
}

/// Background job that walks the ledger one block per iteration.
///
/// Iterations never overlap: the next one starts only after the previous
/// one has returned and the delay has elapsed.
pub struct LedgerSyncJob {
    sync: Arc<SyncLedgerUseCase>,
    min_interval: Duration,
    max_backoff: Duration,
    shutdown: CancellationToken,
}

impl LedgerSyncJob {
    pub fn new(sync: Arc<SyncLedgerUseCase>) -> Self {
        Self {
            sync,
            min_interval: DEFAULT_MIN_INTERVAL,
            max_backoff: DEFAULT_MAX_BACKOFF,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_intervals(mut self, min_interval: Duration, max_backoff: Duration) -> Self {
        self.min_interval = min_interval;
        self.max_backoff = max_backoff;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            min_interval_ms = self.min_interval.as_millis() as u64,
            max_backoff_secs = self.max_backoff.as_secs(),
            "Starting ledger sync job"
        );

        tokio::spawn(async move { self.run().await });
    }

    async fn run(&self) {
        let mut backoff = Backoff::new(self.min_interval, self.max_backoff);

        loop {
            let delay = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                result = self.sync.run_iteration() => match result {
                    Ok(SyncOutcome::Processed(_)) => backoff.reset(),
                    Ok(SyncOutcome::Idle { cursor }) => {
                        debug!(cursor, "LedgerSyncJob: up to date");
                        backoff.reset()
                    }
                    Ok(SyncOutcome::CatchingUp) => {
                        let delay = backoff.grow();
                        info!(retry_in_ms = delay.as_millis() as u64, "LedgerSyncJob: ledger indexer catching up");
                        delay
                    }
                    Err(e) if e.is_transient() => {
                        let delay = backoff.grow();
                        warn!(error = %e, retry_in_ms = delay.as_millis() as u64, "LedgerSyncJob: iteration failed");
                        delay
                    }
                    Err(e) => {
                        let delay = backoff.grow();
                        error!(error = %e, retry_in_ms = delay.as_millis() as u64, "LedgerSyncJob: iteration failed");
                        delay
                    }
                },
            };

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("LedgerSyncJob: shutting down");
    }
}
