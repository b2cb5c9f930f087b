use crate::services::RecordIndex;
use ledger_dns_domain::{decode_description, DomainError, Issuance, ZoneDocument};
use tracing::{debug, instrument};

/// Use case: fold one issuance into its asset's record index.
///
/// Read-modify-write without a transaction. Callers must not run two merges
/// for the same asset concurrently.
pub struct MergeIssuanceUseCase {
    index: RecordIndex,
}

impl MergeIssuanceUseCase {
    pub fn new(index: RecordIndex) -> Self {
        Self { index }
    }

    /// Returns the written document, or `None` when the description holds no
    /// directive and nothing was written.
    #[instrument(skip(self, issuance), fields(asset = %issuance.asset))]
    pub async fn execute(&self, issuance: &Issuance) -> Result<Option<ZoneDocument>, DomainError> {
        let mut document = self.index.load(&issuance.asset).await?;

        let directive = match decode_description(&issuance.description, &issuance.asset) {
            Ok(Some(directive)) => directive,
            Ok(None) => {
                debug!(description = %issuance.description, "No directive in description");
                return Ok(None);
            }
            Err(e) => {
                debug!(description = %issuance.description, error = %e, "Malformed directive skipped");
                return Ok(None);
            }
        };

        document.append(&directive);
        self.index.save(&issuance.asset, &document).await?;

        debug!(
            record_type = %directive.record_type,
            key = %directive.key,
            "Directive merged"
        );
        Ok(Some(document))
    }
}
