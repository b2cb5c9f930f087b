use crate::ports::IssuanceHistory;
use crate::services::RecordIndex;
use ledger_dns_domain::{
    decode_description, DomainError, HistoricIssuance, RecordDirective, ResolutionMode, ZoneDocument,
    ZoneName, ZoneQuery,
};
use std::sync::Arc;
use tracing::{debug, warn};

enum Strategy {
    Indexed(RecordIndex),
    Live {
        history: Arc<dyn IssuanceHistory>,
        max_pages: u32,
    },
}

/// Use case: map a query name to its owning asset and return the matching
/// directives.
///
/// Only directives whose key equals the query name are returned. All
/// directives for that key are returned in stored order, across every index
/// slot; there is no weight-based selection and no deduplication.
pub struct ResolveZoneRecordsUseCase {
    strategy: Strategy,
}

impl ResolveZoneRecordsUseCase {
    pub fn indexed(index: RecordIndex) -> Self {
        Self {
            strategy: Strategy::Indexed(index),
        }
    }

    pub fn live(history: Arc<dyn IssuanceHistory>, max_pages: u32) -> Self {
        Self {
            strategy: Strategy::Live { history, max_pages },
        }
    }

    pub fn mode(&self) -> ResolutionMode {
        match self.strategy {
            Strategy::Indexed(_) => ResolutionMode::Indexed,
            Strategy::Live { .. } => ResolutionMode::Live,
        }
    }

    pub async fn execute(&self, query: &ZoneQuery) -> Result<Vec<RecordDirective>, DomainError> {
        let Some(zone) = ZoneName::parse(&query.name) else {
            debug!(name = %query.name, "Name is not <label>.<asset>, nothing to resolve");
            return Ok(Vec::new());
        };

        let directives = match &self.strategy {
            Strategy::Indexed(index) => {
                let document = index.load(zone.asset()).await?;
                document.directives_for(zone.fqdn(), |t| query.query_type.matches(t))
            }
            Strategy::Live { history, max_pages } => {
                let issuances = fetch_all_issuances(history.as_ref(), zone.asset(), *max_pages).await?;
                let mut document = ZoneDocument::new();
                for directive in issuances
                    .iter()
                    .filter_map(|iss| decode_description(&iss.description, zone.asset()).ok().flatten())
                {
                    document.append(&directive);
                }
                document.directives_for(zone.fqdn(), |t| query.query_type.matches(t))
            }
        };

        debug!(
            name = %zone,
            query_type = %query.query_type,
            mode = %self.mode(),
            found = directives.len(),
            "Zone records resolved"
        );
        Ok(directives)
    }
}

/// Walk pages 1.. until the declared total is reached.
async fn fetch_all_issuances(
    history: &dyn IssuanceHistory,
    asset: &str,
    max_pages: u32,
) -> Result<Vec<HistoricIssuance>, DomainError> {
    let mut issuances = Vec::new();

    for page in 1..=max_pages {
        let batch = history.fetch_page(asset, page).await?;
        let received = batch.data.len();
        issuances.extend(batch.data);

        if received == 0 || issuances.len() as u64 >= batch.total {
            return Ok(issuances);
        }
    }

    warn!(asset, max_pages, fetched = issuances.len(), "Issuance history truncated at page limit");
    Ok(issuances)
}
