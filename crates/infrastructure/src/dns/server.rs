use crate::dns::answer::compose_answers;
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::{Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use ledger_dns_application::use_cases::ResolveZoneRecordsUseCase;
use ledger_dns_domain::{DomainError, QueryType, ZoneQuery};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct LedgerDnsHandler {
    use_case: Arc<ResolveZoneRecordsUseCase>,
    record_ttl: u32,
    query_timeout: Duration,
}

impl LedgerDnsHandler {
    pub fn new(use_case: Arc<ResolveZoneRecordsUseCase>, record_ttl: u32, query_timeout: Duration) -> Self {
        Self {
            use_case,
            record_ttl,
            query_timeout,
        }
    }

    fn normalize_domain(domain: &str) -> String {
        domain.trim_end_matches('.').to_string()
    }

    /// Resolve and compose; every failure collapses to an empty answer set.
    pub async fn answer(&self, domain: &str, record_type: RecordType) -> Vec<Record> {
        let query = ZoneQuery::new(Self::normalize_domain(domain), query_type_of(record_type));

        let directives = match tokio::time::timeout(self.query_timeout, self.use_case.execute(&query)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::QueryTimeout),
        }
        .unwrap_or_else(|e| {
            warn!(domain = %query.name, error = %e, "Zone resolution failed");
            Vec::new()
        });

        compose_answers(&directives, self.record_ttl)
    }
}

pub fn query_type_of(record_type: RecordType) -> QueryType {
    match record_type {
        RecordType::ANY => QueryType::Any,
        other => QueryType::Exact(other.to_string()),
    }
}

#[async_trait::async_trait]
impl RequestHandler for LedgerDnsHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        // Asset names are case-sensitive, so use the name as sent rather
        // than hickory's lowercased form.
        let domain = request_info.query.original().name().to_utf8();
        let record_type = request_info.query.query_type();
        let client_ip = request.src().ip();

        info!(domain = %domain, record_type = ?record_type, client = %client_ip, "DNS query received");

        let answers = self.answer(&domain, record_type).await;

        debug!(domain = %domain, answers = answers.len(), "Sending response");

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(true);
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
