use ledger_dns_domain::{Issuance, LedgerMessage};

/// Issuance message whose bindings could not be decoded.
#[derive(Debug, Clone)]
pub struct MalformedIssuance {
    pub message_index: Option<u64>,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct FilteredIssuances {
    pub issuances: Vec<Issuance>,
    pub malformed: Vec<MalformedIssuance>,
}

/// Keep the `issuances` messages of a block and parse their bindings.
///
/// A message that fails to parse is reported in `malformed` and does not
/// stop the remaining messages from being read.
pub fn filter_issuances(messages: &[LedgerMessage]) -> FilteredIssuances {
    let mut out = FilteredIssuances::default();

    for message in messages.iter().filter(|m| m.is_issuance()) {
        match serde_json::from_str::<Issuance>(&message.bindings) {
            Ok(issuance) => out.issuances.push(issuance),
            Err(e) => out.malformed.push(MalformedIssuance {
                message_index: message.message_index,
                reason: e.to_string(),
            }),
        }
    }

    out
}
