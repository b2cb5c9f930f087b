//! Turns resolved directives into DNS answer records.
//!
//! Only `A` and `CNAME` have a record builder. Directives of any other type
//! are dropped here without error.

use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use ledger_dns_domain::record_directive::{RECORD_TYPE_A, RECORD_TYPE_CNAME};
use ledger_dns_domain::RecordDirective;
use std::net::Ipv4Addr;
use std::str::FromStr;
use tracing::warn;

pub fn compose_answers(directives: &[RecordDirective], ttl: u32) -> Vec<Record> {
    directives
        .iter()
        .filter_map(|directive| compose_answer(directive, ttl))
        .collect()
}

fn compose_answer(directive: &RecordDirective, ttl: u32) -> Option<Record> {
    let rdata = match directive.record_type.as_str() {
        RECORD_TYPE_A => match Ipv4Addr::from_str(directive.value.trim()) {
            Ok(ip) => RData::A(A(ip)),
            Err(_) => {
                warn!(key = %directive.key, value = %directive.value, "A directive value is not an IPv4 address");
                return None;
            }
        },
        RECORD_TYPE_CNAME => RData::CNAME(CNAME(absolute_name(&directive.value)?)),
        _ => return None,
    };

    let name = absolute_name(&directive.key)?;
    Some(Record::from_rdata(name, ttl, rdata))
}

fn absolute_name(name: &str) -> Option<Name> {
    let name = name.trim();
    let parsed = if name.ends_with('.') {
        Name::from_str(name)
    } else {
        Name::from_str(&format!("{}.", name))
    };

    match parsed {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(name, error = %e, "Directive name is not a valid DNS name");
            None
        }
    }
}
