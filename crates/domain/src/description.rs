//! Decoder for the issuance description mini-language.
//!
//! ```text
//! +<index>[/<weight>],<type>,<value>            A record at the zone root
//! +<index>[/<weight>],<type>,<label>,<value>    record at <label>.<zone>
//! ```
//!
//! Only the `+` (add) operation exists on the ledger today. Any other leading
//! character is an operation this decoder does not know, which yields no
//! directive rather than an error.

use crate::record_directive::{RecordDirective, RECORD_TYPE_A, RECORD_TYPE_CNAME};
use thiserror::Error;

const OP_ADD: char = '+';
const MIN_FIELDS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("{record_type} directive needs {expected} fields, found {found}")]
    MissingFields {
        record_type: String,
        expected: usize,
        found: usize,
    },
}

/// Decode one issuance description into a directive for `zone_suffix`.
///
/// `Ok(None)` covers empty input, unknown operations and fewer than three
/// fields. `Err` is reserved for a recognised shape whose target fields are
/// missing.
pub fn decode_description(
    description: &str,
    zone_suffix: &str,
) -> Result<Option<RecordDirective>, DescriptionError> {
    let mut chars = description.chars();
    match chars.next() {
        Some(OP_ADD) => {}
        _ => return Ok(None),
    }

    let fields: Vec<&str> = chars.as_str().split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Ok(None);
    }

    let mut slot = fields[0].split('/');
    let index = slot.next().unwrap_or_default().to_string();
    let weight = slot.next().map(str::to_string);
    let record_type = fields[1].to_string();

    let (key, value) = match record_type.as_str() {
        RECORD_TYPE_A if fields.len() == MIN_FIELDS => (zone_suffix.to_string(), fields[2]),
        RECORD_TYPE_A | RECORD_TYPE_CNAME => {
            let value = required_field(&fields, &record_type)?;
            (format!("{}.{}", fields[2], zone_suffix), value)
        }
        _ => {
            let value = required_field(&fields, &record_type)?;
            (fields[2].to_string(), value)
        }
    };

    Ok(Some(RecordDirective {
        index,
        weight,
        record_type,
        key,
        value: value.to_string(),
    }))
}

fn required_field<'a>(fields: &[&'a str], record_type: &str) -> Result<&'a str, DescriptionError> {
    fields
        .get(MIN_FIELDS)
        .copied()
        .ok_or_else(|| DescriptionError::MissingFields {
            record_type: record_type.to_string(),
            expected: MIN_FIELDS + 1,
            found: fields.len(),
        })
}
