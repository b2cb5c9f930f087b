use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const RECORD_TYPE_A: &str = "A";
pub const RECORD_TYPE_CNAME: &str = "CNAME";

/// A DNS record decoded from one issuance description.
///
/// `weight` is carried through untouched; nothing ranks on it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDirective {
    pub index: String,
    pub weight: Option<String>,
    pub record_type: String,
    pub key: String,
    pub value: String,
}

impl RecordDirective {
    pub fn to_stored(&self) -> StoredDirective {
        StoredDirective {
            index: self.index.clone(),
            weight: self.weight.clone(),
            value: self.value.clone(),
        }
    }

    pub fn from_stored(record_type: &str, key: &str, stored: &StoredDirective) -> Self {
        Self {
            index: stored.index.clone(),
            weight: stored.weight.clone(),
            record_type: record_type.to_string(),
            key: key.to_string(),
            value: stored.value.clone(),
        }
    }
}

/// Directive as persisted inside a [`ZoneDocument`]; type and key live in the
/// enclosing maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDirective {
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    pub value: String,
}

type KeyedDirectives = BTreeMap<String, Vec<StoredDirective>>;

/// Per-asset record index: `record type -> key -> directives` in arrival order.
///
/// Record types keep the order in which they were first written, also across
/// a JSON round trip, so `ANY` answers list types by first appearance.
///
/// Append-only. There is no removal path because the ledger encoding only
/// defines the add operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneDocument {
    records: Vec<(String, KeyedDirectives)>,
}

impl ZoneDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, directive: &RecordDirective) {
        self.keys_mut(&directive.record_type)
            .entry(directive.key.clone())
            .or_default()
            .push(directive.to_stored());
    }

    pub fn get(&self, record_type: &str, key: &str) -> &[StoredDirective] {
        self.keys(record_type)
            .and_then(|keys| keys.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|(record_type, _)| record_type.as_str())
    }

    /// Every directive stored for `key`, across record types accepted by `accept`.
    pub fn directives_for<F>(&self, key: &str, accept: F) -> Vec<RecordDirective>
    where
        F: Fn(&str) -> bool,
    {
        self.records
            .iter()
            .filter(|(record_type, _)| accept(record_type))
            .filter_map(|(record_type, keys)| {
                keys.get(key).map(|list| {
                    list.iter()
                        .map(|stored| RecordDirective::from_stored(record_type, key, stored))
                })
            })
            .flatten()
            .collect()
    }

    pub fn directive_count(&self) -> usize {
        self.records
            .iter()
            .flat_map(|(_, keys)| keys.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn keys(&self, record_type: &str) -> Option<&KeyedDirectives> {
        self.records
            .iter()
            .find(|(t, _)| t == record_type)
            .map(|(_, keys)| keys)
    }

    fn keys_mut(&mut self, record_type: &str) -> &mut KeyedDirectives {
        let pos = match self.records.iter().position(|(t, _)| t == record_type) {
            Some(pos) => pos,
            None => {
                self.records.push((record_type.to_string(), BTreeMap::new()));
                self.records.len() - 1
            }
        };
        &mut self.records[pos].1
    }
}

impl Serialize for ZoneDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.records.iter().map(|(record_type, keys)| (record_type, keys)))
    }
}

impl<'de> Deserialize<'de> for ZoneDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ZoneDocumentVisitor)
    }
}

struct ZoneDocumentVisitor;

impl<'de> Visitor<'de> for ZoneDocumentVisitor {
    type Value = ZoneDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of record type to keyed directives")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut document = ZoneDocument::new();
        while let Some((record_type, keys)) = map.next_entry::<String, KeyedDirectives>()? {
            let slot = document.keys_mut(&record_type);
            for (key, mut list) in keys {
                slot.entry(key).or_default().append(&mut list);
            }
        }
        Ok(document)
    }
}
