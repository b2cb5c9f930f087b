use std::fmt;

/// A resolvable query name: exactly `<label>.<asset>`.
///
/// Names with any other label count belong to subasset zones, which are not
/// served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneName {
    fqdn: String,
    asset_start: usize,
}

impl ZoneName {
    pub fn parse(name: &str) -> Option<Self> {
        let fqdn = name.strip_suffix('.').unwrap_or(name);
        let mut labels = fqdn.split('.');
        let (Some(_), Some(asset), None) = (labels.next(), labels.next(), labels.next()) else {
            return None;
        };
        Some(Self {
            fqdn: fqdn.to_string(),
            asset_start: fqdn.len() - asset.len(),
        })
    }

    /// The query name without trailing dot; directive keys are matched against it.
    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// The owning asset, which is also the zone suffix.
    pub fn asset(&self) -> &str {
        &self.fqdn[self.asset_start..]
    }

    pub fn label(&self) -> &str {
        &self.fqdn[..self.asset_start.saturating_sub(1)]
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqdn)
    }
}

/// Requested record type; `ANY` matches every stored type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryType {
    Any,
    Exact(String),
}

impl QueryType {
    pub fn matches(&self, record_type: &str) -> bool {
        match self {
            QueryType::Any => true,
            QueryType::Exact(t) => t == record_type,
        }
    }
}

impl From<&str> for QueryType {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("ANY") {
            QueryType::Any
        } else {
            QueryType::Exact(s.to_string())
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Any => f.write_str("ANY"),
            QueryType::Exact(t) => f.write_str(t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ZoneQuery {
    pub name: String,
    pub query_type: QueryType,
}

impl ZoneQuery {
    pub fn new(name: impl Into<String>, query_type: impl Into<QueryType>) -> Self {
        Self {
            name: name.into(),
            query_type: query_type.into(),
        }
    }
}
