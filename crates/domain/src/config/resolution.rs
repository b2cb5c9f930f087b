use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the query path reads records from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Read the record index built by the sync job.
    #[default]
    Indexed,
    /// Fetch and decode the asset's whole issuance history per query.
    Live,
}

impl ResolutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Indexed => "indexed",
            ResolutionMode::Live => "live",
        }
    }
}

impl FromStr for ResolutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indexed" => Ok(ResolutionMode::Indexed),
            "live" => Ok(ResolutionMode::Live),
            other => Err(format!("unknown resolution mode '{}'", other)),
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    #[serde(default)]
    pub mode: ResolutionMode,

    /// TTL attached to every answer, in seconds.
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,

    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::default(),
            record_ttl: default_record_ttl(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

fn default_record_ttl() -> u32 {
    600
}

fn default_query_timeout_secs() -> u64 {
    5
}
