pub mod issuance_filter;
pub mod record_index;

pub use issuance_filter::{filter_issuances, FilteredIssuances, MalformedIssuance};
pub use record_index::RecordIndex;
