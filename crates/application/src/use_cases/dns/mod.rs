pub mod resolve_zone_records;

pub use resolve_zone_records::ResolveZoneRecordsUseCase;
