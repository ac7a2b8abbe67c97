// crates/triplog-core/src/lib.rs

pub mod error;
pub mod export;
pub mod geocode;
pub mod model;
pub mod ranker;
pub mod session;
pub mod store;
pub mod text;
// Shared file transport (plain or gzip), used by store and export
mod fsio;

// Re-exports
pub use crate::error::{Result, TripError};
pub use crate::export::{
    export_trip, import_trip, import_trip_file, read_export, write_export, TripExport,
};
pub use crate::geocode::Geocoder;
#[cfg(feature = "client")]
pub use crate::geocode::NominatimClient;
pub use crate::model::{
    Edge, Place, RouteDescriptor, RouteKind, RouteState, TripPlan, Visit, DEFAULT_ROUTE_COLOR,
};
pub use crate::ranker::{
    cap, rank, rank_matches, RawAddress, RawMatch, SearchCandidate, MAX_PER_COUNTRY, MAX_RESULTS,
};
pub use crate::session::{QueryToken, SearchSession};
pub use crate::store::{
    load_plan, save_plan, CityRecord, FlagRecord, Id, ImageRecord, LocalStore, RouteRecord,
    TripRecord, TripStore,
};
pub use crate::text::fold_key;
