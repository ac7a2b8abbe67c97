// crates/triplog-core/src/model/mod.rs
pub mod place;
pub mod plan;
pub mod route;

pub use place::Place;
pub use plan::{Edge, TripPlan, Visit};
pub use route::{RouteDescriptor, RouteKind, RouteState, DEFAULT_ROUTE_COLOR};
