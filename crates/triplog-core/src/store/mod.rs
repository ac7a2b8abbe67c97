// crates/triplog-core/src/store/mod.rs

//! Trip persistence.
//!
//! Record types mirror the storage tables one-to-one; [`TripStore`] is the
//! collaborator seam, with [`LocalStore`] as the bundled file-backed tier.
//! Every operation is a plain `Result`; callers never branch on whether a
//! backend happens to be synchronous.

mod local;

pub use local::LocalStore;

use crate::error::{Result, TripError};
use crate::model::{Place, RouteKind, TripPlan};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store-assigned identifier for trips and their child records.
pub type Id = u64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One visit row; `order_index` is the visit's position within its trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: Id,
    pub trip_id: Id,
    pub city_name: String,
    pub state: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: Option<String>,
    pub order_index: usize,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
}

/// One edge row, referencing the city rows it connects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: Id,
    pub trip_id: Id,
    pub from_city_id: Id,
    pub to_city_id: Id,
    pub line_type: String,
    pub line_color: String,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: Id,
    pub trip_city_id: Id,
    pub image_data: String,
    pub image_type: String,
    pub caption: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub id: Id,
    pub trip_id: Id,
    pub flag_type: String,
    pub flag_value: Option<String>,
    pub created_at: String,
}

/// The persistence collaborator contract.
///
/// Implementations must guarantee "read what was last successfully written"
/// per trip id; there are no cross-trip transactions. Operations are safe to
/// retry.
pub trait TripStore {
    fn create_trip(&mut self, name: &str, description: &str) -> Result<TripRecord>;
    fn trip(&self, id: Id) -> Result<TripRecord>;
    /// All trips, newest first.
    fn trips(&self) -> Result<Vec<TripRecord>>;
    fn update_trip(&mut self, id: Id, name: Option<&str>, description: Option<&str>)
        -> Result<TripRecord>;
    /// Deletes a trip and all of its child records.
    fn delete_trip(&mut self, id: Id) -> Result<()>;

    fn add_city(&mut self, trip_id: Id, place: &Place, order_index: usize) -> Result<CityRecord>;
    /// City rows of a trip, ordered by `order_index`.
    fn cities_by_trip(&self, trip_id: Id) -> Result<Vec<CityRecord>>;
    fn update_city_notes(&mut self, city_id: Id, notes: &str) -> Result<CityRecord>;
    fn delete_trip_cities(&mut self, trip_id: Id) -> Result<()>;

    fn add_route(
        &mut self,
        trip_id: Id,
        from_city_id: Id,
        to_city_id: Id,
        line_type: &str,
        line_color: &str,
    ) -> Result<RouteRecord>;
    fn routes_by_trip(&self, trip_id: Id) -> Result<Vec<RouteRecord>>;
    fn delete_trip_routes(&mut self, trip_id: Id) -> Result<()>;

    fn add_image(
        &mut self,
        city_id: Id,
        data: &str,
        image_type: &str,
        caption: Option<&str>,
    ) -> Result<ImageRecord>;
    fn images_by_city(&self, city_id: Id) -> Result<Vec<ImageRecord>>;
    fn images_by_trip(&self, trip_id: Id) -> Result<Vec<ImageRecord>>;
    fn delete_trip_images(&mut self, trip_id: Id) -> Result<()>;

    fn add_flag(&mut self, trip_id: Id, flag_type: &str, flag_value: Option<&str>)
        -> Result<FlagRecord>;
    fn flags_by_trip(&self, trip_id: Id) -> Result<Vec<FlagRecord>>;
    fn delete_trip_flags(&mut self, trip_id: Id) -> Result<()>;
}

/// Rewrites a trip's city, route, and image records from a plan snapshot.
///
/// `order_index` mirrors each visit's position and one route record is
/// written per *resolved* edge; pending edges are simply absent from the
/// store, same as they are absent from rendering.
pub fn save_plan(store: &mut dyn TripStore, trip_id: Id, plan: &TripPlan) -> Result<()> {
    store.trip(trip_id)?;

    store.delete_trip_routes(trip_id)?;
    store.delete_trip_images(trip_id)?;
    store.delete_trip_cities(trip_id)?;

    let mut city_ids = Vec::with_capacity(plan.len());
    for (index, visit) in plan.visits().iter().enumerate() {
        let record = store.add_city(trip_id, &visit.place, index)?;
        if !visit.notes.is_empty() {
            store.update_city_notes(record.id, &visit.notes)?;
        }
        for image in &visit.images {
            store.add_image(record.id, image, "base64", None)?;
        }
        city_ids.push(record.id);
    }

    for (index, visit) in plan.visits().iter().enumerate().skip(1) {
        if let Some(route) = visit.route.descriptor() {
            store.add_route(
                trip_id,
                city_ids[index - 1],
                city_ids[index],
                route.kind.as_str(),
                &route.color,
            )?;
        }
    }
    Ok(())
}

/// Rebuilds a [`TripPlan`] from a trip's records.
///
/// Visits are created in `order_index` order, routes are resolved by mapping
/// city ids back to positions, and the origin invariant is re-applied. Rows
/// that cannot be placed (duplicate names, routes referencing unknown or
/// non-consecutive cities, unparseable line types) are dropped with a
/// warning rather than failing the whole load.
pub fn load_plan(store: &dyn TripStore, trip_id: Id) -> Result<TripPlan> {
    let cities = store.cities_by_trip(trip_id)?;
    let routes = store.routes_by_trip(trip_id)?;

    let mut plan = TripPlan::new();
    let mut position_of: HashMap<Id, usize> = HashMap::new();

    for city in &cities {
        let place = Place {
            name: city.city_name.clone(),
            state: city.state.clone(),
            country: city.country.clone(),
            lat: city.latitude,
            lng: city.longitude,
            display_name: city.display_name.clone(),
            importance: None,
        };
        if !plan.add_place(place) {
            log::warn!(
                "trip {}: dropping duplicate city row {} ({})",
                trip_id,
                city.id,
                city.city_name
            );
            continue;
        }
        let position = plan.len() - 1;
        position_of.insert(city.id, position);

        if !city.notes.is_empty() {
            plan.set_notes(position, city.notes.clone())?;
        }
        for image in store.images_by_city(city.id)? {
            plan.add_image(position, image.image_data)?;
        }
    }

    for route in &routes {
        let to = match position_of.get(&route.to_city_id) {
            Some(&pos) if pos > 0 => pos,
            _ => {
                log::warn!(
                    "trip {}: dropping route {} into unknown or origin city {}",
                    trip_id,
                    route.id,
                    route.to_city_id
                );
                continue;
            }
        };
        let Some(kind) = RouteKind::parse(&route.line_type) else {
            log::warn!(
                "trip {}: dropping route {} with unknown line type {:?}",
                trip_id,
                route.id,
                route.line_type
            );
            continue;
        };
        plan.set_route(to, kind, &route.line_color)?;
    }

    plan.clear_origin_route();
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RouteKind, RouteState};

    fn place(name: &str, lat: f64, lng: f64) -> Place {
        Place::new(name, "Japan", lat, lng)
    }

    #[test]
    fn plan_survives_a_store_round_trip() {
        let mut store = LocalStore::in_memory();
        let trip = store.create_trip("Kansai loop", "spring").unwrap();

        let mut plan = TripPlan::new();
        plan.add_place(place("Tokyo", 35.6762, 139.6503));
        plan.add_place(place("Osaka", 34.6937, 135.5023));
        plan.add_place(place("Kyoto", 35.0116, 135.7681));
        plan.set_route(1, RouteKind::Airplane, "#3b82f6").unwrap();
        plan.set_route(2, RouteKind::Car, "#000000").unwrap();
        plan.set_notes(1, "okonomiyaki").unwrap();
        plan.add_image(1, "data:image/png;base64,AAAA").unwrap();

        save_plan(&mut store, trip.id, &plan).unwrap();
        let loaded = load_plan(&store, trip.id).unwrap();

        assert_eq!(loaded, plan);
    }

    #[test]
    fn pending_edges_are_not_persisted() {
        let mut store = LocalStore::in_memory();
        let trip = store.create_trip("Draft", "").unwrap();

        let mut plan = TripPlan::new();
        plan.add_place(place("Tokyo", 35.6762, 139.6503));
        plan.add_place(place("Osaka", 34.6937, 135.5023));

        save_plan(&mut store, trip.id, &plan).unwrap();
        assert!(store.routes_by_trip(trip.id).unwrap().is_empty());

        // A reload leaves the edge unclassified rather than inventing one.
        let loaded = load_plan(&store, trip.id).unwrap();
        assert_eq!(loaded.visits()[1].route, RouteState::Pending);
    }

    #[test]
    fn save_requires_an_existing_trip() {
        let mut store = LocalStore::in_memory();
        let plan = TripPlan::new();
        assert!(matches!(
            save_plan(&mut store, 99, &plan),
            Err(TripError::NotFound(_))
        ));
    }

    #[test]
    fn routes_into_unknown_cities_are_dropped_on_load() {
        let mut store = LocalStore::in_memory();
        let trip = store.create_trip("Weird", "").unwrap();
        let a = store
            .add_city(trip.id, &place("Tokyo", 35.6762, 139.6503), 0)
            .unwrap();
        let b = store
            .add_city(trip.id, &place("Osaka", 34.6937, 135.5023), 1)
            .unwrap();
        store
            .add_route(trip.id, a.id, 12345, "airplane", "#3b82f6")
            .unwrap();
        store
            .add_route(trip.id, a.id, b.id, "hovercraft", "#3b82f6")
            .unwrap();

        let plan = load_plan(&store, trip.id).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.visits()[1].route, RouteState::Pending);
    }
}
