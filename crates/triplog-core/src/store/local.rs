// crates/triplog-core/src/store/local.rs

//! File-backed fallback store.
//!
//! The whole store lives in one JSON document (optionally `.json.gz` with
//! the `compact` feature) that is rewritten after every mutation, so "read
//! what was last successfully written" holds trivially.

use super::{CityRecord, FlagRecord, Id, ImageRecord, RouteRecord, TripRecord, TripStore};
use crate::error::{Result, TripError};
use crate::fsio::{create_stream, open_stream};
use crate::model::Place;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    trips: Vec<TripRecord>,
    cities: Vec<CityRecord>,
    routes: Vec<RouteRecord>,
    images: Vec<ImageRecord>,
    flags: Vec<FlagRecord>,
}

impl StoreData {
    fn max_id(&self) -> Id {
        let ids = self
            .trips
            .iter()
            .map(|t| t.id)
            .chain(self.cities.iter().map(|c| c.id))
            .chain(self.routes.iter().map(|r| r.id))
            .chain(self.images.iter().map(|i| i.id))
            .chain(self.flags.iter().map(|f| f.id));
        ids.max().unwrap_or(0)
    }
}

/// Single-file trip store.
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    data: StoreData,
    next_id: Id,
}

impl LocalStore {
    /// Opens (or initializes) a store at `path`. A missing file is an empty
    /// store, not an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let reader = open_stream(&path)?;
            serde_json::from_reader(reader)?
        } else {
            StoreData::default()
        };
        log::debug!(
            "opened store at {} ({} trips)",
            path.display(),
            data.trips.len()
        );
        let next_id = data.max_id() + 1;
        Ok(LocalStore {
            path: Some(path),
            data,
            next_id,
        })
    }

    /// A store that never touches disk. Used by tests and import dry-runs.
    pub fn in_memory() -> Self {
        LocalStore {
            path: None,
            data: StoreData::default(),
            next_id: 1,
        }
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut writer = create_stream(path)?;
        serde_json::to_writer_pretty(&mut writer, &self.data)?;
        writer.flush()?;
        Ok(())
    }

    fn alloc_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }

    fn trip_index(&self, id: Id) -> Result<usize> {
        self.data
            .trips
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TripError::NotFound(format!("trip {id}")))
    }

    /// City ids belonging to a trip, for image scoping.
    fn city_ids(&self, trip_id: Id) -> Vec<Id> {
        self.data
            .cities
            .iter()
            .filter(|c| c.trip_id == trip_id)
            .map(|c| c.id)
            .collect()
    }
}

impl TripStore for LocalStore {
    fn create_trip(&mut self, name: &str, description: &str) -> Result<TripRecord> {
        let now = Self::now();
        let record = TripRecord {
            id: self.alloc_id(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.data.trips.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn trip(&self, id: Id) -> Result<TripRecord> {
        self.trip_index(id).map(|i| self.data.trips[i].clone())
    }

    fn trips(&self) -> Result<Vec<TripRecord>> {
        let mut trips = self.data.trips.clone();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    fn update_trip(
        &mut self,
        id: Id,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<TripRecord> {
        let index = self.trip_index(id)?;
        {
            let trip = &mut self.data.trips[index];
            if let Some(name) = name {
                trip.name = name.to_string();
            }
            if let Some(description) = description {
                trip.description = description.to_string();
            }
            trip.updated_at = Self::now();
        }
        self.persist()?;
        Ok(self.data.trips[index].clone())
    }

    fn delete_trip(&mut self, id: Id) -> Result<()> {
        let index = self.trip_index(id)?;
        self.data.trips.remove(index);
        let city_ids = self.city_ids(id);
        self.data.cities.retain(|c| c.trip_id != id);
        self.data.routes.retain(|r| r.trip_id != id);
        self.data
            .images
            .retain(|i| !city_ids.contains(&i.trip_city_id));
        self.data.flags.retain(|f| f.trip_id != id);
        self.persist()
    }

    fn add_city(&mut self, trip_id: Id, place: &Place, order_index: usize) -> Result<CityRecord> {
        self.trip_index(trip_id)?;
        let record = CityRecord {
            id: self.alloc_id(),
            trip_id,
            city_name: place.name.clone(),
            state: place.state.clone(),
            country: place.country.clone(),
            latitude: place.lat,
            longitude: place.lng,
            display_name: place.display_name.clone(),
            order_index,
            notes: String::new(),
            created_at: Self::now(),
        };
        self.data.cities.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn cities_by_trip(&self, trip_id: Id) -> Result<Vec<CityRecord>> {
        let mut cities: Vec<CityRecord> = self
            .data
            .cities
            .iter()
            .filter(|c| c.trip_id == trip_id)
            .cloned()
            .collect();
        cities.sort_by_key(|c| c.order_index);
        Ok(cities)
    }

    fn update_city_notes(&mut self, city_id: Id, notes: &str) -> Result<CityRecord> {
        let city = self
            .data
            .cities
            .iter_mut()
            .find(|c| c.id == city_id)
            .ok_or_else(|| TripError::NotFound(format!("city {city_id}")))?;
        city.notes = notes.to_string();
        let record = city.clone();
        self.persist()?;
        Ok(record)
    }

    fn delete_trip_cities(&mut self, trip_id: Id) -> Result<()> {
        let city_ids = self.city_ids(trip_id);
        self.data.cities.retain(|c| c.trip_id != trip_id);
        self.data
            .images
            .retain(|i| !city_ids.contains(&i.trip_city_id));
        self.persist()
    }

    fn add_route(
        &mut self,
        trip_id: Id,
        from_city_id: Id,
        to_city_id: Id,
        line_type: &str,
        line_color: &str,
    ) -> Result<RouteRecord> {
        self.trip_index(trip_id)?;
        let record = RouteRecord {
            id: self.alloc_id(),
            trip_id,
            from_city_id,
            to_city_id,
            line_type: line_type.to_string(),
            line_color: line_color.to_string(),
            created_at: Self::now(),
        };
        self.data.routes.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn routes_by_trip(&self, trip_id: Id) -> Result<Vec<RouteRecord>> {
        Ok(self
            .data
            .routes
            .iter()
            .filter(|r| r.trip_id == trip_id)
            .cloned()
            .collect())
    }

    fn delete_trip_routes(&mut self, trip_id: Id) -> Result<()> {
        self.data.routes.retain(|r| r.trip_id != trip_id);
        self.persist()
    }

    fn add_image(
        &mut self,
        city_id: Id,
        data: &str,
        image_type: &str,
        caption: Option<&str>,
    ) -> Result<ImageRecord> {
        let record = ImageRecord {
            id: self.alloc_id(),
            trip_city_id: city_id,
            image_data: data.to_string(),
            image_type: image_type.to_string(),
            caption: caption.map(str::to_string),
            created_at: Self::now(),
        };
        self.data.images.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn images_by_city(&self, city_id: Id) -> Result<Vec<ImageRecord>> {
        Ok(self
            .data
            .images
            .iter()
            .filter(|i| i.trip_city_id == city_id)
            .cloned()
            .collect())
    }

    fn images_by_trip(&self, trip_id: Id) -> Result<Vec<ImageRecord>> {
        let city_ids = self.city_ids(trip_id);
        Ok(self
            .data
            .images
            .iter()
            .filter(|i| city_ids.contains(&i.trip_city_id))
            .cloned()
            .collect())
    }

    fn delete_trip_images(&mut self, trip_id: Id) -> Result<()> {
        let city_ids = self.city_ids(trip_id);
        self.data
            .images
            .retain(|i| !city_ids.contains(&i.trip_city_id));
        self.persist()
    }

    fn add_flag(
        &mut self,
        trip_id: Id,
        flag_type: &str,
        flag_value: Option<&str>,
    ) -> Result<FlagRecord> {
        self.trip_index(trip_id)?;
        let record = FlagRecord {
            id: self.alloc_id(),
            trip_id,
            flag_type: flag_type.to_string(),
            flag_value: flag_value.map(str::to_string),
            created_at: Self::now(),
        };
        self.data.flags.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn flags_by_trip(&self, trip_id: Id) -> Result<Vec<FlagRecord>> {
        Ok(self
            .data
            .flags
            .iter()
            .filter(|f| f.trip_id == trip_id)
            .cloned()
            .collect())
    }

    fn delete_trip_flags(&mut self, trip_id: Id) -> Result<()> {
        self.data.flags.retain(|f| f.trip_id != trip_id);
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_reads_what_was_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triplog.json");

        let trip_id = {
            let mut store = LocalStore::open(&path).unwrap();
            let trip = store.create_trip("Nordics", "midsummer").unwrap();
            store
                .add_city(trip.id, &Place::new("Oslo", "Norway", 59.91, 10.75), 0)
                .unwrap();
            store.add_flag(trip.id, "visited", Some("NO")).unwrap();
            trip.id
        };

        let store = LocalStore::open(&path).unwrap();
        let trip = store.trip(trip_id).unwrap();
        assert_eq!(trip.name, "Nordics");
        assert_eq!(store.cities_by_trip(trip_id).unwrap().len(), 1);
        assert_eq!(store.flags_by_trip(trip_id).unwrap().len(), 1);
    }

    #[test]
    fn ids_stay_unique_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triplog.json");

        let first = {
            let mut store = LocalStore::open(&path).unwrap();
            store.create_trip("A", "").unwrap().id
        };
        let second = {
            let mut store = LocalStore::open(&path).unwrap();
            store.create_trip("B", "").unwrap().id
        };
        assert!(second > first);
    }

    #[test]
    fn delete_trip_cascades() {
        let mut store = LocalStore::in_memory();
        let trip = store.create_trip("Gone", "").unwrap();
        let city = store
            .add_city(trip.id, &Place::new("Bergen", "Norway", 60.39, 5.32), 0)
            .unwrap();
        store
            .add_image(city.id, "data:image/png;base64,BBBB", "base64", None)
            .unwrap();
        store.add_flag(trip.id, "visited", None).unwrap();

        store.delete_trip(trip.id).unwrap();
        assert!(store.trip(trip.id).is_err());
        assert!(store.cities_by_trip(trip.id).unwrap().is_empty());
        assert!(store.images_by_trip(trip.id).unwrap().is_empty());
        assert!(store.flags_by_trip(trip.id).unwrap().is_empty());
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gzip_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triplog.json.gz");

        {
            let mut store = LocalStore::open(&path).unwrap();
            store.create_trip("Compressed", "").unwrap();
        }
        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.trips().unwrap().len(), 1);
    }
}
