// crates/triplog-core/src/export.rs

//! Trip export and import.
//!
//! The export document is plain JSON so trips can be shared as files and
//! re-imported elsewhere. Import never edits an existing trip: it always
//! materializes a fresh one and remaps record ids.

use crate::error::{Result, TripError};
use crate::fsio::{create_stream, open_stream};
use crate::model::{Place, RouteKind};
use crate::store::{CityRecord, FlagRecord, Id, ImageRecord, RouteRecord, TripRecord, TripStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// The file-boundary document: one trip with all of its child records and
/// an ISO-8601 export timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripExport {
    pub trip: TripRecord,
    pub cities: Vec<CityRecord>,
    pub routes: Vec<RouteRecord>,
    pub images: Vec<ImageRecord>,
    pub flags: Vec<FlagRecord>,
    pub exported_at: String,
}

/// Gathers every record of `trip_id` into an export document.
pub fn export_trip(store: &dyn TripStore, trip_id: Id) -> Result<TripExport> {
    Ok(TripExport {
        trip: store.trip(trip_id)?,
        cities: store.cities_by_trip(trip_id)?,
        routes: store.routes_by_trip(trip_id)?,
        images: store.images_by_trip(trip_id)?,
        flags: store.flags_by_trip(trip_id)?,
        exported_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Writes an export document to `path` (gzip for `.gz` paths with the
/// `compact` feature).
pub fn write_export(export: &TripExport, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = create_stream(path.as_ref())?;
    serde_json::to_writer_pretty(&mut writer, export)?;
    writer.flush()?;
    Ok(())
}

/// Reads and validates an export document from `path`.
///
/// Any shape problem (unparseable JSON, a missing `trip` key, missing
/// required fields) rejects the whole file with
/// [`TripError::MalformedImport`]; nothing is created.
pub fn read_export(path: impl AsRef<Path>) -> Result<TripExport> {
    let reader = open_stream(path.as_ref())?;
    let value: serde_json::Value = serde_json::from_reader(reader)
        .map_err(|e| TripError::MalformedImport(format!("not valid JSON: {e}")))?;
    if value.get("trip").is_none() {
        return Err(TripError::MalformedImport(
            "missing trip information".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| TripError::MalformedImport(e.to_string()))
}

/// Reconstructs an exported trip inside `store` as a brand new trip.
///
/// Cities are created in `order_index` order and routes are resolved by
/// matching old-id pairs to the newly assigned ids. Route rows that cannot
/// hold in the new trip (unknown cities, an edge into the origin, an
/// unknown line type) are dropped with a warning; image and flag rows are
/// copied verbatim, metadata included.
pub fn import_trip(store: &mut dyn TripStore, export: &TripExport) -> Result<TripRecord> {
    let name = if export.trip.name.is_empty() {
        "Imported Trip"
    } else {
        &export.trip.name
    };
    let new_trip = store.create_trip(name, &export.trip.description)?;

    let mut cities = export.cities.clone();
    cities.sort_by_key(|c| c.order_index);

    let mut id_map: HashMap<Id, Id> = HashMap::new();
    for (index, city) in cities.iter().enumerate() {
        let place = Place {
            name: city.city_name.clone(),
            state: city.state.clone(),
            country: city.country.clone(),
            lat: city.latitude,
            lng: city.longitude,
            display_name: city.display_name.clone(),
            importance: None,
        };
        let record = store.add_city(new_trip.id, &place, index)?;
        if !city.notes.is_empty() {
            store.update_city_notes(record.id, &city.notes)?;
        }
        for image in export.images.iter().filter(|i| i.trip_city_id == city.id) {
            store.add_image(
                record.id,
                &image.image_data,
                &image.image_type,
                image.caption.as_deref(),
            )?;
        }
        id_map.insert(city.id, record.id);
    }

    let origin_id = cities.first().map(|c| c.id);
    for route in &export.routes {
        if Some(route.to_city_id) == origin_id {
            log::warn!(
                "import: dropping route {} -> {} into the origin city",
                route.from_city_id,
                route.to_city_id
            );
            continue;
        }
        if RouteKind::parse(&route.line_type).is_none() {
            log::warn!(
                "import: dropping route with unknown line type {:?}",
                route.line_type
            );
            continue;
        }
        match (id_map.get(&route.from_city_id), id_map.get(&route.to_city_id)) {
            (Some(&from), Some(&to)) => {
                store.add_route(new_trip.id, from, to, &route.line_type, &route.line_color)?;
            }
            _ => {
                log::warn!(
                    "import: dropping route {} -> {} referencing unknown cities",
                    route.from_city_id,
                    route.to_city_id
                );
            }
        }
    }

    for flag in &export.flags {
        store.add_flag(new_trip.id, &flag.flag_type, flag.flag_value.as_deref())?;
    }

    Ok(new_trip)
}

/// Convenience wrapper: read a file and import it in one step.
pub fn import_trip_file(store: &mut dyn TripStore, path: impl AsRef<Path>) -> Result<TripRecord> {
    let export = read_export(path)?;
    import_trip(store, &export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TripPlan;
    use crate::store::{load_plan, save_plan, LocalStore};

    fn sample_trip(store: &mut LocalStore) -> Id {
        let trip = store.create_trip("Japan 2026", "golden week").unwrap();
        let mut plan = TripPlan::new();
        plan.add_place(Place::new("Tokyo", "Japan", 35.6762, 139.6503));
        plan.add_place(Place::new("Osaka", "Japan", 34.6937, 135.5023));
        plan.set_route(1, RouteKind::Airplane, "#3b82f6").unwrap();
        plan.set_notes(0, "arrive at Haneda").unwrap();
        plan.add_image(0, "data:image/png;base64,AAAA").unwrap();
        save_plan(store, trip.id, &plan).unwrap();
        store.add_flag(trip.id, "visited", Some("JP")).unwrap();
        trip.id
    }

    #[test]
    fn export_document_carries_all_sections() {
        let mut store = LocalStore::in_memory();
        let trip_id = sample_trip(&mut store);

        let export = export_trip(&store, trip_id).unwrap();
        assert_eq!(export.trip.name, "Japan 2026");
        assert_eq!(export.cities.len(), 2);
        assert_eq!(export.routes.len(), 1);
        assert_eq!(export.images.len(), 1);
        assert_eq!(export.flags.len(), 1);
        assert!(!export.exported_at.is_empty());
    }

    #[test]
    fn import_materializes_a_fresh_trip_alongside_the_original() {
        let mut store = LocalStore::in_memory();
        let trip_id = sample_trip(&mut store);
        let original = load_plan(&store, trip_id).unwrap();

        let export = export_trip(&store, trip_id).unwrap();
        let imported = import_trip(&mut store, &export).unwrap();

        assert_ne!(imported.id, trip_id);
        let plan = load_plan(&store, imported.id).unwrap();
        assert_eq!(plan, original);
        assert_eq!(store.flags_by_trip(imported.id).unwrap().len(), 1);
        // The source trip is untouched.
        assert_eq!(load_plan(&store, trip_id).unwrap(), original);
    }

    #[test]
    fn image_metadata_survives_import() {
        let mut store = LocalStore::in_memory();
        let trip_id = sample_trip(&mut store);
        let city = store.cities_by_trip(trip_id).unwrap()[1].clone();
        store
            .add_image(
                city.id,
                "data:image/jpeg;base64,BBBB",
                "jpeg",
                Some("Shibuya at night"),
            )
            .unwrap();

        let export = export_trip(&store, trip_id).unwrap();
        let mut other = LocalStore::in_memory();
        let imported = import_trip(&mut other, &export).unwrap();

        let images = other.images_by_trip(imported.id).unwrap();
        let jpeg = images
            .iter()
            .find(|i| i.image_data == "data:image/jpeg;base64,BBBB")
            .unwrap();
        assert_eq!(jpeg.image_type, "jpeg");
        assert_eq!(jpeg.caption.as_deref(), Some("Shibuya at night"));
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn routes_into_the_origin_are_dropped_on_import() {
        let mut store = LocalStore::in_memory();
        let trip_id = sample_trip(&mut store);
        let mut export = export_trip(&store, trip_id).unwrap();
        export.routes[0].to_city_id = export.cities[0].id;

        let mut other = LocalStore::in_memory();
        let imported = import_trip(&mut other, &export).unwrap();
        assert!(other.routes_by_trip(imported.id).unwrap().is_empty());
        let plan = load_plan(&other, imported.id).unwrap();
        assert_eq!(plan.visits()[0].route, crate::model::RouteState::NoRoute);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("japan.json");

        let mut store = LocalStore::in_memory();
        let trip_id = sample_trip(&mut store);
        write_export(&export_trip(&store, trip_id).unwrap(), &path).unwrap();

        let mut other = LocalStore::in_memory();
        let imported = import_trip_file(&mut other, &path).unwrap();
        assert_eq!(
            load_plan(&other, imported.id).unwrap(),
            load_plan(&store, trip_id).unwrap()
        );
    }

    #[test]
    fn missing_trip_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"cities": []}"#).unwrap();

        assert!(matches!(
            read_export(&path),
            Err(TripError::MalformedImport(_))
        ));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            read_export(&path),
            Err(TripError::MalformedImport(_))
        ));
    }

    #[test]
    fn routes_referencing_unknown_cities_are_dropped() {
        let mut store = LocalStore::in_memory();
        let trip_id = sample_trip(&mut store);
        let mut export = export_trip(&store, trip_id).unwrap();
        export.routes[0].to_city_id = 9999;

        let mut other = LocalStore::in_memory();
        let imported = import_trip(&mut other, &export).unwrap();
        assert!(other.routes_by_trip(imported.id).unwrap().is_empty());
    }

    #[test]
    fn empty_trip_name_defaults_on_import() {
        let mut store = LocalStore::in_memory();
        let trip_id = sample_trip(&mut store);
        let mut export = export_trip(&store, trip_id).unwrap();
        export.trip.name = String::new();

        let mut other = LocalStore::in_memory();
        let imported = import_trip(&mut other, &export).unwrap();
        assert_eq!(imported.name, "Imported Trip");
    }
}
