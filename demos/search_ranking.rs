//! Search ranking example for triplog-rs
//!
//! Feeds a canned set of geocoder matches through the ranker to show the
//! acceptance filter, deduplication, and the per-country diversity cap.
//! No network access is needed; with the `client` feature the same
//! pipeline runs over live Nominatim responses.

use triplog_core::{rank_matches, RawAddress, RawMatch};

fn town(name: &str, country: &str, lat: f64, lon: f64, importance: f64) -> RawMatch {
    RawMatch {
        name: Some(name.to_string()),
        display_name: Some(format!("{name}, {country}")),
        class: Some("place".to_string()),
        kind: Some("town".to_string()),
        lat: Some(lat.to_string()),
        lon: Some(lon.to_string()),
        importance: Some(importance),
        address: RawAddress {
            country: Some(country.to_string()),
            ..RawAddress::default()
        },
    }
}

fn main() {
    let mut raw = vec![
        // A shop: filtered out, only settlements survive.
        RawMatch {
            name: Some("Springfield Donuts".to_string()),
            class: Some("amenity".to_string()),
            kind: Some("cafe".to_string()),
            lat: Some("39.8".to_string()),
            lon: Some("-89.6".to_string()),
            importance: Some(0.95),
            ..RawMatch::default()
        },
        // Two rows for the same Springfield; the lower-relevance twin is
        // deduplicated away.
        town("Springfield", "United States", 39.7817, -89.6501, 0.71),
        town("Springfield", "United States", 39.7830, -89.6510, 0.40),
        // A distant namesake in another state survives.
        town("Springfield", "United States", 37.2090, -93.2923, 0.55),
    ];
    // Plenty of same-country hits to exercise the diversity cap.
    for i in 0..8 {
        raw.push(town(
            &format!("Springfield No. {i}"),
            "United States",
            30.0 + f64::from(i),
            -90.0,
            0.30,
        ));
    }
    raw.push(town("Springfield", "Canada", 44.24, -79.49, 0.45));

    let hits = rank_matches(&raw);
    println!("{} candidates:", hits.len());
    for hit in &hits {
        println!(
            "  {:<20} {:<15} ({:>8.4}, {:>9.4})  weight {:.2}",
            hit.name, hit.country, hit.lat, hit.lng, hit.importance
        );
    }
}
