// crates/triplog-core/src/ranker.rs

//! Place-search ranking.
//!
//! Turns raw geocoder matches for a free-text query into a small, diverse,
//! relevance-ordered candidate list: accept → dedup → sort ([`rank`]), then
//! a separate per-country diversity cap ([`cap`]). Both stages are pure
//! functions of their input; transport errors are the caller's problem and
//! empty input simply yields empty output.

use crate::model::Place;
use crate::text::fold_key;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Hard ceiling on ranked results.
pub const MAX_RESULTS: usize = 40;
/// Ceiling per country key, so a worldwide-common name doesn't let one
/// country dominate the list.
pub const MAX_PER_COUNTRY: usize = 5;

/// Coordinates closer than this (per axis, in degrees) count as the same
/// location for deduplication. Intentionally coarse: ~1km at the equator.
const DUP_EPSILON_DEG: f64 = 0.01;

/// Address breakdown of a raw geocoder match (Nominatim `addressdetails`).
/// Geocoders are inconsistent about which field is populated, hence the
/// fallback chains below.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub prefecture: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

/// One raw match as returned by the geocoding collaborator.
///
/// `lat`/`lon` arrive as strings on the wire; a match without parseable
/// coordinates is discarded by the acceptance filter.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawMatch {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub class: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub importance: Option<f64>,
    pub address: RawAddress,
}

/// A ranked, deduplicated search result. Transient: lives only for the
/// duration of one search response.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchCandidate {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub display_name: Option<String>,
    pub importance: f64,
}

impl SearchCandidate {
    pub fn into_place(self) -> Place {
        Place {
            name: self.name,
            state: self.state,
            country: self.country,
            lat: self.lat,
            lng: self.lng,
            display_name: self.display_name,
            importance: Some(self.importance),
        }
    }
}

static ACCEPTED_CLASSES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["place", "boundary", "administrative"]));

static ACCEPTED_KINDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "city",
        "town",
        "village",
        "municipality",
        "administrative",
        "suburb",
        "city_block",
        "neighbourhood",
        "quarter",
        "hamlet",
        "locality",
        "borough",
        "state_district",
    ])
});

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.is_empty())
}

/// Best-effort display name for a match.
///
/// Prefers the explicit name, except for administrative boundaries where the
/// address's city/town/municipality is more useful than the boundary's own
/// name. The fallback chain (city → town → village → municipality → county →
/// state → first comma-segment of display_name → "Unknown") is load-bearing
/// and must keep this exact order.
fn extract_name(m: &RawMatch) -> String {
    let a = &m.address;
    if let Some(name) = non_empty(&m.name) {
        if m.class.as_deref() == Some("boundary") && m.kind.as_deref() == Some("administrative") {
            return non_empty(&a.city)
                .or_else(|| non_empty(&a.town))
                .or_else(|| non_empty(&a.municipality))
                .unwrap_or(name)
                .to_string();
        }
        return name.to_string();
    }

    non_empty(&a.city)
        .or_else(|| non_empty(&a.town))
        .or_else(|| non_empty(&a.village))
        .or_else(|| non_empty(&a.municipality))
        .or_else(|| non_empty(&a.county))
        .or_else(|| non_empty(&a.state))
        .or_else(|| {
            non_empty(&m.display_name).and_then(|d| d.split(',').next().map(str::trim))
        })
        .unwrap_or("Unknown")
        .to_string()
}

fn extract_country(a: &RawAddress) -> String {
    non_empty(&a.country)
        .map(str::to_string)
        .or_else(|| non_empty(&a.country_code).map(str::to_uppercase))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Whichever locally-relevant administrative subdivision is populated:
/// state, then region, prefecture, province, district, county.
fn extract_subdivision(a: &RawAddress) -> Option<String> {
    non_empty(&a.state)
        .or_else(|| non_empty(&a.region))
        .or_else(|| non_empty(&a.prefecture))
        .or_else(|| non_empty(&a.province))
        .or_else(|| non_empty(&a.district))
        .or_else(|| non_empty(&a.county))
        .map(str::to_string)
}

fn coordinates(m: &RawMatch) -> Option<(f64, f64)> {
    let lat = non_empty(&m.lat)?.trim().parse::<f64>().ok()?;
    let lng = non_empty(&m.lon)?.trim().parse::<f64>().ok()?;
    Some((lat, lng))
}

/// Keep settlements and administrative areas, discard POIs, shops, etc.
fn accepts(m: &RawMatch) -> bool {
    let class_ok = m
        .class
        .as_deref()
        .is_some_and(|c| ACCEPTED_CLASSES.contains(c));
    let kind_ok = m
        .kind
        .as_deref()
        .is_some_and(|k| ACCEPTED_KINDS.contains(k));
    if class_ok && kind_ok {
        return true;
    }

    // Also accept anything whose address carries a settlement field.
    let a = &m.address;
    non_empty(&a.city).is_some()
        || non_empty(&a.town).is_some()
        || non_empty(&a.village).is_some()
        || non_empty(&a.municipality).is_some()
}

/// `b` is a duplicate of `a` when they share name and country, sit within
/// [`DUP_EPSILON_DEG`] on both axes, and `a` carries strictly higher
/// relevance. Equal-weight near-twins both survive.
fn dominates(a: &SearchCandidate, b: &SearchCandidate) -> bool {
    a.name == b.name
        && a.country == b.country
        && (a.lat - b.lat).abs() < DUP_EPSILON_DEG
        && (a.lng - b.lng).abs() < DUP_EPSILON_DEG
        && a.importance > b.importance
}

/// Filters, deduplicates, and sorts raw matches into candidates.
///
/// Deduplication is a pairwise dominance check across the full set, not a
/// stable single pass: any candidate may be dominated by any other. The sort
/// is relevance-descending with a folded-name alphabetical tie-break.
pub fn rank(raw: &[RawMatch]) -> Vec<SearchCandidate> {
    let mut out: Vec<SearchCandidate> = raw
        .iter()
        .filter_map(|m| {
            let (lat, lng) = coordinates(m)?;
            if !accepts(m) {
                return None;
            }
            Some(SearchCandidate {
                name: extract_name(m),
                state: extract_subdivision(&m.address),
                country: extract_country(&m.address),
                lat,
                lng,
                display_name: m.display_name.clone(),
                importance: m.importance.unwrap_or(0.0),
            })
        })
        .collect();

    let pool = out.clone();
    out.retain(|c| !pool.iter().any(|other| dominates(other, c)));

    out.sort_by(|a, b| {
        match b.importance.total_cmp(&a.importance) {
            Ordering::Equal => fold_key(&a.name).cmp(&fold_key(&b.name)),
            other => other,
        }
    });
    out
}

/// Walks a ranked list in order, admitting at most [`MAX_PER_COUNTRY`]
/// candidates per country key and [`MAX_RESULTS`] overall.
pub fn cap(ranked: Vec<SearchCandidate>) -> Vec<SearchCandidate> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();

    for candidate in ranked {
        let seen = counts.entry(candidate.country.clone()).or_insert(0);
        if *seen < MAX_PER_COUNTRY {
            *seen += 1;
            out.push(candidate);
        }
        if out.len() >= MAX_RESULTS {
            break;
        }
    }
    out
}

/// The full pipeline: [`rank`] then [`cap`].
pub fn rank_matches(raw: &[RawMatch]) -> Vec<SearchCandidate> {
    cap(rank(raw))
}
