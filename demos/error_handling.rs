//! Error handling example for triplog-rs
//!
//! This example demonstrates the error taxonomy and the guarantee that a
//! failed operation never leaves a plan partially mutated.

use triplog_core::{LocalStore, Place, RouteKind, TripError, TripPlan, TripStore};

fn main() {
    let mut plan = TripPlan::new();
    plan.add_place(Place::new("Tokyo", "Japan", 35.6762, 139.6503));
    plan.add_place(Place::new("Osaka", "Japan", 34.6937, 135.5023));

    // Example 1: the origin never accepts a route.
    println!("--- Example 1: classifying the origin ---");
    match plan.set_route(0, RouteKind::Car, "#000000") {
        Ok(()) => println!("  unexpected success"),
        Err(TripError::InvalidIndex { index, len }) => {
            println!("  rejected: index {index} of {len} (position 0 has no incoming edge)");
        }
        Err(e) => println!("  unexpected error: {e}"),
    }

    // Example 2: out-of-range operations fail without mutating.
    println!("--- Example 2: out-of-range removal ---");
    let before = plan.clone();
    match plan.remove_at(10) {
        Err(e) => println!("  rejected: {e}"),
        Ok(_) => println!("  unexpected success"),
    }
    assert_eq!(plan, before);
    println!("  plan unchanged: {} stops", plan.len());

    // Example 3: duplicate places are ignored, not errors.
    println!("--- Example 3: duplicate place ---");
    let added = plan.add_place(Place::new("Tokyo", "Japan", 0.0, 0.0));
    println!("  added = {added}, still {} stops", plan.len());

    // Example 4: store lookups for unknown ids.
    println!("--- Example 4: unknown trip id ---");
    let store = LocalStore::in_memory();
    match store.trip(42) {
        Err(TripError::NotFound(what)) => println!("  not found: {what}"),
        other => println!("  unexpected: {other:?}"),
    }
}
