//! Basic usage example for triplog-rs
//!
//! Builds a small trip in memory, classifies its routes, and prints the
//! edges a renderer would draw.

use triplog_core::{Place, RouteKind, TripPlan};

fn main() -> triplog_core::Result<()> {
    let mut plan = TripPlan::new();

    // The first stop is the trip's origin: it never has an incoming route.
    plan.add_place(Place::new("Tokyo", "Japan", 35.6762, 139.6503));

    // Every later stop starts with a pending route until it is classified.
    plan.add_place(Place::new("Osaka", "Japan", 34.6937, 135.5023));
    plan.add_place(
        Place::new("Kyoto", "Japan", 35.0116, 135.7681).with_state("Kyoto Prefecture"),
    );

    plan.set_route(1, RouteKind::Airplane, "#3b82f6")?;
    plan.set_route(2, RouteKind::Normal, "#ff0000")?;

    plan.set_notes(1, "Okonomiyaki night")?;

    println!("Trip with {} stops:", plan.len());
    for (index, visit) in plan.visits().iter().enumerate() {
        println!("  [{}] {}", index, visit.place.label());
    }

    println!("Edges to draw:");
    for edge in plan.ordered_edges() {
        println!(
            "  {} -> {} ({}, color {}, dash {:?})",
            edge.from.place.name,
            edge.to.place.name,
            edge.route.kind.as_str(),
            edge.route.render_color(),
            edge.route.kind.dash_pattern(),
        );
    }

    // Deleting a stop re-derives the invariants automatically.
    plan.remove_at(0)?;
    println!(
        "After removing the origin, {} is the new origin (route: {:?})",
        plan.visits()[0].place.name,
        plan.visits()[0].route
    );

    Ok(())
}
