//! triplog: command-line interface for triplog-core
//!
//! This binary manages trips from the terminal: create and list trips,
//! append and reorder place visits, classify the routes between them,
//! attach notes, search for places by free text, and export/import whole
//! trips as JSON files.
//!
//! Usage examples
//! --------------
//!
//! - Create a trip and add stops
//!   $ triplog new "Japan 2026"
//!   $ triplog add-city 1 Tokyo Japan 35.6762 139.6503
//!   $ triplog add-city 1 Osaka Japan 34.6937 135.5023
//!
//! - Classify the edge into the second stop
//!   $ triplog route 1 1 airplane
//!
//! - Inspect, export, re-import
//!   $ triplog show 1
//!   $ triplog export 1 japan.json
//!   $ triplog import japan.json
//!
//! - Search for places (talks to Nominatim)
//!   $ triplog search "Springfield"
//!
//! Data lives in a single store file (default `triplog.json` in the working
//! directory); point `--store` elsewhere to keep separate collections.
mod args;

use crate::args::{CliArgs, Commands, Direction};
use anyhow::Context;
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use triplog_core::{
    export_trip, import_trip_file, load_plan, save_plan, write_export, LocalStore, Place,
    RouteKind, TripStore,
};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    log::info!("using store {}", args.store);
    let mut store = LocalStore::open(&args.store)
        .with_context(|| format!("failed to open store {}", args.store))?;

    match args.command {
        Commands::New { name, description } => {
            let trip = store.create_trip(&name, &description)?;
            println!("Created trip {} ({})", trip.id, trip.name);
        }

        Commands::List => {
            let trips = store.trips()?;
            if trips.is_empty() {
                println!("No trips yet. Create one with: triplog new <name>");
            }
            for trip in trips {
                let cities = store.cities_by_trip(trip.id)?;
                let suffix = if trip.description.is_empty() {
                    String::new()
                } else {
                    format!(" — {}", trip.description)
                };
                println!(
                    "{}: {}{} ({} {})",
                    trip.id,
                    trip.name,
                    suffix,
                    cities.len(),
                    if cities.len() == 1 { "city" } else { "cities" }
                );
            }
        }

        Commands::Show { trip } => {
            let record = store.trip(trip)?;
            let plan = load_plan(&store, trip)?;
            println!("Trip {}: {}", record.id, record.name);
            if !record.description.is_empty() {
                println!("  {}", record.description);
            }
            for (index, visit) in plan.visits().iter().enumerate() {
                println!(
                    "  [{}] {} ({:.4}, {:.4})",
                    index,
                    visit.place.label(),
                    visit.place.lat,
                    visit.place.lng
                );
                if !visit.notes.is_empty() {
                    println!("      notes: {}", visit.notes);
                }
                if !visit.images.is_empty() {
                    println!("      images: {}", visit.images.len());
                }
            }
            let edges = plan.ordered_edges();
            if !edges.is_empty() {
                println!("Routes:");
                for edge in edges {
                    println!(
                        "  {} -> {} [{} {}]",
                        edge.from.place.name,
                        edge.to.place.name,
                        edge.route.kind.as_str(),
                        edge.route.render_color()
                    );
                }
            }
            if let Some(pending) = plan.first_pending() {
                println!("Position {pending} is awaiting route classification (use: triplog route)");
            }
        }

        Commands::Delete { trip } => {
            store.delete_trip(trip)?;
            println!("Deleted trip {trip}");
        }

        Commands::AddCity {
            trip,
            name,
            country,
            lat,
            lng,
            state,
        } => {
            let mut plan = load_plan(&store, trip)?;
            let mut place = Place::new(name.clone(), country, lat, lng);
            if let Some(state) = state {
                place = place.with_state(state);
            }
            if plan.add_place(place) {
                save_plan(&mut store, trip, &plan)?;
                println!("Added {} at position {}", name, plan.len() - 1);
                if plan.first_pending().is_some() {
                    println!(
                        "Classify the incoming route with: triplog route {} {} <kind>",
                        trip,
                        plan.len() - 1
                    );
                }
            } else {
                println!("{name} is already in the plan; nothing to do");
            }
        }

        Commands::RemoveCity { trip, index } => {
            let mut plan = load_plan(&store, trip)?;
            let removed = plan.remove_at(index)?;
            save_plan(&mut store, trip, &plan)?;
            println!("Removed {}", removed.place.name);
        }

        Commands::MoveCity {
            trip,
            index,
            direction,
        } => {
            let mut plan = load_plan(&store, trip)?;
            let moved = match direction {
                Direction::Up => plan.move_up(index)?,
                Direction::Down => plan.move_down(index)?,
            };
            if moved {
                save_plan(&mut store, trip, &plan)?;
                println!("Moved position {index} {direction:?}");
            } else {
                println!("Position {index} is already at the boundary");
            }
        }

        Commands::Route {
            trip,
            index,
            kind,
            color,
        } => {
            let kind = RouteKind::parse(&kind)
                .with_context(|| format!("unknown route kind {kind:?} (normal, airplane, car, walking)"))?;
            let mut plan = load_plan(&store, trip)?;
            plan.set_route(index, kind, &color)?;
            save_plan(&mut store, trip, &plan)?;
            println!("Route into position {} is now {}", index, kind.as_str());
        }

        Commands::Notes { trip, index, text } => {
            let mut plan = load_plan(&store, trip)?;
            plan.set_notes(index, text)?;
            save_plan(&mut store, trip, &plan)?;
            println!("Updated notes on position {index}");
        }

        Commands::Export { trip, output } => {
            let export = export_trip(&store, trip)?;
            write_export(&export, &output)?;
            println!("Exported trip {trip} to {output}");
        }

        Commands::Import { file } => {
            let trip = import_trip_file(&mut store, &file)?;
            println!("Imported trip {} ({})", trip.id, trip.name);
        }

        Commands::Search { query } => {
            run_search(&query)?;
        }
    }

    Ok(())
}

#[cfg(feature = "client")]
fn run_search(query: &str) -> anyhow::Result<()> {
    use triplog_core::{rank_matches, Geocoder, NominatimClient};

    let client = NominatimClient::new()?;
    let raw = client.search(query)?;
    let hits = rank_matches(&raw);
    if hits.is_empty() {
        println!("No places found matching: {query}");
        return Ok(());
    }
    for hit in hits {
        println!(
            "{} ({:.4}, {:.4}) [{:.3}]",
            hit_label(&hit),
            hit.lat,
            hit.lng,
            hit.importance
        );
    }
    Ok(())
}

#[cfg(feature = "client")]
fn hit_label(hit: &triplog_core::SearchCandidate) -> String {
    match &hit.state {
        Some(state) => format!("{}, {}, {}", hit.name, state, hit.country),
        None => format!("{}, {}", hit.name, hit.country),
    }
}

#[cfg(not(feature = "client"))]
fn run_search(_query: &str) -> anyhow::Result<()> {
    anyhow::bail!("this build has no geocoding client; rebuild with --features client")
}
