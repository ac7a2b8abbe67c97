//! triplog-cli
//! ===========
//!
//! Command-line interface for the `triplog-core` trip planner.
//!
//! This crate primarily provides a binary (`triplog`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview. See the README for full usage examples.
//!
//! Quick start
//! -----------
//!
//! Install the CLI from crates.io:
//!
//! ```text
//! cargo install triplog-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! triplog --help
//! triplog new "Japan 2026"
//! triplog add-city 1 Tokyo Japan 35.6762 139.6503
//! triplog search "Springfield"
//! ```
//!
//! For programmatic access to the trip plan model, the search ranker, and the
//! store, use the [`triplog-core`] crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
