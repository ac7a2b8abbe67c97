// crates/triplog-core/src/geocode.rs

//! Geocoding collaborator seam.
//!
//! The core only depends on the [`Geocoder`] trait; the bundled Nominatim
//! client lives behind the `client` feature so library users without a
//! network stack don't pay for `reqwest`.

use crate::error::Result;
use crate::ranker::RawMatch;

/// Free-text place search against some geocoding backend.
///
/// Implementations may fail or time out; they surface that as
/// [`crate::TripError::Unavailable`] and the caller decides whether to
/// retry. Ranking of the returned matches is the caller's job (see
/// [`crate::ranker::rank_matches`]).
pub trait Geocoder {
    fn search(&self, query: &str) -> Result<Vec<RawMatch>>;
}

#[cfg(feature = "client")]
pub use client::NominatimClient;

#[cfg(feature = "client")]
mod client {
    use super::Geocoder;
    use crate::error::{Result, TripError};
    use crate::ranker::RawMatch;
    use std::time::Duration;

    const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
    // Nominatim's usage policy requires an identifying user agent.
    const USER_AGENT: &str = concat!("triplog-rs/", env!("CARGO_PKG_VERSION"));

    /// Blocking client for the OpenStreetMap Nominatim search endpoint.
    #[derive(Debug)]
    pub struct NominatimClient {
        http: reqwest::blocking::Client,
        base_url: String,
    }

    impl NominatimClient {
        pub fn new() -> Result<Self> {
            Self::with_base_url(NOMINATIM_URL)
        }

        /// Point the client at a different endpoint, e.g. a self-hosted
        /// Nominatim instance or a test server.
        pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
            let http = reqwest::blocking::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| TripError::Unavailable(e.to_string()))?;
            Ok(NominatimClient {
                http,
                base_url: base_url.into(),
            })
        }
    }

    impl Geocoder for NominatimClient {
        fn search(&self, query: &str) -> Result<Vec<RawMatch>> {
            // Single characters produce noise; match the UI behavior of not
            // querying until two characters are typed.
            let query = query.trim();
            if query.len() < 2 {
                return Ok(Vec::new());
            }

            log::debug!("nominatim search: {query:?}");
            let response = self
                .http
                .get(&self.base_url)
                .query(&[
                    ("q", query),
                    ("format", "json"),
                    ("addressdetails", "1"),
                    ("limit", "50"),
                    ("extratags", "1"),
                    ("namedetails", "1"),
                ])
                .send()
                .map_err(|e| TripError::Unavailable(e.to_string()))?;

            if !response.status().is_success() {
                return Err(TripError::Unavailable(format!(
                    "geocoder returned {}",
                    response.status()
                )));
            }

            response
                .json()
                .map_err(|e| TripError::Unavailable(format!("bad geocoder payload: {e}")))
        }
    }
}
