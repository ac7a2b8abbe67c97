// crates/triplog-core/src/model/place.rs
use serde::{Deserialize, Serialize};

/// A geographic point a trip can visit.
///
/// Immutable once attached to a visit: plan operations never edit place
/// fields, they only move whole visits around.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// State / province / prefecture, whichever administrative term the
    /// geocoder populated for this point, if any.
    pub state: Option<String>,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    /// Long-form name as returned by the geocoder.
    pub display_name: Option<String>,
    /// Relevance weight, only meaningful on search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
}

impl Place {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Place {
            name: name.into(),
            state: None,
            country: country.into(),
            lat,
            lng,
            display_name: None,
            importance: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// "Name, State, Country" label, omitting the subdivision when absent.
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}
