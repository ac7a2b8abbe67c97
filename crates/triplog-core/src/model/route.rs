// crates/triplog-core/src/model/route.rs
use serde::{Deserialize, Serialize};

/// Color assigned to a route when none was chosen explicitly.
pub const DEFAULT_ROUTE_COLOR: &str = "#3b82f6";

/// Transport classification of the edge arriving at a visit.
///
/// A closed set on purpose: color and dash-pattern derivation below are
/// exhaustive matches, so adding a transport mode is a compile-time-checked
/// change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Normal,
    Airplane,
    Car,
    Walking,
}

impl RouteKind {
    /// Wire/store spelling of the classification.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Normal => "normal",
            RouteKind::Airplane => "airplane",
            RouteKind::Car => "car",
            RouteKind::Walking => "walking",
        }
    }

    /// Parses the store spelling. Unknown strings map to `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(RouteKind::Normal),
            "airplane" => Some(RouteKind::Airplane),
            "car" => Some(RouteKind::Car),
            "walking" => Some(RouteKind::Walking),
            _ => None,
        }
    }

    /// Fixed render color for classifications that don't expose a color
    /// picker. `Normal` is the only kind rendered with the stored color.
    pub fn fixed_color(self) -> Option<&'static str> {
        match self {
            RouteKind::Normal => None,
            RouteKind::Airplane => Some("#3b82f6"),
            RouteKind::Car => Some("#f59e0b"),
            RouteKind::Walking => Some("#10b981"),
        }
    }

    /// Dash pattern hint for renderers; solid for `Normal`.
    pub fn dash_pattern(self) -> Option<&'static str> {
        match self {
            RouteKind::Normal => None,
            RouteKind::Airplane => Some("10, 5"),
            RouteKind::Car => Some("5, 5"),
            RouteKind::Walking => Some("2, 3"),
        }
    }
}

/// Transport classification plus display color for one resolved edge.
///
/// The stored color is kept verbatim even for non-normal kinds, so an edit
/// back to `Normal` restores the user's last choice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub kind: RouteKind,
    pub color: String,
}

impl RouteDescriptor {
    pub fn new(kind: RouteKind, color: impl Into<String>) -> Self {
        RouteDescriptor {
            kind,
            color: color.into(),
        }
    }

    /// The color a renderer should actually draw with.
    pub fn render_color(&self) -> &str {
        self.kind.fixed_color().unwrap_or(&self.color)
    }
}

/// Route dimension of a visit's lifecycle.
///
/// `NoRoute` is terminal for position 0. A visit appended to a non-empty
/// plan starts `Pending` until the user classifies the incoming edge;
/// renderers skip pending edges. `Resolved` stays resolved, re-classification
/// just replaces the descriptor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum RouteState {
    #[default]
    NoRoute,
    Pending,
    Resolved(RouteDescriptor),
}

impl RouteState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RouteState::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, RouteState::Resolved(_))
    }

    /// The descriptor, if this edge has been classified.
    pub fn descriptor(&self) -> Option<&RouteDescriptor> {
        match self {
            RouteState::Resolved(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_renders_stored_color() {
        let d = RouteDescriptor::new(RouteKind::Normal, "#ff0000");
        assert_eq!(d.render_color(), "#ff0000");
    }

    #[test]
    fn non_normal_renders_fixed_color_but_keeps_stored() {
        let d = RouteDescriptor::new(RouteKind::Airplane, "#ff0000");
        assert_eq!(d.render_color(), "#3b82f6");
        assert_eq!(d.color, "#ff0000");
    }

    #[test]
    fn kind_round_trips_through_store_spelling() {
        for kind in [
            RouteKind::Normal,
            RouteKind::Airplane,
            RouteKind::Car,
            RouteKind::Walking,
        ] {
            assert_eq!(RouteKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RouteKind::parse("teleport"), None);
    }
}
