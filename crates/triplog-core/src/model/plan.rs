// crates/triplog-core/src/model/plan.rs
use super::place::Place;
use super::route::{RouteDescriptor, RouteKind, RouteState, DEFAULT_ROUTE_COLOR};
use crate::error::{Result, TripError};
use serde::{Deserialize, Serialize};

/// One stop in a trip: a place plus notes, image payloads, and the state of
/// the edge arriving at this stop from its predecessor.
///
/// Position is implicit: a visit's index in the plan's vector *is* its
/// position, which keeps the dense `0..N-1` invariant impossible to violate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub place: Place,
    pub notes: String,
    /// Opaque image payloads (typically base64 data URLs), identified by
    /// their ordering index rather than content.
    pub images: Vec<String>,
    pub route: RouteState,
}

impl Visit {
    fn new(place: Place, route: RouteState) -> Self {
        Visit {
            place,
            notes: String::new(),
            images: Vec::new(),
            route,
        }
    }
}

/// One resolved edge of a plan, as consumed by renderers.
#[derive(Clone, Copy, Debug)]
pub struct Edge<'a> {
    pub from: &'a Visit,
    pub to: &'a Visit,
    pub route: &'a RouteDescriptor,
}

/// The ordered sequence of visits for one trip, with the derivation rules
/// that keep each visit's route consistent with its position.
///
/// Invariants held after every operation:
/// - the visit at position 0 never has a route (it is the trip's origin);
/// - no two visits reference places with the same exact name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    visits: Vec<Visit>,
}

impl TripPlan {
    pub fn new() -> Self {
        TripPlan::default()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn get(&self, index: usize) -> Option<&Visit> {
        self.visits.get(index)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.visits.len() {
            Ok(())
        } else {
            Err(TripError::InvalidIndex {
                index,
                len: self.visits.len(),
            })
        }
    }

    /// Appends a visit for `place` at the end of the plan.
    ///
    /// Adding a place whose name exactly matches an existing visit's place
    /// name is a no-op, not an error; returns whether a visit was appended.
    /// When the plan already had visits, the new visit starts in
    /// `Pending` until its incoming edge is classified with
    /// [`TripPlan::set_route`].
    pub fn add_place(&mut self, place: Place) -> bool {
        if self.visits.iter().any(|v| v.place.name == place.name) {
            return false;
        }
        let route = if self.visits.is_empty() {
            RouteState::NoRoute
        } else {
            RouteState::Pending
        };
        self.visits.push(Visit::new(place, route));
        true
    }

    /// Deletes the visit at `index` and re-derives the routing invariants:
    /// the new origin loses its route, and any later visit whose edge was
    /// still unclassified is defaulted to a normal line so no stop is left
    /// silently disconnected. Returns the removed visit.
    pub fn remove_at(&mut self, index: usize) -> Result<Visit> {
        self.check_index(index)?;
        let removed = self.visits.remove(index);
        self.renormalize();
        Ok(removed)
    }

    /// Swaps the visit at `index` with its predecessor. No-op at position 0;
    /// returns whether a swap happened.
    ///
    /// Route state stays attached to the *position*, not the visit: the
    /// descriptor describes "the edge arriving at this position", so after a
    /// swap each edge silently applies to a different pair of places. This
    /// mirrors the long-standing observed behavior; see DESIGN.md.
    pub fn move_up(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap_payloads(index, index - 1);
        Ok(true)
    }

    /// Swaps the visit at `index` with its successor. No-op at the last
    /// position; returns whether a swap happened.
    pub fn move_down(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if index == self.visits.len() - 1 {
            return Ok(false);
        }
        self.swap_payloads(index, index + 1);
        Ok(true)
    }

    /// Classifies the edge arriving at `index`, resolving a pending state.
    ///
    /// Fails with `InvalidIndex` for position 0 (the origin never has a
    /// route) and for out-of-range indices. `color` is stored verbatim for
    /// every kind; renderers only honor it for `Normal`.
    pub fn set_route(&mut self, index: usize, kind: RouteKind, color: &str) -> Result<()> {
        self.check_index(index)?;
        if index == 0 {
            return Err(TripError::InvalidIndex {
                index,
                len: self.visits.len(),
            });
        }
        self.visits[index].route = RouteState::Resolved(RouteDescriptor::new(kind, color));
        Ok(())
    }

    pub fn set_notes(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.visits[index].notes = text.into();
        Ok(())
    }

    pub fn add_image(&mut self, index: usize, data: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.visits[index].images.push(data.into());
        Ok(())
    }

    /// Removes the image at `img_index` of the visit at `index` and returns
    /// its payload.
    pub fn remove_image(&mut self, index: usize, img_index: usize) -> Result<String> {
        self.check_index(index)?;
        let images = &mut self.visits[index].images;
        if img_index >= images.len() {
            return Err(TripError::InvalidIndex {
                index: img_index,
                len: images.len(),
            });
        }
        Ok(images.remove(img_index))
    }

    /// Produces `(from, to, route)` for every visit whose incoming edge is
    /// resolved, in plan order. Edges still pending classification are
    /// skipped. This is the only plan state renderers consume.
    pub fn ordered_edges(&self) -> Vec<Edge<'_>> {
        let mut edges = Vec::new();
        for i in 1..self.visits.len() {
            if let Some(route) = self.visits[i].route.descriptor() {
                edges.push(Edge {
                    from: &self.visits[i - 1],
                    to: &self.visits[i],
                    route,
                });
            }
        }
        edges
    }

    /// Position of the first visit still awaiting route classification.
    pub fn first_pending(&self) -> Option<usize> {
        self.visits.iter().position(|v| v.route.is_pending())
    }

    /// Swap everything that belongs to the visit itself; route state stays
    /// at its position.
    fn swap_payloads(&mut self, a: usize, b: usize) {
        self.visits.swap(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.visits.split_at_mut(hi);
        std::mem::swap(&mut left[lo].route, &mut right[0].route);
    }

    /// Re-derives the routing invariants after a structural change: the
    /// origin has no route, and every later unresolved edge becomes a normal
    /// line with the default color.
    fn renormalize(&mut self) {
        for (i, visit) in self.visits.iter_mut().enumerate() {
            if i == 0 {
                visit.route = RouteState::NoRoute;
            } else if !visit.route.is_resolved() {
                visit.route = RouteState::Resolved(RouteDescriptor::new(
                    RouteKind::Normal,
                    DEFAULT_ROUTE_COLOR,
                ));
            }
        }
    }

    /// Clears the origin's route without touching later edges. Used when a
    /// plan is rebuilt from stored or imported records.
    pub(crate) fn clear_origin_route(&mut self) {
        if let Some(first) = self.visits.first_mut() {
            first.route = RouteState::NoRoute;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo() -> Place {
        Place::new("Tokyo", "Japan", 35.6762, 139.6503)
    }

    fn osaka() -> Place {
        Place::new("Osaka", "Japan", 34.6937, 135.5023)
    }

    fn kyoto() -> Place {
        Place::new("Kyoto", "Japan", 35.0116, 135.7681)
    }

    #[test]
    fn first_visit_has_no_route_later_ones_are_pending() {
        let mut plan = TripPlan::new();
        assert!(plan.add_place(tokyo()));
        assert_eq!(plan.visits()[0].route, RouteState::NoRoute);

        assert!(plan.add_place(osaka()));
        assert!(plan.visits()[1].route.is_pending());
        assert_eq!(plan.first_pending(), Some(1));
        // Pending edges are invisible to renderers
        assert!(plan.ordered_edges().is_empty());
    }

    #[test]
    fn duplicate_place_name_is_a_noop() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        let before = plan.clone();

        assert!(!plan.add_place(Place::new("Tokyo", "Sweden", 1.0, 2.0)));
        assert_eq!(plan, before);
    }

    #[test]
    fn classify_then_render_one_edge() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        plan.set_route(1, RouteKind::Airplane, "#3b82f6").unwrap();

        let edges = plan.ordered_edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from.place.name, "Tokyo");
        assert_eq!(edges[0].to.place.name, "Osaka");
        assert_eq!(edges[0].route.kind, RouteKind::Airplane);
    }

    #[test]
    fn set_route_rejects_origin_and_out_of_range() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());

        assert!(matches!(
            plan.set_route(0, RouteKind::Car, "#000000"),
            Err(TripError::InvalidIndex { index: 0, .. })
        ));
        assert!(matches!(
            plan.set_route(2, RouteKind::Car, "#000000"),
            Err(TripError::InvalidIndex { index: 2, .. })
        ));
    }

    #[test]
    fn set_route_is_idempotent() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        plan.set_route(1, RouteKind::Walking, "#123456").unwrap();
        let once = plan.clone();
        plan.set_route(1, RouteKind::Walking, "#123456").unwrap();
        assert_eq!(plan, once);
    }

    #[test]
    fn removal_defaults_only_unresolved_routes() {
        // [A(no route), B(normal,#ff0000), C(car,#000000)]: removing B keeps
        // C's resolved classification; only unset edges are defaulted.
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        plan.add_place(kyoto());
        plan.set_route(1, RouteKind::Normal, "#ff0000").unwrap();
        plan.set_route(2, RouteKind::Car, "#000000").unwrap();

        let removed = plan.remove_at(1).unwrap();
        assert_eq!(removed.place.name, "Osaka");
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.visits()[0].route, RouteState::NoRoute);
        assert_eq!(
            plan.visits()[1].route,
            RouteState::Resolved(RouteDescriptor::new(RouteKind::Car, "#000000"))
        );
    }

    #[test]
    fn removing_the_origin_defaults_pending_successor() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        plan.add_place(kyoto());
        plan.set_route(2, RouteKind::Airplane, "#3b82f6").unwrap();

        // Visit 1 is still pending when its predecessor goes away.
        plan.remove_at(0).unwrap();
        assert_eq!(plan.visits()[0].route, RouteState::NoRoute);
        assert_eq!(
            plan.visits()[1].route,
            RouteState::Resolved(RouteDescriptor::new(
                RouteKind::Airplane,
                "#3b82f6"
            ))
        );
        assert_eq!(plan.first_pending(), None);
    }

    #[test]
    fn remove_out_of_range_fails_without_mutation() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        let before = plan.clone();
        assert!(matches!(
            plan.remove_at(3),
            Err(TripError::InvalidIndex { index: 3, len: 1 })
        ));
        assert_eq!(plan, before);
    }

    #[test]
    fn moves_swap_payloads_but_routes_stay_with_positions() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        plan.add_place(kyoto());
        plan.set_route(1, RouteKind::Airplane, "#3b82f6").unwrap();
        plan.set_route(2, RouteKind::Walking, "#10b981").unwrap();

        assert!(plan.move_up(1).unwrap());
        // Places swapped...
        assert_eq!(plan.visits()[0].place.name, "Osaka");
        assert_eq!(plan.visits()[1].place.name, "Tokyo");
        // ...but the origin is still route-less and position 1 still owns
        // the airplane edge.
        assert_eq!(plan.visits()[0].route, RouteState::NoRoute);
        assert_eq!(
            plan.visits()[1].route.descriptor().unwrap().kind,
            RouteKind::Airplane
        );
    }

    #[test]
    fn moves_are_noops_at_the_boundaries() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        let before = plan.clone();

        assert!(!plan.move_up(0).unwrap());
        assert!(!plan.move_down(1).unwrap());
        assert_eq!(plan, before);

        assert!(plan.move_up(5).is_err());
        assert!(plan.move_down(5).is_err());
    }

    #[test]
    fn origin_invariant_holds_under_operation_sequences() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());
        plan.add_place(osaka());
        plan.add_place(kyoto());
        plan.set_route(1, RouteKind::Normal, "#ff0000").unwrap();

        let ops: &[&dyn Fn(&mut TripPlan)] = &[
            &|p| {
                p.move_down(0).unwrap();
            },
            &|p| {
                p.remove_at(1).unwrap();
            },
            &|p| {
                p.add_place(Place::new("Nara", "Japan", 34.6851, 135.8050));
            },
            &|p| {
                p.move_up(1).unwrap();
            },
        ];
        for op in ops {
            op(&mut plan);
            assert_eq!(plan.visits()[0].route, RouteState::NoRoute);
        }
    }

    #[test]
    fn notes_and_images_are_bounds_checked() {
        let mut plan = TripPlan::new();
        plan.add_place(tokyo());

        plan.set_notes(0, "ramen tour").unwrap();
        plan.add_image(0, "data:image/png;base64,AAAA").unwrap();
        assert_eq!(plan.visits()[0].images.len(), 1);

        assert!(plan.set_notes(1, "nope").is_err());
        assert!(plan.add_image(1, "x").is_err());
        assert!(plan.remove_image(0, 5).is_err());

        let payload = plan.remove_image(0, 0).unwrap();
        assert!(payload.starts_with("data:image/png"));
        assert!(plan.visits()[0].images.is_empty());
    }
}
