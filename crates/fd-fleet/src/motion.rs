//! The kinematic motion state machine.
//!
//! ```text
//!            stops queued                 waypoint within threshold,
//!   Idle ─────────────────▶ RoutingToStop ──── last waypoint == head ───▶ AtStop
//!    ▲                           ▲                                           │
//!    │        queue empty        │            more stops queued              │
//!    └───────────────────────────┴───────────────────────────────────────────┘
//! ```
//!
//! A head stop with no path parks the vehicle in `Waiting` until the head
//! changes or a later step finds a path.
//!
//! Each call to [`Vehicle::advance`] is one discrete step.  Nothing here
//! knows about frames or wall time; the caller decides the step distance.

use std::collections::VecDeque;

use fd_core::{NodeId, Point};
use fd_spatial::{Router, SpatialGraph};

use crate::{FleetResult, Vehicle};

/// Where a vehicle is in its stop-to-stop cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionPhase {
    /// Nothing queued, nothing to follow.
    Idle,
    /// Following (or about to plan) a path to the head of the stop queue.
    RoutingToStop,
    /// Standing on the head stop; the next step serves it.
    AtStop,
    /// The last planning attempt found no path to the head stop.
    Waiting,
}

/// Continuous-motion bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionState {
    /// Remaining waypoints of the active path; the front is the current
    /// target.  Empty when no path is active.
    pub route: VecDeque<NodeId>,

    /// Exact plane position.  `None` until the first step places the vehicle
    /// on its node's coordinate.
    pub position: Option<Point>,

    /// Head stop the last planning attempt could not reach.
    pub unreachable: Option<NodeId>,
}

impl MotionState {
    /// The waypoint the vehicle is heading for.
    #[inline]
    pub fn target(&self) -> Option<NodeId> {
        self.route.front().copied()
    }

    #[inline]
    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }
}

/// Something observable that happened during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// Snapped onto a path node; it is now the vehicle's `location`.
    WaypointReached(NodeId),
    /// Popped a stop from the queue, dropping off `released` passengers.
    StopServed { node: NodeId, released: usize },
    /// The head stop has no path from the current node.  The vehicle waits.
    StopUnreachable(NodeId),
}

impl Vehicle {
    /// Advance one discrete step of at most `step` distance.
    ///
    /// - No active path: serve any head stops equal to `location`, then plan
    ///   a path to the next head (dropping the path's first node, which is
    ///   `location` itself).
    /// - Active path: within `arrival_threshold` of the target, snap onto
    ///   it and pop it; if that finished the path on the head stop, serve
    ///   it.  Otherwise move `step` units toward the target.
    pub fn advance<R: Router + ?Sized>(
        &mut self,
        router:            &R,
        graph:             &SpatialGraph,
        step:              f64,
        arrival_threshold: f64,
    ) -> FleetResult<Vec<MotionEvent>> {
        let mut events = Vec::new();

        let pos = match self.motion.position {
            Some(p) => p,
            None => {
                let p = graph.position(self.location)?;
                self.motion.position = Some(p);
                p
            }
        };

        if !self.motion.has_route() {
            while self.stops.first() == Some(&self.location) {
                let released = self.serve_head();
                events.push(MotionEvent::StopServed { node: self.location, released });
            }
            if let Some(&head) = self.stops.first() {
                let route = router.shortest_path(graph, self.location, head)?;
                if !route.is_reachable() {
                    log::warn!("{}: no path from {} to stop {}", self.id, self.location, head);
                    events.push(MotionEvent::StopUnreachable(head));
                    self.motion.unreachable = Some(head);
                    return Ok(events);
                }
                self.motion.unreachable = None;
                self.motion.route = route.path.into_iter().skip(1).collect();
            }
        }

        let Some(target) = self.motion.target() else {
            return Ok(events);
        };
        let target_pos = graph.position(target)?;

        if pos.distance(target_pos) <= arrival_threshold {
            self.motion.position = Some(target_pos);
            self.location = target;
            self.motion.route.pop_front();
            log::trace!("{} reached waypoint {}", self.id, target);
            events.push(MotionEvent::WaypointReached(target));

            if !self.motion.has_route() && self.stops.first() == Some(&self.location) {
                let released = self.serve_head();
                events.push(MotionEvent::StopServed { node: self.location, released });
            }
        } else {
            self.motion.position = Some(pos.step_toward(target_pos, step));
        }

        Ok(events)
    }
}
