//! Cumulative arrival-time projection along an ordered stop list.

use std::collections::HashMap;

use fd_core::NodeId;
use fd_spatial::{Router, SpatialGraph, SpatialResult};

/// Arrival time at each stop of a projected trip, relative to departure.
///
/// When a node appears several times in the stop list, the **last** visit
/// wins: `arrival(n)` is the time the vehicle finally gets to `n`.  An
/// unreachable leg makes its stop, and every stop after it, infinite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    arrivals: HashMap<NodeId, f64>,
    total:    f64,
}

impl Timeline {
    /// Projected arrival at `node`, or `None` if it is not a stop.
    #[inline]
    pub fn arrival(&self, node: NodeId) -> Option<f64> {
        self.arrivals.get(&node).copied()
    }

    /// Arrival at the final stop (0 for an empty stop list).
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of distinct stops.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}

/// Walk `stops` from `start`, summing shortest-path costs leg by leg.
///
/// # Errors
///
/// Propagates [`SpatialError::NodeNotFound`](fd_spatial::SpatialError) if
/// `start` or a stop is not in `graph`.
pub fn compute_timeline<R: Router + ?Sized>(
    router: &R,
    graph:  &SpatialGraph,
    start:  NodeId,
    stops:  &[NodeId],
) -> SpatialResult<Timeline> {
    let mut arrivals = HashMap::with_capacity(stops.len());
    let mut total = 0.0;
    let mut current = start;
    for &stop in stops {
        total += router.shortest_path(graph, current, stop)?.cost;
        arrivals.insert(stop, total);
        current = stop;
    }
    Ok(Timeline { arrivals, total })
}
