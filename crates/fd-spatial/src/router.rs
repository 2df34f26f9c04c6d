//! Routing trait and the two Dijkstra implementations.
//!
//! # Pluggability
//!
//! The fleet and dispatch crates call routing via the [`Router`] trait, so
//! applications can swap in another algorithm (A*, a cached all-pairs table)
//! without touching the engine.
//!
//! # Unreachable destinations
//!
//! No path is an ordinary answer, not an error: the router returns
//! [`Route::unreachable`] (empty path, `cost = +∞`).  Infinite costs then
//! flow naturally through timeline sums and insertion comparisons.  Only an
//! unknown node id is an `Err`.
//!
//! # Tie-breaking
//!
//! When two unfinalised nodes share the minimum tentative distance, both
//! routers finalise the one added to the graph first.  Callers must not rely
//! on which of several equal-cost paths comes back; edge weights derived from
//! real coordinates are rarely exactly equal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fd_core::NodeId;

use crate::{SpatialGraph, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the nodes visited in order (both endpoints
/// included) and the summed edge weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: Vec<NodeId>,
    pub cost: f64,
}

impl Route {
    /// The "no path" answer.
    pub fn unreachable() -> Self {
        Self { path: Vec::new(), cost: f64::INFINITY }
    }

    /// `false` for [`Route::unreachable`].  Check before using `path`.
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.path.len() == 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so quotes can be priced on Rayon
/// worker threads (`fd-dispatch`'s `parallel` feature).
pub trait Router: Send + Sync {
    /// Least-cost route from `from` to `to`.
    ///
    /// `from == to` yields a one-node path at cost 0.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NodeNotFound`](crate::SpatialError::NodeNotFound) if
    /// either endpoint is not in `graph`.
    fn shortest_path(&self, graph: &SpatialGraph, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with a binary heap: O(E log V).
///
/// The default router.  Produces the same costs as [`LinearScanRouter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(&self, graph: &SpatialGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        let start  = graph.slot(from)?;
        let target = graph.slot(to)?;
        if start == target {
            return Ok(Route { path: vec![from], cost: 0.0 });
        }

        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut done = vec![false; n];

        dist[start] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { cost: 0.0, slot: start });

        while let Some(HeapEntry { cost, slot }) = heap.pop() {
            // Skip stale heap entries.
            if done[slot] {
                continue;
            }
            done[slot] = true;
            if slot == target {
                break;
            }

            for adj in graph.adjacent(slot) {
                if done[adj.slot] {
                    continue;
                }
                let alt = cost + adj.weight;
                if alt < dist[adj.slot] {
                    dist[adj.slot] = alt;
                    prev[adj.slot] = Some(slot);
                    heap.push(HeapEntry { cost: alt, slot: adj.slot });
                }
            }
        }

        Ok(reconstruct(graph, &prev, start, target, dist[target]))
    }
}

/// Min-heap entry: `BinaryHeap` is a max-heap, so the ordering is reversed.
/// Secondary key `slot` makes ties resolve to the earlier-added node.
#[derive(Copy, Clone)]
struct HeapEntry {
    cost: f64,
    slot: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

// ── LinearScanRouter ──────────────────────────────────────────────────────────

/// Textbook label-setting Dijkstra: each round scans every unfinalised node
/// for the minimum tentative distance.  O(V²).
///
/// Fine for the tens-of-nodes networks the simulator targets and handy as a
/// reference implementation in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScanRouter;

impl Router for LinearScanRouter {
    fn shortest_path(&self, graph: &SpatialGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        let start  = graph.slot(from)?;
        let target = graph.slot(to)?;
        if start == target {
            return Ok(Route { path: vec![from], cost: 0.0 });
        }

        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut done = vec![false; n];
        dist[start] = 0.0;

        loop {
            // Strict `<` keeps the earliest slot on ties.
            let mut best: Option<usize> = None;
            for slot in 0..n {
                if done[slot] || !dist[slot].is_finite() {
                    continue;
                }
                if best.is_none_or(|b| dist[slot] < dist[b]) {
                    best = Some(slot);
                }
            }
            // Everything still open is unreachable.
            let Some(u) = best else { break };
            done[u] = true;
            if u == target {
                break;
            }

            for adj in graph.adjacent(u) {
                if done[adj.slot] {
                    continue;
                }
                let alt = dist[u] + adj.weight;
                if alt < dist[adj.slot] {
                    dist[adj.slot] = alt;
                    prev[adj.slot] = Some(u);
                }
            }
        }

        Ok(reconstruct(graph, &prev, start, target, dist[target]))
    }
}

// ── Shared reconstruction ─────────────────────────────────────────────────────

/// Walk predecessor links from `target` back to `start` and reverse.
fn reconstruct(
    graph:  &SpatialGraph,
    prev:   &[Option<usize>],
    start:  usize,
    target: usize,
    cost:   f64,
) -> Route {
    if !cost.is_finite() {
        return Route::unreachable();
    }
    let mut path = vec![graph.id_at(target)];
    let mut cur = target;
    while let Some(p) = prev[cur] {
        path.push(graph.id_at(p));
        cur = p;
    }
    debug_assert_eq!(cur, start);
    path.reverse();
    Route { path, cost }
}
