//! Transportation network representation.
//!
//! # Data layout
//!
//! Nodes are stored densely in insertion order.  A node's **slot** (its
//! position in that order) indexes the coordinate and adjacency vectors, so
//! the routers' inner loops work on plain `Vec`s keyed by slot and only
//! translate back to `NodeId` when rebuilding the path.
//!
//! ```text
//! index:     NodeId -> slot
//! ids:       slot   -> NodeId
//! positions: slot   -> Point
//! adjacency: slot   -> [Neighbor { slot, weight }, ...]
//! ```
//!
//! Edges are undirected: `add_edge(a, b, w)` pushes `b` onto `a`'s list and
//! `a` onto `b`'s.  Parallel edges are kept; routing simply relaxes both.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a plane coordinate to the nearest `NodeId`.
//! Presentation layers use it for hit-testing; routing never touches it.

use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use fd_core::{NodeId, Point};

use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Adjacency ─────────────────────────────────────────────────────────────────

/// One directed half of an undirected edge, as stored in an adjacency list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Adjacent {
    pub slot:   usize,
    pub weight: f64,
}

/// A neighbouring node and the weight of the edge leading to it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    pub node:   NodeId,
    pub weight: f64,
}

// ── SpatialGraph ──────────────────────────────────────────────────────────────

/// Undirected weighted graph of labelled plane points.
///
/// Nodes and edges can be added at any time; nothing is ever removed, so a
/// node's slot is stable for the life of the graph.
pub struct SpatialGraph {
    index:      HashMap<NodeId, usize>,
    ids:        Vec<NodeId>,
    positions:  Vec<Point>,
    adjacency:  Vec<Vec<Adjacent>>,
    edge_count: usize,
    spatial_idx: RTree<NodeEntry>,
}

impl SpatialGraph {
    /// Construct an empty network with no nodes or edges.
    pub fn new() -> Self {
        Self {
            index:       HashMap::new(),
            ids:         Vec::new(),
            positions:   Vec::new(),
            adjacency:   Vec::new(),
            edge_count:  0,
            spatial_idx: RTree::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            index:       HashMap::with_capacity(nodes),
            ids:         Vec::with_capacity(nodes),
            positions:   Vec::with_capacity(nodes),
            adjacency:   Vec::with_capacity(nodes),
            edge_count:  0,
            spatial_idx: RTree::new(),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a node labelled `id` at `pos`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::DuplicateNode`] if `id` is already in the graph.
    pub fn add_node(&mut self, id: NodeId, pos: Point) -> SpatialResult<()> {
        if self.index.contains_key(&id) {
            return Err(SpatialError::DuplicateNode(id));
        }
        let slot = self.ids.len();
        self.index.insert(id, slot);
        self.ids.push(id);
        self.positions.push(pos);
        self.adjacency.push(Vec::new());
        self.spatial_idx.insert(NodeEntry { point: [pos.x, pos.y], id });
        Ok(())
    }

    /// Add an undirected edge between `a` and `b`, traversable both ways at
    /// cost `weight`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NodeNotFound`] if either endpoint is missing.
    /// - [`SpatialError::InvalidWeight`] if `weight` is negative or NaN.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> SpatialResult<()> {
        let sa = self.slot(a)?;
        let sb = self.slot(b)?;
        if weight.is_nan() || weight < 0.0 {
            return Err(SpatialError::InvalidWeight { from: a, to: b, weight });
        }
        self.adjacency[sa].push(Adjacent { slot: sb, weight });
        self.adjacency[sb].push(Adjacent { slot: sa, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Convenience: add an edge weighted by the straight-line distance
    /// between its endpoints.  Returns the weight used.
    pub fn add_euclidean_edge(&mut self, a: NodeId, b: NodeId) -> SpatialResult<f64> {
        let weight = self.distance(a, b)?;
        self.add_edge(a, b, weight)?;
        Ok(weight)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of undirected edges (each `add_edge` call counts once).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// All node ids in insertion order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.ids
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Coordinate of `id`.
    pub fn position(&self, id: NodeId) -> SpatialResult<Point> {
        Ok(self.positions[self.slot(id)?])
    }

    /// Straight-line distance between two nodes' coordinates.
    ///
    /// Used to seed edge weights.  This is not a path length: the graph may
    /// route around obstacles or have no path at all.
    pub fn distance(&self, a: NodeId, b: NodeId) -> SpatialResult<f64> {
        Ok(self.position(a)?.distance(self.position(b)?))
    }

    /// Neighbours of `id` with the weight of each connecting edge.
    ///
    /// Parallel edges appear once per edge.
    pub fn neighbors(&self, id: NodeId) -> SpatialResult<impl Iterator<Item = Neighbor> + '_> {
        let slot = self.slot(id)?;
        Ok(self.adjacency[slot].iter().map(|adj| Neighbor {
            node:   self.ids[adj.slot],
            weight: adj.weight,
        }))
    }

    /// Weight of the cheapest direct edge `a - b`, or `None` if the two are
    /// not adjacent.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> SpatialResult<Option<f64>> {
        let sa = self.slot(a)?;
        let sb = self.slot(b)?;
        Ok(self.adjacency[sa]
            .iter()
            .filter(|adj| adj.slot == sb)
            .map(|adj| adj.weight)
            .min_by(f64::total_cmp))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` nearest to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn nearest_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }

    /// The nearest node to `pos` if it lies within `radius` (a click
    /// hit-test).
    pub fn node_within(&self, pos: Point, radius: f64) -> Option<NodeId> {
        let query = [pos.x, pos.y];
        self.spatial_idx
            .nearest_neighbor(&query)
            .filter(|e| e.distance_2(&query) <= radius * radius)
            .map(|e| e.id)
    }

    // ── Crate-internal slot access for routers ────────────────────────────

    #[inline]
    pub(crate) fn slot(&self, id: NodeId) -> SpatialResult<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(SpatialError::NodeNotFound(id))
    }

    #[inline]
    pub(crate) fn id_at(&self, slot: usize) -> NodeId {
        self.ids[slot]
    }

    #[inline]
    pub(crate) fn adjacent(&self, slot: usize) -> &[Adjacent] {
        &self.adjacency[slot]
    }
}

impl Default for SpatialGraph {
    fn default() -> Self {
        Self::new()
    }
}
