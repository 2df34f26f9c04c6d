//! Random scenario networks.
//!
//! Scatters nodes uniformly over a rectangle and connects every pair with a
//! straight-line edge.  Dense, but the simulator's networks are a few dozen
//! nodes at most.

use fd_core::{NodeId, Point, SimRng};

use crate::{SpatialGraph, SpatialResult};

/// Axis-aligned rectangle nodes are placed in.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// A `width × height` canvas with `padding` kept clear on every side.
    pub fn padded(width: f64, height: f64, padding: f64) -> Self {
        Self {
            min: Point::new(padding, padding),
            max: Point::new(width - padding, height - padding),
        }
    }

    fn sample(&self, rng: &mut SimRng) -> Point {
        // `gen_range` panics on an empty range; a degenerate axis is a line.
        let x = if self.max.x > self.min.x { rng.gen_range(self.min.x..self.max.x) } else { self.min.x };
        let y = if self.max.y > self.min.y { rng.gen_range(self.min.y..self.max.y) } else { self.min.y };
        Point::new(x, y)
    }
}

/// Build a complete graph of `count` nodes labelled `NodeId(0..count)`.
///
/// Every pair `(i, j)` is joined by an edge weighted by the Euclidean
/// distance between the two random positions.
///
/// # Example
///
/// ```
/// use fd_core::SimRng;
/// use fd_spatial::{Bounds, complete_graph};
///
/// let mut rng = SimRng::new(42);
/// let graph = complete_graph(&mut rng, 5, Bounds::padded(800.0, 600.0, 100.0)).unwrap();
/// assert_eq!(graph.node_count(), 5);
/// assert_eq!(graph.edge_count(), 10); // 5 choose 2
/// ```
pub fn complete_graph(rng: &mut SimRng, count: u32, bounds: Bounds) -> SpatialResult<SpatialGraph> {
    let mut graph = SpatialGraph::with_capacity(count as usize);
    for i in 0..count {
        graph.add_node(NodeId(i), bounds.sample(rng))?;
    }
    for i in 0..count {
        for j in (i + 1)..count {
            graph.add_euclidean_edge(NodeId(i), NodeId(j))?;
        }
    }
    log::debug!(
        "generated complete graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
