//! Fluent builder for constructing a [`SimulationWorld`].

use fd_core::{DispatchConfig, NodeId};
use fd_spatial::{Router, SpatialGraph};

use crate::{SimResult, SimulationWorld};

/// Fluent builder for [`SimulationWorld<R>`].
///
/// # Required inputs
///
/// - [`DispatchConfig`]: capacity, motion step, delay thresholds
/// - `R: Router`: the routing algorithm (e.g. [`fd_spatial::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                           |
/// |----------------------|-----------------------------------|
/// | `.graph(g)`          | Empty `SpatialGraph`              |
/// | `.vehicles(starts)`  | No vehicles                       |
/// | `.vehicle(start, c)` | No vehicles                       |
///
/// Vehicles from `.vehicles` get `config.capacity` seats.  They are created
/// in call order, so `VehicleId`s follow that order.
///
/// # Example
///
/// ```
/// use fd_core::{DispatchConfig, NodeId, SimRng};
/// use fd_sim::{NoopObserver, WorldBuilder};
/// use fd_spatial::{Bounds, DijkstraRouter, complete_graph};
///
/// let mut rng = SimRng::new(7);
/// let graph = complete_graph(&mut rng, 6, Bounds::padded(800.0, 600.0, 100.0)).unwrap();
///
/// let mut world = WorldBuilder::new(DispatchConfig::default(), DijkstraRouter)
///     .graph(graph)
///     .vehicles([NodeId(0), NodeId(3)])
///     .build()
///     .unwrap();
///
/// world.submit_request(NodeId(1), NodeId(4)).unwrap();
/// assert!(world.run_until_idle(10_000, &mut NoopObserver).unwrap());
/// assert!(world.pending_requests().is_empty());
/// ```
pub struct WorldBuilder<R: Router> {
    config:   DispatchConfig,
    router:   R,
    graph:    Option<SpatialGraph>,
    vehicles: Vec<(NodeId, Option<usize>)>,
}

impl<R: Router> WorldBuilder<R> {
    pub fn new(config: DispatchConfig, router: R) -> Self {
        Self {
            config,
            router,
            graph:    None,
            vehicles: Vec::new(),
        }
    }

    /// Supply the transportation network.
    pub fn graph(mut self, graph: SpatialGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Add one vehicle per start node, each with `config.capacity` seats.
    pub fn vehicles(mut self, starts: impl IntoIterator<Item = NodeId>) -> Self {
        self.vehicles.extend(starts.into_iter().map(|n| (n, None)));
        self
    }

    /// Add a single vehicle with an explicit capacity.
    pub fn vehicle(mut self, start: NodeId, capacity: usize) -> Self {
        self.vehicles.push((start, Some(capacity)));
        self
    }

    /// Validate the configuration, place vehicles, and return a world at
    /// tick 0.
    ///
    /// # Errors
    ///
    /// Invalid configuration, a start node missing from the graph, or a zero
    /// capacity.
    pub fn build(self) -> SimResult<SimulationWorld<R>> {
        let graph = self.graph.unwrap_or_default();
        let mut world = SimulationWorld::with_graph(self.config, self.router, graph)?;
        for (start, capacity) in self.vehicles {
            match capacity {
                Some(c) => world.create_vehicle(start, c)?,
                None => world.create_default_vehicle(start)?,
            };
        }
        log::debug!(
            "world built: {} nodes, {} vehicles",
            world.graph.node_count(),
            world.fleet.len()
        );
        Ok(world)
    }
}
