//! The `SimulationWorld` context object and its step loop.

use fd_core::{DispatchConfig, NodeId, Point, RequestId, SimClock, Tick, VehicleId};
use fd_dispatch::{DispatchEngine, PendingPool, Request, Resolution};
use fd_fleet::{Fleet, MotionEvent, VehicleSnapshot};
use fd_spatial::{DijkstraRouter, Router, SpatialGraph};

use crate::{SimObserver, SimResult, TickStats};

/// Everything the dispatch engine knows about, in one place.
///
/// `SimulationWorld<R>` owns the network, the fleet, the pending pool, and
/// the clock.  Drivers mutate it through a handful of entry points:
///
/// - setup: [`create_node`](Self::create_node), [`create_edge`](Self::create_edge),
///   [`create_vehicle`](Self::create_vehicle)
/// - input: [`submit_request`](Self::submit_request)
/// - time: [`step`](Self::step), or the finer-grained
///   [`resolve_pending`](Self::resolve_pending) and
///   [`tick_motion`](Self::tick_motion)
///
/// Create one via [`SimulationWorld::new`] or
/// [`WorldBuilder`][crate::WorldBuilder].
pub struct SimulationWorld<R: Router = DijkstraRouter> {
    /// Validated configuration (capacity, motion, delay thresholds).
    pub config: DispatchConfig,

    /// Current tick; advanced once per [`step`](Self::step).
    pub clock: SimClock,

    /// Transportation network.  Shared read-only by routing and pricing.
    pub graph: SpatialGraph,

    /// Shortest-path algorithm used for pricing and motion.
    pub router: R,

    pub fleet: Fleet,

    /// Requests not yet assigned, oldest first.
    pub pending: PendingPool,

    pub dispatch: DispatchEngine,
}

impl<R: Router> SimulationWorld<R> {
    /// An empty world: no nodes, no vehicles, clock at tick 0.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`](crate::SimError::Config) if `config` fails
    /// validation.
    pub fn new(config: DispatchConfig, router: R) -> SimResult<Self> {
        Self::with_graph(config, router, SpatialGraph::new())
    }

    /// A world over an existing network.
    pub fn with_graph(config: DispatchConfig, router: R, graph: SpatialGraph) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            dispatch: DispatchEngine::from_config(&config),
            config,
            clock:    SimClock::new(),
            graph,
            router,
            fleet:    Fleet::new(),
            pending:  PendingPool::new(),
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    pub fn create_node(&mut self, id: NodeId, pos: Point) -> SimResult<()> {
        Ok(self.graph.add_node(id, pos)?)
    }

    /// Undirected edge of explicit `weight`.
    pub fn create_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> SimResult<()> {
        Ok(self.graph.add_edge(a, b, weight)?)
    }

    /// Park a vehicle of `capacity` seats at `start`.
    pub fn create_vehicle(&mut self, start: NodeId, capacity: usize) -> SimResult<VehicleId> {
        let id = self.fleet.add(&self.graph, start, capacity)?;
        log::debug!("{id} created at {start} with {capacity} seats");
        Ok(id)
    }

    /// Park a vehicle with `config.capacity` seats at `start`.
    pub fn create_default_vehicle(&mut self, start: NodeId) -> SimResult<VehicleId> {
        self.create_vehicle(start, self.config.capacity)
    }

    // ── Input ─────────────────────────────────────────────────────────────

    /// Queue a ride request stamped with the current tick.
    ///
    /// # Errors
    ///
    /// `from == to`, or either node unknown.
    pub fn submit_request(&mut self, from: NodeId, to: NodeId) -> SimResult<RequestId> {
        let id = self.pending.submit(&self.graph, from, to, self.clock.now())?;
        log::debug!("{id} submitted: {from} -> {to}");
        Ok(id)
    }

    // ── Time ──────────────────────────────────────────────────────────────

    /// The current tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Advance every vehicle by one `config.motion_step`.  Does not move the
    /// clock.
    pub fn tick_motion(&mut self) -> SimResult<Vec<(VehicleId, MotionEvent)>> {
        Ok(self.fleet.tick_motion(
            &self.router,
            &self.graph,
            self.config.motion_step,
            self.config.arrival_threshold,
        )?)
    }

    /// Offer every pending request to the fleet once, in submission order.
    ///
    /// Holds no timing state; throttling is the caller's concern.
    pub fn resolve_pending(&mut self) -> SimResult<Vec<Resolution>> {
        let now = self.clock.now();
        Ok(self.dispatch.resolve_pending(
            &self.router,
            &self.graph,
            &mut self.fleet,
            &mut self.pending,
            now,
        )?)
    }

    /// One driver frame: an optional resolution pass, one motion tick, then
    /// the clock advances.
    pub fn step<O: SimObserver>(&mut self, resolve: bool, observer: &mut O) -> SimResult<TickStats> {
        let now = self.clock.now();
        observer.on_tick_start(now);

        let mut stats = TickStats::default();

        if resolve {
            for resolution in self.resolve_pending()? {
                if resolution.accepted() {
                    stats.assigned += 1;
                }
                observer.on_resolution(now, resolution);
            }
        }

        for (vehicle, event) in self.tick_motion()? {
            if matches!(event, MotionEvent::StopServed { .. }) {
                stats.stops_served += 1;
            }
            observer.on_motion_event(now, vehicle, event);
        }

        stats.pending    = self.pending.len();
        stats.passengers = self.fleet.passenger_count();
        observer.on_tick_end(now, &stats);

        self.clock.advance();
        Ok(stats)
    }

    /// Step (resolving every tick) until nothing is pending and every
    /// vehicle is idle, or `max_ticks` steps have run.
    ///
    /// Returns `true` if the world went idle, `false` if `max_ticks` ran out
    /// first (for example a request no vehicle can ever serve).
    pub fn run_until_idle<O: SimObserver>(&mut self, max_ticks: u64, observer: &mut O) -> SimResult<bool> {
        let mut steps = 0;
        while !self.is_idle() {
            if steps == max_ticks {
                observer.on_sim_end(self.clock.now());
                return Ok(false);
            }
            self.step(true, observer)?;
            steps += 1;
        }
        observer.on_sim_end(self.clock.now());
        Ok(true)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if no request is pending and every vehicle is idle.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.fleet.all_idle()
    }

    pub fn vehicle_snapshot(&self, id: VehicleId) -> SimResult<VehicleSnapshot> {
        Ok(self.fleet.snapshot(id)?)
    }

    /// Snapshots of every vehicle, in `VehicleId` order.
    pub fn vehicle_snapshots(&self) -> Vec<VehicleSnapshot> {
        self.fleet.iter().map(|v| v.snapshot()).collect()
    }

    pub fn pending_requests(&self) -> &[Request] {
        self.pending.as_slice()
    }
}
