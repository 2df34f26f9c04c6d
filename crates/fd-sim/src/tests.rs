//! Integration tests for fd-sim.

use fd_core::{DispatchConfig, NodeId, Point, Tick, VehicleId};
use fd_dispatch::Resolution;
use fd_fleet::{MotionEvent, MotionPhase};
use fd_spatial::DijkstraRouter;

use crate::{NoopObserver, SimError, SimObserver, SimulationWorld, TickStats, WorldBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: NodeId = NodeId(0);
const B: NodeId = NodeId(1);
const C: NodeId = NodeId(2);

/// World over a line A(0,0) – B(10,0) – C(20,0), 10 units per edge, no
/// vehicles yet.
fn line_world() -> SimulationWorld {
    let mut w = SimulationWorld::new(DispatchConfig::default(), DijkstraRouter).unwrap();
    w.create_node(A, Point::new(0.0, 0.0)).unwrap();
    w.create_node(B, Point::new(10.0, 0.0)).unwrap();
    w.create_node(C, Point::new(20.0, 0.0)).unwrap();
    w.create_edge(A, B, 10.0).unwrap();
    w.create_edge(B, C, 10.0).unwrap();
    w
}

/// Records every hook call as a line of text.
#[derive(Default)]
struct Recorder {
    log: Vec<String>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.log.push(format!("start {}", tick.0));
    }

    fn on_resolution(&mut self, tick: Tick, r: Resolution) {
        self.log.push(format!("resolve {} {} {:?}", tick.0, r.request.0, r.vehicle.map(|v| v.0)));
    }

    fn on_motion_event(&mut self, tick: Tick, vehicle: VehicleId, event: MotionEvent) {
        if let MotionEvent::StopServed { node, released } = event {
            self.log.push(format!("served {} {} {} {}", tick.0, vehicle.0, node.0, released));
        }
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.log.push(format!("end {} {}", tick.0, stats.pending));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.log.push(format!("sim_end {}", final_tick.0));
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let w = WorldBuilder::new(DispatchConfig::default(), DijkstraRouter).build().unwrap();
        assert!(w.graph.is_empty());
        assert!(w.fleet.is_empty());
        assert_eq!(w.now(), Tick(0));
        assert!(w.is_idle());
    }

    #[test]
    fn invalid_config_errors() {
        let config = DispatchConfig { capacity: 0, ..Default::default() };
        let result = WorldBuilder::new(config, DijkstraRouter).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn vehicles_placed_in_call_order() {
        let w = line_world();
        let w = WorldBuilder::new(DispatchConfig::default(), DijkstraRouter)
            .graph(w.graph)
            .vehicles([C, A])
            .vehicle(B, 2)
            .build()
            .unwrap();
        assert_eq!(w.fleet.len(), 3);
        assert_eq!(w.vehicle_snapshot(VehicleId(0)).unwrap().location, C);
        assert_eq!(w.fleet.get(VehicleId(1)).unwrap().capacity, 15);
        assert_eq!(w.fleet.get(VehicleId(2)).unwrap().capacity, 2);
    }

    #[test]
    fn start_outside_graph_errors() {
        let result = WorldBuilder::new(DispatchConfig::default(), DijkstraRouter)
            .vehicles([NodeId(3)])
            .build();
        assert!(matches!(result, Err(SimError::Fleet(_))));
    }
}

// ── Setup and input ───────────────────────────────────────────────────────────

#[cfg(test)]
mod setup_tests {
    use super::*;
    use fd_dispatch::DispatchError;

    #[test]
    fn duplicate_node_errors() {
        let mut w = line_world();
        assert!(matches!(w.create_node(A, Point::new(5.0, 5.0)), Err(SimError::Spatial(_))));
    }

    #[test]
    fn edge_to_unknown_node_errors() {
        let mut w = line_world();
        assert!(w.create_edge(A, NodeId(9), 1.0).is_err());
    }

    #[test]
    fn default_vehicle_uses_configured_capacity() {
        let mut w = line_world();
        let id = w.create_default_vehicle(B).unwrap();
        assert_eq!(w.fleet.get(id).unwrap().capacity, w.config.capacity);
    }

    #[test]
    fn bad_requests_rejected() {
        let mut w = line_world();
        assert!(matches!(
            w.submit_request(A, A),
            Err(SimError::Dispatch(DispatchError::SameOriginDestination(_)))
        ));
        assert!(matches!(
            w.submit_request(A, NodeId(7)),
            Err(SimError::Dispatch(DispatchError::Spatial(_)))
        ));
        assert!(w.pending_requests().is_empty());
    }

    #[test]
    fn requests_stamped_with_current_tick() {
        let mut w = line_world();
        w.step(false, &mut NoopObserver).unwrap();
        w.step(false, &mut NoopObserver).unwrap();
        w.submit_request(A, C).unwrap();
        assert_eq!(w.pending_requests()[0].created_at, Tick(2));
    }

    #[test]
    fn unknown_vehicle_snapshot_errors() {
        let w = line_world();
        assert!(matches!(w.vehicle_snapshot(VehicleId(0)), Err(SimError::Fleet(_))));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn resolution_runs_before_motion() {
        let mut w = line_world();
        w.create_vehicle(A, 1).unwrap();
        w.submit_request(A, C).unwrap();

        let mut rec = Recorder::default();
        let stats = w.step(true, &mut rec).unwrap();

        assert_eq!(rec.log, vec![
            "start 0",
            "resolve 0 0 Some(0)",
            "served 0 0 0 0",
            "end 0 0",
        ]);
        assert_eq!(stats, TickStats { assigned: 1, pending: 0, passengers: 1, stops_served: 1 });
        assert_eq!(w.now(), Tick(1));
    }

    #[test]
    fn step_without_resolve_leaves_pool_alone() {
        let mut w = line_world();
        w.create_vehicle(A, 1).unwrap();
        w.submit_request(A, C).unwrap();
        let stats = w.step(false, &mut NoopObserver).unwrap();
        assert_eq!(stats.assigned, 0);
        assert_eq!(w.pending_requests().len(), 1);
        assert_eq!(w.now(), Tick(1));
    }

    #[test]
    fn promise_uses_tick_of_resolution() {
        let mut w = line_world();
        w.create_vehicle(A, 1).unwrap();
        w.submit_request(A, C).unwrap();
        for _ in 0..5 {
            w.step(false, &mut NoopObserver).unwrap();
        }
        w.resolve_pending().unwrap();
        let v = w.fleet.get(VehicleId(0)).unwrap();
        assert_eq!(v.passengers[0].promised_arrival, 25.0);
    }

    #[test]
    fn snapshot_tracks_motion() {
        let mut w = line_world();
        let id = w.create_vehicle(A, 1).unwrap();
        w.submit_request(A, C).unwrap();
        w.step(true, &mut NoopObserver).unwrap();

        let snap = w.vehicle_snapshot(id).unwrap();
        assert_eq!(snap.location, A);
        assert_eq!(snap.position, Some(Point::new(5.0, 0.0)));
        assert_eq!(snap.stops, vec![C]);
        assert_eq!(snap.passenger_count, 1);
        assert_eq!(snap.phase, MotionPhase::RoutingToStop);
        assert_eq!(w.vehicle_snapshots(), vec![snap]);
    }
}

// ── Running to completion ─────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use fd_core::SimRng;
    use fd_spatial::{Bounds, complete_graph};

    #[test]
    fn capacity_one_serves_riders_one_after_another() {
        let mut w = line_world();
        w.create_vehicle(A, 1).unwrap();
        w.submit_request(A, C).unwrap();
        w.submit_request(A, C).unwrap();

        let mut rec = Recorder::default();
        assert!(w.run_until_idle(200, &mut rec).unwrap());

        let assigned: Vec<&String> = rec.log.iter().filter(|l| l.ends_with("Some(0)")).collect();
        assert_eq!(assigned.len(), 2);
        let delivered: usize = rec.log.iter().filter(|l| l.starts_with("served") && l.ends_with(" 1")).count();
        assert_eq!(delivered, 2);
        assert!(rec.log.last().unwrap().starts_with("sim_end"));
        assert_eq!(w.fleet.passenger_count(), 0);
        assert_eq!(w.vehicle_snapshot(VehicleId(0)).unwrap().location, C);
    }

    #[test]
    fn unservable_request_times_out() {
        let mut w = line_world();
        w.create_node(NodeId(10), Point::new(100.0, 100.0)).unwrap();
        w.create_node(NodeId(11), Point::new(110.0, 100.0)).unwrap();
        w.create_edge(NodeId(10), NodeId(11), 10.0).unwrap();
        w.create_vehicle(A, 15).unwrap();
        w.submit_request(NodeId(10), NodeId(11)).unwrap();

        assert!(!w.run_until_idle(30, &mut NoopObserver).unwrap());
        assert_eq!(w.now(), Tick(30));
        assert_eq!(w.pending_requests().len(), 1);
    }

    #[test]
    fn random_scenario_drains() {
        let mut rng = SimRng::new(2024);
        let graph = complete_graph(&mut rng, 12, Bounds::padded(800.0, 600.0, 100.0)).unwrap();
        let nodes = graph.node_ids().to_vec();

        let mut w = WorldBuilder::new(DispatchConfig::default(), DijkstraRouter)
            .graph(graph)
            .vehicles(nodes.iter().take(3).copied())
            .build()
            .unwrap();
        for _ in 0..12 {
            let (from, to) = rng.choose_pair(&nodes).unwrap();
            w.submit_request(from, to).unwrap();
        }

        assert!(w.run_until_idle(20_000, &mut NoopObserver).unwrap());
        assert!(w.pending_requests().is_empty());
        assert!(w.fleet.iter().all(|v| v.stops.is_empty() && v.passengers.is_empty()));
    }
}
