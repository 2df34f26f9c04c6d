//! Simulation observer trait for progress reporting and presentation.

use fd_core::{Tick, VehicleId};
use fd_dispatch::Resolution;
use fd_fleet::MotionEvent;

/// Counters reported at the end of every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Requests committed to a vehicle this step.
    pub assigned: usize,
    /// Requests still waiting after this step.
    pub pending: usize,
    /// Booked passengers across the fleet after this step.
    pub passengers: usize,
    /// Stops popped from vehicle queues this step.
    pub stops_served: usize,
}

/// Callbacks invoked by [`SimulationWorld::step`][crate::SimulationWorld::step].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Deliveries(usize);
///
/// impl SimObserver for Deliveries {
///     fn on_motion_event(&mut self, _tick: Tick, _vehicle: VehicleId, event: MotionEvent) {
///         if let MotionEvent::StopServed { released, .. } = event {
///             self.0 += released;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per request attempted during a resolution pass.
    fn on_resolution(&mut self, _tick: Tick, _resolution: Resolution) {}

    /// Called for every motion event, in vehicle order.
    fn on_motion_event(&mut self, _tick: Tick, _vehicle: VehicleId, _event: MotionEvent) {}

    /// Called at the end of each step, before the clock advances.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once when [`run_until_idle`][crate::SimulationWorld::run_until_idle]
    /// returns.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Reports assignments, deliveries, and periodic summaries through the
/// `log` facade at `info` level.
#[derive(Debug, Clone)]
pub struct LogObserver {
    /// Emit a summary every `interval` ticks; 0 disables summaries.
    pub interval: u64,
}

impl LogObserver {
    pub fn new(interval: u64) -> Self {
        Self { interval }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SimObserver for LogObserver {
    fn on_resolution(&mut self, tick: Tick, resolution: Resolution) {
        if let Some(vehicle) = resolution.vehicle {
            log::info!("{tick}: {} -> {vehicle}", resolution.request);
        }
    }

    fn on_motion_event(&mut self, tick: Tick, vehicle: VehicleId, event: MotionEvent) {
        match event {
            MotionEvent::StopServed { node, released } if released > 0 => {
                log::info!("{tick}: {vehicle} dropped {released} at {node}");
            }
            _ => {}
        }
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        if self.interval > 0 && tick.0.is_multiple_of(self.interval) {
            log::info!(
                "{tick}: {} pending, {} on board, {} assigned this tick",
                stats.pending, stats.passengers, stats.assigned,
            );
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        log::info!("simulation ended at {final_tick}");
    }
}
