//! `fd-sim` — the world context object that drivers talk to.
//!
//! # Step loop
//!
//! ```text
//! each driver frame (SimulationWorld::step):
//!   ① Resolve: optional; offer every pending request to the fleet once,
//!               in submission order (throttled by the driver, not here).
//!   ② Motion:  advance every vehicle one motion_step toward its next
//!               waypoint, serving stops and releasing passengers.
//!   ③ Clock:   advance the tick.
//! ```
//!
//! Observer hooks fire for each resolution attempt and motion event, and
//! once per step with [`TickStats`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Prices quotes on Rayon's thread pool.               |
//! | `serde`    | Serde derives on configuration, ids, and snapshots. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fd_core::DispatchConfig;
//! use fd_sim::{LogObserver, WorldBuilder};
//! use fd_spatial::DijkstraRouter;
//!
//! let mut world = WorldBuilder::new(DispatchConfig::default(), DijkstraRouter)
//!     .graph(graph)
//!     .vehicles(starts)
//!     .build()?;
//! world.submit_request(from, to)?;
//! world.run_until_idle(10_000, &mut LogObserver::default())?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use observer::{LogObserver, NoopObserver, SimObserver, TickStats};
pub use world::SimulationWorld;
