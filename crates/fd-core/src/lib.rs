//! `fd-core` — foundational types for the `rust_fleet` dispatch engine.
//!
//! This crate is a dependency of every other `fd-*` crate.  It intentionally
//! has no `fd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `VehicleId`, `RequestId`                    |
//! | [`geo`]         | `Point`, Euclidean distance and stepping              |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `DispatchConfig` (capacity, motion, delay thresholds) |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`error`]       | `FdError`, `FdResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DispatchConfig;
pub use error::{FdError, FdResult};
pub use geo::Point;
pub use ids::{NodeId, RequestId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
