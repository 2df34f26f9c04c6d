//! `fd-fleet` — vehicles, their stop queues, and how they move.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`timeline`]  | `compute_timeline`: cumulative arrival times along a stop list    |
//! | [`vehicle`]   | `Vehicle`, `PassengerRecord`, `VehicleSnapshot`                   |
//! | [`insertion`] | `evaluate_insertion` / `apply_insertion`, `Quote`, `DelayPolicy`  |
//! | [`motion`]    | `MotionState`, `MotionPhase`, `MotionEvent`, `Vehicle::advance`   |
//! | [`fleet`]     | `Fleet`: `Vec<Vehicle>` indexed by `VehicleId`, fleet-wide ticks  |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                                    |
//!
//! # Movement model (kinematic stepping)
//!
//! Vehicles have a continuous position that slides toward the next
//! waypoint by a fixed distance per motion tick:
//!
//! 1. With no active route, the vehicle routes from its last reached node to
//!    the head of its stop queue and follows the path waypoint by waypoint.
//! 2. Within `arrival_threshold` of a waypoint it snaps onto it; that node
//!    becomes its `location`.
//! 3. Reaching the queue head pops the stop and releases every passenger
//!    whose destination is that node.
//!
//! Pricing (`evaluate_insertion`) always projects from `location`, the last
//! node actually reached, never from the mid-edge position.

pub mod error;
pub mod fleet;
pub mod insertion;
pub mod motion;
pub mod timeline;
pub mod vehicle;


pub use error::{FleetError, FleetResult};
pub use fleet::Fleet;
pub use insertion::{DelayPolicy, InsertionPlan, Quote, RejectReason};
pub use motion::{MotionEvent, MotionPhase, MotionState};
pub use timeline::{Timeline, compute_timeline};
pub use vehicle::{PassengerRecord, Vehicle, VehicleSnapshot};
