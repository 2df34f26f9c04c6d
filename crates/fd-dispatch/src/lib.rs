//! `fd-dispatch` — matching ride requests to vehicles.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`request`] | `Request` (validated), `PendingPool`                     |
//! | [`engine`]  | `DispatchEngine::assign` / `resolve_pending`, `Resolution` |
//! | [`error`]   | `DispatchError`, `DispatchResult<T>`                     |
//!
//! # Assignment
//!
//! Each request is priced independently on every vehicle
//! ([`fd_fleet::Vehicle::evaluate_insertion`]); the cheapest accepting
//! vehicle commits it.  There is no batching, no re-optimisation of earlier
//! bookings, and no reordering of the pool: a pass walks requests in
//! submission order and later requests see the stops booked by earlier ones.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                        |
//! |------------|---------------------------------------------------------------|
//! | `parallel` | Prices the fleet on Rayon's thread pool; commit stays serial. |
//! | `serde`    | `Serialize`/`Deserialize` on `Request` and `Resolution`.      |

pub mod engine;
pub mod error;
pub mod request;


pub use engine::{Assignment, DispatchEngine, Resolution};
pub use error::{DispatchError, DispatchResult};
pub use request::{PendingPool, Request};
