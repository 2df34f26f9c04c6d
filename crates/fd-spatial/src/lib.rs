//! `fd-spatial` — transportation network, spatial indexing, and routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`graph`]    | `SpatialGraph` (adjacency lists + R-tree), `Neighbor`       |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`, `LinearScanRouter` |
//! | [`generate`] | `complete_graph`, `Bounds`: random scenario networks        |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod generate;
pub mod graph;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use generate::{Bounds, complete_graph};
pub use graph::{Neighbor, SpatialGraph};
pub use router::{DijkstraRouter, LinearScanRouter, Route, Router};
